//! Response checks and client construction for the academic and
//! grey-literature sources.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};

use crate::error::SourceError;

/// User agent sent by every Scout source client.
pub const USER_AGENT: &str = "scout/0.1";

/// Back-off used when a 429 carries no usable `Retry-After`.
const DEFAULT_BACKOFF_SECS: u64 = 60;

/// Longest error body kept in [`SourceError::Api`], in characters.
const MAX_ERROR_BODY: usize = 300;

/// Build a `reqwest::Client` with the Scout user agent and a per-request
/// timeout.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Pass a 2xx response through unchanged.
///
/// A 429 becomes [`SourceError::RateLimited`]. Any other failure becomes
/// [`SourceError::Api`] with the start of the body, whitespace collapsed.
pub async fn ensure_success(resp: Response) -> Result<Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        let header = resp.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok());
        return Err(SourceError::RateLimited {
            retry_after_secs: backoff_secs(header),
        });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SourceError::Api {
        status: status.as_u16(),
        message: excerpt(&body),
    })
}

fn backoff_secs(retry_after: Option<&str>) -> u64 {
    retry_after
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_BACKOFF_SECS)
}

fn excerpt(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_ERROR_BODY {
        return flat;
    }
    let kept: String = flat.chars().take(MAX_ERROR_BODY).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn response(status: u16, retry_after: Option<&str>, body: &str) -> Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        Response::from(builder.body(body.to_string()).unwrap())
    }

    #[test]
    fn backoff_reads_seconds_or_falls_back() {
        assert_eq!(backoff_secs(Some(" 120 ")), 120);
        assert_eq!(backoff_secs(Some("Wed, 21 Oct 2026 07:28:00 GMT")), 60);
        assert_eq!(backoff_secs(None), 60);
    }

    #[test]
    fn excerpt_flattens_and_cuts_long_pages() {
        assert_eq!(excerpt("<h1>Bad\n\n  Gateway</h1>"), "<h1>Bad Gateway</h1>");
        let cut = excerpt(&"x".repeat(1000));
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY + 1);
        assert!(cut.ends_with('…'));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = ensure_success(response(429, Some("30"), ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn failure_status_keeps_code_and_body() {
        let err = ensure_success(response(503, None, "graph\n  unavailable"))
            .await
            .unwrap_err();
        match err {
            SourceError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "graph unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = ensure_success(response(200, None, "{}")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "{}");
    }

    #[test]
    fn client_builds_with_timeout() {
        assert!(build_client(10).is_ok());
    }
}
