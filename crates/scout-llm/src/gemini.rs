//! Gemini `generateContent` client.

use std::time::Duration;

use scout_config::LlmConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LlmError;
use crate::schema::to_response_schema;
use crate::TextGenerator;

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::NotConfigured`] when no API key or model is set,
    /// or [`LlmError::Http`] if the `reqwest::Client` fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("scout/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn transport(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            LlmError::Http(err)
        }
    }
}

fn build_request<'a>(prompt: &'a str, response_schema: Option<&Value>) -> GenerateRequest<'a> {
    let generation_config = response_schema.map_or_else(GenerationConfig::default, |schema| {
        GenerationConfig {
            response_mime_type: Some("application/json"),
            response_schema: Some(to_response_schema(schema)),
        }
    });
    GenerateRequest {
        contents: [Content {
            role: "user",
            parts: [Part { text: prompt }],
        }],
        generation_config,
    }
}

fn extract_text(body: &str) -> Result<String, LlmError> {
    let resp: GenerateResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;

    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::Blocked(reason));
    }
    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(LlmError::EmptyResponse);
    };
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        return if matches!(
            reason.as_str(),
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT"
        ) {
            Err(LlmError::Blocked(reason))
        } else {
            Err(LlmError::EmptyResponse)
        };
    }
    Ok(text)
}

async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = resp.status();
    if status == 429 {
        let retry_after_secs = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(LlmError::RateLimited { retry_after_secs });
    }
    if !status.is_success() {
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        response_schema: Option<&Value>,
    ) -> Result<String, LlmError> {
        let body = build_request(prompt, response_schema);
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport(e))?;
        let raw = check_response(resp)
            .await?
            .text()
            .await
            .map_err(|e| self.transport(e))?;
        let text = extract_text(&raw)?;
        tracing::debug!(
            model = %self.model,
            structured = response_schema.is_some(),
            chars = text.len(),
            "generation complete"
        );
        Ok(text)
    }
}
