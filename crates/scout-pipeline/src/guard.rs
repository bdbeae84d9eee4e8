//! Timeout and cancellation around a single external call.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How a guarded call ended.
#[derive(Debug)]
pub enum Guarded<T> {
    Done(T),
    TimedOut(Duration),
    Cancelled,
}

/// Run `fut` until it completes, `budget` elapses, or `cancel` fires,
/// whichever comes first. Cancellation wins ties.
pub async fn guard<F: Future>(
    cancel: &CancellationToken,
    budget: Duration,
    fut: F,
) -> Guarded<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Guarded::Cancelled,
        res = tokio::time::timeout(budget, fut) => match res {
            Ok(value) => Guarded::Done(value),
            Err(_) => Guarded::TimedOut(budget),
        },
    }
}
