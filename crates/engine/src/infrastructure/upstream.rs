//! Time bounds for external collaborator calls.

use std::future::Future;
use std::time::Duration;

use crate::infrastructure::ports::UpstreamError;

/// Run `call`, failing with `UpstreamError::Timeout` once `limit` elapses.
pub async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    call: F,
) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            let after_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(operation, after_ms, "Upstream call timed out");
            Err(UpstreamError::Timeout {
                operation,
                after_ms,
            })
        }
    }
}
