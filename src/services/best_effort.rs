use std::fmt::Display;
use std::future::Future;

/// Run an action whose failure must not change the outcome of the caller.
///
/// Errors are logged as warnings and dropped; the caller only learns
/// whether a value was produced.
pub async fn best_effort<T, E, F>(action: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("{} failed: {}", action, e);
            None
        }
    }
}
