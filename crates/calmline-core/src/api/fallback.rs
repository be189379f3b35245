//! Catch-and-substitute plumbing for endpoints that degrade offline.

use std::future::Future;

use tracing::warn;

use super::ApiError;

/// Log a failed call and hand back the caller's default instead.
pub fn handle_api_error<T>(context: &str, err: &ApiError, default: T) -> T {
    warn!(
        endpoint = context,
        error = %err,
        unreachable = err.is_unreachable(),
        "Backend call failed, using local fallback"
    );
    default
}

/// Run one endpoint call; on any failure return the value built by
/// `fallback`. The fallback producer only runs when the call fails.
pub async fn with_fallback<T, Fut, P>(endpoint: &str, call: Fut, fallback: P) -> T
where
    Fut: Future<Output = Result<T, ApiError>>,
    P: FnOnce() -> T,
{
    match call.await {
        Ok(value) => value,
        Err(err) => handle_api_error(endpoint, &err, fallback()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_skips_fallback() {
        let value = with_fallback("test", async { Ok::<_, ApiError>(7) }, || {
            panic!("fallback must not run on success")
        })
        .await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_every_error_kind_is_substituted() {
        let errors = [
            ApiError::Network,
            ApiError::Timeout,
            ApiError::HttpStatus {
                status: 503,
                detail: None,
            },
            ApiError::Other("bad json".to_string()),
        ];
        for err in errors {
            let value = with_fallback("test", async move { Err::<i32, _>(err) }, || 42).await;
            assert_eq!(value, 42);
        }
    }

    #[test]
    fn test_handle_api_error_returns_default() {
        let value = handle_api_error("test", &ApiError::Timeout, vec!["default"]);
        assert_eq!(value, vec!["default"]);
    }
}
