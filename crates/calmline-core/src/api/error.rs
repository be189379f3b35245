use thiserror::Error;

/// Message shown when the backend cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Cannot connect to backend. Please make sure the server is running.";

/// Message shown when a request outlives its timeout.
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timed out. Please try again.";

/// Every way a single backend call can fail.
///
/// The request primitive produces exactly one of these per failed call, so
/// callers of the propagating endpoints can match exhaustively.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    #[error("{}", TIMEOUT_ERROR_MESSAGE)]
    Timeout,

    #[error("{}", status_message(.status, .detail))]
    HttpStatus { status: u16, detail: Option<String> },

    #[error("{0}")]
    Other(String),
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Request failed: {}", status),
    }
}

impl ApiError {
    /// Classify a failure from sending a request. Anything that kept us from
    /// getting a response back, short of a timeout, means the backend is
    /// unreachable.
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_builder() {
            ApiError::Other(err.to_string())
        } else {
            ApiError::Network
        }
    }

    /// Classify a failure reading or decoding a response body.
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Other(err.to_string())
        }
    }

    /// Build an error for a non-success response, pulling `detail` out of a
    /// JSON error body when the server sent one.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::HttpStatus {
            status: status.as_u16(),
            detail: extract_detail(body),
        }
    }

    /// True when the backend never produced a response.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Network | ApiError::Timeout)
    }
}

/// FastAPI-style error bodies carry either a string or a validation array in
/// `detail`. Strings pass through; anything else is rendered as JSON text.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_detail_string_becomes_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail": "Invalid mood"}"#);
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 400,
                detail: Some("Invalid mood".to_string())
            }
        );
        assert_eq!(err.to_string(), "Invalid mood");
    }

    #[test]
    fn test_missing_detail_uses_generic_message() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed: 500");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message": "nope"}"#);
        assert_eq!(err.to_string(), "Request failed: 404");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"detail": null}"#);
        assert_eq!(err.to_string(), "Request failed: 404");
    }

    #[test]
    fn test_empty_detail_uses_generic_message() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail": ""}"#);
        assert_eq!(
            err,
            ApiError::HttpStatus {
                status: 400,
                detail: None
            }
        );
        assert_eq!(err.to_string(), "Request failed: 400");
    }

    #[test]
    fn test_structured_detail_rendered_as_json() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "text"], "msg": "field required"}]}"#,
        );
        assert_eq!(
            err.to_string(),
            r#"[{"loc":["body","text"],"msg":"field required"}]"#
        );
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ApiError::Network.to_string(), NETWORK_ERROR_MESSAGE);
        assert_eq!(ApiError::Timeout.to_string(), TIMEOUT_ERROR_MESSAGE);
        assert_eq!(ApiError::Other("boom".into()).to_string(), "boom");
        assert!(ApiError::Timeout.is_unreachable());
        assert!(!ApiError::Other("boom".into()).is_unreachable());
    }
}
