use rest_client::RestError;
use thiserror::Error;

/// Errors returned by appliance API calls
///
/// Every variant is an "unexpected response" from the caller's point of view:
/// the call did not produce the payload it promised. The variants only keep
/// enough detail to log and to tell a status failure from a transport one.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The appliance answered with a non-2xx status
    #[error("Unexpected response: HTTP {0}")]
    UnexpectedStatus(u16),

    /// Network communication error
    ///
    /// Connection refused, timeouts, DNS resolution failures or a body stream
    /// that broke half-way.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// The appliance returned 2xx but the body did not match the payload type.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid parameter value, rejected before any request is sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// HTTP status carried by this error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<RestError> for ApiError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Network(msg) => ApiError::NetworkError(msg),
            RestError::Status(code) => ApiError::UnexpectedStatus(code),
            RestError::Parse(msg) => ApiError::ParseError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_conversion() {
        let api_error: ApiError = RestError::Network("connection refused".to_string()).into();
        assert!(matches!(api_error, ApiError::NetworkError(_)));

        let api_error: ApiError = RestError::Parse("expected value".to_string()).into();
        assert!(matches!(api_error, ApiError::ParseError(_)));

        let api_error: ApiError = RestError::Status(404).into();
        assert!(matches!(api_error, ApiError::UnexpectedStatus(404)));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::UnexpectedStatus(500).status(), Some(500));
        assert_eq!(ApiError::NetworkError("timeout".to_string()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::UnexpectedStatus(502);
        assert_eq!(format!("{}", err), "Unexpected response: HTTP 502");

        let err = ApiError::NetworkError("connection failed".to_string());
        assert_eq!(format!("{}", err), "Network error: connection failed");
    }
}
