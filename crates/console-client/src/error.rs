//! Error types for gateway API calls.

use thiserror::Error;

/// Errors that can occur when calling the gateway API.
///
/// Every non-success HTTP status is mapped to one of these variants; callers
/// never see a raw status code. The client performs no retries itself —
/// retry policy belongs to the caller (the log poller's next tick) or is
/// deliberately absent (auth calls fail fast).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session or API key is invalid, expired, or absent server-side.
    #[error("not authorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// The request was malformed or failed server-side validation.
    #[error("validation failed: {message}")]
    Validation {
        /// The server's validation message.
        message: String,
    },

    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {message}")]
    Network {
        /// Description of the transport failure.
        message: String,
    },

    /// No API key is stored locally for the requested app.
    ///
    /// Raised before any request is built; the client never sends an
    /// unauthenticated bridge request.
    #[error("no api key stored for app {app_id}")]
    NoCredential {
        /// The app the key was requested for.
        app_id: String,
    },

    /// The response body could not be decoded into the expected type.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// Any other non-success response.
    #[error("unexpected response: status {status}: {message}")]
    Unknown {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },
}

impl ApiError {
    /// Maps an HTTP status code and response body to a typed error.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound { resource: message },
            400 | 422 => Self::Validation { message },
            _ => Self::Unknown { status, message },
        }
    }

    /// Returns true if this error should trigger a de-auth transition.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

/// Result type alias for gateway API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(401 => matches ApiError::Unauthorized ; "401 is unauthorized")]
    #[test_case(403 => matches ApiError::Unauthorized ; "403 is unauthorized")]
    #[test_case(404 => matches ApiError::NotFound { .. } ; "404 is not found")]
    #[test_case(400 => matches ApiError::Validation { .. } ; "400 is validation")]
    #[test_case(422 => matches ApiError::Validation { .. } ; "422 is validation")]
    #[test_case(500 => matches ApiError::Unknown { status: 500, .. } ; "500 is unknown")]
    #[test_case(502 => matches ApiError::Unknown { status: 502, .. } ; "502 is unknown")]
    fn status_mapping(status: u16) -> ApiError {
        ApiError::from_status(status, "body")
    }

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(ApiError::Unauthorized.to_string(), "not authorized");

        let err = ApiError::NoCredential {
            app_id: "app-1".to_string(),
        };
        assert_eq!(err.to_string(), "no api key stored for app app-1");

        let err = ApiError::Validation {
            message: "start_time after end_time".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "validation failed: start_time after end_time"
        );
    }

    #[test]
    fn is_unauthorized_only_for_unauthorized() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(
            !ApiError::Network {
                message: "timeout".to_string()
            }
            .is_unauthorized()
        );
        assert!(
            !ApiError::NoCredential {
                app_id: "a".to_string()
            }
            .is_unauthorized()
        );
    }
}
