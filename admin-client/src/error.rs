use crate::forms::{UploadError, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminClientError {
    // Транспортные ошибки
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    // Ошибки API
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session is not valid"))]
    Unauthorized(Option<String>),

    #[error("Forbidden: {}", .0.as_deref().unwrap_or("access denied"))]
    Forbidden(Option<String>),

    #[error("Resource not found")]
    NotFound,

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    // Ошибки сериализации/десериализации
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("No token received from server")]
    MissingToken,

    // Ошибки клиента
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for AdminClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl AdminClientError {
    /// Builds the error for a non-success HTTP status.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound,
            408 => Self::Timeout,
            _ => Self::Api { status, message },
        }
    }

    /// HTTP status behind the error, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound => Some(404),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::Forbidden(message) => message.as_deref(),
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminClientError::NotFound)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminClientError::Unauthorized(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AdminClientError::Timeout)
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AdminClientError::Network(_) | AdminClientError::Timeout)
    }

    /// Text for an error toast. `fallback` is used when the server sent no message.
    pub fn toast_message(&self, fallback: &str) -> String {
        match self {
            Self::Timeout => "Request timed out. Please try again.".to_string(),
            Self::Unauthorized(_) => "Session expired. Please log in again.".to_string(),
            Self::Network(_) => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            Self::Validation(errors) => errors.to_string(),
            Self::Upload(err) => err.to_string(),
            Self::MissingToken => self.to_string(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// Maps a failed login attempt to the message shown on the login page.
    pub fn login_message(&self) -> String {
        let server = self.server_message().map(str::to_string);
        match self {
            Self::Network(_) | Self::Timeout => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            Self::MissingToken | Self::Validation(_) => self.to_string(),
            _ => match self.status() {
                Some(400) => server.unwrap_or_else(|| "Invalid email or password format.".into()),
                Some(401) => server.unwrap_or_else(|| "Invalid email or password.".into()),
                Some(403) => "Access forbidden. Please check your credentials.".to_string(),
                Some(404) => "Login endpoint not found. Please contact support.".to_string(),
                Some(500) => "Server error. Please try again later.".to_string(),
                Some(status) => server.unwrap_or_else(|| format!("Server error ({})", status)),
                None => "Login failed. Please try again.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_picks_dedicated_variants() {
        assert!(AdminClientError::from_status(401, None).is_unauthorized());
        assert!(AdminClientError::from_status(404, None).is_not_found());
        assert!(AdminClientError::from_status(408, None).is_timeout());
        assert_eq!(AdminClientError::from_status(422, None).status(), Some(422));
    }

    #[test]
    fn login_message_follows_status() {
        let cases = [
            (400, "Invalid email or password format."),
            (401, "Invalid email or password."),
            (403, "Access forbidden. Please check your credentials."),
            (404, "Login endpoint not found. Please contact support."),
            (500, "Server error. Please try again later."),
            (502, "Server error (502)"),
        ];
        for (status, expected) in cases {
            let err = AdminClientError::from_status(status, None);
            assert_eq!(err.login_message(), expected, "status {}", status);
        }
    }

    #[test]
    fn login_message_prefers_server_text_for_credential_errors() {
        let err = AdminClientError::from_status(401, Some("Wrong password".into()));
        assert_eq!(err.login_message(), "Wrong password");

        // 403 ignores the body
        let err = AdminClientError::from_status(403, Some("nope".into()));
        assert_eq!(
            err.login_message(),
            "Access forbidden. Please check your credentials."
        );
    }

    #[test]
    fn login_message_for_network_failure() {
        let err = AdminClientError::Network("connection refused".into());
        assert!(err.login_message().starts_with("Unable to connect"));
    }

    #[test]
    fn toast_message_uses_body_then_fallback() {
        let err = AdminClientError::from_status(409, Some("Title already taken".into()));
        assert_eq!(err.toast_message("Failed"), "Title already taken");

        let err = AdminClientError::from_status(500, None);
        assert_eq!(err.toast_message("Failed to delete blog post"), "Failed to delete blog post");

        assert_eq!(
            AdminClientError::Timeout.toast_message("x"),
            "Request timed out. Please try again."
        );
    }
}
