//! Custom error types for rag-client

use thiserror::Error;

/// Main error type for rag-client operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing local input, caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Connection refused, timeout, or a failure reading the response body
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body is not JSON or lacks expected fields
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// HTTP status carried by an `Api` error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx response from the server
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(s) if (400..500).contains(&s))
    }

    /// 5xx response from the server
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if (500..600).contains(&s))
    }

    /// Whether a caller may reasonably retry the call. The client never does.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_)) || self.is_server_error()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            Error::Transport(format!("connection failed: {}", err))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

/// Result type alias for rag-client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = Error::Api {
            status: 404,
            message: "missing".to_string(),
        };
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());
        assert!(!not_found.is_retryable());

        let boom = Error::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(boom.is_server_error());
        assert!(boom.is_retryable());

        assert!(Error::Transport("refused".to_string()).is_retryable());
        assert!(!Error::validation("empty").is_retryable());
        assert_eq!(Error::Decode("bad".to_string()).status(), None);
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): boom");
    }
}
