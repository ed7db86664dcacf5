//! Errors raised while talking to the Obsidian services.

use thiserror::Error;

/// Result type for calls to the Local REST API and Omnisearch.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single outbound HTTP call.
///
/// Display strings are single-line and safe to hand straight to an MCP client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, connection or timeout failure.
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The service answered with a status outside the accepted set.
    #[error("Received status code {status} from {endpoint}")]
    RemoteStatus { status: u16, endpoint: String },

    /// The body could not be decoded as JSON.
    #[error("Invalid JSON from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// Create a transport error from a reqwest failure.
    ///
    /// The message keeps the whole source chain of the failure.
    pub fn transport(endpoint: impl Into<String>, source: &reqwest::Error) -> Self {
        let mut message = if source.is_timeout() {
            "request timed out".to_string()
        } else if source.is_connect() {
            "could not connect to the service".to_string()
        } else {
            source.to_string()
        };

        let mut cause = std::error::Error::source(source);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }

        Self::Transport {
            endpoint: endpoint.into(),
            message: single_line(&message),
        }
    }

    /// Create a status error.
    pub fn status(status: u16, endpoint: impl Into<String>) -> Self {
        Self::RemoteStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(endpoint: impl Into<String>, source: &serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: single_line(&source.to_string()),
        }
    }

    /// HTTP status code, if the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_code_and_endpoint() {
        let err = ApiError::status(404, "GET /vault/missing.md");
        assert_eq!(
            err.to_string(),
            "Received status code 404 from GET /vault/missing.md"
        );
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_decode_message_is_single_line() {
        let source = serde_json::from_str::<serde_json::Value>("{\n\"a\":").unwrap_err();
        let err = ApiError::decode("GET /", &source);
        assert!(!err.to_string().contains('\n'));
        assert!(err.to_string().starts_with("Invalid JSON from GET /"));
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn test_connect_failure_keeps_cause() {
        let source = reqwest::Client::new()
            .get("http://127.0.0.1:1/")
            .send()
            .await
            .unwrap_err();
        assert!(source.is_connect());

        let err = ApiError::transport("GET /", &source);
        let ApiError::Transport { message, .. } = &err else {
            panic!("expected a transport error, got {:?}", err);
        };
        assert!(message.starts_with("could not connect to the service: "));
        assert!(!message.contains('\n'));
    }
}
