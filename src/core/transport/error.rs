//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested transport is unknown or was not compiled in.
    #[error("Unsupported transport '{0}' (available: {available})", available = available_transports())]
    Unsupported(String),

    /// Server initialization error.
    #[error("Server initialization error: {0}")]
    InitError(String),

    /// HTTP-specific error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Service error from rmcp.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create an unsupported-transport error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported(kind.into())
    }

    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitError(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }
}

/// Transports compiled into this binary, for error messages.
fn available_transports() -> String {
    let mut names: Vec<&str> = Vec::new();
    if cfg!(feature = "stdio") {
        names.push("stdio");
    }
    if cfg!(feature = "tcp") {
        names.push("tcp");
    }
    if cfg!(feature = "http") {
        names.push("http");
    }
    names.join(", ")
}
