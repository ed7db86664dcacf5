//! Error types and handling for the MCP server.
//!
//! Errors that stop the server from starting or serving. Failures of single
//! tool calls never reach this type; tools report them as tool results.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
