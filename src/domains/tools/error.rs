//! Tool-specific error types.

use thiserror::Error;

/// Errors raised before a tool gets to run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        assert_eq!(ToolError::not_found("x").to_string(), "Tool not found: x");
        assert!(
            ToolError::invalid_arguments("missing field `q`")
                .to_string()
                .contains("`q`")
        );
    }
}
