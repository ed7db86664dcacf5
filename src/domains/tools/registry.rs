//! Tool Registry - central registration and HTTP dispatch for all tools.

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use super::definitions::{
    FindMatchingFileTool, GetActiveNoteTool, GetFileTool, GetStatusTool, OmniSearchTool,
    SearchTool, UpdateFileTool,
};
#[cfg(feature = "http")]
use super::error::ToolError;
use crate::domains::vault::ObsidianClient;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - lists the available tools and dispatches HTTP tool calls.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    client: Arc<ObsidianClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<ObsidianClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetStatusTool::NAME,
            OmniSearchTool::NAME,
            GetActiveNoteTool::NAME,
            GetFileTool::NAME,
            UpdateFileTool::NAME,
            SearchTool::NAME,
            FindMatchingFileTool::NAME,
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let client = self.client.clone();
        match name {
            GetStatusTool::NAME => GetStatusTool::http_handler(arguments, client).await,
            OmniSearchTool::NAME => OmniSearchTool::http_handler(arguments, client).await,
            GetActiveNoteTool::NAME => GetActiveNoteTool::http_handler(arguments, client).await,
            GetFileTool::NAME => GetFileTool::http_handler(arguments, client).await,
            UpdateFileTool::NAME => UpdateFileTool::http_handler(arguments, client).await,
            SearchTool::NAME => SearchTool::http_handler(arguments, client).await,
            FindMatchingFileTool::NAME => {
                FindMatchingFileTool::http_handler(arguments, client).await
            }
            _ => {
                warn!(
                    "Unknown tool requested: {} (available: {})",
                    name,
                    self.tool_names().join(", ")
                );
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}
