//! Vault file read tool.
//!
//! Reads `GET /vault/{filename}`. The path is vault-relative and is not
//! checked locally; the REST API decides whether the file exists.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{api_error_result, note_result, parse_arguments};
use crate::domains::vault::{NoteFormat, ObsidianClient};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the file read tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFileParams {
    /// Path relative to the vault root.
    #[schemars(description = "Path relative to the vault root (e.g. 'dirname/example.md')")]
    pub filename: String,

    /// Return the note as JSON (content plus metadata) instead of markdown.
    #[schemars(
        description = "true to return the note as JSON with frontmatter and tags, false for markdown"
    )]
    #[serde(default)]
    pub as_json: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// File read tool.
pub struct GetFileTool;

impl GetFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read a file from the Obsidian vault (GET /vault/{filename}). Returns markdown by default, or JSON with frontmatter, tags and stats when as_json=true.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(filename = %params.filename, as_json = params.as_json))]
    pub async fn execute(params: &GetFileParams, client: &ObsidianClient) -> CallToolResult {
        info!("Read file tool called for: {}", params.filename);

        match client
            .read_file(&params.filename, NoteFormat::from_as_json(params.as_json))
            .await
        {
            Ok(content) => note_result(content),
            Err(e) => api_error_result(
                &format!("Failed to retrieve file '{}'", params.filename),
                &e,
            ),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: GetFileParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFileParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<ObsidianClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: GetFileParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_require_filename() {
        let params: Result<GetFileParams, _> = serde_json::from_str(r#"{"as_json": true}"#);
        assert!(params.is_err());
    }

    #[test]
    fn test_params_default_markdown() {
        let params: GetFileParams = serde_json::from_str(r#"{"filename": "a/b.md"}"#).unwrap();
        assert_eq!(params.filename, "a/b.md");
        assert!(!params.as_json);
    }

    #[test]
    fn test_schema_lists_filename_as_required() {
        let tool = GetFileTool::to_tool();
        let required = tool.input_schema.get("required").cloned().unwrap_or_default();
        assert!(required.as_array().unwrap().iter().any(|v| v == "filename"));
    }
}
