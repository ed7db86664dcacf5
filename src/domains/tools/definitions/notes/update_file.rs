//! Vault file write tool.
//!
//! `PUT /vault/{filename}` replaces the whole file (creating it if needed);
//! repeated calls overwrite rather than append.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{
    api_error_result, parse_arguments, success_result,
};
use crate::domains::vault::ObsidianClient;

/// Parameters for the file write tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateFileParams {
    #[schemars(description = "Path relative to the vault root (e.g. 'example.md')")]
    pub filename: String,

    #[schemars(description = "New file content (markdown)")]
    pub content: String,
}

/// File write tool.
pub struct UpdateFileTool;

impl UpdateFileTool {
    pub const NAME: &'static str = "update_file";

    pub const DESCRIPTION: &'static str = "Overwrite a file in the Obsidian vault with the given markdown content, creating it if it does not exist (PUT /vault/{filename}).";

    #[instrument(skip_all, fields(filename = %params.filename, bytes = params.content.len()))]
    pub async fn execute(params: &UpdateFileParams, client: &ObsidianClient) -> CallToolResult {
        info!("Update file tool called for: {}", params.filename);

        match client.write_file(&params.filename, &params.content).await {
            Ok(()) => success_result(format!("File '{}' updated successfully.", params.filename)),
            Err(e) => api_error_result(&format!("Failed to update file '{}'", params.filename), &e),
        }
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: UpdateFileParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdateFileParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    pub fn create_route<S>(client: Arc<ObsidianClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: UpdateFileParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
