//! Omnisearch tool.
//!
//! Forwards the query to the Omnisearch HTTP server (`GET /search?q=...`).
//! Query syntax belongs to Omnisearch: comma-separated terms, with a leading
//! `#` marking a tag, e.g. `#prompts,useEffect`.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::tools::definitions::common::{api_error_result, json_result, parse_arguments};
use crate::domains::vault::ObsidianClient;

/// Parameters for the Omnisearch tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct OmniSearchParams {
    /// Omnisearch query.
    #[schemars(
        description = "Search query. Separate terms with ',' and prefix tags with '#', e.g. '#prompts,useEffect'"
    )]
    pub q: String,
}

/// Omnisearch tool.
pub struct OmniSearchTool;

impl OmniSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "omni_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Full-text and tag search over every file in the vault using Omnisearch. Tags are written '#tag_name' and several terms can be combined with ',' (e.g. '#prompts,useEffect'). Returns the matching results with scores and excerpts.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(q = %params.q))]
    pub async fn execute(params: &OmniSearchParams, client: &ObsidianClient) -> CallToolResult {
        info!("Omnisearch tool called");

        match client.omni_search(&params.q).await {
            Ok(results) => json_result(results),
            Err(e) => api_error_result("Failed to perform Omni Search", &e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: OmniSearchParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<OmniSearchParams>(),
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
                let params: OmniSearchParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
