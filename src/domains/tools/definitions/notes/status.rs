//! Local REST API status tool.
//!
//! Calls `GET /` with the bearer token and returns the status payload
//! (service name, versions, authentication state) as pretty-printed JSON.

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

/// The status tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetStatusParams {}

/// Server status tool.
pub struct GetStatusTool;

impl GetStatusTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the status of the Obsidian Local REST API (GET /), including the plugin version and whether the configured API key is accepted.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: &GetStatusParams, client: &ObsidianClient) -> CallToolResult {
        info!("Status tool called");

        match client.status().await {
            Ok(status) => json_result(status),
            Err(e) => api_error_result("Failed to get status", &e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: GetStatusParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetStatusParams>(),
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
                let params: GetStatusParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_accept_empty_object() {
        let params: Result<GetStatusParams, _> = serde_json::from_str("{}");
        assert!(params.is_ok());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = GetStatusTool::to_tool();
        assert_eq!(tool.name, "get_status");
        assert!(tool.description.unwrap().contains("GET /"));
    }
}
