//! Structured search tool.
//!
//! Sends a Dataview DQL or JsonLogic query to the Local REST API
//! (`POST /search`). The query body is forwarded verbatim with the matching
//! content type.

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
    api_error_result, error_result, json_result, parse_arguments,
};
use crate::domains::vault::ObsidianClient;
use crate::domains::vault::models::{DATAVIEW_DQL_MIME, SearchDialect};

/// Default content type for query bodies.
pub fn default_content_type() -> String {
    DATAVIEW_DQL_MIME.to_string()
}

/// Parameters for the structured search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Dataview DQL or JsonLogic query.
    #[schemars(
        description = "Search query, either Dataview DQL (e.g. TABLE FROM \"inbox\" WHERE contains(file.tags, \"#prompts\")) or a JsonLogic expression"
    )]
    pub query: String,

    /// Content type of the query body.
    #[schemars(
        description = "Content-Type of the query: application/vnd.olrapi.dataview.dql+txt or application/vnd.olrapi.jsonlogic+json"
    )]
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

/// Structured search tool.
pub struct SearchTool;

impl SearchTool {
    pub const NAME: &'static str = "search";

    pub const DESCRIPTION: &'static str = "Evaluate a Dataview DQL or JsonLogic query against every file in the vault (POST /search) and return only the matching results. Example DQL: TABLE FROM \"inbox\" WHERE contains(file.tags, \"#lang/react\") AND contains(file.tags, \"#prompts\") SORT rating DESC";

    #[instrument(skip_all, fields(content_type = %params.content_type))]
    pub async fn execute(params: &SearchParams, client: &ObsidianClient) -> CallToolResult {
        info!("Search tool called");

        let dialect: SearchDialect = match params.content_type.parse() {
            Ok(d) => d,
            Err(e) => return error_result(&e),
        };

        match client.structured_search(&params.query, dialect).await {
            Ok(results) => json_result(results),
            Err(e) => api_error_result("Failed to perform search", &e),
        }
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: SearchParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchParams>(),
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
                let params: SearchParams = parse_arguments(args)?;
                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
