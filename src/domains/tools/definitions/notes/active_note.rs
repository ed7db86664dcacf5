//! Active note tool.
//!
//! Returns the note currently open in Obsidian (`GET /active`), either as
//! markdown or, with `as_json`, as the structured note document carrying
//! frontmatter, tags and file stats.

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

/// Parameters for the active note tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetActiveNoteParams {
    /// Return the note as JSON (content plus metadata) instead of markdown.
    #[schemars(
        description = "true to return the note as JSON with tags and metadata, false for markdown"
    )]
    #[serde(default)]
    pub as_json: bool,
}

/// Active note tool.
pub struct GetActiveNoteTool;

impl GetActiveNoteTool {
    pub const NAME: &'static str = "get_active_note";

    pub const DESCRIPTION: &'static str = "Get the content of the note currently open in Obsidian. With as_json=true the note is returned as JSON including tags and frontmatter.";

    #[instrument(skip_all, fields(as_json = params.as_json))]
    pub async fn execute(params: &GetActiveNoteParams, client: &ObsidianClient) -> CallToolResult {
        info!("Active note tool called");

        match client
            .active_note(NoteFormat::from_as_json(params.as_json))
            .await
        {
            Ok(content) => note_result(content),
            Err(e) => api_error_result("Failed to retrieve active note", &e),
        }
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: GetActiveNoteParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, &client).await))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetActiveNoteParams>(),
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
                let params: GetActiveNoteParams = parse_arguments(args)?;
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
    fn test_as_json_defaults_to_false() {
        let params: GetActiveNoteParams = serde_json::from_str("{}").unwrap();
        assert!(!params.as_json);
    }
}
