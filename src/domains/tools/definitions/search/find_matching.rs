//! Search-then-scan tool.
//!
//! Runs a structured search, then reads the hits one by one (in the order the
//! REST API returned them) and returns the first file whose content contains
//! `match_keyword`. "No results" and "no match" are reported as distinct
//! successful outcomes; only a failed search is an error.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::structured_search::default_content_type;
use crate::domains::tools::definitions::common::{
    api_error_result, error_result, json_result, parse_arguments,
};
use crate::domains::vault::{
    MatchOutcome, MatchRequest, NoteFormat, ObsidianClient, SearchDialect, VaultApi,
    find_matching_file,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the search-then-scan tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindMatchingFileParams {
    #[schemars(description = "Search query (Dataview DQL or JsonLogic)")]
    pub query: String,

    #[schemars(description = "Keyword to look for inside each matched file")]
    pub match_keyword: String,

    #[schemars(
        description = "Content-Type of the query: application/vnd.olrapi.dataview.dql+txt or application/vnd.olrapi.jsonlogic+json"
    )]
    #[serde(default = "default_content_type")]
    pub content_type: String,

    #[schemars(
        description = "true to fetch and match files as JSON (including metadata), false for markdown"
    )]
    #[serde(default)]
    pub as_json: bool,
}

/// Structured payload returned for each outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FindMatchingFileOutput {
    Found {
        filename: String,
        content: serde_json::Value,
        scanned: usize,
    },
    NoResults {
        message: String,
    },
    NoMatch {
        message: String,
        keyword: String,
        scanned: usize,
        skipped: usize,
    },
}

impl From<MatchOutcome> for FindMatchingFileOutput {
    fn from(outcome: MatchOutcome) -> Self {
        let message = outcome.message();
        match outcome {
            MatchOutcome::Found {
                filename,
                content,
                scanned,
            } => Self::Found {
                filename,
                content: content.into_value(),
                scanned,
            },
            MatchOutcome::NoResults => Self::NoResults { message },
            MatchOutcome::NoMatch {
                keyword,
                scanned,
                skipped,
            } => Self::NoMatch {
                message,
                keyword,
                scanned,
                skipped,
            },
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Search-then-scan tool.
pub struct FindMatchingFileTool;

impl FindMatchingFileTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_and_find_matching_file";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Run a Dataview DQL or JsonLogic search, then read the matched files one by one and return the first one whose content contains match_keyword. Files that cannot be read are skipped. Reports separately when the search has no results and when no file contains the keyword.";

    /// Execute the tool logic against any vault backend.
    #[instrument(skip_all, fields(keyword = %params.match_keyword, as_json = params.as_json))]
    pub async fn execute(params: &FindMatchingFileParams, api: &dyn VaultApi) -> CallToolResult {
        info!("Search-and-find tool called");

        let dialect: SearchDialect = match params.content_type.parse() {
            Ok(d) => d,
            Err(e) => return error_result(&e),
        };

        let request = MatchRequest {
            query: params.query.clone(),
            keyword: params.match_keyword.clone(),
            dialect,
            format: NoteFormat::from_as_json(params.as_json),
        };

        match find_matching_file(api, &request).await {
            Ok(outcome) => Self::render(outcome),
            Err(e) => api_error_result("Search failed", &e),
        }
    }

    fn render(outcome: MatchOutcome) -> CallToolResult {
        let output = FindMatchingFileOutput::from(outcome);
        match serde_json::to_value(&output) {
            Ok(value) => json_result(value),
            Err(e) => error_result(&format!("Failed to encode search result: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<ObsidianClient>,
    ) -> Result<serde_json::Value, String> {
        use crate::domains::tools::definitions::common::{http_response, parse_http_arguments};

        let params: FindMatchingFileParams = parse_http_arguments(arguments)?;
        Ok(http_response(Self::execute(&params, client.as_ref()).await))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FindMatchingFileParams>(),
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
                let params: FindMatchingFileParams = parse_arguments(args)?;
                Ok(Self::execute(&params, client.as_ref()).await)
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
    use crate::domains::tools::definitions::common::first_text;
    use crate::domains::vault::{ApiError, ApiResult, NoteContent};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct StaticVault {
        rows: Vec<Value>,
    }

    #[async_trait]
    impl VaultApi for StaticVault {
        async fn search(&self, _query: &str, _dialect: SearchDialect) -> ApiResult<Vec<Value>> {
            Ok(self.rows.clone())
        }

        async fn get_file(&self, path: &str, _format: NoteFormat) -> ApiResult<NoteContent> {
            match path {
                "hit.md" => Ok(NoteContent::Markdown("contains needle".to_string())),
                _ => Err(ApiError::status(404, format!("GET /vault/{}", path))),
            }
        }
    }

    fn params(keyword: &str) -> FindMatchingFileParams {
        serde_json::from_value(json!({ "query": "TABLE", "match_keyword": keyword })).unwrap()
    }

    #[tokio::test]
    async fn test_found_is_structured() {
        let vault = StaticVault {
            rows: vec![json!({ "file": { "path": "gone.md" } }), json!({ "file": { "path": "hit.md" } })],
        };
        let result = FindMatchingFileTool::execute(&params("needle"), &vault).await;
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["status"], "found");
        assert_eq!(structured["filename"], "hit.md");
        assert_eq!(structured["content"], "contains needle");
    }

    #[tokio::test]
    async fn test_no_results_and_no_match_are_distinct_successes() {
        let empty = StaticVault { rows: vec![] };
        let no_results = FindMatchingFileTool::execute(&params("needle"), &empty).await;
        assert_eq!(no_results.is_error, Some(false));
        assert_eq!(no_results.structured_content.unwrap()["status"], "no_results");

        let vault = StaticVault {
            rows: vec![json!({ "file": { "path": "hit.md" } })],
        };
        let no_match = FindMatchingFileTool::execute(&params("haystack"), &vault).await;
        assert_eq!(no_match.is_error, Some(false));
        assert!(first_text(&no_match).unwrap().contains("'haystack'"));
        assert_eq!(no_match.structured_content.unwrap()["status"], "no_match");
    }

    #[tokio::test]
    async fn test_unknown_content_type_is_rejected() {
        let vault = StaticVault { rows: vec![] };
        let mut p = params("needle");
        p.content_type = "text/plain".to_string();
        let result = FindMatchingFileTool::execute(&p, &vault).await;
        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).unwrap().contains("text/plain"));
    }
}
