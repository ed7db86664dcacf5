//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    FindMatchingFileTool, GetActiveNoteTool, GetFileTool, GetStatusTool, OmniSearchTool,
    SearchTool, UpdateFileTool,
};
use crate::domains::vault::ObsidianClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<ObsidianClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetStatusTool::create_route(client.clone()))
        .with_route(OmniSearchTool::create_route(client.clone()))
        .with_route(GetActiveNoteTool::create_route(client.clone()))
        .with_route(GetFileTool::create_route(client.clone()))
        .with_route(UpdateFileTool::create_route(client.clone()))
        .with_route(SearchTool::create_route(client.clone()))
        .with_route(FindMatchingFileTool::create_route(client))
}
