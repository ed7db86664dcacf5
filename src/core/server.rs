//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the vault tools.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as CoreResult;
use super::transport::TransportService;
use crate::domains::tools::build_tool_router;
use crate::domains::vault::ObsidianClient;

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients during initialization.
pub const SERVER_INSTRUCTIONS: &str = "\
# Obsidian MCP Server

This server talks to the Obsidian Local REST API and the Omnisearch plugin.

## Available tools

- **get_status**: server status of the Local REST API
- **get_active_note**: the note currently open in Obsidian
- **get_file**: read a vault file as markdown or as JSON with metadata
- **update_file**: overwrite (or create) a vault file with markdown content
- **omni_search**: full-text / tag search via Omnisearch (`#tag,term`)
- **search**: Dataview DQL or JsonLogic query via the Local REST API
- **search_and_find_matching_file**: run a search, then return the first result whose content contains a keyword";

/// The main MCP server handler.
///
/// Cloned once per client session by the network transports; clones share the
/// configuration and the HTTP client.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Client for the Local REST API and Omnisearch.
    client: Arc<ObsidianClient>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> CoreResult<Self> {
        let client = Arc::new(ObsidianClient::new(&config.obsidian)?);
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing client.
    pub fn with_client(config: Config, client: Arc<ObsidianClient>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config: Arc::new(config),
            client,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the shared Obsidian client.
    pub fn client(&self) -> &Arc<ObsidianClient> {
        &self.client
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, String> {
        ToolRegistry::new(self.client.clone())
            .call_tool(name, arguments)
            .await
    }
}

/// Validate the configuration, build the server and serve it on the
/// configured transport until the transport shuts down.
pub async fn serve(config: Config) -> CoreResult<()> {
    config.validate()?;

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config)?;
    info!("Server initialized");

    transport.run(server).await?;
    Ok(())
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
