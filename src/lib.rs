//! Obsidian MCP Server Library
//!
//! Exposes an Obsidian vault to MCP clients through two local HTTP services:
//! the Local REST API plugin and the Omnisearch plugin.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **vault**: outbound client for both services and the search-then-scan workflow
//!   - **tools**: MCP tools wrapping the vault operations
//!
//! # Example
//!
//! ```rust,no_run
//! use obsidian_mcp_server::core::{Config, serve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(Config::from_env()).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
