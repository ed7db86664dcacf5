//! Tools domain module.
//!
//! Tools are the functions MCP clients call; each one wraps one or more calls
//! to the Obsidian services.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder for STDIO/TCP transport
//! - `registry.rs` - Tool listing and HTTP dispatch
//! - `error.rs` - Tool-specific error types
//!
//! A new tool needs a file in `definitions/`, a route in `router.rs` and an
//! entry in `registry.rs`; `server.rs` does not change.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
