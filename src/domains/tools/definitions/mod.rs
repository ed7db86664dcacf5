//! Tool definitions module.
//!
//! One file per tool, grouped by the part of the vault they touch.

pub mod common;
pub mod notes;
pub mod search;

pub use notes::{GetActiveNoteTool, GetFileTool, GetStatusTool, UpdateFileTool};
pub use search::{FindMatchingFileTool, OmniSearchTool, SearchTool};
