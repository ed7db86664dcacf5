//! Search tools: Omnisearch, structured search, and search-then-scan.

pub mod find_matching;
pub mod omni_search;
pub mod structured_search;

pub use find_matching::{FindMatchingFileParams, FindMatchingFileTool};
pub use omni_search::{OmniSearchParams, OmniSearchTool};
pub use structured_search::{SearchParams, SearchTool};
