//! Vault domain: access to the Obsidian Local REST API and Omnisearch.
//!
//! - `client.rs` - HTTP client for both services, plus the `VaultApi` seam
//! - `models.rs` - note formats, query dialects, search rows
//! - `workflow.rs` - search-then-scan for the first file containing a keyword
//! - `error.rs` - failure taxonomy for outbound calls

mod client;
mod error;
pub mod models;
pub mod workflow;

pub use client::{ApiRequest, ObsidianClient, Service, VaultApi};
pub use error::{ApiError, ApiResult};
pub use models::{NoteContent, NoteFormat, SearchDialect, SearchResultItem};
pub use workflow::{MatchOutcome, MatchRequest, find_matching_file};
