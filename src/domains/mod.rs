//! Domains module containing business logic organized by bounded contexts.
//!
//! - **vault**: outbound access to the Obsidian Local REST API and Omnisearch
//! - **tools**: MCP tools exposing the vault operations to clients

pub mod tools;
pub mod vault;
