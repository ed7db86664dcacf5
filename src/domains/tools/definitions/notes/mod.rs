//! Note tools: status, active note, and vault file read/write.

pub mod active_note;
pub mod get_file;
pub mod status;
pub mod update_file;

pub use active_note::{GetActiveNoteParams, GetActiveNoteTool};
pub use get_file::{GetFileParams, GetFileTool};
pub use status::{GetStatusParams, GetStatusTool};
pub use update_file::{UpdateFileParams, UpdateFileTool};
