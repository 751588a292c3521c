// Storage operation trait and per-backend implementations
pub mod blob;
pub mod share;

pub use blob::BlobStore;
pub use share::ShareStore;

use crate::error::Result;

/// The four gateway operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
    Exist,
}

impl OperationKind {
    /// Parse an already-lowercased operation name. An unknown name is not an
    /// error at this level; the dispatcher reports it as `Invalid`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "copy" => Some(Self::Copy),
            "move" => Some(Self::Move),
            "delete" => Some(Self::Delete),
            "exist" => Some(Self::Exist),
            _ => None,
        }
    }
}

/// Operation contract shared by every storage backend.
///
/// Implementors resolve folder/file pairs into their own locator shape and
/// issue server-side operations against it; no file content ever streams
/// through the gateway.
pub trait ObjectStore {
    /// Copy a file to another folder, keeping its name.
    ///
    /// # Arguments
    /// * `source_folder` - Folder holding the file; empty means the root
    /// * `file_name` - Name of the file to copy
    /// * `target_folder` - Folder the copy lands in
    ///
    /// # Returns
    /// * `Result<String>` - Human-readable completion message
    async fn copy(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
    ) -> Result<String>;

    /// Move a file to another folder, optionally stamping the target name.
    ///
    /// Runs as copy-then-delete. A failure after the copy leaves the object
    /// present at both locations; callers detect and clean that up with a
    /// follow-up exist/delete.
    async fn mv(
        &self,
        source_folder: &str,
        file_name: &str,
        target_folder: &str,
        stamp_target: bool,
    ) -> Result<String>;

    /// Delete a file. Deleting a missing file is a no-op success.
    async fn delete(&self, source_folder: &str, file_name: &str) -> Result<String>;

    /// Probe whether a file is present at the resolved locator.
    async fn exists(&self, source_folder: &str, file_name: &str) -> Result<bool>;
}
