//! Document operations
//!
//! This module defines the operations provided by the document tree service.

use crate::open_mode::{CancellationSignal, OpenMode};
use core_types::DocumentId;
use fs_view::{Document, PathError};
use std::fs::File;
use std::io;
use thiserror::Error;

/// Errors that can occur during document operations
#[derive(Debug, Error)]
pub enum OperationError {
    /// Identifier does not resolve to an existing entry
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier is malformed or belongs to another root
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(String),

    #[error("Failed to create document: {0}")]
    CreateFailed(String),

    #[error("Failed to delete document: {0}")]
    DeleteFailed(String),

    #[error("Failed to move document: {0}")]
    MoveFailed(String),

    #[error("Failed to rename document: {0}")]
    RenameFailed(String),

    /// Unrecognised open mode token
    #[error("Invalid open mode: {0}")]
    InvalidMode(String),

    /// Open, read or metadata failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl OperationError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            OperationError::NotFound(_) => "not_found",
            OperationError::InvalidDocumentId(_) => "invalid_document_id",
            OperationError::CreateFailed(_) => "create_failed",
            OperationError::DeleteFailed(_) => "delete_failed",
            OperationError::MoveFailed(_) => "move_failed",
            OperationError::RenameFailed(_) => "rename_failed",
            OperationError::InvalidMode(_) => "invalid_mode",
            OperationError::Io(_) => "io_error",
        }
    }
}

impl From<PathError> for OperationError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NotFound(id) => OperationError::NotFound(id),
            other => OperationError::InvalidDocumentId(other.to_string()),
        }
    }
}

/// Document operations trait
///
/// Identifiers come in as strings exactly as the browsing client sent them;
/// implementations parse and validate them on every call.
pub trait DocumentOperations {
    /// List the direct children of a directory
    ///
    /// Order is whatever the directory listing yields. A parent that cannot
    /// be listed has no children.
    fn list_children(&self, parent_id: &str) -> Result<Vec<Document>, OperationError>;

    /// Get metadata for one document
    fn stat_document(&self, id: &str) -> Result<Document, OperationError>;

    /// Get the MIME type of one document
    fn document_type(&self, id: &str) -> Result<String, OperationError>;

    /// Create a file, or a directory when `mime_type` is the directory type
    ///
    /// Returns the identifier of the new document.
    fn create_document(
        &self,
        parent_id: &str,
        mime_type: &str,
        name: &str,
    ) -> Result<DocumentId, OperationError>;

    /// Delete a document and everything below it
    ///
    /// A failure part way through leaves the tree partially deleted.
    fn delete_document(&self, id: &str) -> Result<(), OperationError>;

    /// Delete a document given its parent
    fn remove_document(&self, id: &str, _parent_id: &str) -> Result<(), OperationError> {
        self.delete_document(id)
    }

    /// Move a document into another directory, keeping its name
    fn move_document(
        &self,
        source_id: &str,
        source_parent_id: &str,
        target_parent_id: &str,
    ) -> Result<DocumentId, OperationError>;

    /// Rename a document within its directory
    fn rename_document(&self, id: &str, new_name: &str) -> Result<DocumentId, OperationError>;

    /// Open a document's contents
    ///
    /// `signal` is advisory; it is not polled once the open call starts.
    fn open_document(
        &self,
        id: &str,
        mode: OpenMode,
        signal: Option<&CancellationSignal>,
    ) -> Result<File, OperationError>;

    /// True if `candidate_id` is `ancestor_id` or lies below it
    fn is_descendant(&self, candidate_id: &str, ancestor_id: &str) -> bool;
}
