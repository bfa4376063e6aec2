//! Document metadata
//!
//! A [`Document`] is a point-in-time snapshot of one filesystem entry.

use crate::mime::MimeClassifier;
use core_types::{DocumentFlags, DocumentId};
use nix::unistd::{access, AccessFlags};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// Metadata for one entry in the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier of this entry
    pub id: DocumentId,
    /// Name shown to the user
    pub display_name: String,
    /// Size in bytes, 0 for directories
    pub size: u64,
    /// Inferred content type
    pub mime_type: String,
    /// Last modification, milliseconds since the Unix epoch (0 if unknown)
    pub last_modified: i64,
    /// Currently permitted mutations
    pub flags: DocumentFlags,
}

impl Document {
    /// Reads metadata for the entry at `path`
    ///
    /// Symlinks are followed; a dangling link is described by the link
    /// itself. The root document never reports rename or delete support.
    pub fn from_path(
        id: DocumentId,
        path: &Path,
        display_name: impl Into<String>,
    ) -> io::Result<Self> {
        let metadata = fs::metadata(path).or_else(|_| fs::symlink_metadata(path))?;
        let is_dir = metadata.is_dir();

        let parent_writable = !id.is_root() && path.parent().map(is_writable).unwrap_or(false);

        Ok(Self {
            display_name: display_name.into(),
            size: if is_dir { 0 } else { metadata.len() },
            mime_type: MimeClassifier::classify(path, is_dir).to_string(),
            last_modified: modified_millis(&metadata),
            flags: DocumentFlags::derive(is_dir, is_writable(path), parent_writable),
            id,
        })
    }

    /// True if this entry is a directory
    pub fn is_directory(&self) -> bool {
        MimeClassifier::is_directory_type(&self.mime_type)
    }
}

/// Whether the calling process may write to `path`
fn is_writable(path: &Path) -> bool {
    access(path, AccessFlags::W_OK).is_ok()
}

fn modified_millis(metadata: &Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|age| age.as_millis() as i64)
        .unwrap_or(0)
}
