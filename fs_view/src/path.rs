//! Path resolution logic
//!
//! This module maps document identifiers to paths below the base directory
//! and derives child and sibling identifiers.

use core_types::{DocumentId, IdError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during path resolution
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Identifier is malformed or a supplied name is invalid
    #[error("Invalid document id: {0}")]
    InvalidId(#[from] IdError),

    /// Identifier belongs to a different root
    #[error("Unknown root {found:?} (expected {expected:?})")]
    ForeignRoot { found: String, expected: String },

    /// No entry exists at the resolved path
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Returns true if something (including a dangling symlink) exists at `path`
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Path resolver
///
/// Holds the base directory and the root identifier. Both are fixed at
/// construction and never change.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
    root: DocumentId,
}

impl PathResolver {
    /// Creates a resolver for `base_dir`, addressed by the root token `root`
    pub fn new(base_dir: impl Into<PathBuf>, root: &str) -> Result<Self, PathError> {
        Ok(Self {
            base_dir: base_dir.into(),
            root: DocumentId::root(root)?,
        })
    }

    /// The directory every identifier resolves under
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The identifier of the base directory
    pub fn root_id(&self) -> &DocumentId {
        &self.root
    }

    /// Parses `raw` and checks that it belongs to this resolver's root
    pub fn parse(&self, raw: &str) -> Result<DocumentId, PathError> {
        let id = DocumentId::parse(raw)?;
        self.check_root(&id)?;
        Ok(id)
    }

    fn check_root(&self, id: &DocumentId) -> Result<(), PathError> {
        if id.root_token() != self.root.root_token() {
            return Err(PathError::ForeignRoot {
                found: id.root_token().to_string(),
                expected: self.root.root_token().to_string(),
            });
        }
        Ok(())
    }

    /// Resolves an identifier to its filesystem path
    ///
    /// The root resolves to the base directory itself. With `must_exist`,
    /// a missing entry is reported as [`PathError::NotFound`].
    pub fn resolve(&self, id: &DocumentId, must_exist: bool) -> Result<PathBuf, PathError> {
        self.check_root(id)?;

        let mut target = self.base_dir.clone();
        for segment in id.segments() {
            target.push(segment);
        }

        if must_exist && !entry_exists(&target) {
            return Err(PathError::NotFound(id.to_string()));
        }
        Ok(target)
    }

    /// Parses and resolves an identifier string in one step
    pub fn resolve_str(
        &self,
        raw: &str,
        must_exist: bool,
    ) -> Result<(DocumentId, PathBuf), PathError> {
        let id = self.parse(raw)?;
        let path = self.resolve(&id, must_exist)?;
        Ok((id, path))
    }

    /// Identifier of entry `name` inside `parent`
    pub fn child_identifier(parent: &DocumentId, name: &str) -> Result<DocumentId, PathError> {
        Ok(parent.child(name)?)
    }

    /// Identifier of `id` after renaming its last segment to `new_name`
    pub fn renamed_identifier(id: &DocumentId, new_name: &str) -> Result<DocumentId, PathError> {
        Ok(id.with_leaf_name(new_name)?)
    }

    /// True if `candidate` names `ancestor` or an entry below it
    ///
    /// Unparseable or foreign identifiers are never descendants.
    pub fn is_descendant(&self, candidate: &str, ancestor: &str) -> bool {
        match (self.parse(candidate), self.parse(ancestor)) {
            (Ok(candidate), Ok(ancestor)) => candidate.is_descendant_of(&ancestor),
            _ => false,
        }
    }
}
