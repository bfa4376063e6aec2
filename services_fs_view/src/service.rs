//! Document Tree Service implementation
//!
//! This module provides the service that implements document operations on
//! top of a real base directory.

use crate::open_mode::{CancellationSignal, OpenMode};
use crate::operations::{DocumentOperations, OperationError};
use core_types::DocumentId;
use fs_view::{entry_exists, Document, MimeClassifier, PathResolver};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Name shown for the base directory when none is configured
pub const DEFAULT_ROOT_ALIAS: &str = "proxy";

/// Fixed configuration of a document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Directory the whole tree lives under
    pub base_dir: PathBuf,
    /// Root token, usually the hosting application's namespace
    pub root_id: String,
    /// Display name of the base directory
    pub root_alias: String,
}

impl TreeConfig {
    /// Creates a configuration with the default root alias
    pub fn new(base_dir: impl Into<PathBuf>, root_id: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            root_id: root_id.into(),
            root_alias: DEFAULT_ROOT_ALIAS.to_string(),
        }
    }

    pub fn with_root_alias(mut self, alias: impl Into<String>) -> Self {
        self.root_alias = alias.into();
        self
    }
}

/// The Document Tree Service
///
/// Owns only its configuration; every call goes to the filesystem.
#[derive(Debug, Clone)]
pub struct DocumentTreeService {
    resolver: PathResolver,
    root_alias: String,
}

impl DocumentTreeService {
    /// Creates the service, creating the base directory if it is missing
    pub fn new(config: TreeConfig) -> Result<Self, OperationError> {
        let resolver = PathResolver::new(&config.base_dir, &config.root_id)?;
        fs::create_dir_all(resolver.base_dir())?;
        Ok(Self {
            resolver,
            root_alias: config.root_alias,
        })
    }

    /// The resolver used for every identifier
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Identifier of the base directory
    pub fn root_id(&self) -> &DocumentId {
        self.resolver.root_id()
    }

    pub fn base_dir(&self) -> &Path {
        self.resolver.base_dir()
    }

    /// Builds the document snapshot for a resolved entry
    fn describe(&self, id: DocumentId, path: &Path) -> Result<Document, OperationError> {
        let display_name = match id.leaf_name() {
            Some(name) => name.to_string(),
            None => self.root_alias.clone(),
        };
        let missing = id.to_string();
        Document::from_path(id, path, display_name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => OperationError::NotFound(missing),
            _ => OperationError::Io(err),
        })
    }
}

/// Renames `from` to `to`, failing with `AlreadyExists` if `to` exists
///
/// The check and the rename are one atomic call where the platform and
/// filesystem support it.
fn rename_no_replace(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    {
        use nix::errno::Errno;
        use nix::fcntl::{renameat2, RenameFlags};

        match renameat2(None, from, None, to, RenameFlags::RENAME_NOREPLACE) {
            Ok(()) => return Ok(()),
            // Filesystem or kernel without RENAME_NOREPLACE
            Err(Errno::EINVAL) | Err(Errno::ENOSYS) => {}
            Err(errno) => return Err(io::Error::from(errno)),
        }
    }

    if entry_exists(to) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", to.display()),
        ));
    }
    fs::rename(from, to)
}

/// Deletes `path` depth-first, stopping at the first failure
///
/// Symlinks are removed, never followed.
fn delete_recursive(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        for entry in fs::read_dir(path)? {
            delete_recursive(&entry?.path())?;
        }
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

impl DocumentOperations for DocumentTreeService {
    fn list_children(&self, parent_id: &str) -> Result<Vec<Document>, OperationError> {
        let (parent, parent_path) = self.resolver.resolve_str(parent_id, true)?;

        let entries = match fs::read_dir(&parent_path) {
            Ok(entries) => entries,
            Err(_) => return Ok(Vec::new()),
        };

        // Names that are not valid UTF-8 cannot be expressed as identifiers
        let children = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                let id = PathResolver::child_identifier(&parent, &name).ok()?;
                Document::from_path(id, &entry.path(), name).ok()
            })
            .collect();

        Ok(children)
    }

    fn stat_document(&self, id: &str) -> Result<Document, OperationError> {
        let (id, path) = self.resolver.resolve_str(id, true)?;
        self.describe(id, &path)
    }

    fn document_type(&self, id: &str) -> Result<String, OperationError> {
        let (_, path) = self.resolver.resolve_str(id, true)?;
        let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
        Ok(MimeClassifier::classify(&path, is_dir).to_string())
    }

    fn create_document(
        &self,
        parent_id: &str,
        mime_type: &str,
        name: &str,
    ) -> Result<DocumentId, OperationError> {
        let (parent, parent_path) = self.resolver.resolve_str(parent_id, true)?;
        let child = PathResolver::child_identifier(&parent, name)
            .map_err(|err| OperationError::CreateFailed(err.to_string()))?;
        let path = parent_path.join(name);

        let created = if MimeClassifier::is_directory_type(mime_type) {
            fs::create_dir(&path)
        } else {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map(|_| ())
        };

        created.map_err(|err| OperationError::CreateFailed(format!("{}: {}", child, err)))?;
        Ok(child)
    }

    fn delete_document(&self, id: &str) -> Result<(), OperationError> {
        let (id, path) = self.resolver.resolve_str(id, true)?;
        if id.is_root() {
            return Err(OperationError::DeleteFailed(format!(
                "{}: the root cannot be deleted",
                id
            )));
        }

        delete_recursive(&path)
            .map_err(|err| OperationError::DeleteFailed(format!("{}: {}", id, err)))
    }

    fn move_document(
        &self,
        source_id: &str,
        _source_parent_id: &str,
        target_parent_id: &str,
    ) -> Result<DocumentId, OperationError> {
        let (source, source_path) = self.resolver.resolve_str(source_id, true)?;
        let (target_parent, target_dir) = self.resolver.resolve_str(target_parent_id, true)?;

        let name = source.leaf_name().ok_or_else(|| {
            OperationError::MoveFailed(format!("{}: the root cannot be moved", source))
        })?;
        let target_path = target_dir.join(name);

        if entry_exists(&target_path) {
            return Err(OperationError::MoveFailed(format!(
                "{}: target already exists in {}",
                source, target_parent
            )));
        }

        rename_no_replace(&source_path, &target_path)
            .map_err(|err| OperationError::MoveFailed(format!("{}: {}", source, err)))?;

        Ok(PathResolver::child_identifier(&target_parent, name)?)
    }

    fn rename_document(&self, id: &str, new_name: &str) -> Result<DocumentId, OperationError> {
        let (id, path) = self.resolver.resolve_str(id, true)?;
        let renamed = PathResolver::renamed_identifier(&id, new_name)
            .map_err(|err| OperationError::RenameFailed(err.to_string()))?;

        if renamed == id {
            return Ok(renamed);
        }

        let target = path.with_file_name(new_name);
        if entry_exists(&target) {
            return Err(OperationError::RenameFailed(format!(
                "{}: {} already exists",
                id, new_name
            )));
        }

        rename_no_replace(&path, &target)
            .map_err(|err| OperationError::RenameFailed(format!("{}: {}", id, err)))?;
        Ok(renamed)
    }

    fn open_document(
        &self,
        id: &str,
        mode: OpenMode,
        signal: Option<&CancellationSignal>,
    ) -> Result<File, OperationError> {
        let (_, path) = self.resolver.resolve_str(id, true)?;
        if let Some(signal) = signal {
            signal.check()?;
        }
        Ok(mode.options().open(&path)?)
    }

    fn is_descendant(&self, candidate_id: &str, ancestor_id: &str) -> bool {
        self.resolver.is_descendant(candidate_id, ancestor_id)
    }
}
