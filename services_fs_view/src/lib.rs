//! # Document Tree Service
//!
//! This service exposes a base directory as a tree of documents.
//!
//! ## Philosophy
//!
//! - Every call resolves identifiers afresh; no entry is cached
//! - Mutations are single filesystem calls, except recursive delete
//! - Failures are returned to the caller, never logged or retried
//! - Configuration is fixed at construction and read-only afterwards
//!
//! ## Operations
//!
//! - `list_children(parent)`: List direct children of a directory
//! - `stat_document(id)`: Get document metadata
//! - `create_document(parent, mime, name)`: Create a file or directory
//! - `delete_document(id)`: Recursively delete a document
//! - `move_document(source, source_parent, target_parent)`: Move into another directory
//! - `rename_document(id, name)`: Rename in place
//! - `open_document(id, mode, signal)`: Open file contents

pub mod open_mode;
pub mod operations;
pub mod projection;
pub mod provider;
pub mod roots;
pub mod service;

pub use open_mode::{CancellationSignal, OpenMode};
pub use operations::{DocumentOperations, OperationError};
pub use projection::{FieldValue, ResultSet, RowBuilder, DOCUMENT_COLUMNS, ROOT_COLUMNS};
pub use provider::DocumentsProvider;
pub use roots::{AppLabelProvider, RootCatalog, RootInfo, StaticLabels, ANY_MIME_TYPE};
pub use service::{DocumentTreeService, TreeConfig, DEFAULT_ROOT_ALIAS};
