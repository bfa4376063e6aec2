//! # Filesystem View
//!
//! This crate maps document identifiers onto a real directory tree.
//!
//! ## Design
//!
//! - Every identifier resolves below one base directory; there is no other root
//! - Identifiers are structural: a child's id is its parent's id plus one segment
//! - Nothing is cached; metadata is read from the filesystem on every call
//! - Content types come from file extensions only, never from content

pub mod document;
pub mod mime;
pub mod path;

pub use document::Document;
pub use mime::{MimeClassifier, DIRECTORY_MIME_TYPE, OCTET_STREAM_MIME_TYPE};
pub use path::{entry_exists, PathError, PathResolver};
