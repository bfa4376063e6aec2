//! # Core Types
//!
//! This crate defines the fundamental types shared by the document tree.
//!
//! ## Key Types
//!
//! - [`DocumentId`]: Validated hierarchical document identifier
//! - [`DocumentFlags`]: Capability flags derived for one document
//! - [`RootFlags`]: Capability summary of a root

pub mod capability;
pub mod ids;

pub use capability::{DocumentFlags, RootFlags};
pub use ids::{is_valid_name, DocumentId, IdError, SEPARATOR};
