//! # Document Provider Host
//!
//! This crate hosts a document tree for a document-browsing client.
//!
//! ## Responsibilities
//!
//! The host:
//! - Loads the provider configuration
//! - Creates the base directory and launches the optional helper process
//! - Supplies the application title and icon for the root row
//! - Reads line commands and answers each with one JSON line
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Interpret identifiers or touch the filesystem itself
//! - Supervise or restart the helper process
//! - Let helper failures affect document operations

pub mod bootstrap;
pub mod commands;
pub mod config;
pub mod runtime;

pub use bootstrap::{Bootstrap, HelperLauncher};
pub use commands::{HostCommand, HostCommandError, HostCommandParser};
pub use config::{ConfigError, ConfigLoader, HelperConfig, ProviderConfig};
pub use runtime::{HostRuntime, HostRuntimeError};
