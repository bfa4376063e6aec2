//! # Host Control Commands
//!
//! Provides a line-oriented command surface over the document tree.
//!
//! ## Command Set
//!
//! - `roots [--columns=a,b]` - List the roots
//! - `ls <id> [--columns=a,b]` - List children of a directory
//! - `stat <id> [--columns=a,b]` - Show one document
//! - `type <id>` - Show a document's MIME type
//! - `create <parent> <mime> <name...>` - Create a document
//! - `mkdir <parent> <name...>` - Create a directory
//! - `touch <parent> <name...>` - Create a file typed by its extension
//! - `rm <id>` - Delete a document recursively
//! - `mv <id> <source_parent> <target_parent>` - Move a document
//! - `rename <id> <name...>` - Rename a document
//! - `cat <id>` - Print file contents
//! - `write <id> <text...>` - Replace file contents
//! - `append <id> <text...>` - Append to a file
//! - `child <ancestor> <candidate>` - Test descendant relation
//! - `quit` - Exit the host
//!
//! ## Philosophy
//!
//! - No pipes, no scripting, no shell features
//! - Trailing names and text keep their inner spaces
//! - Commands only name operations; the tree does the work

use fs_view::{MimeClassifier, DIRECTORY_MIME_TYPE};
use thiserror::Error;

const COLUMNS_FLAG: &str = "--columns=";

/// Host command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostCommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// List the roots
    Roots { columns: Option<Vec<String>> },

    /// List the children of a directory
    List {
        parent_id: String,
        columns: Option<Vec<String>>,
    },

    /// Describe one document
    Stat {
        id: String,
        columns: Option<Vec<String>>,
    },

    /// MIME type of one document
    Type { id: String },

    /// Create a file or directory
    Create {
        parent_id: String,
        mime_type: String,
        name: String,
    },

    /// Delete a document
    Delete { id: String },

    /// Move a document into another directory
    Move {
        source_id: String,
        source_parent_id: String,
        target_parent_id: String,
    },

    /// Rename a document
    Rename { id: String, name: String },

    /// Read a file's contents
    Read { id: String },

    /// Write text to a file, replacing or appending
    Write {
        id: String,
        text: String,
        append: bool,
    },

    /// Descendant test
    IsChild {
        ancestor_id: String,
        candidate_id: String,
    },

    /// Quit the host
    Quit,
}

/// Host command parser
pub struct HostCommandParser;

impl HostCommandParser {
    /// Parses a command string
    pub fn parse(input: &str) -> Result<HostCommand, HostCommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(HostCommandError::InvalidCommand(
                "Empty command".to_string(),
            ));
        }

        let (cmd, rest) = split_word(input);
        let cmd = cmd.to_lowercase();

        match cmd.as_str() {
            "roots" => Ok(HostCommand::Roots {
                columns: Self::parse_columns(rest)?,
            }),
            "ls" | "list" => {
                let (parent_id, rest) = Self::require(rest, "parent document ID")?;
                Ok(HostCommand::List {
                    parent_id,
                    columns: Self::parse_columns(rest)?,
                })
            }
            "stat" => {
                let (id, rest) = Self::require(rest, "document ID")?;
                Ok(HostCommand::Stat {
                    id,
                    columns: Self::parse_columns(rest)?,
                })
            }
            "type" => {
                let (id, _) = Self::require(rest, "document ID")?;
                Ok(HostCommand::Type { id })
            }
            "create" => Self::parse_create(rest),
            "mkdir" => {
                let (parent_id, rest) = Self::require(rest, "parent document ID")?;
                let name = Self::require_tail(rest, "name")?;
                Ok(HostCommand::Create {
                    parent_id,
                    mime_type: DIRECTORY_MIME_TYPE.to_string(),
                    name,
                })
            }
            "touch" => {
                let (parent_id, rest) = Self::require(rest, "parent document ID")?;
                let name = Self::require_tail(rest, "name")?;
                Ok(HostCommand::Create {
                    parent_id,
                    mime_type: MimeClassifier::for_name(&name).to_string(),
                    name,
                })
            }
            "rm" | "delete" => {
                let (id, _) = Self::require(rest, "document ID")?;
                Ok(HostCommand::Delete { id })
            }
            "mv" | "move" => Self::parse_move(rest),
            "rename" => {
                let (id, rest) = Self::require(rest, "document ID")?;
                let name = Self::require_tail(rest, "new name")?;
                Ok(HostCommand::Rename { id, name })
            }
            "cat" | "read" => {
                let (id, _) = Self::require(rest, "document ID")?;
                Ok(HostCommand::Read { id })
            }
            "write" | "append" => {
                let (id, text) = Self::require(rest, "document ID")?;
                Ok(HostCommand::Write {
                    id,
                    text: text.to_string(),
                    append: cmd == "append",
                })
            }
            "child" => {
                let (ancestor_id, rest) = Self::require(rest, "ancestor document ID")?;
                let (candidate_id, _) = Self::require(rest, "candidate document ID")?;
                Ok(HostCommand::IsChild {
                    ancestor_id,
                    candidate_id,
                })
            }
            "quit" | "exit" => Ok(HostCommand::Quit),
            _ => Err(HostCommandError::UnknownCommand(cmd)),
        }
    }

    /// Parses the "create" command
    fn parse_create(args: &str) -> Result<HostCommand, HostCommandError> {
        let (parent_id, rest) = Self::require(args, "parent document ID")?;
        let (mime_type, rest) = Self::require(rest, "MIME type")?;
        let name = Self::require_tail(rest, "name")?;

        Ok(HostCommand::Create {
            parent_id,
            mime_type,
            name,
        })
    }

    /// Parses the "mv" command
    fn parse_move(args: &str) -> Result<HostCommand, HostCommandError> {
        let (source_id, rest) = Self::require(args, "source document ID")?;
        let (source_parent_id, rest) = Self::require(rest, "source parent document ID")?;
        let (target_parent_id, _) = Self::require(rest, "target parent document ID")?;

        Ok(HostCommand::Move {
            source_id,
            source_parent_id,
            target_parent_id,
        })
    }

    /// Takes the next word, failing with `what` when there is none
    fn require<'a>(args: &'a str, what: &str) -> Result<(String, &'a str), HostCommandError> {
        let (word, rest) = split_word(args);
        if word.is_empty() {
            return Err(HostCommandError::MissingArgument(what.to_string()));
        }
        Ok((word.to_string(), rest))
    }

    /// Takes the remainder of the line as one argument
    fn require_tail(args: &str, what: &str) -> Result<String, HostCommandError> {
        let tail = args.trim();
        if tail.is_empty() {
            return Err(HostCommandError::MissingArgument(what.to_string()));
        }
        Ok(tail.to_string())
    }

    /// Parses an optional `--columns=a,b` projection
    fn parse_columns(args: &str) -> Result<Option<Vec<String>>, HostCommandError> {
        let (word, rest) = split_word(args);
        if word.is_empty() {
            return Ok(None);
        }
        if !rest.trim().is_empty() {
            return Err(HostCommandError::InvalidCommand(format!(
                "Unexpected argument: {}",
                rest.trim()
            )));
        }

        let list = word.strip_prefix(COLUMNS_FLAG).ok_or_else(|| {
            HostCommandError::InvalidCommand(format!("Unexpected argument: {}", word))
        })?;

        let columns: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect();

        if columns.is_empty() {
            return Err(HostCommandError::MissingArgument("column names".to_string()));
        }
        Ok(Some(columns))
    }
}

/// Splits off the first whitespace-delimited word
///
/// The remainder keeps its inner spacing with leading whitespace removed.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}
