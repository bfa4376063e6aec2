//! # Host Runtime
//!
//! The command loop that ties configuration, bootstrap and the document tree
//! together. Each input line yields exactly one JSON output line:
//!
//! ```text
//! {"ok": <result>}
//! {"error": "<kind>", "message": "<description>"}
//! ```

use crate::bootstrap::Bootstrap;
use crate::commands::{HostCommand, HostCommandParser};
use crate::config::{ConfigError, ProviderConfig};
use log::{debug, info, warn};
use serde_json::{json, Value};
use services_fs_view::{DocumentOperations, DocumentsProvider, OpenMode, OperationError};
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(#[from] OperationError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Host runtime state
pub struct HostRuntime {
    bootstrap: Bootstrap,
    executed: usize,
}

impl HostRuntime {
    /// Validates the configuration and bootstraps the provider
    pub fn new(config: &ProviderConfig) -> Result<Self, HostRuntimeError> {
        config.validate()?;
        let bootstrap = Bootstrap::start(config)?;
        Ok(Self {
            bootstrap,
            executed: 0,
        })
    }

    pub fn provider(&self) -> &DocumentsProvider {
        &self.bootstrap.provider
    }

    /// Number of commands executed so far
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Serves commands from `input` until end of input or `quit`
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn run(
        &mut self,
        input: impl BufRead,
        mut output: impl Write,
    ) -> Result<(), HostRuntimeError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match self.step(trimmed) {
                Some(reply) => {
                    writeln!(output, "{}", reply)?;
                    output.flush()?;
                }
                None => {
                    info!("quit requested");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handles one command line; `None` means quit
    pub fn step(&mut self, line: &str) -> Option<Value> {
        debug!("command: {}", line);

        let command = match HostCommandParser::parse(line) {
            Ok(HostCommand::Quit) => return None,
            Ok(command) => command,
            Err(err) => {
                warn!("rejected command {:?}: {}", line, err);
                return Some(json!({ "error": "invalid_command", "message": err.to_string() }));
            }
        };

        self.executed += 1;
        let reply = match self.execute(&command) {
            Ok(value) => json!({ "ok": value }),
            Err(err) => {
                warn!("command {:?} failed: {}", line, err);
                json!({ "error": err.kind(), "message": err.to_string() })
            }
        };
        Some(reply)
    }

    /// Executes a parsed command against the provider
    pub fn execute(&self, command: &HostCommand) -> Result<Value, OperationError> {
        let provider = &self.bootstrap.provider;
        let tree = provider.tree();

        match command {
            HostCommand::Roots { columns } => {
                let columns = projection(columns);
                Ok(provider.query_roots(columns.as_deref()).to_json())
            }
            HostCommand::List { parent_id, columns } => {
                let columns = projection(columns);
                let set = provider.query_child_documents(parent_id, columns.as_deref())?;
                Ok(set.to_json())
            }
            HostCommand::Stat { id, columns } => {
                let columns = projection(columns);
                let set = provider.query_document(id, columns.as_deref())?;
                Ok(first_row(set.to_json()))
            }
            HostCommand::Type { id } => Ok(Value::String(tree.document_type(id)?)),
            HostCommand::Create {
                parent_id,
                mime_type,
                name,
            } => {
                let id = tree.create_document(parent_id, mime_type, name)?;
                Ok(Value::String(id.to_string()))
            }
            HostCommand::Delete { id } => {
                tree.delete_document(id)?;
                Ok(Value::Bool(true))
            }
            HostCommand::Move {
                source_id,
                source_parent_id,
                target_parent_id,
            } => {
                let id = tree.move_document(source_id, source_parent_id, target_parent_id)?;
                Ok(Value::String(id.to_string()))
            }
            HostCommand::Rename { id, name } => {
                let id = tree.rename_document(id, name)?;
                Ok(Value::String(id.to_string()))
            }
            HostCommand::Read { id } => {
                let mut file = tree.open_document(id, OpenMode::Read, None)?;
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            }
            HostCommand::Write { id, text, append } => {
                let mode = if *append {
                    OpenMode::WriteAppend
                } else {
                    OpenMode::WriteTruncate
                };
                let mut file = tree.open_document(id, mode, None)?;
                file.write_all(text.as_bytes())?;
                Ok(json!(text.len()))
            }
            HostCommand::IsChild {
                ancestor_id,
                candidate_id,
            } => Ok(Value::Bool(tree.is_descendant(candidate_id, ancestor_id))),
            HostCommand::Quit => Ok(Value::Null),
        }
    }

    /// Stops the helper process, if any
    pub fn shutdown(&mut self) {
        self.bootstrap.shutdown();
    }
}

fn projection(columns: &Option<Vec<String>>) -> Option<Vec<&str>> {
    columns
        .as_ref()
        .map(|columns| columns.iter().map(String::as_str).collect())
}

fn first_row(rows: Value) -> Value {
    match rows {
        Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn runtime(base: &Path) -> HostRuntime {
        HostRuntime::new(&ProviderConfig::new(base, "app")).unwrap()
    }

    fn run_script(runtime: &mut HostRuntime, script: &str) -> Vec<Value> {
        let mut output = Vec::new();
        runtime.run(script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_roots() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(&mut runtime, "roots --columns=root_id,title\n");
        assert_eq!(
            replies,
            vec![json!({ "ok": [{ "root_id": "app", "title": "app" }] })]
        );
    }

    #[test]
    fn test_create_write_read() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(
            &mut runtime,
            "touch app notes.txt\nwrite app/notes.txt hello\nappend app/notes.txt  world\ncat app/notes.txt\n",
        );
        assert_eq!(replies[0], json!({ "ok": "app/notes.txt" }));
        assert_eq!(replies[1], json!({ "ok": 5 }));
        assert_eq!(replies[3], json!({ "ok": "helloworld" }));
        assert_eq!(runtime.executed(), 4);
    }

    #[test]
    fn test_stat_returns_single_row() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(&mut runtime, "stat app/a.txt --columns=display_name,size\n");
        assert_eq!(
            replies,
            vec![json!({ "ok": { "display_name": "a.txt", "size": 3 } })]
        );
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(
            &mut runtime,
            "stat app/missing\nbogus\nls ../etc\nmkdir app docs\n",
        );
        assert_eq!(replies.len(), 4);
        assert_eq!(replies[0]["error"], "not_found");
        assert_eq!(replies[1]["error"], "invalid_command");
        assert_eq!(replies[2]["error"], "invalid_document_id");
        assert_eq!(replies[3], json!({ "ok": "app/docs" }));
    }

    #[test]
    fn test_comments_and_quit() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(
            &mut runtime,
            "# setup\n\nmkdir app a\nquit\nmkdir app b\n",
        );
        assert_eq!(replies.len(), 1);
        assert!(dir.path().join("a").is_dir());
        assert!(!dir.path().join("b").exists());
    }

    #[test]
    fn test_move_rename_delete_and_child() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(
            &mut runtime,
            "mkdir app docs\ntouch app a.txt\nmv app/a.txt app app/docs\nrename app/docs/a.txt b.txt\nchild app app/docs/b.txt\nrm app/docs\nchild app/docs app\n",
        );
        assert_eq!(replies[2], json!({ "ok": "app/docs/a.txt" }));
        assert_eq!(replies[3], json!({ "ok": "app/docs/b.txt" }));
        assert_eq!(replies[4], json!({ "ok": true }));
        assert_eq!(replies[5], json!({ "ok": true }));
        assert_eq!(replies[6], json!({ "ok": false }));
        assert!(!dir.path().join("docs").exists());
    }

    #[test]
    fn test_type() {
        let dir = tempdir().unwrap();
        let mut runtime = runtime(dir.path());

        let replies = run_script(&mut runtime, "type app\n");
        assert_eq!(
            replies,
            vec![json!({ "ok": "vnd.android.document/directory" })]
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempdir().unwrap();
        let result = HostRuntime::new(&ProviderConfig::new(dir.path(), "a/b"));
        assert!(matches!(result, Err(HostRuntimeError::Config(_))));
    }
}
