//! # Provider Bootstrap
//!
//! Brings the provider up before the first command is served:
//!
//! 1. Create the base directory if it is missing
//! 2. Start the configured helper process inside the base directory
//!
//! A helper that fails to start is reported and otherwise ignored; the
//! document tree works without it.

use crate::config::{HelperConfig, ProviderConfig};
use log::{info, warn};
use services_fs_view::{DocumentsProvider, OperationError};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Starts the external helper process
pub struct HelperLauncher;

impl HelperLauncher {
    /// Spawns the helper with `base_dir` as its working directory
    ///
    /// The helper's standard streams are detached so its output never mixes
    /// with the host's replies. Returns `None` when the process could not be
    /// started.
    pub fn launch(helper: &HelperConfig, base_dir: &Path) -> Option<Child> {
        let spawned = Command::new(&helper.program)
            .args(&helper.args)
            .current_dir(base_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                info!(
                    "helper {} started (pid {})",
                    helper.program.display(),
                    child.id()
                );
                Some(child)
            }
            Err(err) => {
                warn!(
                    "failed to start helper {}: {}",
                    helper.program.display(),
                    err
                );
                None
            }
        }
    }
}

/// A provider that is ready to serve, plus its helper if one is running
pub struct Bootstrap {
    pub provider: DocumentsProvider,
    pub helper: Option<Child>,
}

impl Bootstrap {
    /// Creates the provider and then launches the helper
    pub fn start(config: &ProviderConfig) -> Result<Self, OperationError> {
        let provider = DocumentsProvider::new(config.tree_config(), config.labels())?;
        info!(
            "serving root {} from {}",
            config.root_id,
            config.base_dir.display()
        );

        let helper = config
            .helper
            .as_ref()
            .and_then(|helper| HelperLauncher::launch(helper, provider.tree().base_dir()));

        Ok(Self { provider, helper })
    }

    /// Stops the helper if it is still running
    pub fn shutdown(&mut self) {
        if let Some(mut child) = self.helper.take() {
            match child.try_wait() {
                Ok(Some(status)) => info!("helper already exited: {}", status),
                _ => {
                    if let Err(err) = child.kill() {
                        warn!("failed to stop helper: {}", err);
                    }
                    if let Err(err) = child.wait() {
                        warn!("failed to reap helper: {}", err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_start_creates_base_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("files").join("proxy");
        let config = ProviderConfig::new(&base, "app");

        let bootstrap = Bootstrap::start(&config).unwrap();
        assert!(base.is_dir());
        assert!(bootstrap.helper.is_none());
    }

    #[test]
    fn test_missing_helper_is_not_fatal() {
        let dir = tempdir().unwrap();
        let mut config = ProviderConfig::new(dir.path(), "app");
        config.helper = Some(HelperConfig::new(dir.path().join("no-such-helper")));

        let mut bootstrap = Bootstrap::start(&config).unwrap();
        assert!(bootstrap.helper.is_none());
        bootstrap.shutdown();
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_runs_in_base_dir() {
        let dir = tempdir().unwrap();
        let mut helper = HelperConfig::new("/bin/sh");
        helper.args = vec!["-c".to_string(), "pwd > cwd.txt".to_string()];

        let mut child = HelperLauncher::launch(&helper, dir.path()).unwrap();
        assert!(child.wait().unwrap().success());

        let cwd = std::fs::read_to_string(dir.path().join("cwd.txt")).unwrap();
        let expected = dir.path().canonicalize().unwrap();
        let reported = Path::new(cwd.trim()).canonicalize().unwrap();
        assert_eq!(reported, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_shutdown_stops_running_helper() {
        let dir = tempdir().unwrap();
        let mut config = ProviderConfig::new(dir.path(), "app");
        let mut helper = HelperConfig::new("/bin/sh");
        helper.args = vec!["-c".to_string(), "sleep 30".to_string()];
        config.helper = Some(helper);

        let mut bootstrap = Bootstrap::start(&config).unwrap();
        assert!(bootstrap.helper.is_some());

        bootstrap.shutdown();
        assert!(bootstrap.helper.is_none());
    }

    #[test]
    fn test_invalid_base_dir_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        let config = ProviderConfig::new(file.join("below"), "app");
        assert!(Bootstrap::start(&config).is_err());
    }
}
