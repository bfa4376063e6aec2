//! Open modes and cancellation
//!
//! Mode tokens follow the browsing client's conventions: `r`, `w`, `wt`,
//! `wa`, `rw`, `rwt`.

use crate::operations::OperationError;
use std::fs::OpenOptions;
use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Access mode for opening a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// `r`
    Read,
    /// `w` or `wt`: create if missing, truncate
    WriteTruncate,
    /// `wa`: create if missing, append
    WriteAppend,
    /// `rw`: create if missing
    ReadWrite,
    /// `rwt`: create if missing, truncate
    ReadWriteTruncate,
}

impl OpenMode {
    /// Parses a mode token
    pub fn parse(token: &str) -> Result<Self, OperationError> {
        match token {
            "r" => Ok(OpenMode::Read),
            "w" | "wt" => Ok(OpenMode::WriteTruncate),
            "wa" => Ok(OpenMode::WriteAppend),
            "rw" => Ok(OpenMode::ReadWrite),
            "rwt" => Ok(OpenMode::ReadWriteTruncate),
            other => Err(OperationError::InvalidMode(other.to_string())),
        }
    }

    /// Canonical token for this mode
    pub fn token(&self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::WriteTruncate => "wt",
            OpenMode::WriteAppend => "wa",
            OpenMode::ReadWrite => "rw",
            OpenMode::ReadWriteTruncate => "rwt",
        }
    }

    /// True if the mode allows writing
    pub fn is_write(&self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    /// Open options implementing this mode
    pub fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::WriteTruncate => {
                options.write(true).create(true).truncate(true);
            }
            OpenMode::WriteAppend => {
                options.append(true).create(true);
            }
            OpenMode::ReadWrite => {
                options.read(true).write(true).create(true);
            }
            OpenMode::ReadWriteTruncate => {
                options.read(true).write(true).create(true).truncate(true);
            }
        }
        options
    }
}

impl FromStr for OpenMode {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Advisory cancellation flag shared between a caller and a worker
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with `Interrupted` if cancellation was requested
    pub fn check(&self) -> io::Result<()> {
        if self.is_cancelled() {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "operation cancelled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(OpenMode::parse("r").unwrap(), OpenMode::Read);
        assert_eq!(OpenMode::parse("w").unwrap(), OpenMode::WriteTruncate);
        assert_eq!(OpenMode::parse("wt").unwrap(), OpenMode::WriteTruncate);
        assert_eq!(OpenMode::parse("wa").unwrap(), OpenMode::WriteAppend);
        assert_eq!(OpenMode::parse("rw").unwrap(), OpenMode::ReadWrite);
        assert_eq!(OpenMode::parse("rwt").unwrap(), OpenMode::ReadWriteTruncate);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            OpenMode::parse("x"),
            Err(OperationError::InvalidMode(_))
        ));
        assert!(matches!(
            "".parse::<OpenMode>(),
            Err(OperationError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_token_round_trip() {
        for mode in [
            OpenMode::Read,
            OpenMode::WriteTruncate,
            OpenMode::WriteAppend,
            OpenMode::ReadWrite,
            OpenMode::ReadWriteTruncate,
        ] {
            assert_eq!(OpenMode::parse(mode.token()).unwrap(), mode);
        }
    }

    #[test]
    fn test_is_write() {
        assert!(!OpenMode::Read.is_write());
        assert!(OpenMode::WriteAppend.is_write());
    }

    #[test]
    fn test_cancellation_is_shared() {
        let signal = CancellationSignal::new();
        let worker_view = signal.clone();
        assert!(worker_view.check().is_ok());

        signal.cancel();
        assert!(worker_view.is_cancelled());
        let err = worker_view.check().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
