//! Error types
//!
//! `DumpError` aborts a run; `ReadError` is recorded per file and rendered inline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the whole run
#[derive(Debug, Error)]
pub enum DumpError {
    /// Root is missing, not a directory, or not readable
    #[error("'{}' is not a valid directory: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// The output file could not be created or written
    #[error("cannot write output file '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DumpError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DumpError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DumpError::Output {
            path: path.into(),
            source,
        }
    }
}

/// Errors reading a single file; never fatal
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid UTF-8 sequence at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_root_message() {
        let err = DumpError::invalid_root("/nope", "No such file or directory");
        let msg = err.to_string();
        assert!(msg.contains("/nope"));
        assert!(msg.contains("not a valid directory"));
    }

    #[test]
    fn test_read_error_from_io() {
        let err: ReadError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_invalid_utf8_message() {
        let err = ReadError::InvalidUtf8 { valid_up_to: 3 };
        assert_eq!(err.to_string(), "invalid UTF-8 sequence at byte 3");
    }
}
