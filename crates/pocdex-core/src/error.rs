//! Error types for indexing.
//!
//! Every variant is fatal for a run. The CLI prints it and exits non-zero;
//! nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience type for functions that can fail while indexing.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Things that can go wrong when building or persisting an index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// The configured root does not exist. Usually means the repository
    /// was never cloned, or the path is relative to the wrong directory.
    #[error("repository path not found at '{0}'")]
    RootNotFound(PathBuf),

    /// The configured root exists but is a file.
    #[error("repository path '{0}' is not a directory")]
    RootNotADirectory(PathBuf),

    /// Couldn't create or write the output document.
    #[error("failed to write index '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Couldn't read a previously saved document or a config file.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A saved index parsed as JSON but isn't an identifier to URL mapping.
    #[error("corrupted index '{path}': {message}")]
    Corrupted { path: PathBuf, message: String },

    /// A config file parsed as JSON but doesn't describe a valid config.
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

impl IndexError {
    /// Creates a write error with the path for context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a read error with the path for context.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// True for the up-front root checks, which never touch the output.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::RootNotFound(_) | Self::RootNotADirectory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_errors_are_preconditions() {
        assert!(IndexError::RootNotFound(PathBuf::from("x")).is_precondition());
        assert!(IndexError::RootNotADirectory(PathBuf::from("x")).is_precondition());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!IndexError::write("out.json", io).is_precondition());
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = IndexError::RootNotFound(PathBuf::from("PoC-in-GitHub"));
        assert_eq!(
            err.to_string(),
            "repository path not found at 'PoC-in-GitHub'"
        );
    }
}
