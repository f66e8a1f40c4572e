// crates/store/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed store file {path}: {message}")]
    MalformedFile { path: PathBuf, message: String },

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = StoreError::io(
            "/tmp/store.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/store.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_malformed_display() {
        let err = StoreError::MalformedFile {
            path: PathBuf::from("/tmp/store.json"),
            message: "expected value at line 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed store file /tmp/store.json: expected value at line 1"
        );
    }
}
