//! Error types for TreeHouse

use thiserror::Error;

/// Main error type for TreeHouse operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// No valid session when one is required
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Storage provider rejected or failed a write
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// Storage provider rejected or failed a list/read
    #[error("Storage read failed: {0}")]
    StorageRead(String),

    /// Input rejected before reaching any provider
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Identity provider failure (code exchange, profile lookup)
    #[error("Identity provider error: {0}")]
    Auth(String),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// Whether the failure came from the storage provider.
    pub fn is_storage(&self) -> bool {
        matches!(self, TreeError::StorageWrite(_) | TreeError::StorageRead(_))
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::Serialization(err.to_string())
    }
}

/// Result type alias using TreeError
pub type TreeResult<T> = Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TreeError::NotAuthenticated("no session".to_string());
        assert_eq!(format!("{}", err), "Not authenticated: no session");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tree_err: TreeError = io_err.into();
        assert!(matches!(tree_err, TreeError::Io(_)));
    }

    #[test]
    fn test_storage_classification() {
        assert!(TreeError::StorageWrite("denied".into()).is_storage());
        assert!(TreeError::StorageRead("timeout".into()).is_storage());
        assert!(!TreeError::Validation("empty".into()).is_storage());
    }
}
