//! Error types for TaskNest
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized to the frontend.
//!
//! Stale references (moving, editing or deleting an entity that no longer
//! exists) are not errors: those operations return an empty
//! outcome instead of an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// A move produced an order batch that could not be applied in full.
    /// The transaction is rolled back; callers must re-read the board.
    #[error("Order batch for {id} was not applied: {reason}")]
    BatchWrite { id: String, reason: String },

    /// Folder removal and its task cleanup did not complete together.
    #[error("Cascading delete of folder {id} failed: {reason}")]
    CascadeDelete { id: String, reason: String },
}

impl AppError {
    /// Whether the error leaves the caller's projection untrustworthy.
    ///
    /// The interaction layer should force a fresh read after these.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::BatchWrite { .. } | Self::CascadeDelete { .. })
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let batch = AppError::BatchWrite {
            id: "t1".to_string(),
            reason: "row vanished".to_string(),
        };
        let cascade = AppError::CascadeDelete {
            id: "f1".to_string(),
            reason: "disk full".to_string(),
        };

        assert!(batch.is_fatal());
        assert!(cascade.is_fatal());
        assert!(!AppError::Validation("empty title".to_string()).is_fatal());
    }

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::FolderNotFound("abc".to_string());
        let json = serde_json::to_string(&err).unwrap();

        assert_eq!(json, "\"Folder not found: abc\"");
    }
}
