//! Error types for famface.

use thiserror::Error;

/// Result type alias using famface's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for famface operations.
///
/// Only the state store and its collaborators produce these. The
/// relationship and search engines never fail; they degrade to empty
/// results instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Person not found
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// Photo not found
    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    /// Relationship not found
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_person_not_found() {
        let err = Error::PersonNotFound("p1".to_string());
        assert_eq!(err.to_string(), "Person not found: p1");
    }

    #[test]
    fn test_error_display_photo_not_found() {
        let err = Error::PhotoNotFound("photo9".to_string());
        assert_eq!(err.to_string(), "Photo not found: photo9");
    }

    #[test]
    fn test_error_display_relationship_not_found() {
        let err = Error::RelationshipNotFound("r42".to_string());
        assert_eq!(err.to_string(), "Relationship not found: r42");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("Name is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: Name is required");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("data dir cannot be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: data dir cannot be empty"
        );
    }

    #[test]
    fn test_error_display_storage() {
        let err = Error::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
