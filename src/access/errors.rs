//! # Access Errors
//!
//! Error types for the access module.
//!
//! None of the consumer-facing gate operations return these. They surface
//! only from storage, parsing, catalog validation, and configuration.

use thiserror::Error;

/// Result type for access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Access subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    // ==================
    // Parsing Errors
    // ==================

    /// Classification label is not one of the five known levels
    #[error("Unknown classification level: {0}")]
    UnknownClassification(String),

    // ==================
    // Storage Errors
    // ==================

    /// Role store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    // ==================
    // Definition Errors
    // ==================

    /// Role catalog violates its structural rules
    #[error("Invalid role catalog: {0}")]
    InvalidCatalog(String),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AccessError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::UnknownClassification(_) => "OPSGATE_UNKNOWN_CLASSIFICATION",
            AccessError::Storage(_) => "OPSGATE_STORAGE_ERROR",
            AccessError::InvalidCatalog(_) => "OPSGATE_INVALID_CATALOG",
            AccessError::InvalidConfig(_) => "OPSGATE_INVALID_CONFIG",
        }
    }

    /// Returns whether the error was caused by caller input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AccessError::UnknownClassification(_) | AccessError::InvalidConfig(_)
        )
    }
}

impl From<std::io::Error> for AccessError {
    fn from(e: std::io::Error) -> Self {
        AccessError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(e: serde_json::Error) -> Self {
        AccessError::Storage(format!("JSON error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AccessError::UnknownClassification("X".into()).code(),
            "OPSGATE_UNKNOWN_CLASSIFICATION"
        );
        assert_eq!(AccessError::Storage("x".into()).code(), "OPSGATE_STORAGE_ERROR");
        assert_eq!(
            AccessError::InvalidCatalog("x".into()).code(),
            "OPSGATE_INVALID_CATALOG"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(AccessError::UnknownClassification("X".into()).is_client_error());
        assert!(!AccessError::Storage("disk".into()).is_client_error());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AccessError = io.into();
        assert!(matches!(err, AccessError::Storage(msg) if msg.contains("denied")));
    }
}
