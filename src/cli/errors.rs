//! CLI-specific error types
//!
//! Any CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::access::AccessError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, state or audit files)
    IoError,
    /// Argument could not be interpreted
    InvalidArgument,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "OPSGATE_CLI_CONFIG_ERROR",
            Self::IoError => "OPSGATE_CLI_IO_ERROR",
            Self::InvalidArgument => "OPSGATE_CLI_INVALID_ARGUMENT",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<AccessError> for CliError {
    fn from(e: AccessError) -> Self {
        let message = format!("{} ({})", e, e.code());
        match e {
            AccessError::InvalidConfig(_) => Self::config_error(message),
            _ if e.is_client_error() => Self::invalid_argument(message),
            _ => Self::io_error(message),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad key");
        assert_eq!(err.to_string(), "OPSGATE_CLI_CONFIG_ERROR: bad key");
    }

    #[test]
    fn test_access_error_mapping() {
        let err: CliError = AccessError::UnknownClassification("COSMIC".into()).into();
        assert_eq!(err.code(), &CliErrorCode::InvalidArgument);
        assert!(err.message().contains("COSMIC"));
        assert!(err.message().contains("OPSGATE_UNKNOWN_CLASSIFICATION"));

        let err: CliError = AccessError::Storage("disk".into()).into();
        assert_eq!(err.code(), &CliErrorCode::IoError);
        assert!(err.message().contains("OPSGATE_STORAGE_ERROR"));

        let err: CliError = AccessError::InvalidConfig("x".into()).into();
        assert_eq!(err.code_str(), "OPSGATE_CLI_CONFIG_ERROR");
    }
}
