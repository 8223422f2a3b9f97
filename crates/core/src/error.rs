//! Error types for ncs-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for ncs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storage operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file or setting error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied by the caller (bucket name, key, ACL, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or permission error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::TomlParse(_) | Error::TomlSerialize(_) => 2, // UsageError
            Error::Network(_) => 3,                             // NetworkError
            Error::Auth(_) => 4,                                // AuthError
            Error::NotFound(_) => 5,                            // NotFound
            Error::Conflict(_) => 6,                            // Conflict
            _ => 1,                                             // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidArgument("test".into()).exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_io_error_is_general() {
        let err = Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "test.mp4",
        ));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_bad_url_is_usage_error() {
        let err = Error::from(url::Url::parse("not a url").unwrap_err());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("bucket hello-world".into());
        assert_eq!(err.to_string(), "Not found: bucket hello-world");

        let err = Error::InvalidArgument("bucket name cannot be empty".into());
        assert_eq!(
            err.to_string(),
            "Invalid argument: bucket name cannot be empty"
        );
    }
}
