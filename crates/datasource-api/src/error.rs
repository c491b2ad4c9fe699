//! Error types for datasource processors
//!
//! Every failure is returned to the immediate caller unchanged. Nothing at
//! this layer retries or translates errors; the category only helps callers
//! decide how to report them.

use std::fmt;
use thiserror::Error;

/// Result type for datasource operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed address, port or SQL text
    Parse,
    /// Malformed persisted JSON
    Deserialization,
    /// Record could not be written as JSON
    Serialization,
    /// Driver missing from the driver manager
    Driver,
    /// Network or protocol failure while connecting
    Connection,
    /// Credential failures (including undecodable stored passwords)
    Authentication,
    /// User supplied parameter rejected by a check
    Validation,
    /// Configuration error
    Configuration,
    /// Unknown/other errors
    Other,
}

/// Main error type for datasource processors
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    /// Address, port or SQL text could not be parsed
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Persisted JSON could not be deserialized
    #[error("deserialization error: {message}")]
    Deserialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be serialized
    #[error("serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// No driver registered under the requested name
    #[error("driver not found: {driver}")]
    DriverNotFound { driver: String },

    /// Connection failed
    #[error("connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication failed or stored credentials are unusable
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Datasource parameter rejected
    #[error("invalid parameter: {message}")]
    InvalidParam { message: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Unsupported dialect or operation
    #[error("unsupported: {message}")]
    Unsupported { message: String },
}

impl Error {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::Deserialization { .. } => ErrorCategory::Deserialization,
            Self::Serialization { .. } => ErrorCategory::Serialization,
            Self::DriverNotFound { .. } => ErrorCategory::Driver,
            Self::Connection { .. } => ErrorCategory::Connection,
            Self::Authentication { .. } => ErrorCategory::Authentication,
            Self::InvalidParam { .. } => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Unsupported { .. } => ErrorCategory::Other,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Wrap a serde_json failure
    pub fn deserialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Deserialization {
            message: message.into(),
            source,
        }
    }

    /// Wrap a serde_json serialization failure
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a driver-not-found error
    pub fn driver_not_found(driver: impl Into<String>) -> Self {
        Self::DriverNotFound {
            driver: driver.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an invalid-parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParam {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse"),
            Self::Deserialization => write!(f, "deserialization"),
            Self::Serialization => write!(f, "serialization"),
            Self::Driver => write!(f, "driver"),
            Self::Connection => write!(f, "connection"),
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Configuration => write!(f, "configuration"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_category() {
        assert_eq!(Error::parse("bad port").category(), ErrorCategory::Parse);
        assert_eq!(
            Error::driver_not_found("com.example.Driver").category(),
            ErrorCategory::Driver
        );
        assert_eq!(
            Error::connection("refused").category(),
            ErrorCategory::Connection
        );
        assert_eq!(
            Error::invalid_param("host").category(),
            ErrorCategory::Validation
        );
    }

    #[test]
    fn test_deserialization_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::deserialization("bad connection json", json_err);

        assert_eq!(err.category(), ErrorCategory::Deserialization);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_display() {
        let err = Error::driver_not_found("com.sybase.jdbc4.jdbc.SybDriver");
        assert_eq!(
            err.to_string(),
            "driver not found: com.sybase.jdbc4.jdbc.SybDriver"
        );

        let err = Error::connection_with_source(
            "login failed",
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        );
        assert!(err.to_string().contains("login failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Driver.to_string(), "driver");
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
    }
}
