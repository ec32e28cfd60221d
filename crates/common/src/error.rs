//! Error handling for the fatwa browser
//!
//! One application-level error enum with dedicated sub-enums for
//! configuration and client failures. HTTP errors keep the method, URL, and
//! status code so a failure can be reported without re-fetching anything.

use thiserror::Error;

/// Result type alias using the application's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fatwa browser.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network and API client errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// I/O errors (terminal setup, file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generic error with context
    #[error("Application error: {message}")]
    Generic {
        /// Error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        /// Configuration field name
        field: String,
        /// Invalid value
        value: String,
    },

    /// Configuration file parsing error
    #[error("Failed to parse configuration file '{path}'")]
    ParseError {
        /// Configuration file path
        path: String,
        /// Parse error source
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Client and API-specific errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Server could not be reached at all
    #[error("Failed to connect to server at '{url}'")]
    ConnectionFailed {
        /// Server URL
        url: String,
        /// Connection error source
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Request completed with a non-success status
    #[error("HTTP request failed: {method} {url} -> {status}")]
    Http {
        /// HTTP method
        method: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body could not be decoded
    #[error("Failed to parse API response from '{endpoint}'")]
    ParseError {
        /// API endpoint
        endpoint: String,
        /// Parse error source
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Create a generic error with a message.
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
            source: None,
        }
    }

    /// Short message suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            Error::Client(ClientError::ConnectionFailed { url, .. }) => {
                format!("Unable to reach server at {url}")
            }
            Error::Client(ClientError::Http { status, .. }) => {
                format!("HTTP {status}")
            }
            Error::Client(ClientError::ParseError { endpoint, .. }) => {
                format!("Bad response from {endpoint}")
            }
            Error::Config(ConfigError::InvalidValue { field, .. }) => {
                format!("Invalid configuration for {field}")
            }
            _ => "An unexpected error occurred".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::ConnectionFailed {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                source: Box::new(err),
            }
        } else if err.is_status() {
            ClientError::Http {
                method: "Unknown".to_string(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            }
        } else {
            ClientError::ParseError {
                endpoint: err.url().map(|u| u.to_string()).unwrap_or_default(),
                source: Box::new(err),
            }
        }
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidValue {
            field: "server_url".to_string(),
            value: err.to_string(),
        }
    }
}
