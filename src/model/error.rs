//! Structured error types for talking to a FlashVault server

use std::fmt;

/// Errors that can occur while calling one of the server endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum VaultError {
    /// Connection refused, reset, DNS failure and other transport problems
    Network(String),
    /// Response body was not the JSON the endpoint promises
    Decode(String),
    /// Local file could not be read
    Io(String),
    /// Server address or remote path could not be turned into an endpoint URL
    InvalidUrl(String),
    /// A value could not be sent as a request header
    InvalidHeader(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Network(msg) => write!(f, "Network error: {}", msg),
            VaultError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            VaultError::Io(msg) => write!(f, "IO error: {}", msg),
            VaultError::InvalidUrl(msg) => write!(f, "Invalid url: {}", msg),
            VaultError::InvalidHeader(msg) => write!(f, "Invalid header value: {}", msg),
        }
    }
}

impl std::error::Error for VaultError {}

impl VaultError {
    /// True for failures that happened before any HTTP status was received
    pub fn is_transport(&self) -> bool {
        matches!(self, VaultError::Network(_))
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VaultError::Decode(e.to_string())
        } else {
            VaultError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for VaultError {
    fn from(e: std::io::Error) -> Self {
        VaultError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for VaultError {
    fn from(e: url::ParseError) -> Self {
        VaultError::InvalidUrl(e.to_string())
    }
}

/// Result type for server operations
pub type VaultResult<T = ()> = Result<T, VaultError>;
