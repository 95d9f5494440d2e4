//! # Centralized Error Handling
//!
//! Error type shared by the config layer and the price client.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_timeout(raw: &str) -> Result<u64> {
//!     raw.parse()
//!         .map_err(|_| AppError::Config(format!("Not a timeout: {}", raw)))
//! }
//! ```

use lib_utils::envs;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure or non-success status from a remote service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The service does not know the requested resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local setup failure, such as an HTTP client that cannot be built.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<envs::Error> for AppError {
    fn from(err: envs::Error) -> Self {
        match err {
            envs::Error::MissingEnv(name) => AppError::Config(format!("{} must be set", name)),
            envs::Error::WrongFormat(name) => AppError::Config(format!("{} has an invalid value", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_errors_map_to_config() {
        let err: AppError = envs::Error::WrongFormat("SWAP_HTTP_TIMEOUT_SECS").into();
        assert_eq!(err.to_string(), "Configuration error: SWAP_HTTP_TIMEOUT_SECS has an invalid value");
    }

    #[test]
    fn test_json_errors_map_to_decoding() {
        let err: AppError = serde_json::from_str::<u64>("{").unwrap_err().into();
        assert!(matches!(err, AppError::Decoding(msg) if msg.starts_with("JSON error")));
    }
}
