//! # Common Error Types
//!
//! Error type for the controller and its service seams.
//!
//! ## Error Categories
//!
//! - **Api**: quote or price service communication (network, HTTP status, JSON parsing)
//! - **Validation**: malformed user input rejected before it reaches the controller
//! - **Config**: startup configuration that cannot be used
//!
//! ## Usage Pattern
//!
//! ```rust
//! use swap_terminal::core::error::AppError;
//!
//! fn validate_position(position: f64) -> Result<f64, AppError> {
//!     if !(0.0..=1.0).contains(&position) {
//!         return Err(AppError::Validation("Slider position must be between 0 and 1".to_string()));
//!     }
//!     Ok(position)
//! }
//! ```
//!
//! Quote service failures never surface as `AppError` past the controller: they are
//! folded into a [`shared::dto::quote::QuoteError`] and stored in the quote slot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Quote or price service communication error.
    ///
    /// ```rust
    /// use swap_terminal::core::error::AppError;
    ///
    /// let err = AppError::Api("Connection timeout".to_string());
    /// assert_eq!(err.to_string(), "API error: Connection timeout");
    /// ```
    #[error("API error: {0}")]
    Api(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<lib_core::AppError> for AppError {
    fn from(err: lib_core::AppError) -> Self {
        match err {
            lib_core::AppError::Config(msg) => AppError::Config(msg),
            other => AppError::Api(other.to_string()),
        }
    }
}

impl From<lib_swap::currency::UnknownCurrency> for AppError {
    fn from(err: lib_swap::currency::UnknownCurrency) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_config_error_stays_config() {
        let err: AppError = lib_core::AppError::Config("SWAP_QUOTE_API_URL is missing a host".into()).into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_transport_error_becomes_api() {
        let err: AppError = anyhow::anyhow!("connection refused").into();
        assert_eq!(err.to_string(), "API error: connection refused");
    }
}
