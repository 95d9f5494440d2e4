//! # Core Library
//!
//! Configuration and the shared error type for the swap engine.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
