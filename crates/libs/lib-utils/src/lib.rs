//! # Utilities Library
//!
//! Environment variable helpers and small validation checks shared by the config layer.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};
pub use validation::{validate_evm_address, validate_http_url, validate_not_empty};
