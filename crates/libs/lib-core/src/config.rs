//! # Application Configuration
//!
//! Endpoints, timing and defaults for the swap engine, loaded from environment variables.
//! Every value has a default so the engine runs against local services with no setup.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config()?;
//! let quote_url = &core_config()?.quote_api_url;
//! # Ok::<(), lib_core::AppError>(())
//! ```
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SWAP_QUOTE_API_URL` | `http://127.0.0.1:3001` |
//! | `SWAP_PRICE_API_URL` | `http://127.0.0.1:3002` |
//! | `SWAP_NATIVE_CURRENCY` | `USD` |
//! | `SWAP_FROM_ADDRESS` | zero address |
//! | `SWAP_HTTP_TIMEOUT_SECS` | `10` |
//! | `SWAP_PRICE_REFRESH_MS` | `10000` |
//! | `SWAP_SLIDER_DEBOUNCE_MS` | `200` |
//! | `SWAP_TYPED_DEBOUNCE_MS` | `400` |
//! | `SWAP_DEFAULT_SLIPPAGE_BIPS` | `{}` (JSON object of chain name to bips) |

use crate::error::{AppError, Result};
use lib_utils::envs::{self, get_env_or, get_env_parse_or};
use lib_utils::validation::{validate_evm_address, validate_http_url, validate_not_empty};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_QUOTE_API_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_PRICE_API_URL: &str = "http://127.0.0.1:3002";
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Swap engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the quote service.
    pub quote_api_url: String,

    /// Base URL of the token price service.
    pub price_api_url: String,

    /// ISO code of the display currency. Parsed by the controller.
    pub native_currency: String,

    /// Wallet address quotes are requested for.
    pub from_address: String,

    pub http_timeout_secs: u64,

    /// Interval between price refreshes of the selected assets.
    pub price_refresh_ms: u64,

    /// Quiet period after a slider move before a quote is requested.
    pub slider_debounce_ms: u64,

    /// Quiet period after typing before a quote is requested.
    pub typed_debounce_ms: u64,

    /// Per-chain slippage overrides in basis points, keyed by chain name.
    pub default_slippage_bips: HashMap<String, u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            native_currency: "USD".to_string(),
            from_address: ZERO_ADDRESS.to_string(),
            http_timeout_secs: 10,
            price_refresh_ms: 10_000,
            slider_debounce_ms: 200,
            typed_debounce_ms: 400,
            default_slippage_bips: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let default_slippage_bips = match envs::get_env("SWAP_DEFAULT_SLIPPAGE_BIPS") {
            Ok(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| {
                AppError::Config(format!("SWAP_DEFAULT_SLIPPAGE_BIPS must be a JSON object of chain name to bips: {}", e))
            })?,
            _ => defaults.default_slippage_bips,
        };

        Ok(Self {
            quote_api_url: get_env_or("SWAP_QUOTE_API_URL", &defaults.quote_api_url),
            price_api_url: get_env_or("SWAP_PRICE_API_URL", &defaults.price_api_url),
            native_currency: get_env_or("SWAP_NATIVE_CURRENCY", &defaults.native_currency)
                .trim()
                .to_uppercase(),
            from_address: get_env_or("SWAP_FROM_ADDRESS", &defaults.from_address),
            http_timeout_secs: get_env_parse_or("SWAP_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            price_refresh_ms: get_env_parse_or("SWAP_PRICE_REFRESH_MS", defaults.price_refresh_ms)?,
            slider_debounce_ms: get_env_parse_or("SWAP_SLIDER_DEBOUNCE_MS", defaults.slider_debounce_ms)?,
            typed_debounce_ms: get_env_parse_or("SWAP_TYPED_DEBOUNCE_MS", defaults.typed_debounce_ms)?,
            default_slippage_bips,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.quote_api_url, "SWAP_QUOTE_API_URL").map_err(AppError::Config)?;
        validate_http_url(&self.price_api_url, "SWAP_PRICE_API_URL").map_err(AppError::Config)?;
        validate_not_empty(&self.native_currency, "SWAP_NATIVE_CURRENCY").map_err(AppError::Config)?;
        validate_evm_address(&self.from_address, "SWAP_FROM_ADDRESS").map_err(AppError::Config)?;

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 120 {
            return Err(AppError::Config("SWAP_HTTP_TIMEOUT_SECS must be between 1 and 120".to_string()));
        }
        if self.price_refresh_ms < 1_000 {
            return Err(AppError::Config("SWAP_PRICE_REFRESH_MS must be at least 1000".to_string()));
        }
        if self.default_slippage_bips.values().any(|bips| *bips > 10_000) {
            return Err(AppError::Config("SWAP_DEFAULT_SLIPPAGE_BIPS values must not exceed 10000".to_string()));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn price_refresh_interval(&self) -> Duration {
        Duration::from_millis(self.price_refresh_ms)
    }

    pub fn slider_debounce(&self) -> Duration {
        Duration::from_millis(self.slider_debounce_ms)
    }

    pub fn typed_debounce(&self) -> Duration {
        Duration::from_millis(self.typed_debounce_ms)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from `.env` and the process environment.
///
/// # Errors
///
/// Returns an error if a variable is malformed, validation fails,
/// or the config has already been initialized.
pub fn init_config() -> Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// # Errors
///
/// Returns [`AppError::Config`] if [`init_config()`] has not been called yet.
pub fn core_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| AppError::Config("Config must be initialized with init_config() before use".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slider_debounce(), Duration::from_millis(200));
        assert_eq!(config.typed_debounce(), Duration::from_millis(400));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = Config {
            quote_api_url: "localhost:3001".to_string(),
            ..Config::default()
        };
        assert!(matches!(bad_url.validate(), Err(AppError::Config(_))));

        let bad_address = Config {
            from_address: "0x1234".to_string(),
            ..Config::default()
        };
        assert!(bad_address.validate().is_err());

        let mut bad_slippage = Config::default();
        bad_slippage.default_slippage_bips.insert("mainnet".to_string(), 20_000);
        assert!(bad_slippage.validate().is_err());
    }
}
