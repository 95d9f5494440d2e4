//! # Token Price Client
//!
//! Looks up the current price of a token in a display currency.
//!
//! Failures are reported as [`lib_core::AppError`]: transport and status failures as `Http`,
//! malformed bodies as `Decoding`, and tokens the service does not list as `NotFound`.

use crate::chains::ChainId;
use crate::currency::NativeCurrency;
use lib_core::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use shared::dto::token::ExternalToken;
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:3002";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for configuring PriceClient.
#[derive(Debug, Clone, Default)]
pub struct PriceClientBuilder {
    timeout: Option<Duration>,
    api_base: Option<String>,
}

impl PriceClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    pub fn build(self) -> Result<PriceClient> {
        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(PriceClient {
            http,
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        })
    }
}

/// Client for the token price API
pub struct PriceClient {
    http: Client,
    api_base: String,
}

impl PriceClient {
    pub fn builder() -> PriceClientBuilder {
        PriceClientBuilder::default()
    }

    pub fn from_config(config: &lib_core::Config) -> Result<Self> {
        Self::builder()
            .timeout(config.http_timeout())
            .api_base(config.price_api_url.clone())
            .build()
    }

    pub fn token_url(&self, address: &str, chain: ChainId) -> String {
        format!(
            "{}/v1/token/{}/{}",
            self.api_base.trim_end_matches('/'),
            chain.id(),
            address.to_lowercase()
        )
    }

    /// Fetch price data for one token.
    pub async fn fetch_external_token(
        &self,
        address: &str,
        chain: ChainId,
        currency: NativeCurrency,
    ) -> Result<ExternalToken> {
        let url = self.token_url(address, chain);
        debug!("Price request: {} ({})", url, currency);

        let response = self
            .http
            .get(&url)
            .query(&[("currency", currency.code().to_lowercase())])
            .send()
            .await
            .map_err(|e| AppError::Http(format!("Price request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Http(format!("Failed to read price response: {}", e)))?;

        decode_price_response(status, &body, address, chain)
    }
}

/// Map a price service reply onto a token or an error.
fn decode_price_response(status: StatusCode, body: &str, address: &str, chain: ChainId) -> Result<ExternalToken> {
    if status == StatusCode::NOT_FOUND {
        debug!("No price listed for {} on {}", address, chain);
        return Err(AppError::NotFound(format!("{} on {}", address, chain)));
    }
    if !status.is_success() {
        return Err(AppError::Http(format!("Price request failed ({}): {}", status, body)));
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url_lowercases_address() {
        let client = PriceClient::builder()
            .api_base("https://prices.example.com/")
            .build()
            .unwrap();
        assert_eq!(
            client.token_url("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", ChainId::Mainnet),
            "https://prices.example.com/v1/token/1/0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"
        );
    }

    #[test]
    fn test_decode_price_response() {
        let weth = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";

        let token = decode_price_response(StatusCode::OK, r#"{"price":{"value":1812.5}}"#, weth, ChainId::Mainnet).unwrap();
        assert_eq!(token.best_price(), Some(1812.5));

        let missing = decode_price_response(StatusCode::NOT_FOUND, "", weth, ChainId::Base);
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let down = decode_price_response(StatusCode::BAD_GATEWAY, "upstream timeout", weth, ChainId::Mainnet);
        assert!(matches!(down, Err(AppError::Http(msg)) if msg.contains("upstream timeout")));

        let garbled = decode_price_response(StatusCode::OK, "<html>", weth, ChainId::Mainnet);
        assert!(matches!(garbled, Err(AppError::Decoding(_))));
    }
}
