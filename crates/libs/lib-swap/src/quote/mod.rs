//! # Quote Service
//!
//! Request building, transport and time estimates for swap quotes.

// region: --- Modules
pub mod client;
pub mod estimate;
pub mod params;
// endregion: --- Modules

pub use estimate::{cross_chain_time_estimate, quote_service_time, CrossChainTimeEstimate};
pub use params::{build_quote_params, is_native_wrap_pair, QuoteRequest, QuoteSource};

// region: --- Main Client
use client::QuoteHttpClient;
use shared::dto::quote::{QuoteParams, QuoteResponse};
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:3001";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for configuring QuoteClient.
#[derive(Debug, Clone)]
pub struct QuoteClientBuilder {
    timeout: Option<Duration>,
    api_base: Option<String>,
}

impl Default for QuoteClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            api_base: Some(DEFAULT_API_BASE.to_string()),
        }
    }
}

impl QuoteClientBuilder {
    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the quote API base URL.
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    pub fn build(self) -> anyhow::Result<QuoteClient> {
        let inner = QuoteHttpClient::new(
            self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )?;
        Ok(QuoteClient { inner })
    }
}

/// Client for the quote API
pub struct QuoteClient {
    inner: QuoteHttpClient,
}

impl QuoteClient {
    /// Create a client for the local quote service with default settings.
    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    /// Create a new quote client using a builder for configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lib_swap::quote::QuoteClient;
    ///
    /// let client = QuoteClient::builder()
    ///     .timeout(std::time::Duration::from_secs(30))
    ///     .api_base("https://quotes.example.com")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn builder() -> QuoteClientBuilder {
        QuoteClientBuilder::default()
    }

    pub fn from_config(config: &lib_core::Config) -> anyhow::Result<Self> {
        Self::builder()
            .timeout(config.http_timeout())
            .api_base(config.quote_api_url.clone())
            .build()
    }

    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }

    // Delegate methods to inner client
    pub async fn get_quote(&self, params: &QuoteParams) -> anyhow::Result<QuoteResponse> {
        self.inner.get_quote(params).await
    }

    pub async fn get_crosschain_quote(&self, params: &QuoteParams) -> anyhow::Result<QuoteResponse> {
        self.inner.get_crosschain_quote(params).await
    }
}
// endregion: --- Main Client

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::quote::SwapType;

    #[test]
    fn test_builder_uses_configured_base() {
        let config = lib_core::Config {
            quote_api_url: "https://quotes.example.com/".to_string(),
            ..lib_core::Config::default()
        };
        let client = QuoteClient::from_config(&config).unwrap();
        assert_eq!(client.api_base(), "https://quotes.example.com/");
        assert_eq!(client.inner.quote_url(SwapType::Normal), "https://quotes.example.com/v1/quote");
        assert_eq!(
            client.inner.quote_url(SwapType::CrossChain),
            "https://quotes.example.com/v1/crosschain-quote"
        );
    }
}
