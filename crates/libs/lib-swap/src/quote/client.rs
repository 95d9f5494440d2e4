//! # Quote HTTP Client
//!
//! Transport for the same-chain and cross-chain quote endpoints.

use reqwest::Client;
use shared::dto::quote::{QuoteError, QuoteParams, QuoteResponse, SwapType};
use tracing::debug;

const QUOTE_PATH: &str = "/v1/quote";
const CROSSCHAIN_QUOTE_PATH: &str = "/v1/crosschain-quote";

/// HTTP client wrapper for the quote service
pub struct QuoteHttpClient {
    pub http: Client,
    pub api_base: String,
}

impl QuoteHttpClient {
    pub fn new(api_base: impl Into<String>, timeout: std::time::Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            api_base: api_base.into(),
        })
    }

    /// Endpoint for a quote of the given kind.
    pub fn quote_url(&self, swap_type: SwapType) -> String {
        let path = match swap_type {
            SwapType::Normal => QUOTE_PATH,
            SwapType::CrossChain => CROSSCHAIN_QUOTE_PATH,
        };
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    pub async fn get_quote(&self, params: &QuoteParams) -> anyhow::Result<QuoteResponse> {
        self.request(params, SwapType::Normal).await
    }

    pub async fn get_crosschain_quote(&self, params: &QuoteParams) -> anyhow::Result<QuoteResponse> {
        self.request(params, SwapType::CrossChain).await
    }

    async fn request(&self, params: &QuoteParams, swap_type: SwapType) -> anyhow::Result<QuoteResponse> {
        let url = self.quote_url(swap_type);

        debug!(
            "Quote request: {} {} -> {} (chain {} -> {})",
            url, params.sell_token_address, params.buy_token_address, params.chain_id, params.to_chain_id
        );

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // The service reports routing failures as a structured error body.
            if let Ok(error) = serde_json::from_str::<QuoteError>(&body) {
                debug!("Quote rejected ({}): {}", status, error.message);
                return Ok(QuoteResponse::Error(error));
            }
            return Err(anyhow::anyhow!("Quote request failed ({}): {}", status, body));
        }

        let quote: QuoteResponse = serde_json::from_str(&body)
            .map_err(|e| anyhow::anyhow!("Failed to parse quote response: {}", e))?;

        match &quote {
            QuoteResponse::Quote(q) => debug!(
                "Quote: {} -> {} (minus fees {})",
                q.sell_amount, q.buy_amount, q.buy_amount_minus_fees
            ),
            QuoteResponse::Error(e) => debug!("Quote error: {}", e.message),
        }

        Ok(quote)
    }
}
