use serde::{Deserialize, Serialize};

/// Whether a quote stays on one chain or bridges between two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SwapType {
    #[default]
    Normal,
    CrossChain,
}

/// Quote request parameters.
///
/// Exactly one of `sell_amount` / `buy_amount` is set; the service derives the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    /// Aggregator to route through; omitted to let the service choose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub chain_id: u64,
    pub to_chain_id: u64,
    pub from_address: String,
    pub sell_token_address: String,
    pub buy_token_address: String,
    /// Raw integer amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_amount: Option<String>,
    /// Raw integer amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_amount: Option<String>,
    /// Percent, e.g. `1.5`.
    pub slippage: f64,
    pub refuel: bool,
    pub swap_type: SwapType,
}

/// Bridge route attached to cross-chain quotes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRoute {
    /// Estimated seconds to complete.
    #[serde(default)]
    pub service_time: Option<u64>,
}

/// Successful quote. Amounts are raw integer strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub source: Option<String>,
    pub sell_token_address: String,
    pub buy_token_address: String,
    pub sell_amount: String,
    pub buy_amount: String,
    pub buy_amount_minus_fees: String,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub fee_in_eth: Option<String>,
    #[serde(default)]
    pub routes: Vec<QuoteRoute>,
}

/// Structured error returned by the quote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteError {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u32>,
}

impl QuoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            error_code: None,
        }
    }
}

/// Either payload the quote endpoints can return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QuoteResponse {
    Error(QuoteError),
    Quote(Quote),
}

impl QuoteResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, QuoteResponse::Error(_))
    }
}
