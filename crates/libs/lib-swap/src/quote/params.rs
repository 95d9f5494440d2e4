//! # Quote Request Building

use crate::chains::{is_unwrap_native, is_wrap_native};
use crate::math::convert_amount_to_raw_amount;
use crate::types::{AmountSide, Asset};
use serde::{Deserialize, Serialize};
use shared::dto::quote::{QuoteParams, SwapType};

/// Aggregator preference for routing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    /// Let the quote service pick.
    #[default]
    Auto,
    Named(String),
}

impl QuoteSource {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "auto" => QuoteSource::Auto,
            other => QuoteSource::Named(other.to_string()),
        }
    }

    fn as_param(&self) -> Option<String> {
        match self {
            QuoteSource::Auto => None,
            QuoteSource::Named(name) => Some(name.clone()),
        }
    }
}

/// Snapshot of controller state needed to build a quote request.
#[derive(Debug, Clone)]
pub struct QuoteRequest<'a> {
    pub from_address: &'a str,
    pub sell_asset: Option<&'a Asset>,
    pub buy_asset: Option<&'a Asset>,
    pub input_amount: &'a str,
    pub output_amount: &'a str,
    /// Field whose amount is sent; the other is left for the service to derive.
    pub authoritative: AmountSide,
    pub source: &'a QuoteSource,
    /// Percent string, e.g. `"1"`.
    pub slippage: &'a str,
}

/// Build quote service parameters, or `None` while either asset is unselected.
pub fn build_quote_params(request: &QuoteRequest<'_>) -> Option<QuoteParams> {
    let sell = request.sell_asset?;
    let buy = request.buy_asset?;

    let is_cross_chain = sell.chain_id != buy.chain_id;
    let (sell_amount, buy_amount) = match request.authoritative {
        AmountSide::Input => (
            Some(convert_amount_to_raw_amount(request.input_amount, sell.decimals)),
            None,
        ),
        AmountSide::Output => (
            None,
            Some(convert_amount_to_raw_amount(request.output_amount, buy.decimals)),
        ),
    };

    Some(QuoteParams {
        source: request.source.as_param(),
        chain_id: sell.chain_id.id(),
        to_chain_id: if is_cross_chain { buy.chain_id.id() } else { sell.chain_id.id() },
        from_address: request.from_address.to_string(),
        sell_token_address: sell.quote_address().to_string(),
        buy_token_address: buy.quote_address().to_string(),
        sell_amount,
        buy_amount,
        slippage: request.slippage.trim().parse().unwrap_or(0.0),
        refuel: false,
        swap_type: if is_cross_chain { SwapType::CrossChain } else { SwapType::Normal },
    })
}

/// Whether the pair is a 1:1 wrap or unwrap of the chain's native coin.
pub fn is_native_wrap_pair(sell: &Asset, buy: &Asset) -> bool {
    if sell.chain_id != buy.chain_id {
        return false;
    }
    let (sell_address, buy_address) = (sell.quote_address(), buy.quote_address());
    is_wrap_native(sell.chain_id, sell_address, buy_address)
        || is_unwrap_native(sell.chain_id, sell_address, buy_address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::{ChainId, NATIVE_ASSET_ADDRESS};

    fn eth(chain: ChainId) -> Asset {
        Asset::new(chain, NATIVE_ASSET_ADDRESS, "ETH", 18)
    }

    fn usdc(chain: ChainId) -> Asset {
        Asset::new(chain, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USDC", 6)
    }

    fn request<'a>(sell: Option<&'a Asset>, buy: Option<&'a Asset>, side: AmountSide, source: &'a QuoteSource) -> QuoteRequest<'a> {
        QuoteRequest {
            from_address: "0x0000000000000000000000000000000000000001",
            sell_asset: sell,
            buy_asset: buy,
            input_amount: "1.5",
            output_amount: "2500",
            authoritative: side,
            source,
            slippage: "1",
        }
    }

    #[test]
    fn test_same_chain_sell_amount() {
        let (sell, buy) = (eth(ChainId::Mainnet), usdc(ChainId::Mainnet));
        let auto = QuoteSource::Auto;
        let params = build_quote_params(&request(Some(&sell), Some(&buy), AmountSide::Input, &auto)).unwrap();

        assert_eq!(params.swap_type, SwapType::Normal);
        assert_eq!(params.chain_id, 1);
        assert_eq!(params.to_chain_id, 1);
        assert_eq!(params.sell_token_address, NATIVE_ASSET_ADDRESS);
        assert_eq!(params.sell_amount.as_deref(), Some("1500000000000000000"));
        assert_eq!(params.buy_amount, None);
        assert_eq!(params.source, None);
        assert_eq!(params.slippage, 1.0);
        assert!(!params.refuel);
    }

    #[test]
    fn test_cross_chain_buy_amount() {
        let (sell, buy) = (eth(ChainId::Mainnet), usdc(ChainId::Optimism));
        let named = QuoteSource::parse("0x");
        let params = build_quote_params(&request(Some(&sell), Some(&buy), AmountSide::Output, &named)).unwrap();

        assert_eq!(params.swap_type, SwapType::CrossChain);
        assert_eq!(params.to_chain_id, 10);
        assert_eq!(params.sell_amount, None);
        assert_eq!(params.buy_amount.as_deref(), Some("2500000000"));
        assert_eq!(params.source.as_deref(), Some("0x"));
    }

    #[test]
    fn test_missing_asset_builds_nothing() {
        let sell = eth(ChainId::Mainnet);
        let auto = QuoteSource::Auto;
        assert!(build_quote_params(&request(Some(&sell), None, AmountSide::Input, &auto)).is_none());
        assert!(build_quote_params(&request(None, Some(&sell), AmountSide::Input, &auto)).is_none());
    }

    #[test]
    fn test_wrap_pair_detection() {
        let weth = Asset::new(ChainId::Mainnet, ChainId::Mainnet.wrapped_native_address(), "WETH", 18);
        assert!(is_native_wrap_pair(&eth(ChainId::Mainnet), &weth));
        assert!(is_native_wrap_pair(&weth, &eth(ChainId::Mainnet)));
        assert!(!is_native_wrap_pair(&eth(ChainId::Base), &weth));
        assert!(!is_native_wrap_pair(&eth(ChainId::Mainnet), &usdc(ChainId::Mainnet)));
    }
}
