//! # Display Snapshot
//!
//! Read-only view of the swap form with every value formatted for presentation.

use crate::app::state::{FieldValue, InputMethod, SwapState};
use lib_swap::currency::NativeCurrency;
use lib_swap::format::{add_commas_to_number, convert_amount_to_balance_display, convert_amount_to_native_display};
use lib_swap::quote::{cross_chain_time_estimate, quote_service_time, CrossChainTimeEstimate, QuoteSource};
use lib_swap::slider::percentage_to_swap;
use serde::Serialize;
use shared::dto::quote::QuoteResponse;

/// Significant digits kept in balance displays.
const BALANCE_DISPLAY_BUFFER: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDisplay {
    pub sell_symbol: Option<String>,
    pub buy_symbol: Option<String>,
    /// `"1.5 ETH"`
    pub sell_balance: Option<String>,
    pub input_amount: String,
    pub input_native_value: String,
    pub output_amount: String,
    pub output_native_value: String,
    pub input_method: InputMethod,
    /// Whole percent of the sell balance.
    pub slider_percentage: f64,
    pub is_quote_stale: bool,
    pub is_fetching: bool,
    pub quote: Option<QuoteResponse>,
    pub fee: Option<String>,
    pub source: QuoteSource,
    pub slippage: String,
    pub flashbots: bool,
    pub time_estimate: Option<CrossChainTimeEstimate>,
}

/// Typed text is shown verbatim so the caret never jumps; computed amounts get separators.
fn amount_display(value: &FieldValue) -> String {
    match value {
        FieldValue::Typed(text) => text.clone(),
        FieldValue::Amount(amount) => add_commas_to_number(amount),
    }
}

impl SwapDisplay {
    pub fn from_state(state: &SwapState, currency: NativeCurrency) -> Self {
        let time_estimate = match &state.quote {
            Some(QuoteResponse::Quote(quote)) if state.is_cross_chain() => {
                Some(cross_chain_time_estimate(Some(quote_service_time(quote))))
            }
            _ => None,
        };

        Self {
            sell_symbol: state.sell_asset.as_ref().map(|asset| asset.symbol.clone()),
            buy_symbol: state.buy_asset.as_ref().map(|asset| asset.symbol.clone()),
            sell_balance: state.sell_asset.as_ref().map(|asset| {
                convert_amount_to_balance_display(
                    &asset.balance.amount,
                    asset.decimals,
                    &asset.symbol,
                    BALANCE_DISPLAY_BUFFER,
                )
            }),
            input_amount: amount_display(&state.inputs.input_amount),
            input_native_value: convert_amount_to_native_display(&state.inputs.input_native_value, currency, true),
            output_amount: amount_display(&state.inputs.output_amount),
            output_native_value: convert_amount_to_native_display(&state.inputs.output_native_value, currency, true),
            input_method: state.input_method,
            slider_percentage: percentage_to_swap(state.slider_position) * 100.0,
            is_quote_stale: state.is_quote_stale,
            is_fetching: state.is_fetching,
            quote: state.quote.clone(),
            fee: state.fee.clone(),
            source: state.source.clone(),
            slippage: state.slippage.clone(),
            flashbots: state.flashbots,
            time_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_swap::chains::{ChainId, NATIVE_ASSET_ADDRESS};
    use lib_swap::types::Asset;
    use shared::dto::quote::{Quote, QuoteRoute};

    #[test]
    fn test_display_formats_amounts_and_values() {
        let mut state = SwapState::default();
        state.sell_asset = Some(
            Asset::new(ChainId::Mainnet, NATIVE_ASSET_ADDRESS, "ETH", 18).with_raw_balance("1500000000000000000"),
        );
        state.inputs.input_amount = FieldValue::Typed("1234.50".into());
        state.inputs.input_native_value = "2469000".into();
        state.inputs.output_amount = FieldValue::Amount("2468999.5".into());
        state.inputs.output_native_value = "0.004".into();

        let display = SwapDisplay::from_state(&state, NativeCurrency::Usd);
        assert_eq!(display.input_amount, "1234.50");
        assert_eq!(display.output_amount, "2,468,999.5");
        assert_eq!(display.input_native_value, "$2,469,000.00");
        assert_eq!(display.output_native_value, "< $0.01");
        assert_eq!(display.sell_balance.as_deref(), Some("1.50 ETH"));
        assert_eq!(display.slider_percentage, 50.0);
        assert!(display.time_estimate.is_none());
    }

    #[test]
    fn test_cross_chain_quote_has_time_estimate() {
        let mut state = SwapState::default();
        state.sell_asset = Some(Asset::new(ChainId::Mainnet, NATIVE_ASSET_ADDRESS, "ETH", 18));
        state.buy_asset = Some(Asset::new(ChainId::Optimism, NATIVE_ASSET_ADDRESS, "ETH", 18));
        state.quote = Some(QuoteResponse::Quote(Quote {
            source: None,
            sell_token_address: NATIVE_ASSET_ADDRESS.into(),
            buy_token_address: NATIVE_ASSET_ADDRESS.into(),
            sell_amount: "1".into(),
            buy_amount: "1".into(),
            buy_amount_minus_fees: "1".into(),
            fee: None,
            fee_in_eth: None,
            routes: vec![QuoteRoute { service_time: Some(120) }],
        }));

        let display = SwapDisplay::from_state(&state, NativeCurrency::Usd);
        let estimate = display.time_estimate.expect("estimate for cross-chain quote");
        assert_eq!(estimate.time_estimate_display, "~2 mins");
        assert!(!estimate.is_long_wait);
    }
}
