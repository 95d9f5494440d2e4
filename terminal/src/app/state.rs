//! # Swap State Types
//!
//! The mutable state owned by the controller: selected assets, the four displayed
//! values, the authoritative-field tags, staleness and the quote slot.

use lib_swap::format::strip_commas;
use lib_swap::math;
use lib_swap::quote::QuoteSource;
use lib_swap::types::{AmountSide, Asset};
use lib_swap::ChainId;
use serde::Serialize;
use shared::dto::quote::QuoteResponse;

/// Slider position when the view opens.
pub const INITIAL_SLIDER_POSITION: f64 = 0.5;

/// Value held by an amount field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    /// Text as the user typed it, kept verbatim while they edit (`"0."`, `"1.50"`).
    Typed(String),
    /// A computed plain decimal string.
    Amount(String),
}

impl FieldValue {
    pub fn zero() -> Self {
        FieldValue::Amount("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Typed(text) | FieldValue::Amount(text) => text,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, FieldValue::Typed(_))
    }

    /// Numeric value as a plain decimal string; malformed or empty text reads as `"0"`.
    pub fn numeric(&self) -> String {
        let plain = strip_commas(self.as_str());
        if math::parse_decimal(&plain).is_some() {
            math::add(&plain, 0)
        } else {
            "0".to_string()
        }
    }

    pub fn is_zero(&self) -> bool {
        !math::greater_than(self.numeric(), 0)
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::zero()
    }
}

/// The four displayed values. Native values are plain decimal strings, never authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    pub input_amount: FieldValue,
    pub input_native_value: String,
    pub output_amount: FieldValue,
    pub output_native_value: String,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            input_amount: FieldValue::zero(),
            input_native_value: "0".to_string(),
            output_amount: FieldValue::zero(),
            output_native_value: "0".to_string(),
        }
    }
}

impl InputState {
    pub fn amount(&self, side: AmountSide) -> &FieldValue {
        match side {
            AmountSide::Input => &self.input_amount,
            AmountSide::Output => &self.output_amount,
        }
    }
}

/// Control the user last drove the form with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputMethod {
    #[default]
    Slider,
    InputAmount,
    OutputAmount,
}

impl InputMethod {
    /// Amount field this method makes authoritative.
    pub fn side(self) -> AmountSide {
        match self {
            InputMethod::Slider | InputMethod::InputAmount => AmountSide::Input,
            InputMethod::OutputAmount => AmountSide::Output,
        }
    }
}

/// Focusable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKey {
    InputAmount,
    InputNativeValue,
    OutputAmount,
    OutputNativeValue,
}

impl std::str::FromStr for InputKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inputAmount" | "input" => Ok(InputKey::InputAmount),
            "inputNativeValue" => Ok(InputKey::InputNativeValue),
            "outputAmount" | "output" => Ok(InputKey::OutputAmount),
            "outputNativeValue" => Ok(InputKey::OutputNativeValue),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Controller state.
///
/// Written only by the controller's handlers; async tasks report back through events.
#[derive(Debug, Clone)]
pub struct SwapState {
    pub sell_asset: Option<Asset>,
    pub buy_asset: Option<Asset>,
    /// Chain the buy-side picker is showing.
    pub output_chain: Option<ChainId>,
    pub inputs: InputState,
    pub input_method: InputMethod,
    /// Field whose amount is authoritative; `None` until the first edit.
    pub last_changed: Option<AmountSide>,
    pub focused: Option<InputKey>,
    /// Raw slider position in `0.0..=1.0`.
    pub slider_position: f64,
    /// Slider step for the current sell balance.
    pub nice_increment: String,
    pub is_quote_stale: bool,
    pub is_fetching: bool,
    pub quote: Option<QuoteResponse>,
    /// Fee of the current quote; `"0"` for native wraps.
    pub fee: Option<String>,
    pub source: QuoteSource,
    /// Percent string.
    pub slippage: String,
    pub flashbots: bool,
    /// Id handed to the next quote request.
    pub next_request_id: u64,
    /// Request whose response is still wanted.
    pub in_flight: Option<u64>,
    /// Bumped on every debounce schedule; only the newest timer may fire a fetch.
    pub debounce_generation: u64,
}

impl Default for SwapState {
    fn default() -> Self {
        Self {
            sell_asset: None,
            buy_asset: None,
            output_chain: None,
            inputs: InputState::default(),
            input_method: InputMethod::default(),
            last_changed: None,
            focused: None,
            slider_position: INITIAL_SLIDER_POSITION,
            nice_increment: "0".to_string(),
            is_quote_stale: false,
            is_fetching: false,
            quote: None,
            fee: None,
            source: QuoteSource::Auto,
            slippage: "0".to_string(),
            flashbots: false,
            next_request_id: 1,
            in_flight: None,
            debounce_generation: 0,
        }
    }
}

impl SwapState {
    pub fn asset(&self, side: AmountSide) -> Option<&Asset> {
        match side {
            AmountSide::Input => self.sell_asset.as_ref(),
            AmountSide::Output => self.buy_asset.as_ref(),
        }
    }

    pub fn authoritative_side(&self) -> AmountSide {
        self.last_changed.unwrap_or_default()
    }

    /// Numeric value of the authoritative amount.
    pub fn effective_amount(&self) -> String {
        self.inputs.amount(self.authoritative_side()).numeric()
    }

    pub fn is_cross_chain(&self) -> bool {
        match (&self.sell_asset, &self.buy_asset) {
            (Some(sell), Some(buy)) => sell.chain_id != buy.chain_id,
            _ => false,
        }
    }

    /// Invalidate the current quote and any response still on its way.
    pub fn mark_stale(&mut self) {
        self.is_quote_stale = true;
        self.is_fetching = false;
        self.in_flight = None;
    }

    /// Zero all four values; nothing is left to quote.
    pub fn reset_to_zero(&mut self) {
        self.inputs = InputState::default();
        self.is_quote_stale = false;
        self.is_fetching = false;
        self.in_flight = None;
        self.quote = None;
        self.fee = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_numeric() {
        assert_eq!(FieldValue::Typed("1,250.50".into()).numeric(), "1250.5");
        assert_eq!(FieldValue::Typed("0.".into()).numeric(), "0");
        assert_eq!(FieldValue::Typed("".into()).numeric(), "0");
        assert_eq!(FieldValue::Typed("abc".into()).numeric(), "0");
        assert!(FieldValue::Typed("0.000".into()).is_zero());
        assert!(!FieldValue::Amount("0.01".into()).is_zero());
    }

    #[test]
    fn test_reset_to_zero_clears_staleness() {
        let mut state = SwapState {
            is_quote_stale: true,
            is_fetching: true,
            in_flight: Some(3),
            ..SwapState::default()
        };
        state.inputs.input_amount = FieldValue::Typed("5".into());
        state.reset_to_zero();

        assert_eq!(state.inputs, InputState::default());
        assert!(!state.is_quote_stale);
        assert!(!state.is_fetching);
        assert_eq!(state.in_flight, None);
    }

    #[test]
    fn test_authoritative_side_defaults_to_input() {
        let mut state = SwapState::default();
        assert_eq!(state.authoritative_side(), AmountSide::Input);
        state.last_changed = Some(AmountSide::Output);
        state.inputs.output_amount = FieldValue::Typed("12".into());
        assert_eq!(state.effective_amount(), "12");
    }
}
