//! # Swap Handlers
//!
//! State transitions for the swap form: amount edits, the slider, asset selection,
//! settings and the results that come back from quote and price tasks.
//!
//! Every edit records which amount field is authoritative. The authoritative field is
//! never overwritten by a quote; only its counterpart is filled from the response.

use super::{DebounceKind, Effects};
use crate::app::state::{FieldValue, InputKey, InputMethod, SwapState};
use crate::utils::validation::validate_slippage;
use lib_swap::chains::default_slippage;
use lib_swap::format::{strip_commas, trim_trailing_zeros, value_based_decimal_formatter, DecimalFormatOptions, Rounding};
use lib_swap::math::{self, convert_raw_amount_to_decimal_format};
use lib_swap::quote::{is_native_wrap_pair, QuoteSource};
use lib_swap::slider::{find_nice_increment, nice_increment_formatter, percentage_to_swap, SliderAmount};
use lib_swap::types::{AmountSide, Asset};
use shared::dto::quote::{Quote, QuoteResponse};
use std::collections::HashMap;
use tracing::{debug, warn};

// region: --- Helpers

/// Native value of `amount` at the asset's listed price; `"0"` without a price.
fn native_value(amount: &FieldValue, asset: Option<&Asset>) -> String {
    match asset.and_then(Asset::listed_price) {
        Some(price) => math::multiply(amount.numeric(), price),
        None => "0".to_string(),
    }
}

fn recompute_native_values(state: &mut SwapState) {
    state.inputs.input_native_value = native_value(&state.inputs.input_amount, state.sell_asset.as_ref());
    state.inputs.output_native_value = native_value(&state.inputs.output_amount, state.buy_asset.as_ref());
}

/// Set the input amount from the slider position and the sell balance.
fn recompute_slider_amount(state: &mut SwapState) {
    let Some(sell) = state.sell_asset.as_ref() else {
        return;
    };
    let price = sell.listed_price().unwrap_or("0");
    let amount = nice_increment_formatter(&SliderAmount::new(
        &sell.balance.amount,
        price,
        &state.nice_increment,
        state.slider_position,
    ));
    state.inputs.input_native_value = math::multiply(&amount, price);
    state.inputs.input_amount = FieldValue::Amount(amount);
}

/// Move the slider to the input's share of the sell balance.
fn sync_slider_to_input(state: &mut SwapState) {
    let Some(sell) = state.sell_asset.as_ref() else {
        return;
    };
    if !math::is_positive(&sell.balance.amount) {
        return;
    }
    let ratio = math::divide(state.inputs.input_amount.numeric(), &sell.balance.amount);
    state.slider_position = ratio.parse::<f64>().unwrap_or(0.0).clamp(0.0, 1.0);
}

/// Zero-valued text survives only while it may still become a number (`"0."`, `""`).
fn zero_field(text: &str) -> FieldValue {
    let plain = strip_commas(text);
    if text.is_empty() || (text.contains('.') && math::parse_decimal(&plain).is_some()) {
        FieldValue::Typed(text.to_string())
    } else {
        FieldValue::zero()
    }
}

/// Quote an asset amount the way the form displays it: rounded down, one place under
/// value-based precision.
fn format_quoted_amount(amount: &str, asset: &Asset) -> String {
    let options = DecimalFormatOptions::default()
        .rounding(Rounding::Down)
        .precision_adjustment(-1)
        .stablecoin(asset.is_stablecoin);
    value_based_decimal_formatter(amount, asset.listed_price().unwrap_or("0"), options)
}

/// Shared tail of every asset change: quote right away unless there is nothing to quote.
fn after_asset_change(state: &mut SwapState) -> Effects {
    if !math::is_positive(state.effective_amount()) {
        state.reset_to_zero();
        return Effects::none().with_price_polling();
    }
    state.mark_stale();
    Effects::immediate().with_price_polling()
}

/// Drop the derived amount; it was priced for the previous pair.
fn clear_derived_amount(state: &mut SwapState) {
    match state.authoritative_side() {
        AmountSide::Input => state.inputs.output_amount = FieldValue::zero(),
        AmountSide::Output => state.inputs.input_amount = FieldValue::zero(),
    }
}

fn requote(state: &mut SwapState) -> Effects {
    if !math::is_positive(state.effective_amount()) {
        return Effects::none();
    }
    state.mark_stale();
    Effects::immediate()
}

// endregion: --- Helpers

// region: --- User actions

/// Move focus between fields.
///
/// Leaving a field normalizes the text typed into it: a zero collapses to `"0"` and
/// trailing fractional zeros are dropped.
///
/// Internal handler function - use [`crate::app::SwapController::focus`] instead.
pub(crate) fn set_focus(state: &mut SwapState, next: Option<InputKey>) -> Effects {
    if let Some(previous) = state.focused.filter(|previous| Some(*previous) != next) {
        let field = match previous {
            InputKey::InputAmount => &mut state.inputs.input_amount,
            InputKey::OutputAmount => &mut state.inputs.output_amount,
            InputKey::InputNativeValue | InputKey::OutputNativeValue => {
                state.focused = next;
                return Effects::none();
            }
        };
        if field.is_typed() {
            *field = if field.is_zero() {
                FieldValue::zero()
            } else {
                FieldValue::Typed(trim_trailing_zeros(field.as_str()))
            };
        }
    }
    state.focused = next;
    Effects::none()
}

/// Slider moved to `position` (`0.0..=1.0`).
///
/// Internal handler function - use [`crate::app::SwapController::slide`] instead.
pub(crate) fn on_slider_change(state: &mut SwapState, position: f64) -> Effects {
    state.input_method = InputMethod::Slider;
    state.last_changed = Some(AmountSide::Input);
    state.slider_position = position.clamp(0.0, 1.0);

    if percentage_to_swap(state.slider_position) == 0.0 || state.sell_asset.is_none() {
        state.reset_to_zero();
        return Effects::none();
    }

    recompute_slider_amount(state);
    if state.inputs.input_amount.is_zero() {
        state.reset_to_zero();
        return Effects::none();
    }
    state.mark_stale();
    Effects::debounced(DebounceKind::Slider)
}

/// Text typed into the input amount field.
///
/// Internal handler function - use [`crate::app::SwapController::type_input`] instead.
pub(crate) fn on_input_amount_change(state: &mut SwapState, text: &str) -> Effects {
    let text = text.trim();
    state.input_method = InputMethod::InputAmount;
    state.last_changed = Some(AmountSide::Input);

    let typed = FieldValue::Typed(text.to_string());
    if typed.is_zero() {
        state.reset_to_zero();
        state.inputs.input_amount = zero_field(text);
        state.slider_position = 0.0;
        return Effects::none();
    }

    state.inputs.input_native_value = native_value(&typed, state.sell_asset.as_ref());
    state.inputs.input_amount = typed;
    sync_slider_to_input(state);
    state.mark_stale();
    Effects::debounced(DebounceKind::Typed)
}

/// Text typed into the output amount field.
///
/// Internal handler function - use [`crate::app::SwapController::type_output`] instead.
pub(crate) fn on_output_amount_change(state: &mut SwapState, text: &str) -> Effects {
    let text = text.trim();
    state.input_method = InputMethod::OutputAmount;
    state.last_changed = Some(AmountSide::Output);

    let typed = FieldValue::Typed(text.to_string());
    if typed.is_zero() {
        state.reset_to_zero();
        state.inputs.output_amount = zero_field(text);
        state.slider_position = 0.0;
        return Effects::none();
    }

    state.inputs.output_native_value = native_value(&typed, state.buy_asset.as_ref());
    state.inputs.output_amount = typed;
    state.mark_stale();
    Effects::debounced(DebounceKind::Typed)
}

/// Select the asset to sell.
///
/// `asset` should already carry the user's current balance. Picking the buy asset swaps it
/// out of the buy slot.
///
/// Internal handler function - use [`crate::app::SwapController::select_sell_asset`] instead.
pub(crate) fn select_sell_asset(
    state: &mut SwapState,
    asset: Asset,
    remote_slippage_bips: &HashMap<String, u32>,
) -> Effects {
    if state.sell_asset.as_ref().is_some_and(|current| current.is_same_asset(&asset)) {
        return Effects::none();
    }
    if state.buy_asset.as_ref().is_some_and(|buy| buy.is_same_asset(&asset)) {
        state.buy_asset = None;
    }

    let previous_chain = state.sell_asset.as_ref().map(|sell| sell.chain_id);
    if previous_chain != Some(asset.chain_id) {
        state.slippage = default_slippage(asset.chain_id, remote_slippage_bips);
    }
    if state.output_chain.is_none() {
        state.output_chain = Some(asset.chain_id);
    }
    state.nice_increment = find_nice_increment(&asset.balance.amount);
    state.sell_asset = Some(asset);

    if state.input_method == InputMethod::Slider {
        recompute_slider_amount(state);
    }
    clear_derived_amount(state);
    recompute_native_values(state);
    after_asset_change(state)
}

/// Select the asset to buy.
///
/// Internal handler function - use [`crate::app::SwapController::select_buy_asset`] instead.
pub(crate) fn select_buy_asset(state: &mut SwapState, asset: Asset) -> Effects {
    if state.buy_asset.as_ref().is_some_and(|current| current.is_same_asset(&asset)) {
        return Effects::none();
    }
    if state.sell_asset.as_ref().is_some_and(|sell| sell.is_same_asset(&asset)) {
        state.sell_asset = None;
        state.nice_increment = "0".to_string();
    }

    state.output_chain = Some(asset.chain_id);
    state.buy_asset = Some(asset);

    clear_derived_amount(state);
    recompute_native_values(state);
    after_asset_change(state)
}

/// Swap the two assets; the previous output amount becomes the typed input.
///
/// Internal handler function - use [`crate::app::SwapController::flip_assets`] instead.
pub(crate) fn flip_assets(state: &mut SwapState, remote_slippage_bips: &HashMap<String, u32>) -> Effects {
    if state.sell_asset.is_none() && state.buy_asset.is_none() {
        return Effects::none();
    }

    let previous_output = state.inputs.output_amount.numeric();
    let previous_chain = state.sell_asset.as_ref().map(|sell| sell.chain_id);
    std::mem::swap(&mut state.sell_asset, &mut state.buy_asset);

    match state.sell_asset.as_ref() {
        Some(sell) => {
            if previous_chain != Some(sell.chain_id) {
                state.slippage = default_slippage(sell.chain_id, remote_slippage_bips);
            }
            state.nice_increment = find_nice_increment(&sell.balance.amount);
        }
        None => state.nice_increment = "0".to_string(),
    }
    if let Some(buy) = state.buy_asset.as_ref() {
        state.output_chain = Some(buy.chain_id);
    }

    state.input_method = InputMethod::InputAmount;
    state.last_changed = Some(AmountSide::Input);
    state.inputs.input_amount = FieldValue::Amount(previous_output);
    state.inputs.output_amount = FieldValue::zero();
    recompute_native_values(state);
    sync_slider_to_input(state);
    after_asset_change(state)
}

pub(crate) fn set_source(state: &mut SwapState, source: QuoteSource) -> Effects {
    if state.source == source {
        return Effects::none();
    }
    state.source = source;
    requote(state)
}

/// `slippage` is a percent string; anything outside `0..=100` keeps the current setting.
pub(crate) fn set_slippage(state: &mut SwapState, slippage: String) -> Effects {
    if state.slippage == slippage {
        return Effects::none();
    }
    if let Some(error) = validate_slippage(&slippage).error {
        warn!(slippage = %slippage, error = %error, "Ignoring slippage setting");
        return Effects::none();
    }
    state.slippage = slippage;
    requote(state)
}

/// Flashbots only affects execution, never the quote.
pub(crate) fn set_flashbots(state: &mut SwapState, enabled: bool) -> Effects {
    state.flashbots = enabled;
    Effects::none()
}

// endregion: --- User actions

// region: --- Task results

/// A debounce timer fired. Only the newest timer may fetch, and only for a stale quote.
pub(crate) fn on_debounce_elapsed(state: &SwapState, generation: u64) -> Effects {
    if generation != state.debounce_generation {
        debug!(generation, current = state.debounce_generation, "Superseded debounce timer");
        return Effects::none();
    }
    if !state.is_quote_stale || state.is_fetching {
        return Effects::none();
    }
    Effects::immediate()
}

/// Store a quote response.
///
/// Responses for anything but the request still in flight are discarded. Returns whether
/// the response was applied.
pub(crate) fn apply_quote(state: &mut SwapState, request_id: u64, response: QuoteResponse) -> bool {
    if state.in_flight != Some(request_id) {
        debug!(request_id, in_flight = ?state.in_flight, "Discarding superseded quote response");
        return false;
    }
    state.in_flight = None;
    state.is_fetching = false;

    match &response {
        QuoteResponse::Error(error) => {
            warn!(request_id, message = %error.message, code = ?error.error_code, "Quote failed");
            state.fee = None;
        }
        QuoteResponse::Quote(quote) => apply_quote_amounts(state, quote),
    }
    state.quote = Some(response);
    true
}

fn apply_quote_amounts(state: &mut SwapState, quote: &Quote) {
    let (Some(sell), Some(buy)) = (state.sell_asset.clone(), state.buy_asset.clone()) else {
        return;
    };

    match state.authoritative_side() {
        AmountSide::Input => {
            let amount = convert_raw_amount_to_decimal_format(&quote.buy_amount_minus_fees, buy.decimals);
            state.inputs.output_amount = FieldValue::Amount(format_quoted_amount(&amount, &buy));
            state.inputs.output_native_value = native_value(&FieldValue::Amount(amount), Some(&buy));
            state.inputs.input_native_value = native_value(&state.inputs.input_amount, Some(&sell));
        }
        AmountSide::Output => {
            let amount = convert_raw_amount_to_decimal_format(&quote.sell_amount, sell.decimals);
            state.inputs.input_amount = FieldValue::Amount(format_quoted_amount(&amount, &sell));
            state.inputs.input_native_value = native_value(&FieldValue::Amount(amount), Some(&sell));
            state.inputs.output_native_value = native_value(&state.inputs.output_amount, Some(&buy));
            sync_slider_to_input(state);
        }
    }

    let fee = if is_native_wrap_pair(&sell, &buy) {
        "0".to_string()
    } else {
        quote
            .fee_in_eth
            .clone()
            .or_else(|| quote.fee.clone())
            .unwrap_or_else(|| "0".to_string())
    };
    state.fee = Some(fee);
    state.is_quote_stale = false;
}

/// Replace the priced asset and refresh its native value. Never invalidates the quote.
///
/// Returns `false` when the asset on `side` has changed since the price was requested.
pub(crate) fn apply_price(state: &mut SwapState, side: AmountSide, unique_id: &str, price: &str) -> bool {
    let slot = match side {
        AmountSide::Input => &mut state.sell_asset,
        AmountSide::Output => &mut state.buy_asset,
    };
    let Some(asset) = slot.as_ref().filter(|asset| asset.unique_id == unique_id) else {
        debug!(?side, unique_id, "Dropping price for an asset no longer selected");
        return false;
    };
    let updated = asset.clone().with_price(price);
    *slot = Some(updated);

    match side {
        AmountSide::Input => {
            state.inputs.input_native_value = native_value(&state.inputs.input_amount, state.sell_asset.as_ref());
        }
        AmountSide::Output => {
            state.inputs.output_native_value = native_value(&state.inputs.output_amount, state.buy_asset.as_ref());
        }
    }
    true
}

// endregion: --- Task results
