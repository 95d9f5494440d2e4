//! # Slider Math
//!
//! Maps a percentage-of-balance slider onto round token amounts.
//!
//! The slider moves in steps of a "nice" increment (`{1, 2} x 10^k`, never coarser than 1%
//! of the balance) so the displayed amount advances in legible jumps instead of changing
//! on every drag update. The 25/50/75/100% checkpoints bypass the snapping.

use crate::format::{
    count_decimal_places, group_thousands, value_based_decimal_formatter, DecimalFormatOptions,
    Rounding,
};
use crate::math::{order_of_magnitude, pow10, to_plain, zero, DecimalInput};
use bigdecimal::{BigDecimal, RoundingMode};

/// Candidate multipliers of the base increment, largest first.
const NICE_FACTORS: [u32; 3] = [10, 2, 1];

/// Fractional digits kept when rendering a snapped amount.
const MAX_SLIDER_FRACTION_DIGITS: i64 = 8;

/// Round a raw slider position (`0.0..=1.0`) to a whole percent.
pub fn percentage_to_swap(raw_percentage: f64) -> f64 {
    (raw_percentage.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Largest `{10, 2, 1} x 10^floor(log10(balance / 100))` not exceeding `balance / 100`.
///
/// Non-positive or malformed balances yield `"0"`.
pub fn find_nice_increment(balance: impl DecimalInput) -> String {
    let balance = match balance.to_decimal() {
        Some(b) if b > zero() => b,
        _ => return "0".to_string(),
    };

    let exact_increment = balance / BigDecimal::from(100);
    let Some(magnitude) = order_of_magnitude(&exact_increment) else {
        return "0".to_string();
    };
    let base_increment = pow10(magnitude);

    let nice = NICE_FACTORS
        .iter()
        .map(|factor| &base_increment * BigDecimal::from(*factor))
        .find(|candidate| candidate <= &exact_increment)
        .unwrap_or_else(|| pow10(magnitude));

    to_plain(&nice)
}

/// Inputs to [`nice_increment_formatter`].
#[derive(Debug, Clone)]
pub struct SliderAmount<'a> {
    /// Decimal balance of the sell asset.
    pub balance: &'a str,
    pub usd_price: &'a str,
    /// Result of [`find_nice_increment`] for `balance`.
    pub nice_increment: &'a str,
    /// Fraction digits of `nice_increment`.
    pub increment_decimal_places: u32,
    /// [`percentage_to_swap`] of `raw_percentage`.
    pub percentage_to_swap: f64,
    /// Unrounded slider position in `0.0..=1.0`.
    pub raw_percentage: f64,
    pub strip_separators: bool,
}

impl<'a> SliderAmount<'a> {
    pub fn new(balance: &'a str, usd_price: &'a str, nice_increment: &'a str, raw_percentage: f64) -> Self {
        Self {
            balance,
            usd_price,
            nice_increment,
            increment_decimal_places: count_decimal_places(nice_increment),
            percentage_to_swap: percentage_to_swap(raw_percentage),
            raw_percentage,
            strip_separators: true,
        }
    }

    pub fn with_separators(mut self) -> Self {
        self.strip_separators = false;
        self
    }
}

/// Token amount for a slider position.
///
/// ```rust
/// use lib_swap::slider::{find_nice_increment, nice_increment_formatter, SliderAmount};
///
/// let nice = find_nice_increment("2.5");
/// assert_eq!(nice, "0.02");
/// assert_eq!(nice_increment_formatter(&SliderAmount::new("2.5", "2000", &nice, 0.333)), "0.84");
/// ```
pub fn nice_increment_formatter(input: &SliderAmount<'_>) -> String {
    let percentage = input.percentage_to_swap;
    if percentage == 0.0 {
        return "0".to_string();
    }

    let balance = match input.balance.to_decimal() {
        Some(b) if b > zero() => b,
        _ => return "0".to_string(),
    };

    if percentage == 0.25 || percentage == 0.5 || percentage == 0.75 {
        let amount = &balance * percentage.to_decimal().unwrap_or_else(zero);
        let options = DecimalFormatOptions::default()
            .rounding(Rounding::Up)
            .precision_adjustment(-3);
        return value_based_decimal_formatter(&amount, input.usd_price, options);
    }
    if percentage == 1.0 {
        let options = DecimalFormatOptions::default().rounding(Rounding::Up);
        return value_based_decimal_formatter(&balance, input.usd_price, options);
    }

    let nice = match input.nice_increment.to_decimal() {
        Some(n) if n > zero() => n,
        _ => return "0".to_string(),
    };

    let exact_increment = &balance / BigDecimal::from(100);
    let number_of_increments = &balance / &nice;

    let snapped_percentage = if nice == exact_increment {
        percentage.to_decimal().unwrap_or_else(zero)
    } else {
        let raw = input.raw_percentage.clamp(0.0, 1.0).to_decimal().unwrap_or_else(zero);
        (raw * &number_of_increments).with_scale_round(0, RoundingMode::HalfUp) / &number_of_increments
    };

    let steps = (snapped_percentage * &balance / &nice).with_scale_round(0, RoundingMode::HalfUp);
    let raw_amount = (steps * nice)
        .with_scale_round(input.increment_decimal_places as i64, RoundingMode::HalfUp)
        .with_scale_round(MAX_SLIDER_FRACTION_DIGITS, RoundingMode::HalfUp);

    let formatted = to_plain(&raw_amount);
    if input.strip_separators {
        formatted
    } else {
        group_thousands(&formatted)
    }
}
