//! # Amount Formatting
//!
//! Turns raw and decimal token amounts into display strings whose precision
//! follows the economic magnitude of the value rather than a fixed width.
//!
//! ## Zero handling
//!
//! - Token amounts of exactly zero render as `"0"`.
//! - Native values of zero render with the currency's full fraction width (`"$0.00"`).
//! - Threshold rendering (`"< $0.01"`) only applies to strictly positive values
//!   below the threshold.

use crate::currency::{Alignment, NativeCurrency};
use crate::math::{
    self, ceil_log10, decimal_or_zero, order_of_magnitude, pow10, to_plain, zero, DecimalInput,
};
use bigdecimal::{BigDecimal, RoundingMode};

// region: --- String helpers

/// Insert thousands separators into the integer part of a plain decimal string.
pub fn group_thousands(value: &str) -> String {
    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, fraction) = match unsigned.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Add thousands separators to values of 1000 or more, leaving the text otherwise untouched.
///
/// Unparseable input yields `"0"`. Text that already carries separators is returned as is,
/// as is partial input such as `"0."`.
pub fn add_commas_to_number(value: &str) -> String {
    if value.contains(',') {
        return value.to_string();
    }
    match math::parse_decimal(value) {
        None => "0".to_string(),
        Some(v) if v >= BigDecimal::from(1000) => group_thousands(value.trim()),
        Some(_) => value.to_string(),
    }
}

pub fn strip_commas(value: &str) -> String {
    value.replace(',', "")
}

/// Drop trailing fractional zeros and a dangling decimal point (`"1.500"` -> `"1.5"`).
pub fn trim_trailing_zeros(value: &str) -> String {
    if !value.contains('.') {
        return value.to_string();
    }
    let trimmed = value.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

/// Fraction digits, ignoring trailing zeros.
pub fn count_decimal_places(value: &str) -> u32 {
    match value.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len() as u32,
        None => 0,
    }
}

/// Fraction digits of a decimal value.
pub(crate) fn fraction_digits(value: &BigDecimal) -> u32 {
    count_decimal_places(&to_plain(value))
}

// endregion: --- String helpers

// region: --- Value based formatting

/// Rounding applied to the scaled amount before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Towards positive infinity.
    Up,
    /// Towards negative infinity.
    Down,
    /// Half away from zero.
    #[default]
    Nearest,
}

impl Rounding {
    fn mode(self) -> RoundingMode {
        match self {
            Rounding::Up => RoundingMode::Ceiling,
            Rounding::Down => RoundingMode::Floor,
            Rounding::Nearest => RoundingMode::HalfUp,
        }
    }
}

/// Options for [`value_based_decimal_formatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalFormatOptions {
    pub rounding: Rounding,
    /// Added to the magnitude-based precision.
    pub precision_adjustment: i64,
    /// Stablecoins always use two decimal places.
    pub is_stablecoin: bool,
    /// Return the number without thousands separators.
    pub strip_separators: bool,
}

impl Default for DecimalFormatOptions {
    fn default() -> Self {
        Self {
            rounding: Rounding::Nearest,
            precision_adjustment: 0,
            is_stablecoin: false,
            strip_separators: true,
        }
    }
}

impl DecimalFormatOptions {
    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn precision_adjustment(mut self, adjustment: i64) -> Self {
        self.precision_adjustment = adjustment;
        self
    }

    pub fn stablecoin(mut self, is_stablecoin: bool) -> Self {
        self.is_stablecoin = is_stablecoin;
        self
    }

    pub fn with_separators(mut self) -> Self {
        self.strip_separators = false;
        self
    }
}

/// Decimal places needed for `amount` to resolve one cent of value at `usd_price`.
///
/// `ceil(log10(price / 0.01)) + precision_adjustment - (floor(log10(|amount|)) + 1)`,
/// clamped at zero. A non-positive price falls back to two places; a price at or below one
/// cent needs none.
pub fn value_based_decimal_places(
    amount: &BigDecimal,
    usd_price: &BigDecimal,
    precision_adjustment: i64,
) -> i64 {
    if usd_price <= &zero() {
        return 2;
    }
    let cents_per_unit = usd_price * pow10(2);
    if cents_per_unit <= BigDecimal::from(1) {
        return 0;
    }
    let Some(places_for_one_cent) = ceil_log10(&cents_per_unit) else {
        return 2;
    };
    let magnitude = order_of_magnitude(amount).map_or(0, |om| -(om + 1));
    (places_for_one_cent + precision_adjustment + magnitude).max(0)
}

/// Format a token amount with as many decimals as its value warrants.
///
/// ```rust
/// use lib_swap::format::{value_based_decimal_formatter, DecimalFormatOptions, Rounding};
///
/// let options = DecimalFormatOptions::default().rounding(Rounding::Down).precision_adjustment(-1);
/// assert_eq!(value_based_decimal_formatter("1.23456", 2000, options), "1.2345");
/// ```
pub fn value_based_decimal_formatter(
    amount: impl DecimalInput,
    usd_price: impl DecimalInput,
    options: DecimalFormatOptions,
) -> String {
    let amount = match amount.to_decimal() {
        Some(a) if a != zero() => a,
        _ => return "0".to_string(),
    };
    let price = decimal_or_zero(usd_price);

    let decimal_places = if options.is_stablecoin {
        2
    } else {
        value_based_decimal_places(&amount, &price, options.precision_adjustment)
    };

    let rounded = to_plain(&amount.with_scale_round(decimal_places, options.rounding.mode()));
    if options.strip_separators {
        rounded
    } else {
        group_thousands(&rounded)
    }
}

// endregion: --- Value based formatting

// region: --- Significant decimals

/// Round to a readable number of significant decimals.
///
/// Below 1, keeps the leading fractional zeros plus `buffer` digits (at most 8 places).
/// Otherwise keeps `min(decimals, buffer)` places. Results with two or fewer places are padded
/// to two (or rounded to none when `skip_decimals`).
pub fn handle_significant_decimals(
    value: impl DecimalInput,
    decimals: u32,
    buffer: u32,
    skip_decimals: bool,
) -> String {
    let value = match value.to_decimal() {
        Some(v) => v,
        None => return "0".to_string(),
    };

    let places = if value.abs() < BigDecimal::from(1) {
        let leading_zeros = order_of_magnitude(&value).map_or(-1, |om| -om - 1);
        (leading_zeros + buffer as i64).clamp(0, 8)
    } else {
        decimals.min(buffer) as i64
    };

    let rounded = value.with_scale_round(places, RoundingMode::HalfUp).normalized();
    if fraction_digits(&rounded) <= 2 {
        let width = if skip_decimals { 0 } else { 2 };
        group_thousands(&rounded.with_scale_round(width, RoundingMode::HalfUp).to_plain_string())
    } else {
        group_thousands(&to_plain(&rounded))
    }
}

/// Fixed-width rendering that collapses small positive values to `"< threshold"`.
pub fn handle_significant_decimals_with_threshold(
    value: impl DecimalInput,
    decimals: u32,
    threshold: &str,
) -> String {
    let value = decimal_or_zero(value);
    let result = math::to_fixed_decimals(&value, decimals);
    if math::is_positive(&value) && math::less_than(&result, threshold) {
        format!("< {threshold}")
    } else {
        result
    }
}

/// `"<amount> <SYMBOL>"` with significant-decimal rounding.
pub fn convert_amount_to_balance_display(
    value: impl DecimalInput,
    decimals: u32,
    symbol: &str,
    buffer: u32,
) -> String {
    let display = handle_significant_decimals(value, decimals, buffer, false);
    format!("{display} {symbol}")
}

/// `"12.34%"` with significant-decimal rounding.
pub fn convert_amount_to_percentage_display(
    value: impl DecimalInput,
    buffer: u32,
    skip_decimals: bool,
) -> String {
    let display = handle_significant_decimals(value, 2, buffer, skip_decimals);
    format!("{display}%")
}

/// Render a ratio as a percentage, collapsing tiny positive ratios to `"< 0.01%"`.
pub fn convert_amount_to_percentage_display_with_threshold(
    value: impl DecimalInput,
    decimals: u32,
    threshold: &str,
) -> String {
    let value = decimal_or_zero(value);
    if math::is_positive(&value) && math::less_than(&value, threshold) {
        return "< 0.01%".to_string();
    }
    format!("{}%", math::to_fixed_decimals(value * BigDecimal::from(100), decimals))
}

/// Basis points to a percentage string (`250` -> `"2.50"`).
pub fn convert_bips_to_percentage(bips: impl DecimalInput, decimals: u32) -> String {
    match bips.to_decimal() {
        Some(v) => math::to_fixed_decimals(v * pow10(-2), decimals),
        None => "0".to_string(),
    }
}

// endregion: --- Significant decimals

// region: --- Native currency display

/// A native value along with its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeDisplay {
    pub amount: String,
    pub display: String,
}

fn with_symbol(body: &str, currency: NativeCurrency) -> String {
    match currency.alignment() {
        Alignment::Left => format!("{}{}", currency.symbol(), body),
        Alignment::Right => format!("{}{}", body, currency.symbol()),
    }
}

/// Format a native-currency value (`"$1,234.50"`, `"1,234.50₽"`).
///
/// Uses the currency's decimal count capped at 6. With `use_threshold`, positive values below
/// 0.01 (or 0.0001 for currencies with four or more decimals) render as `"< $0.01"`.
pub fn convert_amount_to_native_display(
    value: impl DecimalInput,
    currency: NativeCurrency,
    use_threshold: bool,
) -> String {
    let decimals = currency.decimals().min(6);
    let threshold = if decimals < 4 { "0.01" } else { "0.0001" };
    let value = decimal_or_zero(value);

    if use_threshold && math::is_positive(&value) && math::less_than(&value, threshold) {
        return format!("< {}", with_symbol(threshold, currency));
    }

    let rounded = value.with_scale_round(decimals as i64, RoundingMode::HalfUp);
    let body = if currency.pads_fraction() {
        rounded.to_plain_string()
    } else {
        to_plain(&rounded)
    };
    with_symbol(&group_thousands(&body), currency)
}

/// Value `amount` at `price` and format it.
pub fn convert_amount_and_price_to_native_display(
    amount: impl DecimalInput,
    price: impl DecimalInput,
    currency: NativeCurrency,
    use_threshold: bool,
) -> NativeDisplay {
    let native_amount = math::multiply(decimal_or_zero(amount), decimal_or_zero(price));
    let display = convert_amount_to_native_display(&native_amount, currency, use_threshold);
    NativeDisplay {
        amount: native_amount,
        display,
    }
}

/// Convert a raw integer amount to a native value and format it.
pub fn convert_raw_amount_to_native_display(
    raw: impl DecimalInput,
    decimals: u32,
    price: impl DecimalInput,
    currency: NativeCurrency,
    use_threshold: bool,
) -> NativeDisplay {
    let amount = math::convert_raw_amount_to_decimal_format(raw, decimals);
    convert_amount_and_price_to_native_display(&amount, price, currency, use_threshold)
}

// endregion: --- Native currency display

#[cfg(test)]
mod tests {
    use super::*;

    fn down(adjustment: i64) -> DecimalFormatOptions {
        DecimalFormatOptions::default()
            .rounding(Rounding::Down)
            .precision_adjustment(adjustment)
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567.891"), "1,234,567.891");
        assert_eq!(group_thousands("-1234"), "-1,234");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    #[test]
    fn test_add_commas_to_number() {
        assert_eq!(add_commas_to_number("1234567.891"), "1,234,567.891");
        assert_eq!(add_commas_to_number("999.5"), "999.5");
        assert_eq!(add_commas_to_number("1,234"), "1,234");
        assert_eq!(add_commas_to_number("0."), "0.");
        assert_eq!(add_commas_to_number("abc"), "0");
    }

    #[test]
    fn test_trailing_zero_helpers() {
        assert_eq!(trim_trailing_zeros("1.2300"), "1.23");
        assert_eq!(trim_trailing_zeros("1.000"), "1");
        assert_eq!(trim_trailing_zeros("100"), "100");
        assert_eq!(count_decimal_places("1.2300"), 2);
        assert_eq!(count_decimal_places("5"), 0);
        assert_eq!(strip_commas("1,234.5"), "1234.5");
    }

    #[test]
    fn test_value_based_precision_follows_price() {
        // One cent of a $2000 asset needs 6 places; a 1.x amount gives back one, and the
        // adjustment another.
        assert_eq!(value_based_decimal_formatter("1.23456", 2000, down(-1)), "1.2345");
        assert_eq!(
            value_based_decimal_formatter("0.000123456", 1, DecimalFormatOptions::default().rounding(Rounding::Up)),
            "0.00013"
        );
    }

    #[test]
    fn test_value_based_fallbacks() {
        assert_eq!(value_based_decimal_formatter("3.14159", 0, DecimalFormatOptions::default()), "3.14");
        assert_eq!(value_based_decimal_formatter("1234.6", "0.001", DecimalFormatOptions::default()), "1235");
        assert_eq!(value_based_decimal_formatter("0", 2000, down(-1)), "0");
        assert_eq!(value_based_decimal_formatter("abc", 2000, down(-1)), "0");
    }

    #[test]
    fn test_value_based_stablecoin_with_separators() {
        let options = DecimalFormatOptions::default().stablecoin(true).with_separators();
        assert_eq!(value_based_decimal_formatter("1234.5678", 1, options), "1,234.57");
    }

    #[test]
    fn test_handle_significant_decimals() {
        assert_eq!(handle_significant_decimals("0.00012345", 18, 3, false), "0.000123");
        assert_eq!(handle_significant_decimals("1234.5678", 18, 3, false), "1,234.568");
        assert_eq!(handle_significant_decimals("12.5", 18, 3, false), "12.50");
        assert_eq!(handle_significant_decimals("12.5", 18, 3, true), "13");
        assert_eq!(handle_significant_decimals("0", 18, 3, false), "0.00");
    }

    #[test]
    fn test_threshold_displays() {
        assert_eq!(handle_significant_decimals_with_threshold("0.00001", 4, "0.0001"), "< 0.0001");
        assert_eq!(handle_significant_decimals_with_threshold("0.5", 4, "0.0001"), "0.5000");
        assert_eq!(convert_amount_to_percentage_display_with_threshold("0.00005", 2, "0.0001"), "< 0.01%");
        assert_eq!(convert_amount_to_percentage_display_with_threshold("0.1234", 2, "0.0001"), "12.34%");
        assert_eq!(convert_amount_to_percentage_display("12.3456", 3, false), "12.35%");
        assert_eq!(convert_bips_to_percentage("250", 2), "2.50");
    }

    #[test]
    fn test_balance_display() {
        assert_eq!(convert_amount_to_balance_display("1.5", 18, "ETH", 3), "1.50 ETH");
    }

    #[test]
    fn test_native_display() {
        assert_eq!(convert_amount_to_native_display("1234.5", NativeCurrency::Usd, false), "$1,234.50");
        assert_eq!(convert_amount_to_native_display("1234.5", NativeCurrency::Rub, false), "1,234.50₽");
        assert_eq!(convert_amount_to_native_display("1234.56", NativeCurrency::Jpy, false), "¥1,235");
        assert_eq!(convert_amount_to_native_display("0.5", NativeCurrency::Eth, false), "Ξ0.5");
    }

    #[test]
    fn test_native_display_zero_and_threshold() {
        assert_eq!(convert_amount_to_native_display("0", NativeCurrency::Usd, true), "$0.00");
        assert_eq!(convert_amount_to_native_display("0.004", NativeCurrency::Usd, true), "< $0.01");
        assert_eq!(convert_amount_to_native_display("0.004", NativeCurrency::Usd, false), "$0.00");

        let display = convert_amount_to_native_display("0.00005", NativeCurrency::Eth, true);
        assert_eq!(display, "< Ξ0.0001");
        assert!(display.starts_with("< ") && display.ends_with("0.0001"));
    }

    #[test]
    fn test_raw_amount_to_native_display() {
        let native = convert_raw_amount_to_native_display("1500000", 6, "2", NativeCurrency::Usd, false);
        assert_eq!(native.amount, "3");
        assert_eq!(native.display, "$3.00");
    }
}
