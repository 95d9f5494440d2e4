//! # Decimal Math
//!
//! Arbitrary-precision arithmetic over decimal strings.
//!
//! Every operation accepts string-or-number operands through [`DecimalInput`] and
//! returns a plain decimal string (no exponent notation), so 18-decimal token
//! amounts never pass through `f64`.
//!
//! ## Fallbacks
//!
//! - Malformed operands (`"abc"`, `"1,000"`, `f64::NAN`) produce [`NAN`].
//! - Division or remainder by zero, or with an empty operand, produces `"0"`.
//! - Comparisons involving a malformed operand are `false`.
//!
//! ```rust
//! use lib_swap::math::{add, divide, multiply};
//!
//! assert_eq!(add("0.1", "0.2"), "0.3");
//! assert_eq!(multiply("1.5", 2), "3");
//! assert_eq!(divide("1", "0"), "0");
//! ```

use bigdecimal::{BigDecimal, RoundingMode};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sentinel returned when an operand cannot be parsed.
pub const NAN: &str = "NaN";

/// Fractional digits kept by [`divide`].
pub const DIVISION_SCALE: i64 = 20;

// region: --- Operands

/// Anything that can be read as an arbitrary-precision decimal.
pub trait DecimalInput {
    /// Parse the operand. `None` means malformed or missing.
    fn to_decimal(&self) -> Option<BigDecimal>;

    /// Whether the operand is absent (an empty string).
    fn is_missing(&self) -> bool {
        false
    }
}

impl DecimalInput for str {
    fn to_decimal(&self) -> Option<BigDecimal> {
        parse_decimal(self)
    }

    fn is_missing(&self) -> bool {
        self.trim().is_empty()
    }
}

impl DecimalInput for String {
    fn to_decimal(&self) -> Option<BigDecimal> {
        parse_decimal(self)
    }

    fn is_missing(&self) -> bool {
        self.as_str().is_missing()
    }
}

impl DecimalInput for f64 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        if !self.is_finite() {
            return None;
        }
        // f64 Display never uses exponent notation.
        parse_decimal(&self.to_string())
    }
}

impl DecimalInput for BigDecimal {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(self.clone())
    }
}

macro_rules! impl_decimal_input_for_int {
    ($($t:ty),*) => {
        $(
            impl DecimalInput for $t {
                fn to_decimal(&self) -> Option<BigDecimal> {
                    Some(BigDecimal::from(*self))
                }
            }
        )*
    };
}

impl_decimal_input_for_int!(i32, i64, u8, u32, u64);

impl DecimalInput for usize {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self as u64))
    }
}

impl<T: DecimalInput + ?Sized> DecimalInput for &T {
    fn to_decimal(&self) -> Option<BigDecimal> {
        (**self).to_decimal()
    }

    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

/// Parse a decimal string, tolerating a bare leading or trailing point (`".5"`, `"5."`).
pub fn parse_decimal(value: &str) -> Option<BigDecimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return None;
    }
    let normalized = if digits.starts_with('.') {
        format!("{sign}0{digits}")
    } else {
        format!("{sign}{digits}")
    };

    BigDecimal::from_str(&normalized).ok()
}

// endregion: --- Operands

// region: --- Helpers

/// Render a decimal without exponent notation or trailing fractional zeros.
pub fn to_plain(value: &BigDecimal) -> String {
    value.normalized().to_plain_string()
}

/// Parse an operand, falling back to zero when it is malformed.
pub fn decimal_or_zero(value: impl DecimalInput) -> BigDecimal {
    value.to_decimal().unwrap_or_else(zero)
}

pub(crate) fn zero() -> BigDecimal {
    BigDecimal::from(0)
}

/// `10^exponent` as an exact decimal.
pub fn pow10(exponent: i64) -> BigDecimal {
    BigDecimal::new(1.into(), -exponent)
}

/// `floor(log10(|value|))`, or `None` for zero.
pub fn order_of_magnitude(value: &BigDecimal) -> Option<i64> {
    if value == &zero() {
        return None;
    }
    let (digits, scale) = value.abs().normalized().as_bigint_and_exponent();
    let digit_count = digits.to_string().len() as i64;
    Some(digit_count - 1 - scale)
}

/// `ceil(log10(value))` for a strictly positive value.
pub(crate) fn ceil_log10(value: &BigDecimal) -> Option<i64> {
    if value <= &zero() {
        return None;
    }
    let floor = order_of_magnitude(value)?;
    if value == &pow10(floor) {
        Some(floor)
    } else {
        Some(floor + 1)
    }
}

fn binary(
    a: impl DecimalInput,
    b: impl DecimalInput,
    op: impl FnOnce(BigDecimal, BigDecimal) -> BigDecimal,
) -> String {
    match (a.to_decimal(), b.to_decimal()) {
        (Some(a), Some(b)) => to_plain(&op(a, b)),
        _ => NAN.to_string(),
    }
}

fn compare(a: impl DecimalInput, b: impl DecimalInput) -> Option<Ordering> {
    Some(a.to_decimal()?.cmp(&b.to_decimal()?))
}

// endregion: --- Helpers

// region: --- Arithmetic

pub fn add(a: impl DecimalInput, b: impl DecimalInput) -> String {
    binary(a, b, |a, b| a + b)
}

pub fn subtract(a: impl DecimalInput, b: impl DecimalInput) -> String {
    binary(a, b, |a, b| a - b)
}

pub fn multiply(a: impl DecimalInput, b: impl DecimalInput) -> String {
    binary(a, b, |a, b| a * b)
}

/// Divide `a` by `b`, rounded half-up to [`DIVISION_SCALE`] fractional digits.
///
/// A zero divisor or an empty operand yields `"0"` instead of an error.
pub fn divide(a: impl DecimalInput, b: impl DecimalInput) -> String {
    if a.is_missing() || b.is_missing() {
        return "0".to_string();
    }
    let (Some(a), Some(b)) = (a.to_decimal(), b.to_decimal()) else {
        return NAN.to_string();
    };
    if b == zero() {
        return "0".to_string();
    }
    to_plain(&(a / b).with_scale_round(DIVISION_SCALE, RoundingMode::HalfUp))
}

/// Truncated remainder; the sign follows the dividend.
pub fn modulo(a: impl DecimalInput, b: impl DecimalInput) -> String {
    if a.is_missing() || b.is_missing() {
        return "0".to_string();
    }
    let (Some(a), Some(b)) = (a.to_decimal(), b.to_decimal()) else {
        return NAN.to_string();
    };
    if b == zero() {
        return "0".to_string();
    }
    to_plain(&(a % b))
}

/// Integer part of `a / b`.
pub fn floor_divide(a: impl DecimalInput, b: impl DecimalInput) -> String {
    if a.is_missing() || b.is_missing() {
        return "0".to_string();
    }
    let (Some(a), Some(b)) = (a.to_decimal(), b.to_decimal()) else {
        return NAN.to_string();
    };
    if b == zero() {
        return "0".to_string();
    }
    to_plain(&(a / b).with_scale_round(0, RoundingMode::Down))
}

pub fn abs(value: impl DecimalInput) -> String {
    match value.to_decimal() {
        Some(v) => to_plain(&v.abs()),
        None => NAN.to_string(),
    }
}

pub fn floor(value: impl DecimalInput) -> String {
    round_with(value, 0, RoundingMode::Floor)
}

pub fn ceil(value: impl DecimalInput) -> String {
    round_with(value, 0, RoundingMode::Ceiling)
}

/// Round to the nearest integer, halves away from zero.
pub fn round(value: impl DecimalInput) -> String {
    round_with(value, 0, RoundingMode::HalfUp)
}

fn round_with(value: impl DecimalInput, scale: i64, mode: RoundingMode) -> String {
    match value.to_decimal() {
        Some(v) => to_plain(&v.with_scale_round(scale, mode)),
        None => NAN.to_string(),
    }
}

/// Fixed-point rendering with exactly `decimals` fractional digits (half-up).
pub fn to_fixed_decimals(value: impl DecimalInput, decimals: u32) -> String {
    match value.to_decimal() {
        Some(v) => v
            .with_scale_round(decimals as i64, RoundingMode::HalfUp)
            .to_plain_string(),
        None => NAN.to_string(),
    }
}

// endregion: --- Arithmetic

// region: --- Comparisons

pub fn less_than(a: impl DecimalInput, b: impl DecimalInput) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

pub fn less_than_or_equal_to(a: impl DecimalInput, b: impl DecimalInput) -> bool {
    matches!(compare(a, b), Some(Ordering::Less | Ordering::Equal))
}

pub fn greater_than(a: impl DecimalInput, b: impl DecimalInput) -> bool {
    compare(a, b) == Some(Ordering::Greater)
}

pub fn greater_than_or_equal_to(a: impl DecimalInput, b: impl DecimalInput) -> bool {
    matches!(compare(a, b), Some(Ordering::Greater | Ordering::Equal))
}

pub fn is_equal(a: impl DecimalInput, b: impl DecimalInput) -> bool {
    compare(a, b) == Some(Ordering::Equal)
}

pub fn is_zero(value: impl DecimalInput) -> bool {
    value.to_decimal().is_some_and(|v| v == zero())
}

/// Strictly greater than zero.
pub fn is_positive(value: impl DecimalInput) -> bool {
    value.to_decimal().is_some_and(|v| v > zero())
}

// endregion: --- Comparisons

// region: --- Unit conversion

/// Raw integer amount divided by `10^decimals`.
pub fn convert_raw_amount_to_decimal_format(raw: impl DecimalInput, decimals: u32) -> String {
    match raw.to_decimal() {
        Some(v) => to_plain(&(v * pow10(-(decimals as i64)))),
        None => NAN.to_string(),
    }
}

/// Decimal amount scaled by `10^decimals`, truncated to an integer string.
pub fn convert_amount_to_raw_amount(amount: impl DecimalInput, decimals: u32) -> String {
    match amount.to_decimal() {
        Some(v) => to_plain(&(v * pow10(decimals as i64)).with_scale_round(0, RoundingMode::Down)),
        None => NAN.to_string(),
    }
}

/// Decimal amount scaled by `10^decimals`, rounded half-up to an integer string.
pub fn convert_decimal_format_to_raw_amount(amount: impl DecimalInput, decimals: u32) -> String {
    match amount.to_decimal() {
        Some(v) => to_plain(&(v * pow10(decimals as i64)).with_scale_round(0, RoundingMode::HalfUp)),
        None => NAN.to_string(),
    }
}

/// Token amount worth `native_value` at `price`, truncated to `decimals`.
pub fn convert_amount_from_native_value(
    native_value: impl DecimalInput,
    price: impl DecimalInput,
    decimals: u32,
) -> String {
    let price = match price.to_decimal() {
        Some(p) if p != zero() => p,
        _ => return "0".to_string(),
    };
    match native_value.to_decimal() {
        Some(v) => to_plain(&(v / price).with_scale_round(decimals as i64, RoundingMode::Down)),
        None => NAN.to_string(),
    }
}

// endregion: --- Unit conversion
