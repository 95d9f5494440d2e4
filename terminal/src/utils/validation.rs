//! Validation utilities for user input

use lib_swap::format::strip_commas;
use lib_swap::math;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validate text typed into an amount field
///
/// Partial input the user is still typing (`""`, `"0."`, `".5"`) is accepted.
pub fn validate_amount_text(text: &str) -> ValidationResult {
    let text = text.trim();
    if text.is_empty() {
        return ValidationResult::ok();
    }

    if text.starts_with('-') {
        return ValidationResult::err("Amount cannot be negative");
    }

    if text.matches('.').count() > 1 {
        return ValidationResult::err("Amount can contain only one decimal point");
    }

    if math::parse_decimal(&strip_commas(text)).is_none() {
        return ValidationResult::err("Amount must be a number");
    }

    ValidationResult::ok()
}

/// Validate a slider position given as a fraction (`0.5`) or a percentage (`50%`)
pub fn validate_slider_position(text: &str) -> ValidationResult {
    let text = text.trim();
    let (number, scale) = match text.strip_suffix('%') {
        Some(percent) => (percent.trim(), 100.0),
        None => (text, 1.0),
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=scale).contains(&value) => ValidationResult::ok(),
        Ok(_) => ValidationResult::err("Slider position must be between 0 and 1 (or 0% and 100%)"),
        Err(_) => ValidationResult::err("Slider position must be a number"),
    }
}

/// Parse a slider position already accepted by [`validate_slider_position`]
pub fn parse_slider_position(text: &str) -> Option<f64> {
    if !validate_slider_position(text).is_valid {
        return None;
    }
    let text = text.trim();
    match text.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok().map(|p| p / 100.0),
        None => text.parse().ok(),
    }
}

/// Validate a slippage percentage
pub fn validate_slippage(text: &str) -> ValidationResult {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=100.0).contains(&value) => ValidationResult::ok(),
        Ok(_) => ValidationResult::err("Slippage must be between 0 and 100 percent"),
        Err(_) => ValidationResult::err("Slippage must be a number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_text() {
        assert!(validate_amount_text("").is_valid);
        assert!(validate_amount_text("0.").is_valid);
        assert!(validate_amount_text("1,250.5").is_valid);
        assert!(!validate_amount_text("-1").is_valid);
        assert!(!validate_amount_text("1.2.3").is_valid);
        assert_eq!(
            validate_amount_text("abc").error.as_deref(),
            Some("Amount must be a number")
        );
    }

    #[test]
    fn test_slider_position() {
        assert_eq!(parse_slider_position("0.25"), Some(0.25));
        assert_eq!(parse_slider_position("75%"), Some(0.75));
        assert_eq!(parse_slider_position("1.5"), None);
        assert!(!validate_slider_position("NaN").is_valid);
    }

    #[test]
    fn test_slippage() {
        assert!(validate_slippage("0.5").is_valid);
        assert!(!validate_slippage("150").is_valid);
    }
}
