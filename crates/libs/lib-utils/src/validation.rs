//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate an `http://` or `https://` base URL with a host.
pub fn validate_http_url(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| format!("{} must start with http:// or https://", field_name))?;
    if rest.split('/').next().unwrap_or("").is_empty() {
        return Err(format!("{} is missing a host", field_name));
    }
    Ok(())
}

/// Validate a `0x`-prefixed, 20-byte hex address (checksum is not verified).
pub fn validate_evm_address(value: &str, field_name: &str) -> Result<(), String> {
    let hex = value
        .strip_prefix("0x")
        .ok_or_else(|| format!("{} must start with 0x", field_name))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{} must be 40 hex characters after 0x", field_name));
    }
    Ok(())
}
