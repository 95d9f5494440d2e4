//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Keep the first N and last M characters of an address
//! - [`truncate_address`] - `0x1234...abcd` form used in logs
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
//! assert_eq!(format_address(address, 6, 4), "0xC02a...6Cc2");
//! ```

/// Shorten an address to its first `prefix_len` and last `suffix_len` characters.
///
/// Addresses that are too short to shorten, or that are not ASCII, are returned as-is.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();
    if !address.is_ascii() || address_len <= prefix_len + suffix_len {
        return address.to_string();
    }

    format!("{}...{}", &address[..prefix_len], &address[address_len - suffix_len..])
}

/// `0x` plus four characters on each side.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(truncate_address("0x0000000000000000000000000000000000000000"), "0x0000...0000");
        assert_eq!(format_address("0xabc", 6, 4), "0xabc");
        assert_eq!(format_address("0xé0000000000000", 6, 4), "0xé0000000000000");
    }
}
