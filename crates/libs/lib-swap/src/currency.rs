//! # Native Currencies
//!
//! Display metadata for the fiat (and ETH) currencies amounts can be valued in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the amount the currency symbol sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

/// Supported native currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NativeCurrency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aud,
    Cad,
    Nzd,
    Cny,
    Jpy,
    Krw,
    Inr,
    Try,
    Zar,
    Rub,
    Eth,
}

impl NativeCurrency {
    pub const ALL: [NativeCurrency; 14] = [
        NativeCurrency::Usd,
        NativeCurrency::Eur,
        NativeCurrency::Gbp,
        NativeCurrency::Aud,
        NativeCurrency::Cad,
        NativeCurrency::Nzd,
        NativeCurrency::Cny,
        NativeCurrency::Jpy,
        NativeCurrency::Krw,
        NativeCurrency::Inr,
        NativeCurrency::Try,
        NativeCurrency::Zar,
        NativeCurrency::Rub,
        NativeCurrency::Eth,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            NativeCurrency::Usd => "USD",
            NativeCurrency::Eur => "EUR",
            NativeCurrency::Gbp => "GBP",
            NativeCurrency::Aud => "AUD",
            NativeCurrency::Cad => "CAD",
            NativeCurrency::Nzd => "NZD",
            NativeCurrency::Cny => "CNY",
            NativeCurrency::Jpy => "JPY",
            NativeCurrency::Krw => "KRW",
            NativeCurrency::Inr => "INR",
            NativeCurrency::Try => "TRY",
            NativeCurrency::Zar => "ZAR",
            NativeCurrency::Rub => "RUB",
            NativeCurrency::Eth => "ETH",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NativeCurrency::Usd => "$",
            NativeCurrency::Eur => "€",
            NativeCurrency::Gbp => "£",
            NativeCurrency::Aud => "A$",
            NativeCurrency::Cad => "CA$",
            NativeCurrency::Nzd => "NZ$",
            NativeCurrency::Cny | NativeCurrency::Jpy => "¥",
            NativeCurrency::Krw => "₩",
            NativeCurrency::Inr => "₹",
            NativeCurrency::Try => "₺",
            NativeCurrency::Zar => "R",
            NativeCurrency::Rub => "₽",
            NativeCurrency::Eth => "Ξ",
        }
    }

    /// Configured decimal count (before the display cap).
    pub fn decimals(&self) -> u32 {
        match self {
            NativeCurrency::Jpy | NativeCurrency::Krw => 0,
            NativeCurrency::Eth => 18,
            _ => 2,
        }
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            NativeCurrency::Rub => Alignment::Right,
            _ => Alignment::Left,
        }
    }

    /// ETH amounts are shown without padding to a fixed fraction width.
    pub fn pads_fraction(&self) -> bool {
        !matches!(self, NativeCurrency::Eth)
    }
}

impl fmt::Display for NativeCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported native currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for NativeCurrency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        NativeCurrency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(UnknownCurrency(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_code() {
        assert_eq!("usd".parse::<NativeCurrency>(), Ok(NativeCurrency::Usd));
        assert_eq!(" ETH ".parse::<NativeCurrency>(), Ok(NativeCurrency::Eth));
        assert!("XYZ".parse::<NativeCurrency>().is_err());
    }

    #[test]
    fn test_currency_metadata() {
        assert_eq!(NativeCurrency::Rub.alignment(), Alignment::Right);
        assert_eq!(NativeCurrency::Jpy.decimals(), 0);
        assert!(!NativeCurrency::Eth.pads_fraction());
        assert_eq!(NativeCurrency::default().symbol(), "$");
    }
}
