//! # Asset Model

use crate::chains::{ChainId, NATIVE_ASSET_ADDRESS};
use crate::math::{self, convert_raw_amount_to_decimal_format};
use serde::{Deserialize, Serialize};

/// Balance held by the user, as a raw integer and as a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetBalance {
    pub raw: String,
    pub amount: String,
}

impl AssetBalance {
    pub fn from_raw(raw: impl Into<String>, decimals: u32) -> Self {
        let raw = raw.into();
        let amount = convert_raw_amount_to_decimal_format(&raw, decimals);
        Self { raw, amount }
    }

    pub fn is_empty(&self) -> bool {
        !math::is_positive(&self.amount)
    }
}

/// A tradable token on one chain.
///
/// Replaced wholesale when re-fetched; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// `<lowercase address>_<chain id>`.
    pub unique_id: String,
    pub chain_id: ChainId,
    pub address: String,
    #[serde(default)]
    pub is_native: bool,
    pub decimals: u32,
    pub symbol: String,
    /// Value of one unit in the native currency, as a decimal string.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub balance: AssetBalance,
    #[serde(default)]
    pub is_stablecoin: bool,
}

impl Asset {
    pub fn new(chain_id: ChainId, address: &str, symbol: &str, decimals: u32) -> Self {
        Self {
            unique_id: Self::unique_id_for(address, chain_id),
            chain_id,
            address: address.to_string(),
            is_native: address.eq_ignore_ascii_case(NATIVE_ASSET_ADDRESS),
            decimals,
            symbol: symbol.to_string(),
            price: None,
            balance: AssetBalance::default(),
            is_stablecoin: false,
        }
    }

    pub fn unique_id_for(address: &str, chain_id: ChainId) -> String {
        format!("{}_{}", address.to_lowercase(), chain_id.id())
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    pub fn with_raw_balance(mut self, raw: &str) -> Self {
        self.balance = AssetBalance::from_raw(raw, self.decimals);
        self
    }

    pub fn stablecoin(mut self) -> Self {
        self.is_stablecoin = true;
        self
    }

    pub fn is_same_asset(&self, other: &Asset) -> bool {
        self.unique_id == other.unique_id
    }

    /// Address sent to the quote service; native coins use the shared sentinel.
    pub fn quote_address(&self) -> &str {
        if self.is_native {
            NATIVE_ASSET_ADDRESS
        } else {
            &self.address
        }
    }

    /// Listed price when positive.
    pub fn listed_price(&self) -> Option<&str> {
        self.price.as_deref().filter(|p| math::is_positive(*p))
    }
}

/// Which amount field holds the user's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AmountSide {
    #[default]
    Input,
    Output,
}

impl AmountSide {
    pub fn opposite(self) -> Self {
        match self {
            AmountSide::Input => AmountSide::Output,
            AmountSide::Output => AmountSide::Input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_asset_uses_sentinel_address() {
        let eth = Asset::new(ChainId::Mainnet, NATIVE_ASSET_ADDRESS, "ETH", 18);
        assert!(eth.is_native);
        assert_eq!(eth.quote_address(), NATIVE_ASSET_ADDRESS);
        assert_eq!(eth.unique_id, format!("{}_1", NATIVE_ASSET_ADDRESS.to_lowercase()));
    }

    #[test]
    fn test_balance_from_raw() {
        let usdc = Asset::new(ChainId::Base, "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", "USDC", 6)
            .with_raw_balance("2500000");
        assert_eq!(usdc.balance.amount, "2.5");
        assert!(!usdc.balance.is_empty());
        assert!(AssetBalance::default().is_empty());
    }

    #[test]
    fn test_listed_price_ignores_zero() {
        let asset = Asset::new(ChainId::Mainnet, NATIVE_ASSET_ADDRESS, "ETH", 18).with_price("0");
        assert_eq!(asset.listed_price(), None);
        assert_eq!(asset.with_price("2000").listed_price(), Some("2000"));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let json = r#"{
            "uniqueId": "0xabc_10",
            "chainId": 10,
            "address": "0xabc",
            "decimals": 18,
            "symbol": "OP",
            "price": "1.75",
            "balance": { "raw": "1000000000000000000", "amount": "1" }
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.chain_id, ChainId::Optimism);
        assert!(!asset.is_native);
        assert!(!asset.is_stablecoin);
        assert_eq!(asset.balance.amount, "1");
    }
}
