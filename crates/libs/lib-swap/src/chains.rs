//! # Chains
//!
//! Supported EVM chains, their wrapped-native token addresses and default slippage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Address the quote service uses for a chain's native coin.
pub const NATIVE_ASSET_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Slippage used when a chain is missing from both the remote config and the table.
const FALLBACK_SLIPPAGE_BIPS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum ChainId {
    Mainnet,
    Optimism,
    Bsc,
    Polygon,
    Base,
    Zora,
    Arbitrum,
    Avalanche,
    Blast,
}

impl ChainId {
    pub const ALL: [ChainId; 9] = [
        ChainId::Mainnet,
        ChainId::Optimism,
        ChainId::Bsc,
        ChainId::Polygon,
        ChainId::Base,
        ChainId::Zora,
        ChainId::Arbitrum,
        ChainId::Avalanche,
        ChainId::Blast,
    ];

    pub fn id(&self) -> u64 {
        match self {
            ChainId::Mainnet => 1,
            ChainId::Optimism => 10,
            ChainId::Bsc => 56,
            ChainId::Polygon => 137,
            ChainId::Base => 8453,
            ChainId::Zora => 7777777,
            ChainId::Arbitrum => 42161,
            ChainId::Avalanche => 43114,
            ChainId::Blast => 81457,
        }
    }

    /// Canonical name, as used for keys in the remote slippage config.
    pub fn name(&self) -> &'static str {
        match self {
            ChainId::Mainnet => "mainnet",
            ChainId::Optimism => "optimism",
            ChainId::Bsc => "bsc",
            ChainId::Polygon => "polygon",
            ChainId::Base => "base",
            ChainId::Zora => "zora",
            ChainId::Arbitrum => "arbitrum",
            ChainId::Avalanche => "avalanche",
            ChainId::Blast => "blast",
        }
    }

    /// Wrapped representation of the chain's native coin.
    pub fn wrapped_native_address(&self) -> &'static str {
        match self {
            ChainId::Mainnet => "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            ChainId::Optimism | ChainId::Base | ChainId::Zora => {
                "0x4200000000000000000000000000000000000006"
            }
            ChainId::Bsc => "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c",
            ChainId::Polygon => "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270",
            ChainId::Arbitrum => "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1",
            ChainId::Avalanche => "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7",
            ChainId::Blast => "0x4300000000000000000000000000000000000004",
        }
    }

    /// Built-in default slippage in basis points.
    pub fn default_slippage_bips(&self) -> u32 {
        match self {
            ChainId::Mainnet => 100,
            _ => FALLBACK_SLIPPAGE_BIPS,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported chain id: {0}")]
pub struct UnsupportedChain(pub u64);

impl TryFrom<u64> for ChainId {
    type Error = UnsupportedChain;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        ChainId::ALL
            .into_iter()
            .find(|chain| chain.id() == id)
            .ok_or(UnsupportedChain(id))
    }
}

impl From<ChainId> for u64 {
    fn from(chain: ChainId) -> Self {
        chain.id()
    }
}

/// Render basis points as a percent string (`100` -> `"1"`, `150` -> `"1.5"`).
pub fn slippage_bips_to_string(bips: u32) -> String {
    crate::math::divide(bips, 100)
}

/// Default slippage for `chain` as a percent string.
///
/// A non-zero entry in `remote_bips` (keyed by chain name) wins over the built-in table.
pub fn default_slippage(chain: ChainId, remote_bips: &HashMap<String, u32>) -> String {
    let bips = remote_bips
        .get(chain.name())
        .copied()
        .filter(|bips| *bips > 0)
        .unwrap_or_else(|| chain.default_slippage_bips());
    slippage_bips_to_string(bips)
}

/// Case-insensitive address equality.
pub fn is_lower_case_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Selling the native coin for its wrapped token on the same chain.
pub fn is_wrap_native(chain: ChainId, sell_token_address: &str, buy_token_address: &str) -> bool {
    is_lower_case_match(sell_token_address, NATIVE_ASSET_ADDRESS)
        && is_lower_case_match(buy_token_address, chain.wrapped_native_address())
}

/// Selling the wrapped token for the native coin on the same chain.
pub fn is_unwrap_native(chain: ChainId, sell_token_address: &str, buy_token_address: &str) -> bool {
    is_lower_case_match(sell_token_address, chain.wrapped_native_address())
        && is_lower_case_match(buy_token_address, NATIVE_ASSET_ADDRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_round_trip_through_u64() {
        for chain in ChainId::ALL {
            assert_eq!(ChainId::try_from(chain.id()), Ok(chain));
        }
        assert_eq!(ChainId::try_from(5), Err(UnsupportedChain(5)));
    }

    #[test]
    fn test_default_slippage_prefers_remote_config() {
        let mut remote = HashMap::new();
        assert_eq!(default_slippage(ChainId::Mainnet, &remote), "1");
        assert_eq!(default_slippage(ChainId::Arbitrum, &remote), "2");

        remote.insert("arbitrum".to_string(), 150);
        remote.insert("mainnet".to_string(), 0);
        assert_eq!(default_slippage(ChainId::Arbitrum, &remote), "1.5");
        assert_eq!(default_slippage(ChainId::Mainnet, &remote), "1");
    }

    #[test]
    fn test_wrap_detection_is_case_insensitive() {
        let weth = ChainId::Mainnet.wrapped_native_address().to_lowercase();
        assert!(is_wrap_native(ChainId::Mainnet, &NATIVE_ASSET_ADDRESS.to_lowercase(), &weth));
        assert!(is_unwrap_native(ChainId::Mainnet, &weth, NATIVE_ASSET_ADDRESS));
        assert!(!is_wrap_native(ChainId::Optimism, NATIVE_ASSET_ADDRESS, &weth));
    }

    #[test]
    fn test_chain_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ChainId::Base).unwrap(), "8453");
        assert_eq!(serde_json::from_str::<ChainId>("10").unwrap(), ChainId::Optimism);
        assert!(serde_json::from_str::<ChainId>("3").is_err());
    }
}
