//! # Line Driver
//!
//! Parses line commands from stdin into controller actions.
//!
//! ```text
//! sell {"chainId":1,"address":"0xEeee...","symbol":"ETH","decimals":18,"price":"2000","rawBalance":"1500000000000000000"}
//! buy  {...}
//! type-in 1.5          type-out 2500
//! slide 0.25           slide 75%
//! focus input|output|none
//! flip
//! source auto|<name>   slippage 0.5   flashbots on|off
//! show                 quit
//! ```

use crate::app::{InputKey, SwapController};
use crate::core::error::{AppError, Result};
use crate::core::service::InMemoryAssetStore;
use crate::utils::validation::{parse_slider_position, validate_amount_text, validate_slippage, ValidationResult};
use lib_swap::chains::ChainId;
use lib_swap::quote::QuoteSource;
use lib_swap::types::Asset;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Sell(Asset),
    Buy(Asset),
    TypeInput(String),
    TypeOutput(String),
    Slide(f64),
    Focus(Option<InputKey>),
    Flip,
    Source(QuoteSource),
    Slippage(String),
    Flashbots(bool),
    Show,
    Quit,
}

fn check(result: ValidationResult) -> Result<()> {
    match result.error {
        Some(message) if !result.is_valid => Err(AppError::Validation(message)),
        _ => Ok(()),
    }
}

/// Asset as typed on the command line; the unique id is derived.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetArg {
    chain_id: ChainId,
    address: String,
    symbol: String,
    decimals: u32,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    raw_balance: Option<String>,
    #[serde(default)]
    is_stablecoin: bool,
}

impl From<AssetArg> for Asset {
    fn from(arg: AssetArg) -> Self {
        let mut asset = Asset::new(arg.chain_id, &arg.address, &arg.symbol, arg.decimals);
        if let Some(price) = arg.price {
            asset = asset.with_price(&price);
        }
        if let Some(raw) = arg.raw_balance {
            asset = asset.with_raw_balance(&raw);
        }
        if arg.is_stablecoin {
            asset = asset.stablecoin();
        }
        asset
    }
}

fn parse_asset(json: &str) -> Result<Asset> {
    serde_json::from_str::<AssetArg>(json)
        .map(Asset::from)
        .map_err(|e| AppError::Validation(format!("Invalid asset JSON: {}", e)))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "sell" => parse_asset(arg).map(Command::Sell),
            "buy" => parse_asset(arg).map(Command::Buy),
            "type-in" => {
                check(validate_amount_text(arg))?;
                Ok(Command::TypeInput(arg.to_string()))
            }
            "type-out" => {
                check(validate_amount_text(arg))?;
                Ok(Command::TypeOutput(arg.to_string()))
            }
            "slide" => parse_slider_position(arg)
                .map(Command::Slide)
                .ok_or_else(|| AppError::Validation(format!("Invalid slider position: {}", arg))),
            "focus" => match arg {
                "" | "none" => Ok(Command::Focus(None)),
                key => key.parse().map(|key| Command::Focus(Some(key))).map_err(AppError::Validation),
            },
            "flip" => Ok(Command::Flip),
            "source" => Ok(Command::Source(QuoteSource::parse(arg))),
            "slippage" => {
                check(validate_slippage(arg))?;
                Ok(Command::Slippage(arg.to_string()))
            }
            "flashbots" => match arg {
                "on" | "true" | "1" => Ok(Command::Flashbots(true)),
                "off" | "false" | "0" => Ok(Command::Flashbots(false)),
                other => Err(AppError::Validation(format!("Expected on or off, got: {}", other))),
            },
            "show" | "" => Ok(Command::Show),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(AppError::Validation(format!("Unknown command: {}", other))),
        }
    }

    /// Apply the command. Selected assets are also recorded in the asset store so their
    /// balances follow them.
    pub fn execute(self, controller: &mut SwapController, store: &InMemoryAssetStore) {
        match self {
            Command::Sell(asset) => {
                if !asset.balance.is_empty() {
                    store.upsert(asset.clone());
                }
                controller.select_sell_asset(asset);
            }
            Command::Buy(asset) => controller.select_buy_asset(asset),
            Command::TypeInput(text) => controller.type_input(&text),
            Command::TypeOutput(text) => controller.type_output(&text),
            Command::Slide(position) => controller.slide(position),
            Command::Focus(key) => controller.focus(key),
            Command::Flip => controller.flip_assets(),
            Command::Source(source) => controller.set_source(source),
            Command::Slippage(slippage) => controller.set_slippage(&slippage),
            Command::Flashbots(enabled) => controller.set_flashbots(enabled),
            Command::Show | Command::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("type-in 1.5").unwrap(), Command::TypeInput("1.5".into()));
        assert_eq!(Command::parse("slide 75%").unwrap(), Command::Slide(0.75));
        assert_eq!(Command::parse("focus output").unwrap(), Command::Focus(Some(InputKey::OutputAmount)));
        assert_eq!(Command::parse("source auto").unwrap(), Command::Source(QuoteSource::Auto));
        assert_eq!(Command::parse("flashbots on").unwrap(), Command::Flashbots(true));
        assert_eq!(Command::parse("  ").unwrap(), Command::Show);
    }

    #[test]
    fn test_parse_asset_derives_unique_id() {
        let json = r#"sell {"chainId":10,"address":"0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE","symbol":"ETH","decimals":18,"rawBalance":"2500000000000000000"}"#;
        let Command::Sell(asset) = Command::parse(json).unwrap() else {
            panic!("expected sell command");
        };
        assert_eq!(asset.chain_id, ChainId::Optimism);
        assert_eq!(asset.unique_id, "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee_10");
        assert!(asset.is_native);
        assert_eq!(asset.balance.amount, "2.5");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(Command::parse("type-in 1.2.3"), Err(AppError::Validation(_))));
        assert!(matches!(Command::parse("slide 2"), Err(AppError::Validation(_))));
        assert!(matches!(Command::parse("sell {"), Err(AppError::Validation(_))));
        assert!(matches!(Command::parse("bridge"), Err(AppError::Validation(_))));
        assert!(matches!(
            Command::parse(r#"buy {"chainId":5,"address":"0x0","symbol":"X","decimals":18}"#),
            Err(AppError::Validation(_))
        ));
    }
}
