//! # Swap Library
//!
//! Decimal math, amount formatting, slider math and the quote/price clients
//! behind the swap input controller.
//!
//! All amounts cross module boundaries as decimal strings. Arithmetic happens on
//! [`bigdecimal::BigDecimal`] so 18-decimal token amounts never lose precision.

pub mod chains;
pub mod currency;
pub mod format;
pub mod math;
pub mod price;
pub mod quote;
pub mod slider;
pub mod types;

// Re-export commonly used types
pub use chains::{ChainId, NATIVE_ASSET_ADDRESS};
pub use currency::NativeCurrency;
pub use price::PriceClient;
pub use quote::{QuoteClient, QuoteSource};
pub use types::{AmountSide, Asset, AssetBalance};
