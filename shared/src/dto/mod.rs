//! # Data Transfer Objects (DTOs)
//!
//! Wire types exchanged with the quote service and the external price lookup.
//!
//! ## Module Organization
//!
//! - [`quote`] - Quote request parameters, quotes, structured quote errors
//! - [`token`] - External token price lookups
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase, matching the services' JSON
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: camelCase strings (`"normal"`, `"crossChain"`)
//! - **Responses**: [`quote::QuoteResponse`] is untagged; an object with `"error": true`
//!   decodes as a [`quote::QuoteError`]
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /v1/quote?chainId=1&toChainId=1&sellTokenAddress=0xEeee...&buyTokenAddress=0xC02a...
//!     &sellAmount=1000000000000000000&slippage=1&refuel=false&swapType=normal
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "source": "0x",
//!   "sellAmount": "1000000000000000000",
//!   "buyAmount": "1000000000000000000",
//!   "buyAmountMinusFees": "1000000000000000000",
//!   "feeInEth": "0"
//! }
//! ```

pub mod quote;
pub mod token;

pub use quote::*;
pub use token::*;
