//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the swap engine and the external services it
//! talks to. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::quote`]**: Quote requests and responses
//!   - **[`dto::token`]**: External token price lookups
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Shorten addresses for logs and display
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::dto::quote::{QuoteParams, QuoteResponse};
//!
//! async fn fetch(client: &reqwest::Client, params: &QuoteParams) -> anyhow::Result<QuoteResponse> {
//!     Ok(client
//!         .get("http://127.0.0.1:3001/v1/quote")
//!         .query(params)
//!         .send()
//!         .await?
//!         .json()
//!         .await?)
//! }
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: every DTO is public API
pub use dto::*;
pub use utils::*;
