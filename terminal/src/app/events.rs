//! # Application Events
//!
//! Results sent from background tasks back to the controller.

use lib_swap::types::AmountSide;
use shared::dto::quote::QuoteResponse;

/// Async task results sent to the controller
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A quote request finished. Transport failures arrive as a `QuoteResponse::Error`.
    QuoteResolved {
        request_id: u64,
        response: QuoteResponse,
    },
    /// Fresh external price for the asset on `side`.
    PriceUpdated {
        side: AmountSide,
        unique_id: String,
        price: String,
    },
    /// A debounce window closed.
    DebounceElapsed { generation: u64 },
}
