//! # Event Handler
//!
//! Applies results from background tasks to the controller state.
//!
//! Each event takes the write lock for a single handler call. Follow-up work (a quote fetch
//! after a debounce) is started only after the lock is released.

use crate::app::handlers::swap;
use crate::app::{AppEvent, SwapController};

/// Trait for event handling implementation
pub(crate) trait SwapEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl SwapEventHandler for SwapController {
    fn handle_event_impl(&mut self, event: AppEvent) {
        match event {
            AppEvent::QuoteResolved { request_id, response } => {
                swap::apply_quote(&mut self.state.write(), request_id, response);
            }
            AppEvent::PriceUpdated { side, unique_id, price } => {
                swap::apply_price(&mut self.state.write(), side, &unique_id, &price);
            }
            AppEvent::DebounceElapsed { generation } => {
                let effects = swap::on_debounce_elapsed(&self.state.read(), generation);
                self.apply_effects(effects);
            }
        }
    }
}
