//! # Swap Tasks
//!
//! Debounce timers and quote requests. Results come back as [`AppEvent`]s; tasks never
//! write controller state after spawning.

use crate::app::events::AppEvent;
use crate::app::state::SwapState;
use crate::core::service::QuoteService;
use async_channel::Sender;
use lib_swap::math;
use lib_swap::quote::{build_quote_params, QuoteRequest};
use parking_lot::RwLock;
use shared::dto::quote::{QuoteError, QuoteResponse, SwapType};
use shared::utils::truncate_address;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;
use tracing::{debug, info, warn};

/// Start a debounce window. Any later schedule or immediate fetch supersedes it.
///
/// Internal task function - the controller calls this for slider and typed edits.
pub(crate) fn schedule_debounce(state: &Arc<RwLock<SwapState>>, event_tx: Sender<AppEvent>, delay: Duration) {
    let generation = {
        let mut state = state.write();
        state.debounce_generation += 1;
        state.debounce_generation
    };

    spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = event_tx.send(AppEvent::DebounceElapsed { generation }).await;
    });
}

/// Fetch a quote for the current form, if there is anything to quote.
///
/// Internal task function - spawns async task to fetch the quote and send the result via event channel.
pub(crate) fn trigger_quote_fetch(
    state: &Arc<RwLock<SwapState>>,
    event_tx: Sender<AppEvent>,
    quote_service: Arc<dyn QuoteService>,
    from_address: &str,
) {
    let (request_id, params) = {
        let mut state = state.write();
        // Pending debounce timers are now redundant
        state.debounce_generation += 1;

        if !state.is_quote_stale || !math::is_positive(state.effective_amount()) {
            return;
        }

        let input_amount = state.inputs.input_amount.numeric();
        let output_amount = state.inputs.output_amount.numeric();
        let params = build_quote_params(&QuoteRequest {
            from_address,
            sell_asset: state.sell_asset.as_ref(),
            buy_asset: state.buy_asset.as_ref(),
            input_amount: &input_amount,
            output_amount: &output_amount,
            authoritative: state.authoritative_side(),
            source: &state.source,
            slippage: &state.slippage,
        });
        let Some(params) = params else {
            debug!("Quote skipped: both assets must be selected");
            return;
        };

        let request_id = state.next_request_id;
        state.next_request_id += 1;
        state.in_flight = Some(request_id);
        state.is_fetching = true;
        (request_id, params)
    }; // Lock released here

    info!(
        request_id,
        chain_id = params.chain_id,
        to_chain_id = params.to_chain_id,
        from = %truncate_address(&params.from_address),
        sell_amount = ?params.sell_amount,
        buy_amount = ?params.buy_amount,
        "Requesting quote"
    );

    spawn(async move {
        let result = match params.swap_type {
            SwapType::CrossChain => quote_service.get_crosschain_quote(&params).await,
            SwapType::Normal => quote_service.get_quote(&params).await,
        };
        let response = result.unwrap_or_else(|e| {
            warn!(request_id, error = %e, "Quote request failed");
            QuoteResponse::Error(QuoteError::new(e.to_string()))
        });
        let _ = event_tx.send(AppEvent::QuoteResolved { request_id, response }).await;
    });
}
