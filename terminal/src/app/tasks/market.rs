//! # Market Data Tasks
//!
//! Periodic price refresh for the selected assets.

use crate::app::events::AppEvent;
use crate::app::state::SwapState;
use crate::core::service::PriceService;
use async_channel::Sender;
use lib_swap::currency::NativeCurrency;
use lib_swap::types::{AmountSide, Asset};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

fn selected_assets(state: &SwapState) -> Vec<(AmountSide, Asset)> {
    [AmountSide::Input, AmountSide::Output]
        .into_iter()
        .filter_map(|side| state.asset(side).cloned().map(|asset| (side, asset)))
        .collect()
}

/// Poll prices for the selected assets every `interval`, starting immediately.
///
/// Internal task function - the controller aborts and respawns it whenever the selection changes.
pub(crate) fn spawn_price_polling(
    state: Arc<RwLock<SwapState>>,
    event_tx: Sender<AppEvent>,
    price_service: Arc<dyn PriceService>,
    currency: NativeCurrency,
    interval: Duration,
) -> JoinHandle<()> {
    spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            // Copy the selection out; the lock is never held across an await
            let targets = selected_assets(&state.read());

            for (side, asset) in targets {
                let result = price_service
                    .fetch_external_token(asset.quote_address(), asset.chain_id, currency)
                    .await;

                let price = match result {
                    Ok(Some(token)) => token.best_price(),
                    Ok(None) => {
                        debug!(symbol = %asset.symbol, "Token not listed by price service");
                        None
                    }
                    Err(e) => {
                        warn!(symbol = %asset.symbol, error = %e, "Price refresh failed");
                        None
                    }
                };

                if let Some(price) = price {
                    let event = AppEvent::PriceUpdated {
                        side,
                        unique_id: asset.unique_id.clone(),
                        price: price.to_string(),
                    };
                    if event_tx.send(event).await.is_err() {
                        return;
                    }
                }
            }
        }
    })
}
