//! # Swap Controller
//!
//! The [`SwapController`] owns the swap form state and reconciles it with the quote and price
//! services.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Caller (CLI driver, tests)                                 │
//! │  - user actions: type_input(), slide(), select_*_asset()    │
//! │  - process_events() / handle_event()                        │
//! └───────────────┬─────────────────────────────────────────────┘
//!                 │
//! ┌───────────────▼─────────────────────────────────────────────┐
//! │  SwapController                                             │
//! │  - handlers: pure transitions on SwapState -> Effects       │
//! │  - state: Arc<RwLock<SwapState>>                            │
//! └───────────────┬─────────────────────────────────────────────┘
//!                 │ tokio::spawn           ▲ async_channel
//!                 ▼                        │ (unbounded)
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Tasks                                                      │
//! │  - debounce timers     -> AppEvent::DebounceElapsed         │
//! │  - quote requests      -> AppEvent::QuoteResolved           │
//! │  - price polling       -> AppEvent::PriceUpdated            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reconciliation Rules
//!
//! - The field the user edited last is authoritative; a quote only fills its counterpart.
//! - Any edit marks the quote stale. Only the response to the newest request is applied,
//!   so a slow response can never overwrite a newer edit.
//! - Zero amounts reset the form without contacting the quote service.
//! - Price refreshes update native values and never invalidate the quote.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut controller = SwapController::from_config(config, store)?;
//! controller.select_buy_asset(usdc);
//! controller.type_input("1.5");
//!
//! // Later, on the caller's loop:
//! controller.process_events();
//! println!("{}", serde_json::to_string(&controller.snapshot())?);
//! ```

mod display;
mod event_handler;
mod events;
mod handlers;
mod state;
mod tasks;

pub use display::SwapDisplay;
pub use events::AppEvent;
pub use state::*;

use crate::core::error::Result;
use crate::core::service::{PriceService, QuoteService, UserAssetStore};
use async_channel::{unbounded, Receiver, Sender};
use handlers::{swap, DebounceKind, Effects, QuoteTrigger};
use lib_core::Config;
use lib_swap::chains::{default_slippage, ChainId};
use lib_swap::currency::NativeCurrency;
use lib_swap::price::PriceClient;
use lib_swap::quote::{QuoteClient, QuoteSource};
use lib_swap::types::Asset;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Runtime settings for the controller, resolved once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub currency: NativeCurrency,
    /// Wallet address quotes are requested for.
    pub from_address: String,
    /// Per-chain slippage overrides keyed by chain name.
    pub remote_slippage_bips: HashMap<String, u32>,
    pub slider_debounce: Duration,
    pub typed_debounce: Duration,
    pub price_refresh: Duration,
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            currency: config.native_currency.parse()?,
            from_address: config.from_address.clone(),
            remote_slippage_bips: config.default_slippage_bips.clone(),
            slider_debounce: config.slider_debounce(),
            typed_debounce: config.typed_debounce(),
            price_refresh: config.price_refresh_interval(),
        })
    }
}

/// External collaborators of the controller.
#[derive(Clone)]
pub struct Services {
    pub quotes: Arc<dyn QuoteService>,
    pub prices: Arc<dyn PriceService>,
    pub assets: Arc<dyn UserAssetStore>,
}

/// Swap form controller.
///
/// Must be created and driven inside a Tokio runtime: user actions spawn debounce timers,
/// quote requests and the price poller.
pub struct SwapController {
    /// Shared form state. Hold locks briefly; handlers never await while holding one.
    pub state: Arc<RwLock<SwapState>>,

    /// Results from background tasks, drained by [`SwapController::process_events`].
    pub event_rx: Receiver<AppEvent>,

    event_tx: Sender<AppEvent>,
    services: Services,
    settings: ControllerSettings,
    price_task: Option<JoinHandle<()>>,
}

impl SwapController {
    /// Create a controller and select the user's largest holding as the sell asset.
    pub fn new(services: Services, settings: ControllerSettings) -> Self {
        let (event_tx, event_rx) = unbounded();

        let state = SwapState {
            slippage: default_slippage(ChainId::Mainnet, &settings.remote_slippage_bips),
            ..SwapState::default()
        };

        let mut controller = Self {
            state: Arc::new(RwLock::new(state)),
            event_rx,
            event_tx,
            services,
            settings,
            price_task: None,
        };

        if let Some(default_asset) = controller.services.assets.user_assets().into_iter().next() {
            info!(symbol = %default_asset.symbol, chain = %default_asset.chain_id.name(), "Default sell asset selected");
            controller.select_sell_asset(default_asset);
        }

        controller
    }

    /// Controller backed by the HTTP quote and price clients.
    pub fn from_config(config: &Config, assets: Arc<dyn UserAssetStore>) -> Result<Self> {
        let settings = ControllerSettings::from_config(config)?;
        let services = Services {
            quotes: Arc::new(QuoteClient::from_config(config)?),
            prices: Arc::new(PriceClient::from_config(config)?),
            assets,
        };
        Ok(Self::new(services, settings))
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    // region: --- User actions

    pub fn focus(&mut self, key: Option<InputKey>) {
        let effects = swap::set_focus(&mut self.state.write(), key);
        self.apply_effects(effects);
    }

    /// Move the slider; `position` is clamped to `0.0..=1.0`.
    pub fn slide(&mut self, position: f64) {
        let effects = swap::on_slider_change(&mut self.state.write(), position);
        self.apply_effects(effects);
    }

    pub fn type_input(&mut self, text: &str) {
        let effects = swap::on_input_amount_change(&mut self.state.write(), text);
        self.apply_effects(effects);
    }

    pub fn type_output(&mut self, text: &str) {
        let effects = swap::on_output_amount_change(&mut self.state.write(), text);
        self.apply_effects(effects);
    }

    pub fn select_sell_asset(&mut self, asset: Asset) {
        let asset = self.with_held_balance(asset);
        let effects = swap::select_sell_asset(&mut self.state.write(), asset, &self.settings.remote_slippage_bips);
        self.apply_effects(effects);
    }

    pub fn select_buy_asset(&mut self, asset: Asset) {
        let asset = self.with_held_balance(asset);
        let effects = swap::select_buy_asset(&mut self.state.write(), asset);
        self.apply_effects(effects);
    }

    pub fn flip_assets(&mut self) {
        let effects = swap::flip_assets(&mut self.state.write(), &self.settings.remote_slippage_bips);
        self.apply_effects(effects);
    }

    pub fn set_source(&mut self, source: QuoteSource) {
        let effects = swap::set_source(&mut self.state.write(), source);
        self.apply_effects(effects);
    }

    /// `slippage` is a percent string such as `"0.5"`.
    pub fn set_slippage(&mut self, slippage: &str) {
        let effects = swap::set_slippage(&mut self.state.write(), slippage.trim().to_string());
        self.apply_effects(effects);
    }

    pub fn set_flashbots(&mut self, enabled: bool) {
        let effects = swap::set_flashbots(&mut self.state.write(), enabled);
        self.apply_effects(effects);
    }

    // endregion: --- User actions

    // region: --- Events

    /// Apply one background task result.
    pub fn handle_event(&mut self, event: AppEvent) {
        use event_handler::SwapEventHandler;
        self.handle_event_impl(event);
    }

    /// Drain and apply every pending event without blocking. Returns how many were applied.
    pub fn process_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        if processed > 0 {
            debug!(processed, "Processed controller events");
        }
        processed
    }

    // endregion: --- Events

    /// Formatted view of the current state.
    pub fn snapshot(&self) -> SwapDisplay {
        SwapDisplay::from_state(&self.state.read(), self.settings.currency)
    }

    /// The store's copy carries the user's live balance; anything else is taken as given.
    fn with_held_balance(&self, asset: Asset) -> Asset {
        match self.services.assets.get_user_asset(&asset.unique_id) {
            Some(held) => Asset {
                balance: held.balance,
                ..asset
            },
            None => asset,
        }
    }

    fn apply_effects(&mut self, effects: Effects) {
        if effects.restart_price_polling {
            self.restart_price_polling();
        }

        match effects.quote {
            QuoteTrigger::None => {}
            QuoteTrigger::Debounce(kind) => {
                let delay = match kind {
                    DebounceKind::Slider => self.settings.slider_debounce,
                    DebounceKind::Typed => self.settings.typed_debounce,
                };
                tasks::swap::schedule_debounce(&self.state, self.event_tx.clone(), delay);
            }
            QuoteTrigger::Immediate => {
                tasks::swap::trigger_quote_fetch(
                    &self.state,
                    self.event_tx.clone(),
                    Arc::clone(&self.services.quotes),
                    &self.settings.from_address,
                );
            }
        }
    }

    fn restart_price_polling(&mut self) {
        if let Some(task) = self.price_task.take() {
            task.abort();
        }

        let has_selection = {
            let state = self.state.read();
            state.sell_asset.is_some() || state.buy_asset.is_some()
        };
        if !has_selection {
            return;
        }

        self.price_task = Some(tasks::market::spawn_price_polling(
            Arc::clone(&self.state),
            self.event_tx.clone(),
            Arc::clone(&self.services.prices),
            self.settings.currency,
            self.settings.price_refresh,
        ));
    }
}

impl Drop for SwapController {
    fn drop(&mut self) {
        if let Some(task) = self.price_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::core::service::InMemoryAssetStore;
    use async_trait::async_trait;
    use lib_swap::chains::NATIVE_ASSET_ADDRESS;
    use lib_swap::math;
    use parking_lot::Mutex;
    use shared::dto::quote::{Quote, QuoteParams, QuoteResponse, SwapType};
    use shared::dto::token::{ExternalToken, TokenPrice};

    const USDC_ADDRESS: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    /// Prices ETH at 2000 USDC; records every request.
    #[derive(Default)]
    struct MockQuoteService {
        calls: Mutex<Vec<QuoteParams>>,
        delay: Duration,
        fail: bool,
    }

    impl MockQuoteService {
        fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<QuoteParams> {
            self.calls.lock().clone()
        }

        async fn respond(&self, params: &QuoteParams) -> std::result::Result<QuoteResponse, AppError> {
            self.calls.lock().push(params.clone());
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(AppError::Api("connection refused".to_string()));
            }

            let sell_amount = match &params.sell_amount {
                Some(raw) => raw.clone(),
                None => {
                    let usdc = math::convert_raw_amount_to_decimal_format(params.buy_amount.as_deref().unwrap_or("0"), 6);
                    math::convert_amount_to_raw_amount(math::divide(usdc, 2000), 18)
                }
            };
            let eth = math::convert_raw_amount_to_decimal_format(&sell_amount, 18);
            let buy_amount = math::convert_amount_to_raw_amount(math::multiply(eth, 2000), 6);

            Ok(QuoteResponse::Quote(Quote {
                source: Some("mock".to_string()),
                sell_token_address: params.sell_token_address.clone(),
                buy_token_address: params.buy_token_address.clone(),
                sell_amount,
                buy_amount: buy_amount.clone(),
                buy_amount_minus_fees: buy_amount,
                fee: None,
                fee_in_eth: Some("0.001".to_string()),
                routes: vec![],
            }))
        }
    }

    #[async_trait]
    impl QuoteService for MockQuoteService {
        async fn get_quote(&self, params: &QuoteParams) -> std::result::Result<QuoteResponse, AppError> {
            self.respond(params).await
        }

        async fn get_crosschain_quote(&self, params: &QuoteParams) -> std::result::Result<QuoteResponse, AppError> {
            self.respond(params).await
        }
    }

    /// Prices keyed by lowercased address; anything else is unlisted.
    #[derive(Default)]
    struct MockPriceService {
        prices: HashMap<String, f64>,
    }

    #[async_trait]
    impl PriceService for MockPriceService {
        async fn fetch_external_token(
            &self,
            address: &str,
            _chain: ChainId,
            _currency: NativeCurrency,
        ) -> std::result::Result<Option<ExternalToken>, AppError> {
            Ok(self.prices.get(&address.to_lowercase()).map(|value| ExternalToken {
                price: Some(TokenPrice { value: Some(*value) }),
                native: None,
            }))
        }
    }

    fn eth() -> Asset {
        Asset::new(ChainId::Mainnet, NATIVE_ASSET_ADDRESS, "ETH", 18)
            .with_price("2000")
            .with_raw_balance("2000000000000000000")
    }

    fn usdc() -> Asset {
        Asset::new(ChainId::Mainnet, USDC_ADDRESS, "USDC", 6).with_price("1").stablecoin()
    }

    fn settings() -> ControllerSettings {
        ControllerSettings {
            currency: NativeCurrency::Usd,
            from_address: "0x1111111111111111111111111111111111111111".to_string(),
            remote_slippage_bips: HashMap::new(),
            slider_debounce: Duration::from_millis(200),
            typed_debounce: Duration::from_millis(300),
            price_refresh: Duration::from_secs(60),
        }
    }

    fn controller_with(quotes: Arc<MockQuoteService>, prices: MockPriceService) -> SwapController {
        let services = Services {
            quotes,
            prices: Arc::new(prices),
            assets: Arc::new(InMemoryAssetStore::new(vec![eth()])),
        };
        SwapController::new(services, settings())
    }

    /// Let timers fire and tasks finish, applying events as they arrive.
    async fn settle(controller: &mut SwapController) {
        for _ in 0..6 {
            tokio::time::sleep(Duration::from_millis(500)).await;
            controller.process_events();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_defaults_to_largest_holding() {
        let quotes = Arc::new(MockQuoteService::default());
        let controller = controller_with(quotes.clone(), MockPriceService::default());

        let state = controller.state.read();
        assert_eq!(state.sell_asset.as_ref().map(|a| a.symbol.as_str()), Some("ETH"));
        assert_eq!(state.inputs.input_amount, FieldValue::Amount("1".into()));
        assert_eq!(state.slider_position, INITIAL_SLIDER_POSITION);
        drop(state);

        // Nothing to quote without a buy asset
        assert!(quotes.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_lifecycle_preserves_authoritative_input() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());

        controller.select_buy_asset(usdc());
        assert!(controller.state.read().is_quote_stale);
        settle(&mut controller).await;

        {
            let state = controller.state.read();
            assert!(!state.is_quote_stale);
            assert_eq!(state.inputs.input_amount, FieldValue::Amount("1".into()));
            assert_eq!(state.inputs.output_amount, FieldValue::Amount("2000".into()));
            assert_eq!(state.fee.as_deref(), Some("0.001"));
        }

        controller.type_input("1.5");
        assert!(controller.state.read().is_quote_stale);
        assert_eq!(quotes.calls().len(), 1);
        settle(&mut controller).await;

        let calls = quotes.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].sell_amount.as_deref(), Some("1500000000000000000"));
        assert_eq!(calls[1].buy_amount, None);

        let state = controller.state.read();
        assert_eq!(state.inputs.input_amount, FieldValue::Typed("1.5".into()));
        assert_eq!(state.inputs.output_amount, FieldValue::Amount("3000".into()));
        assert!(!state.is_quote_stale);
        assert!(!state.is_fetching);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_edit_quotes_by_buy_amount() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;

        controller.type_output("1000");
        settle(&mut controller).await;

        let calls = quotes.calls();
        let last = calls.last().expect("quote request");
        assert_eq!(last.buy_amount.as_deref(), Some("1000000000"));
        assert_eq!(last.sell_amount, None);

        let state = controller.state.read();
        assert_eq!(state.inputs.output_amount, FieldValue::Typed("1000".into()));
        assert_eq!(state.inputs.input_amount, FieldValue::Amount("0.5".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_amount_never_requests() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;
        let before = quotes.calls().len();

        controller.type_input("0.0");
        settle(&mut controller).await;
        controller.slide(0.0);
        settle(&mut controller).await;

        assert_eq!(quotes.calls().len(), before);
        let state = controller.state.read();
        assert!(!state.is_quote_stale);
        assert!(state.quote.is_none());
        assert_eq!(state.inputs.output_amount, FieldValue::zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_coalesce_into_one_request() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;
        let before = quotes.calls().len();

        for text in ["1", "1.", "1.2", "1.25"] {
            controller.type_input(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
            controller.process_events();
        }
        settle(&mut controller).await;

        let calls = quotes.calls();
        assert_eq!(calls.len(), before + 1);
        assert_eq!(calls[before].sell_amount.as_deref(), Some("1250000000000000000"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_never_overwrites_newer_edit() {
        let quotes = Arc::new(MockQuoteService::with_delay(Duration::from_secs(1)));
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;

        controller.type_input("1");
        // Debounce fires and the request goes out, but the response is still pending
        tokio::time::sleep(Duration::from_millis(400)).await;
        controller.process_events();
        assert!(controller.state.read().is_fetching);

        controller.type_input("2");
        settle(&mut controller).await;

        let state = controller.state.read();
        assert_eq!(state.inputs.input_amount, FieldValue::Typed("2".into()));
        assert_eq!(state.inputs.output_amount, FieldValue::Amount("4000".into()));
        assert!(!state.is_quote_stale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_becomes_quote_error() {
        let quotes = Arc::new(MockQuoteService {
            fail: true,
            ..MockQuoteService::default()
        });
        let mut controller = controller_with(quotes, MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;

        let state = controller.state.read();
        assert!(state.is_quote_stale);
        assert!(!state.is_fetching);
        match &state.quote {
            Some(QuoteResponse::Error(error)) => assert!(error.message.contains("connection refused")),
            other => panic!("expected quote error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cross_chain_pair_uses_bridge_params() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        let op_usdc = Asset::new(ChainId::Optimism, "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85", "USDC", 6)
            .with_price("1")
            .stablecoin();

        controller.select_buy_asset(op_usdc);
        settle(&mut controller).await;

        let calls = quotes.calls();
        let params = calls.last().expect("quote request");
        assert_eq!(params.swap_type, SwapType::CrossChain);
        assert_eq!(params.chain_id, 1);
        assert_eq!(params.to_chain_id, 10);
        assert!(controller.snapshot().time_estimate.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_price_refresh_keeps_quote_fresh() {
        let prices = MockPriceService {
            prices: HashMap::from([(NATIVE_ASSET_ADDRESS.to_lowercase(), 2100.0)]),
        };
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), prices);
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;

        let state = controller.state.read();
        assert_eq!(state.sell_asset.as_ref().and_then(|a| a.price.as_deref()), Some("2100"));
        assert_eq!(state.inputs.input_native_value, "2100");
        assert!(!state.is_quote_stale);
        assert_eq!(quotes.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flip_requotes_with_previous_output() {
        let quotes = Arc::new(MockQuoteService::default());
        let mut controller = controller_with(quotes.clone(), MockPriceService::default());
        controller.select_buy_asset(usdc());
        settle(&mut controller).await;

        controller.flip_assets();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let calls = quotes.calls();
        assert_eq!(calls.len(), 2);
        let params = calls.last().expect("immediate quote after flip");
        assert_eq!(params.sell_token_address, USDC_ADDRESS);
        assert_eq!(params.sell_amount.as_deref(), Some("2000000000"));
    }
}
