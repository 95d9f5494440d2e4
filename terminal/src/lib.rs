//! # Swap Terminal - Library Root
//!
//! Quote reconciliation for a token swap form: the user edits either amount (or drags a
//! percentage-of-balance slider), and the controller keeps both amounts, their native
//! currency values and a fresh quote consistent.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              swap-terminal (this crate)                │
//! ├────────────────────────────────────────────────────────┤
//! │  app      - SwapController, state, handlers, tasks     │
//! │  core     - AppError, service traits                   │
//! │  driver   - stdin line commands                        │
//! │  debug    - tracing setup                              │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ lib-swap                     │ lib-core
//!          ▼                              ▼
//! ┌─────────────────────────┐   ┌─────────────────────────┐
//! │  decimal math, display  │   │  Config (SWAP_* env),   │
//! │  formatting, slider,    │   │  config errors          │
//! │  quote + price clients  │   │                         │
//! └─────────────────────────┘   └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: The controller and everything it owns
//!   - Event-driven: background tasks report back over an `async_channel`
//!   - State in `Arc<RwLock<SwapState>>`, locked briefly and never across an await
//! - **core**: Error type and the `QuoteService` / `PriceService` / `UserAssetStore` seams
//! - **driver**: Line commands for the binary (`type-in 1.5`, `slide 50%`, `flip`, ...)
//! - **debug**: Daily-rotated file logging with optional stderr and JSON output
//! - **utils**: Input validation
//!
//! ## Usage
//!
//! ### As a Binary
//!
//! ```bash
//! SWAP_QUOTE_API_URL=https://quotes.example.com cargo run --bin swap-terminal
//! ```
//!
//! ### As a Library
//!
//! ```rust,ignore
//! use swap_terminal::app::{Services, SwapController};
//!
//! let mut controller = SwapController::new(services, settings);
//! controller.type_input("1.5");
//! controller.process_events();
//! let display = controller.snapshot();
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod driver;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{AppEvent, ControllerSettings, Services, SwapController, SwapDisplay, SwapState};
pub use core::{AppError, Result};
