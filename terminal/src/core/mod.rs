//! # Core Abstractions
//!
//! Error type and service traits shared by the controller, its tasks and tests.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`QuoteService`, `PriceService`, `UserAssetStore`)
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use swap_terminal::core::service::{PriceService, QuoteService};
//!
//! // In production: HTTP clients built from config
//! let quotes: Arc<dyn QuoteService> = Arc::new(QuoteClient::from_config(&config)?);
//!
//! // In tests: mock implementations recording calls
//! let quotes: Arc<dyn QuoteService> = Arc::new(MockQuoteService::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{InMemoryAssetStore, PriceService, QuoteService, UserAssetStore};
