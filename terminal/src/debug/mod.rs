//! # Logging Infrastructure
//!
//! File-based structured logging for the swap terminal.
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Initialize at startup, before the controller is created
//! let session_id = debug::init();
//!
//! // Log with structured fields
//! info!(request_id, chain_id = 1, "Requesting quote");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `swap_terminal=debug,info`)
//! - `SWAP_LOG_DIR`: Log directory (default: `logs`)
//! - `SWAP_LOG_STDERR`: Mirror logs to stderr (1=on)
//! - `SWAP_LOG_JSON`: Write JSON lines (1=on)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;

/// Initialize logging. Call once at startup; returns the session id.
pub fn init() -> uuid::Uuid {
    init_logger()
}
