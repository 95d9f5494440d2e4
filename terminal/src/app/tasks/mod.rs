//! # Async Tasks
//!
//! Background work for the controller: quote requests, debounce timers and price polling.

pub mod market;
pub mod swap;
