//! # Utility Functions
//!
//! Shared utility functions used across the terminal application.
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation for amounts, slider positions and slippage
//!
//! ## Related Modules
//!
//! - [`lib_swap::format`]: Amount parsing and display helpers
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
