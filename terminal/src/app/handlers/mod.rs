//! # Event Handlers
//!
//! State transitions for user actions and task results.
//!
//! Handlers run under the controller's write lock and never spawn work themselves: they
//! return [`Effects`] describing what the controller should start once the lock is released.

pub mod swap;

/// How a quote request should follow a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteTrigger {
    #[default]
    None,
    /// Wait out the debounce window for this kind of edit first.
    Debounce(DebounceKind),
    Immediate,
}

/// Edit kinds with their own debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceKind {
    Slider,
    Typed,
}

/// Follow-up work requested by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Effects {
    pub quote: QuoteTrigger,
    /// Selected assets changed; the price poller must follow them.
    pub restart_price_polling: bool,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn debounced(kind: DebounceKind) -> Self {
        Self {
            quote: QuoteTrigger::Debounce(kind),
            restart_price_polling: false,
        }
    }

    pub fn immediate() -> Self {
        Self {
            quote: QuoteTrigger::Immediate,
            restart_price_polling: false,
        }
    }

    pub fn with_price_polling(mut self) -> Self {
        self.restart_price_polling = true;
        self
    }
}
