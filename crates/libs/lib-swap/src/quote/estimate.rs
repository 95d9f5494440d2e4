//! # Cross-chain Time Estimates

use serde::Serialize;
use shared::dto::quote::Quote;

/// Estimated bridge time of a quote, in seconds (0 when the quote carries no route time).
pub fn quote_service_time(quote: &Quote) -> u64 {
    quote
        .routes
        .first()
        .and_then(|route| route.service_time)
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTimeEstimate {
    /// An hour or more.
    pub is_long_wait: bool,
    pub time_estimate: Option<u64>,
    pub time_estimate_display: String,
}

fn plural(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Human readable bridge time: `">2 hours"`, `"~5 mins"`, `"~30 secs"`.
pub fn cross_chain_time_estimate(service_time: Option<u64>) -> CrossChainTimeEstimate {
    let seconds = service_time.unwrap_or(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;

    let (is_long_wait, display) = if hours >= 1 {
        (true, format!(">{}", plural(hours, "hour", "hours")))
    } else if minutes >= 1 {
        (false, format!("~{}", plural(minutes, "min", "mins")))
    } else {
        (false, format!("~{}", plural(seconds, "sec", "secs")))
    };

    CrossChainTimeEstimate {
        is_long_wait,
        time_estimate: service_time,
        time_estimate_display: display,
    }
}
