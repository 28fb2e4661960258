// src/filter/mod.rs
mod hosts;
mod rules;

use tracing::debug;

use crate::repo::MonitorMode;

/// Normalize a fetched body into the text that gets fingerprinted.
///
/// `Full` mode hashes the page as-is. `Content` mode first tries a
/// host-specific rule for the URL, then falls back to the generic
/// ad/tracking/timestamp filter. Never fails: worst case the original body
/// comes back unchanged.
pub fn extract(body: &str, mode: MonitorMode, url: &str) -> String {
    match mode {
        MonitorMode::Full => body.to_string(),
        MonitorMode::Content => {
            if let Some(filtered) = hosts::apply_host_rule(url, body) {
                debug!("Applied host-specific filter for {}", url);
                return filtered;
            }
            rules::apply_generic(body)
        }
    }
}
