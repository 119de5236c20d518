pub mod file;
pub mod provider;
pub mod the_odds_api;

pub use file::JsonFileSource;
pub use provider::{fetch_or_empty, OddsSource};
pub use the_odds_api::TheOddsApi;

use anyhow::Result;

use crate::odds::RawEvent;

/// Split a feed payload into raw event records.
///
/// The payload itself must be a JSON array; individual elements are not
/// inspected here, that is the validator's job.
pub fn events_from_json(raw: serde_json::Value) -> Result<Vec<RawEvent>> {
    match raw {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(RawEvent::new).collect()),
        other => anyhow::bail!(
            "Expected a JSON array of events, got: {}",
            truncate(&other.to_string(), 200)
        ),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
