use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use crate::odds::RawEvent;

/// Trait that every odds source must implement.
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Return the current batch of event records, untouched.
    async fn fetch_events(&self) -> Result<Vec<RawEvent>>;

    /// Human-readable name for logging and report headings.
    fn name(&self) -> &str;
}

/// Fetch from `source`, handing back an empty batch when the upstream fails.
///
/// The odds core never sees transport errors; an outage simply produces a
/// table with no rows.
pub async fn fetch_or_empty(source: &dyn OddsSource) -> Vec<RawEvent> {
    match source.fetch_events().await {
        Ok(events) => events,
        Err(e) => {
            warn!("Odds source '{}' failed: {:#}", source.name(), e);
            Vec::new()
        }
    }
}
