use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::events_from_json;
use super::provider::OddsSource;
use crate::odds::RawEvent;

/// Reads a saved odds feed response (a JSON array of events) from disk.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        JsonFileSource { path, name }
    }
}

#[async_trait]
impl OddsSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self) -> Result<Vec<RawEvent>> {
        debug!("Reading odds from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let raw: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in {}", self.path.display()))?;
        events_from_json(raw)
    }
}
