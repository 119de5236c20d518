use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::events_from_json;
use super::provider::OddsSource;
use crate::odds::RawEvent;

/// Head-to-head odds from The Odds API v4.
/// Docs: <https://the-odds-api.com/liveapi/guides/v4/>
pub struct TheOddsApi {
    http: Client,
    endpoint: Url,
    name: String,
}

impl TheOddsApi {
    pub fn new(base_url: &str, api_key: &str, sport: &str, regions: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(TheOddsApi {
            http,
            endpoint: odds_endpoint(base_url, api_key, sport, regions)?,
            name: sport.to_string(),
        })
    }
}

fn odds_endpoint(base_url: &str, api_key: &str, sport: &str, regions: &str) -> Result<Url> {
    let raw = format!("{}/sports/{}/odds", base_url.trim_end_matches('/'), sport);
    let mut url = Url::parse(&raw).with_context(|| format!("Invalid odds API URL: {}", raw))?;
    url.query_pairs_mut()
        .append_pair("apiKey", api_key)
        .append_pair("regions", regions)
        .append_pair("markets", "h2h")
        .append_pair("oddsFormat", "decimal")
        .append_pair("dateFormat", "iso");
    Ok(url)
}

#[async_trait]
impl OddsSource for TheOddsApi {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self) -> Result<Vec<RawEvent>> {
        debug!("Fetching odds for {} from {}", self.name, self.endpoint.path());

        let resp = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .context("Odds API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Odds API error {}: {}", status, body);
        }

        // Quota headers are informational only.
        let remaining = resp
            .headers()
            .get("x-requests-remaining")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let raw: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse Odds API response")?;

        let events = events_from_json(raw)?;
        info!(
            "Fetched {} {} events (requests remaining: {})",
            events.len(),
            self.name,
            remaining.as_deref().unwrap_or("unknown")
        );
        Ok(events)
    }
}
