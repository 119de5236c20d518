use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// MLB win probabilities from bookmaker odds
#[derive(Parser, Debug, Clone)]
#[command(name = "mlb-odds", version, about)]
pub struct Config {
    /// The Odds API key (required unless --input is given)
    #[arg(long, env = "ODDS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// The Odds API base URL
    #[arg(
        long,
        env = "ODDS_API_URL",
        default_value = "https://api.the-odds-api.com/v4"
    )]
    pub api_url: String,

    /// Sport keys to fetch, comma separated
    #[arg(
        long = "sport",
        env = "ODDS_SPORTS",
        value_delimiter = ',',
        default_value = "baseball_mlb"
    )]
    pub sports: Vec<String>,

    /// Bookmaker regions to query (e.g. "us", "us,uk")
    #[arg(long, env = "ODDS_REGIONS", default_value = "us")]
    pub regions: String,

    /// Only show games on this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Show games on every date
    #[arg(long, conflicts_with = "date")]
    pub all_dates: bool,

    /// Read a saved odds response (JSON array) instead of calling the API
    #[arg(long, env = "ODDS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the result rows as JSON to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let has_key = self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty());
        if self.input.is_none() && !has_key {
            anyhow::bail!(
                "ODDS_API_KEY is required when fetching live odds. Use --input to read a saved response."
            );
        }
        if self.sports.is_empty() || self.sports.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("sport keys must be non-empty");
        }
        if self.regions.trim().is_empty() {
            anyhow::bail!("regions must be non-empty");
        }
        Ok(())
    }

    /// The calendar date to filter on, or `None` for every date.
    pub fn target_date(&self) -> Option<NaiveDate> {
        if self.all_dates {
            None
        } else {
            Some(self.date.unwrap_or_else(|| Local::now().date_naive()))
        }
    }
}
