use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One event record exactly as the odds feed delivered it.
///
/// The feed is third-party and its shape is not contractually stable, so the
/// record stays an untyped JSON value until the validator has looked at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Value);

impl RawEvent {
    pub fn new(value: Value) -> Self {
        RawEvent(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Feed-assigned event id, when present. Only used for logging.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// The minimal well-formed fields extracted from a [`RawEvent`].
///
/// `team_a` is the home team and `team_b` the away team. The two names always
/// differ and both prices are finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMatchup {
    pub date: NaiveDate,
    pub team_a: String,
    pub team_b: String,
    pub price_a: f64,
    pub price_b: f64,
}

/// De-vigged win probabilities (percent) for the two sides of a matchup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityEstimate {
    pub prob_a: f64,
    pub prob_b: f64,
    /// Bookmaker margin removed by normalization, as a fraction (0.045 = 4.5%).
    pub overround: f64,
}

/// One row of the externally visible result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcomeRow {
    pub date: NaiveDate,
    pub team_a: String,
    pub team_b: String,
    /// Win % for `team_a`, rounded to one decimal place
    pub prob_a: f64,
    /// Win % for `team_b`, rounded to one decimal place
    pub prob_b: f64,
}

/// Why a single event record was left out of the table.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("no_bookmaker_data")]
    NoBookmakerData,
    #[error("no_market_data")]
    NoMarketData,
    #[error("insufficient_outcomes")]
    InsufficientOutcomes,
    #[error("unresolved_teams")]
    UnresolvedTeams,
    #[error("missing_price")]
    MissingPrice,
    #[error("invalid_commence_time")]
    InvalidCommenceTime,
    #[error("invalid_price")]
    InvalidPrice,
}
