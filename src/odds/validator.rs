//! Extraction of a canonical matchup from one raw feed record.
//!
//! Only the first bookmaker's first market is consulted. Teams are matched to
//! outcomes by exact name, never by outcome position: the feed does not
//! guarantee outcome order.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use super::models::{RawEvent, RejectionReason, ValidatedMatchup};

/// Validate one event. Checks run in a fixed order and the first failing one
/// decides the rejection reason.
pub fn validate_event(event: &RawEvent) -> Result<ValidatedMatchup, RejectionReason> {
    let raw = event.as_value();

    let bookmaker = first_entry(raw, "bookmakers").ok_or(RejectionReason::NoBookmakerData)?;
    let market = first_entry(bookmaker, "markets").ok_or(RejectionReason::NoMarketData)?;

    let outcomes = market
        .get("outcomes")
        .and_then(Value::as_array)
        .filter(|o| o.len() >= 2)
        .ok_or(RejectionReason::InsufficientOutcomes)?;

    let (team_a, team_b) = resolve_teams(raw).ok_or(RejectionReason::UnresolvedTeams)?;

    let price_a = find_price(outcomes, team_a).ok_or(RejectionReason::MissingPrice)?;
    let price_b = find_price(outcomes, team_b).ok_or(RejectionReason::MissingPrice)?;

    let date = raw
        .get("commence_time")
        .and_then(Value::as_str)
        .and_then(commence_date)
        .ok_or(RejectionReason::InvalidCommenceTime)?;

    Ok(ValidatedMatchup {
        date,
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        price_a,
        price_b,
    })
}

fn first_entry<'a>(parent: &'a Value, key: &str) -> Option<&'a Value> {
    parent.get(key).and_then(Value::as_array).and_then(|a| a.first())
}

/// Resolve `(home, away)`.
///
/// A `teams` pair, when present, wins over `away_team` and must contain the
/// home team among its first two entries.
fn resolve_teams(raw: &Value) -> Option<(&str, &str)> {
    let home = raw
        .get("home_team")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())?;

    let away = match raw.get("teams").filter(|v| !v.is_null()) {
        Some(teams) => {
            let pair = teams.as_array()?;
            let first = pair.first()?.as_str()?;
            let second = pair.get(1)?.as_str()?;
            if first == home {
                second
            } else if second == home {
                first
            } else {
                return None;
            }
        }
        None => raw.get("away_team").and_then(Value::as_str)?,
    };

    if away.trim().is_empty() || away == home {
        return None;
    }
    Some((home, away))
}

/// Decimal price of the first outcome named exactly `team`.
///
/// Prices may arrive as numbers or numeric strings; anything that is not a
/// finite positive number counts as missing.
fn find_price(outcomes: &[Value], team: &str) -> Option<f64> {
    let outcome = outcomes
        .iter()
        .find(|o| o.get("name").and_then(Value::as_str) == Some(team))?;
    let price = outcome.get("price")?;
    price
        .as_f64()
        .or_else(|| price.as_str().and_then(|s| s.trim().parse().ok()))
        .filter(|p| p.is_finite() && *p > 0.0)
}

/// Calendar date of a commence timestamp, as written (no timezone shift).
fn commence_date(ts: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }
    ts.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}
