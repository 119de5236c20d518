use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::models::{GameOutcomeRow, RawEvent, RejectionReason, ValidatedMatchup};
use super::normalizer::{normalize_prices, round_display};
use super::validator::validate_event;

/// Result of one batch: the surviving rows in input order plus rejection
/// counts for observability.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OddsTable {
    pub rows: Vec<GameOutcomeRow>,
    /// Records dropped by validation or normalization
    pub rejected: usize,
    pub rejections: BTreeMap<RejectionReason, usize>,
    /// Valid rows dropped only because their date did not match the filter
    pub filtered_out: usize,
}

impl OddsTable {
    /// Zero rows is a normal outcome; callers branch on it to show a
    /// "no games" state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn reject(&mut self, reason: RejectionReason) {
        self.rejected += 1;
        *self.rejections.entry(reason).or_default() += 1;
    }
}

/// Validates, normalizes and filters a batch of raw events.
///
/// Holds no per-batch state, so one builder can be shared across batches and
/// threads; every call to [`OddsTableBuilder::build`] is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OddsTableBuilder {
    target_date: Option<NaiveDate>,
}

impl OddsTableBuilder {
    pub fn new(target_date: Option<NaiveDate>) -> Self {
        OddsTableBuilder { target_date }
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    pub fn build(&self, events: &[RawEvent]) -> OddsTable {
        let mut table = OddsTable::default();

        for event in events {
            let row = match validate_event(event).and_then(|m| to_row(&m)) {
                Ok(row) => row,
                Err(reason) => {
                    debug!(
                        "Skipping event {}: {}",
                        event.id().unwrap_or("<no id>"),
                        reason
                    );
                    table.reject(reason);
                    continue;
                }
            };

            match self.target_date {
                Some(date) if row.date != date => table.filtered_out += 1,
                _ => table.rows.push(row),
            }
        }

        info!(
            "Odds batch: {} events, {} rows, {} rejected, {} outside date filter",
            events.len(),
            table.rows.len(),
            table.rejected,
            table.filtered_out
        );
        table
    }
}

fn to_row(matchup: &ValidatedMatchup) -> Result<GameOutcomeRow, RejectionReason> {
    let est = normalize_prices(matchup.price_a, matchup.price_b)?;
    debug!(
        "{} vs {}: {:.3}/{:.3}, overround {:.2}%",
        matchup.team_a,
        matchup.team_b,
        matchup.price_a,
        matchup.price_b,
        est.overround * 100.0
    );
    Ok(GameOutcomeRow {
        date: matchup.date,
        team_a: matchup.team_a.clone(),
        team_b: matchup.team_b.clone(),
        prob_a: round_display(est.prob_a),
        prob_b: round_display(est.prob_b),
    })
}
