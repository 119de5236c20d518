//! Terminal and JSON rendering of odds tables.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

use crate::odds::{GameOutcomeRow, OddsTable};

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Home Team")]
    home: String,
    #[tabled(rename = "Away Team")]
    away: String,
    #[tabled(rename = "Win % (Home)")]
    prob_home: String,
    #[tabled(rename = "Win % (Away)")]
    prob_away: String,
}

impl From<&GameOutcomeRow> for DisplayRow {
    fn from(row: &GameOutcomeRow) -> Self {
        DisplayRow {
            date: row.date.format("%Y-%m-%d").to_string(),
            home: row.team_a.clone(),
            away: row.team_b.clone(),
            prob_home: format!("{:.1}", row.prob_a),
            prob_away: format!("{:.1}", row.prob_b),
        }
    }
}

/// One source's table, labelled for export.
#[derive(Debug, Serialize)]
pub struct SourceReport<'a> {
    pub source: &'a str,
    #[serde(flatten)]
    pub table: &'a OddsTable,
}

pub fn render_table(rows: &[GameOutcomeRow]) -> String {
    Table::new(rows.iter().map(DisplayRow::from)).to_string()
}

pub fn heading(source: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{}: games for {}", source, d.format("%B %d, %Y")),
        None => format!("{}: all upcoming games", source),
    }
}

/// Message shown instead of a table when nothing survived.
pub fn empty_notice(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("No games found for {}. Try another date.", d),
        None => "No valid games available from the odds feed.".to_string(),
    }
}

/// "5 games, 2 rejected (no_bookmaker_data: 1, missing_price: 1)"
pub fn summary(table: &OddsTable) -> String {
    let games = table.rows.len();
    let noun = if games == 1 { "game" } else { "games" };
    let mut out = format!("{} {}, {} rejected", games, noun, table.rejected);
    if !table.rejections.is_empty() {
        let parts: Vec<String> = table
            .rejections
            .iter()
            .map(|(reason, n)| format!("{}: {}", reason, n))
            .collect();
        out.push_str(&format!(" ({})", parts.join(", ")));
    }
    out
}

pub fn render_json(reports: &[SourceReport<'_>]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Failed to serialize odds report")
}

pub fn write_json(path: &Path, reports: &[SourceReport<'_>]) -> Result<()> {
    let json = render_json(reports)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::models::RejectionReason;

    fn row(home: &str, away: &str, a: f64, b: f64) -> GameOutcomeRow {
        GameOutcomeRow {
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            team_a: home.into(),
            team_b: away.into(),
            prob_a: a,
            prob_b: b,
        }
    }

    #[test]
    fn table_has_headers_and_one_decimal() {
        let out = render_table(&[row("Giants", "Pirates", 63.0, 37.0)]);
        assert!(out.contains("Home Team"));
        assert!(out.contains("Win % (Away)"));
        assert!(out.contains("Giants"));
        assert!(out.contains("63.0"));
        assert!(out.contains("2025-08-04"));
    }

    #[test]
    fn heading_names_the_date() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 4);
        assert_eq!(heading("baseball_mlb", d), "baseball_mlb: games for August 04, 2025");
        assert_eq!(heading("odds.json", None), "odds.json: all upcoming games");
    }

    #[test]
    fn empty_notice_mentions_date() {
        let d = NaiveDate::from_ymd_opt(2025, 8, 4);
        assert!(empty_notice(d).contains("2025-08-04"));
    }

    #[test]
    fn summary_lists_reasons() {
        let mut table = OddsTable::default();
        table.rows.push(row("Twins", "Tigers", 42.0, 58.0));
        table.rejected = 3;
        table.rejections.insert(RejectionReason::MissingPrice, 1);
        table.rejections.insert(RejectionReason::NoBookmakerData, 2);
        assert_eq!(
            summary(&table),
            "1 game, 3 rejected (no_bookmaker_data: 2, missing_price: 1)"
        );
    }

    #[test]
    fn summary_pluralizes_game_count() {
        let mut table = OddsTable::default();
        assert_eq!(summary(&table), "0 games, 0 rejected");
        table.rows.push(row("Twins", "Tigers", 42.0, 58.0));
        table.rows.push(row("Royals", "Red Sox", 47.0, 53.0));
        assert_eq!(summary(&table), "2 games, 0 rejected");
    }

    #[test]
    fn json_report_is_labelled() {
        let mut table = OddsTable::default();
        table.rows.push(row("Astros", "Marlins", 69.0, 31.0));
        let reports = [SourceReport { source: "baseball_mlb", table: &table }];
        let value: serde_json::Value = serde_json::from_str(&render_json(&reports).unwrap()).unwrap();
        assert_eq!(value[0]["source"], "baseball_mlb");
        assert_eq!(value[0]["rows"][0]["team_a"], "Astros");
        assert_eq!(value[0]["rows"][0]["date"], "2025-08-04");
        assert_eq!(value[0]["rejected"], 0);
    }

    #[test]
    fn writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let table = OddsTable::default();
        write_json(&path, &[SourceReport { source: "x", table: &table }]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"source\": \"x\""));
    }
}
