use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod config;
mod feed;
mod odds;
mod report;

use config::{Config, OutputFormat};
use feed::{fetch_or_empty, JsonFileSource, OddsSource, TheOddsApi};
use odds::{OddsTable, OddsTableBuilder};
use report::SourceReport;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real env vars still apply
    dotenvy::dotenv().ok();

    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let sources = build_sources(&config)?;
    info!("Configured {} odds source(s)", sources.len());

    // Each source is fetched concurrently and built independently
    let fetches: Vec<_> = sources
        .iter()
        .map(|s| async move {
            let events = fetch_or_empty(s.as_ref()).await;
            (s.name().to_string(), events)
        })
        .collect();
    let batches = futures_util::future::join_all(fetches).await;

    let builder = OddsTableBuilder::new(config.target_date());
    let tables: Vec<(String, OddsTable)> = batches
        .into_iter()
        .map(|(name, events)| {
            let table = builder.build(&events);
            if table.rejected > 0 {
                warn!("{}: {}", name, report::summary(&table));
            }
            (name, table)
        })
        .collect();

    let reports: Vec<SourceReport<'_>> = tables
        .iter()
        .map(|(name, table)| SourceReport { source: name, table })
        .collect();

    match config.format {
        OutputFormat::Table => print_tables(&reports, &builder),
        OutputFormat::Json => println!("{}", report::render_json(&reports)?),
    }

    if let Some(path) = &config.output {
        report::write_json(path, &reports)
            .with_context(|| format!("Exporting rows to {}", path.display()))?;
        info!("Rows written to {}", path.display());
    }

    Ok(())
}

fn build_sources(config: &Config) -> Result<Vec<Box<dyn OddsSource>>> {
    let mut sources: Vec<Box<dyn OddsSource>> = Vec::new();

    if let Some(path) = &config.input {
        sources.push(Box::new(JsonFileSource::new(path)));
        return Ok(sources);
    }

    let api_key = config.api_key.as_deref().unwrap_or_default();
    for sport in &config.sports {
        sources.push(Box::new(TheOddsApi::new(
            &config.api_url,
            api_key,
            sport.trim(),
            &config.regions,
        )?));
    }
    Ok(sources)
}

fn print_tables(reports: &[SourceReport<'_>], builder: &OddsTableBuilder) {
    for r in reports {
        println!("{}", report::heading(r.source, builder.target_date()));
        if r.table.is_empty() {
            println!("{}", report::empty_notice(builder.target_date()));
        } else {
            println!("{}", report::render_table(&r.table.rows));
        }
        println!();
    }
}
