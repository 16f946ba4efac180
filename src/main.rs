use crate::config::{load_config, Config};
use crate::db::connection::{init_db, Database};
use crate::errors::PipelineError;
use crate::scraper::models::RawListing;
use crate::scraper::KijijiScraper;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod export;
mod scraper;

#[cfg(test)]
mod tests;

const CONFIG_PATH: &str = "config.yml";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ontario_rentals=info")),
        )
        .init();

    let config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {CONFIG_PATH}: {e}. Using defaults.");
            Config::default()
        }
    };

    if let Err(e) = run_snapshot(&config) {
        error!("Snapshot run failed: {e}");
        std::process::exit(1);
    }
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// One full snapshot: scrape → raw sink → normalize → clean sink → export,
/// bracketed by a scrape_runs bookkeeping row.
fn run_snapshot(config: &Config) -> Result<(), PipelineError> {
    let started = Instant::now();

    let db = Database::new(config.database.path.clone());
    init_db(&db)?;

    let run_id = db.with_conn(|conn| db::runs::start_scrape_run(conn, unix_now()))?;

    match scrape_and_persist(config, &db) {
        Ok((pages, listings)) => {
            db.with_conn(|conn| {
                db::runs::end_scrape_run(conn, run_id, unix_now(), pages, listings, true, None)
            })?;
            info!("✅ Run complete in {:?}", started.elapsed());
            Ok(())
        }
        Err(e) => {
            let _ = db.with_conn(|conn| {
                db::runs::end_scrape_run(conn, run_id, unix_now(), 0, 0, false, Some(e.to_string()))
            });
            Err(e)
        }
    }
}

fn scrape_and_persist(config: &Config, db: &Database) -> Result<(usize, usize), PipelineError> {
    let scraper = KijijiScraper::new(&config.scrape)?;

    let mut all_rows: Vec<RawListing> = Vec::new();
    let summary = scraper.scrape_all_pages(&config.scrape, |page_rows| {
        all_rows.extend(page_rows);
        Ok(())
    })?;

    if all_rows.is_empty() {
        warn!("Scrape produced no listings; writing empty snapshots");
    }

    let scraped_at = db::raw_listings::replace_raw_listings(db, &all_rows)?;
    export::csv_export::write_raw_csv(&config.output.raw_csv, &all_rows)?;
    info!(
        "Raw snapshot: {} rows stamped {} into {} and {}",
        all_rows.len(),
        scraped_at,
        config.database.path,
        config.output.raw_csv
    );

    // The normalizer reads the persisted snapshot back, not the in-memory
    // rows, so the clean table is always a function of rentals_raw.
    let raw_rows = db::raw_listings::get_raw_listings(db)?;
    let cleaned = domain::normalize::clean_listings(
        &raw_rows,
        config.normalize.extreme_low_price_threshold,
    );
    db::clean_listings::replace_clean_listings(db, &cleaned)?;
    export::csv_export::write_clean_csv(&config.output.clean_csv, &cleaned)?;
    info!(
        "Clean snapshot: {} distinct listings into {}",
        cleaned.len(),
        config.output.clean_csv
    );

    Ok((summary.pages_fetched, summary.listings_seen))
}
