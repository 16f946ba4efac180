use crate::db::connection::Database;
use crate::errors::PipelineError;
use crate::scraper::models::RawListing;
use chrono::{NaiveDateTime, Utc};
use rusqlite::params;
use std::fs::File;
use std::io::BufWriter;

/// Debug-build artifact mirroring the rows headed for `rentals_raw`.
pub fn save_raw_debug(rows: &[RawListing], filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

/// Fully replaces the raw snapshot — the table never accumulates across
/// runs. Every row in the batch shares one insertion timestamp, which is
/// returned so callers can correlate artifacts with the run.
pub fn replace_raw_listings(
    db: &Database,
    rows: &[RawListing],
) -> Result<NaiveDateTime, PipelineError> {
    let now = Utc::now().naive_utc();

    #[cfg(debug_assertions)]
    {
        save_raw_debug(rows, "rentals_raw_debug.json")
            .map_err(|e| PipelineError::IoError(e.to_string()))?;
    }

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        tx.execute("DELETE FROM rentals_raw", [])
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        for row in rows {
            tx.execute(
                r#"
                INSERT INTO rentals_raw
                    (title, price_raw, location, unit_type, sqft_raw, bedrooms_raw, url, scraped_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    row.title,
                    row.price_raw,
                    row.location,
                    row.unit_type,
                    row.sqft_raw,
                    row.bedrooms_raw,
                    row.url,
                    now
                ],
            )
            .map_err(|e| PipelineError::DbError(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        Ok(now)
    })
}

/// Reads the current raw snapshot back in insertion order.
pub fn get_raw_listings(db: &Database) -> Result<Vec<RawListing>, PipelineError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT title, price_raw, location, unit_type, sqft_raw, bedrooms_raw, url
                FROM rentals_raw
                ORDER BY rowid
                "#,
            )
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawListing {
                    title: row.get(0)?,
                    price_raw: row.get(1)?,
                    location: row.get(2)?,
                    unit_type: row.get(3)?,
                    sqft_raw: row.get(4)?,
                    bedrooms_raw: row.get(5)?,
                    url: row.get(6)?,
                })
            })
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| PipelineError::DbError(e.to_string()))?);
        }
        Ok(out)
    })
}
