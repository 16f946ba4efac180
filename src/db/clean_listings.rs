use crate::db::connection::Database;
use crate::domain::listing::{CleanedListing, MarketArea};
use crate::errors::PipelineError;
use rusqlite::params;

/// Full recompute of the clean snapshot from this run's cleaned rows.
pub fn replace_clean_listings(
    db: &Database,
    listings: &[CleanedListing],
) -> Result<(), PipelineError> {
    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        tx.execute("DELETE FROM rentals_clean", [])
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        for listing in listings {
            tx.execute(
                r#"
                INSERT INTO rentals_clean
                    (title, price_monthly, bedrooms, sqft, unit_type_clean,
                     location_clean, market_area, extreme_low_price_flag, url)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    listing.title,
                    listing.price_monthly,
                    listing.bedrooms,
                    listing.sqft,
                    listing.unit_type_clean,
                    listing.location_clean,
                    listing.market_area.as_str(),
                    listing.extreme_low_price_flag as i32,
                    listing.url
                ],
            )
            .map_err(|e| PipelineError::DbError(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| PipelineError::DbError(e.to_string()))
    })
}

/// Reads the clean snapshot back in insertion order.
pub fn get_clean_listings(db: &Database) -> Result<Vec<CleanedListing>, PipelineError> {
    db.with_conn(|conn| {
        let mut stmt = conn
            .prepare(
                r#"
                SELECT title, price_monthly, bedrooms, sqft, unit_type_clean,
                       location_clean, market_area, extreme_low_price_flag, url
                FROM rentals_clean
                ORDER BY rowid
                "#,
            )
            .map_err(|e| PipelineError::DbError(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(CleanedListing {
                    title: row.get(0)?,
                    price_monthly: row.get(1)?,
                    bedrooms: row.get(2)?,
                    sqft: row.get(3)?,
                    unit_type_clean: row.get(4)?,
                    location_clean: row.get(5)?,
                    market_area: MarketArea::from_label(&row.get::<_, String>(6)?),
                    extreme_low_price_flag: row.get::<_, i32>(7)? != 0,
                    url: row.get(8)?,
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
