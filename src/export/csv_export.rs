use crate::domain::listing::CleanedListing;
use crate::errors::PipelineError;
use crate::scraper::models::RawListing;
use std::path::Path;

// Explicit column orders, matching the record structs' field order. The
// header never depends on row contents, so an empty run still produces a
// well-formed file.
const RAW_HEADER: &[&str] = &[
    "title",
    "price_raw",
    "location",
    "unit_type",
    "sqft_raw",
    "bedrooms_raw",
    "url",
];
const CLEAN_HEADER: &[&str] = &[
    "title",
    "price_monthly",
    "bedrooms",
    "sqft",
    "unit_type_clean",
    "location_clean",
    "market_area",
    "extreme_low_price_flag",
    "url",
];

pub fn write_raw_csv(path: impl AsRef<Path>, rows: &[RawListing]) -> Result<(), PipelineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(RAW_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_clean_csv(
    path: impl AsRef<Path>,
    listings: &[CleanedListing],
) -> Result<(), PipelineError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CLEAN_HEADER)?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a cleaned snapshot back, mapping columns by header name.
pub fn read_clean_csv(path: impl AsRef<Path>) -> Result<Vec<CleanedListing>, PipelineError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut out = Vec::new();
    for record in reader.deserialize() {
        out.push(record?);
    }
    Ok(out)
}
