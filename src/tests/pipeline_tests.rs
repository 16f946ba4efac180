use crate::db::clean_listings::{get_clean_listings, replace_clean_listings};
use crate::db::raw_listings::{get_raw_listings, replace_raw_listings};
use crate::db::runs;
use crate::domain::listing::CleanedListing;
use crate::domain::normalize::clean_listings;
use crate::export::csv_export::{read_clean_csv, write_clean_csv};
use crate::scraper::models::RawListing;
use crate::tests::utils::init_test_db;
use std::collections::HashMap;

const THRESHOLD: i64 = 300;

fn by_url(listings: &[CleanedListing]) -> HashMap<String, CleanedListing> {
    listings.iter().map(|l| (l.url.clone(), l.clone())).collect()
}

fn raw(price: Option<&str>, location: Option<&str>, url: &str) -> RawListing {
    RawListing {
        title: "Test Listing".to_string(),
        price_raw: price.map(str::to_string),
        location: location.map(str::to_string),
        unit_type: Some("Apartment".to_string()),
        sqft_raw: Some("700 sqft".to_string()),
        bedrooms_raw: Some("1".to_string()),
        url: url.to_string(),
    }
}

#[test]
fn raw_snapshot_fully_replaces_the_previous_run() {
    let db = init_test_db("raw_replace");

    let first_run = vec![
        raw(Some("$1,800"), Some("Ajax"), "https://example.ca/l/1"),
        raw(Some("$2,000"), Some("Whitby"), "https://example.ca/l/2"),
    ];
    replace_raw_listings(&db, &first_run).unwrap();

    let second_run = vec![raw(Some("$1,900"), Some("Ajax"), "https://example.ca/l/1")];
    replace_raw_listings(&db, &second_run).unwrap();

    let stored = get_raw_listings(&db).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].price_raw.as_deref(), Some("$1,900"));
}

#[test]
fn clean_table_holds_one_row_per_url_with_last_observed_price() {
    let db = init_test_db("clean_dedup");

    let rows = vec![
        raw(Some("$1,000"), Some("Vaughan"), "https://example.ca/l/1"),
        raw(Some("$1,200"), Some("Vaughan"), "https://example.ca/l/1"),
        raw(Some("$2,400"), Some("Oakville"), "https://example.ca/l/2"),
    ];
    replace_raw_listings(&db, &rows).unwrap();

    let cleaned = clean_listings(&get_raw_listings(&db).unwrap(), THRESHOLD);
    replace_clean_listings(&db, &cleaned).unwrap();

    let stored = get_clean_listings(&db).unwrap();
    assert_eq!(stored.len(), 2);

    let prices: HashMap<&str, i64> = stored
        .iter()
        .filter_map(|l| l.price_monthly.map(|p| (l.url.as_str(), p)))
        .collect();
    assert_eq!(prices["https://example.ca/l/1"], 1200);
    assert_eq!(prices["https://example.ca/l/2"], 2400);
}

#[test]
fn clean_snapshot_survives_db_and_csv_round_trips() {
    let db = init_test_db("round_trip");

    let rows = vec![
        raw(Some("$1,500.00"), Some("Scarborough.•"), "https://example.ca/l/1"),
        raw(Some("Please Contact"), Some("Nowheresville"), "https://example.ca/l/2"),
        raw(Some("$250"), None, "https://example.ca/l/3"),
    ];
    let cleaned = clean_listings(&rows, THRESHOLD);
    replace_clean_listings(&db, &cleaned).unwrap();

    let mut csv_path = std::env::temp_dir();
    csv_path.push(format!(
        "ontario_rentals_test_{}_round_trip.csv",
        std::process::id()
    ));
    write_clean_csv(&csv_path, &cleaned).unwrap();

    let from_db = get_clean_listings(&db).unwrap();
    let from_csv = read_clean_csv(&csv_path).unwrap();
    std::fs::remove_file(&csv_path).unwrap();

    assert_eq!(by_url(&from_db), by_url(&cleaned));
    assert_eq!(by_url(&from_csv), by_url(&cleaned));

    // Spot-check the normalized values that went through both stores.
    let from_csv = by_url(&from_csv);
    let from_db = by_url(&from_db);

    let scarborough = &from_csv["https://example.ca/l/1"];
    assert_eq!(scarborough.price_monthly, Some(1500));
    assert_eq!(scarborough.location_clean.as_deref(), Some("Scarborough"));
    assert_eq!(scarborough.market_area.as_str(), "Toronto");

    let contact = &from_db["https://example.ca/l/2"];
    assert_eq!(contact.price_monthly, None);
    assert!(!contact.extreme_low_price_flag);

    let cheap = &from_db["https://example.ca/l/3"];
    assert_eq!(cheap.market_area.as_str(), "Other / Unknown");
    assert!(cheap.extreme_low_price_flag);
}

#[test]
fn scrape_run_bookkeeping_records_the_outcome() {
    let db = init_test_db("runs");

    let run_id = db
        .with_conn(|conn| runs::start_scrape_run(conn, 1_700_000_000))
        .unwrap();
    db.with_conn(|conn| {
        runs::end_scrape_run(conn, run_id, 1_700_000_120, 4, 93, true, None)
    })
    .unwrap();

    let recent = db.with_conn(|conn| runs::get_recent_runs(conn)).unwrap();
    assert_eq!(recent.len(), 1);

    let run = &recent[0];
    assert_eq!(run.id, run_id);
    assert_eq!(run.started_at, 1_700_000_000);
    assert_eq!(run.finished_at, Some(1_700_000_120));
    assert_eq!(run.pages_fetched, Some(4));
    assert_eq!(run.listings_seen, Some(93));
    assert_eq!(run.success, Some(true));
    assert!(run.error_message.is_none());
}
