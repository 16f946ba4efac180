// src/domain/normalize.rs

use crate::domain::listing::{CleanedListing, MarketArea};
use crate::scraper::models::RawListing;
use std::collections::HashMap;

/// Sentinel shown in place of a price when the lister wants inquiries.
const CONTACT_SENTINEL: &str = "please contact";

/// Keyword lists for market-area bucketing, matched case-insensitively as
/// substrings, in declaration order, first match wins. Preserved verbatim
/// for compatibility with prior snapshots — do not extend.
const TORONTO_KEYWORDS: &[&str] = &[
    "toronto",
    "city of toronto",
    "north york",
    "scarborough",
    "etobicoke",
    "east york",
    "york",
    "downtown",
];
const PEEL_KEYWORDS: &[&str] = &["mississauga", "brampton", "caledon", "peel"];
const YORK_KEYWORDS: &[&str] = &[
    "markham",
    "vaughan",
    "richmond hill",
    "newmarket",
    "aurora",
    "whitchurch",
    "stouffville",
    "king",
    "schomberg",
    "york region",
];
const DURHAM_KEYWORDS: &[&str] = &[
    "pickering",
    "ajax",
    "whitby",
    "oshawa",
    "clarington",
    "durham",
];
const HALTON_KEYWORDS: &[&str] = &["oakville", "burlington", "milton", "halton"];

const MARKET_AREAS: &[(MarketArea, &[&str])] = &[
    (MarketArea::Toronto, TORONTO_KEYWORDS),
    (MarketArea::Peel, PEEL_KEYWORDS),
    (MarketArea::York, YORK_KEYWORDS),
    (MarketArea::Durham, DURHAM_KEYWORDS),
    (MarketArea::Halton, HALTON_KEYWORDS),
];

/// Currency text to monthly integer. The contact sentinel and anything that
/// fails to parse after stripping `$`, thousands separators and a trailing
/// `.00` come back as `None` — a malformed price never aborts a run.
pub fn normalize_price(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    if trimmed.eq_ignore_ascii_case(CONTACT_SENTINEL) {
        return None;
    }
    let stripped: String = trimmed.chars().filter(|c| *c != '$' && *c != ',').collect();
    let stripped = stripped.strip_suffix(".00").unwrap_or(&stripped);
    stripped.trim().parse::<i64>().ok()
}

pub fn normalize_bedrooms(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

pub fn normalize_sqft(raw: Option<&str>) -> Option<i64> {
    let lowered = raw?.trim().to_lowercase();
    let stripped = lowered.replace("sqft", "");
    stripped.trim().parse::<i64>().ok()
}

/// Trims and drops the site's trailing `.•` separator if present.
pub fn normalize_location(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    let stripped = trimmed.strip_suffix(".•").unwrap_or(trimmed);
    Some(stripped.trim().to_string())
}

pub fn normalize_unit_type(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Buckets the raw location text. Bucketing reads the uncleaned string,
/// matching the snapshot the downstream analysis was built against.
pub fn market_area_for(location: Option<&str>) -> MarketArea {
    let Some(location) = location else {
        return MarketArea::OtherUnknown;
    };
    let lowered = location.to_lowercase();
    for (area, keywords) in MARKET_AREAS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return *area;
        }
    }
    MarketArea::OtherUnknown
}

pub fn clean_listing(raw: &RawListing, low_price_threshold: i64) -> CleanedListing {
    let price_monthly = normalize_price(raw.price_raw.as_deref());

    CleanedListing {
        title: raw.title.clone(),
        price_monthly,
        bedrooms: normalize_bedrooms(raw.bedrooms_raw.as_deref()),
        sqft: normalize_sqft(raw.sqft_raw.as_deref()),
        unit_type_clean: normalize_unit_type(raw.unit_type.as_deref()),
        location_clean: normalize_location(raw.location.as_deref()),
        market_area: market_area_for(raw.location.as_deref()),
        extreme_low_price_flag: price_monthly.is_some_and(|p| p < low_price_threshold),
        url: raw.url.clone(),
    }
}

/// Cleans every raw row and keeps exactly one row per url.
/// Tie-break is last-observed-wins: within a run the latest occurrence in
/// scrape order is the freshest state of the listing. Output order keeps
/// each url's first appearance.
pub fn clean_listings(rows: &[RawListing], low_price_threshold: i64) -> Vec<CleanedListing> {
    let mut slot_by_url: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<CleanedListing> = Vec::new();

    for raw in rows {
        let cleaned = clean_listing(raw, low_price_threshold);
        match slot_by_url.get(&cleaned.url) {
            Some(&slot) => out[slot] = cleaned,
            None => {
                slot_by_url.insert(cleaned.url.clone(), out.len());
                out.push(cleaned);
            }
        }
    }

    out
}
