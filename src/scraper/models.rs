use serde::{Deserialize, Serialize};

// card
//  ├── a[data-testid=listing-link]     → title, url (required)
//  ├── p[data-testid=listing-price]    → price_raw
//  ├── div[data-testid=listing-details] → location
//  ├── li[aria-label="Unit type"]      → unit_type
//  ├── li[aria-label="Size (sqft)"]    → sqft_raw
//  └── li[aria-label="Bedrooms"]       → bedrooms_raw

/// One listing card as extracted from a search-results page.
/// Field order doubles as the raw CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub title: String,
    pub price_raw: Option<String>,
    pub location: Option<String>,
    pub unit_type: Option<String>,
    pub sqft_raw: Option<String>,
    pub bedrooms_raw: Option<String>,
    pub url: String,
}
