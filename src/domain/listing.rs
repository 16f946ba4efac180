use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse GTA geography bucket derived from a listing's free-text location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketArea {
    Toronto,
    Peel,
    York,
    Durham,
    Halton,
    #[serde(rename = "Other / Unknown")]
    OtherUnknown,
}

impl MarketArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketArea::Toronto => "Toronto",
            MarketArea::Peel => "Peel",
            MarketArea::York => "York",
            MarketArea::Durham => "Durham",
            MarketArea::Halton => "Halton",
            MarketArea::OtherUnknown => "Other / Unknown",
        }
    }

    /// Inverse of `as_str`, used when reading the clean table back.
    /// Anything unrecognized lands in the catch-all bucket.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Toronto" => MarketArea::Toronto,
            "Peel" => MarketArea::Peel,
            "York" => MarketArea::York,
            "Durham" => MarketArea::Durham,
            "Halton" => MarketArea::Halton,
            _ => MarketArea::OtherUnknown,
        }
    }
}

impl fmt::Display for MarketArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deduplicated, type-coerced listing, ready for analysis.
/// Field order doubles as the cleaned CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedListing {
    pub title: String,
    pub price_monthly: Option<i64>,
    pub bedrooms: Option<f64>,
    pub sqft: Option<i64>,
    pub unit_type_clean: Option<String>,
    pub location_clean: Option<String>,
    pub market_area: MarketArea,
    pub extreme_low_price_flag: bool,
    pub url: String,
}
