mod extract;
pub mod models;
mod scraper;
mod scraper_error;

pub use self::scraper::{KijijiScraper, ScrapeSummary};
pub use self::scraper_error::ScraperError;
