// scraper.rs
use crate::config::ScrapeConfig;
use crate::scraper::extract::extract_listings;
use crate::scraper::models::RawListing;
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use std::time::Duration;
use tracing::info;
use url::Url;

// Browser-like header set. Part of the scraping contract with the site, so
// fixed here rather than in config.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-CA,en;q=0.9";

pub struct KijijiScraper {
    client: Client,
    page_delay: Duration,
}

#[derive(Debug, Default)]
pub struct ScrapeSummary {
    pub pages_fetched: usize,
    pub listings_seen: usize,
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

impl KijijiScraper {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self {
            client,
            page_delay: Duration::from_secs(cfg.page_delay_secs),
        })
    }

    /// Page 1 is the base URL verbatim; pages 2+ splice a `page-N/` segment
    /// right after the marker segment, mirroring the site's path convention.
    pub fn page_url(base_url: &str, page_marker: &str, page: usize) -> String {
        if page <= 1 {
            base_url.to_string()
        } else {
            base_url.replace(page_marker, &format!("{page_marker}page-{page}/"))
        }
    }

    pub fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScraperError::Network(format!("HTTP {status} for {url}")));
        }

        Ok(text)
    }

    /// Walks result pages sequentially, handing each page's listings to
    /// `on_page`. Stops at the first page with no cards or at `max_pages`,
    /// whichever comes first, sleeping the configured delay between pages.
    /// Any fetch or extraction error aborts the whole scrape.
    pub fn scrape_all_pages<F>(
        &self,
        cfg: &ScrapeConfig,
        mut on_page: F,
    ) -> Result<ScrapeSummary, ScraperError>
    where
        F: FnMut(Vec<RawListing>) -> Result<(), ScraperError>,
    {
        let mut summary = ScrapeSummary::default();

        for page in 1..=cfg.max_pages {
            let page_url = Self::page_url(&cfg.base_url, &cfg.page_marker, page);
            let parsed = Url::parse(&page_url).map_err(|e| ScraperError::InvalidUrl(e.to_string()))?;

            info!("📄 Fetching page {page}: {page_url}");
            let html = self.fetch_page(&page_url)?;
            let listings = extract_listings(&html, &parsed)?;
            summary.pages_fetched += 1;

            if listings.is_empty() {
                info!("🏁 No listing cards on page {page}, stopping");
                break;
            }

            info!("✅ Page {page} yielded {} listings", listings.len());
            summary.listings_seen += listings.len();
            on_page(listings)?;

            if page < cfg.max_pages {
                std::thread::sleep(self.page_delay);
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str =
        "https://www.kijiji.ca/b-apartments-condos/gta-greater-toronto-area/c37l1700272?msockid=abc";
    const MARKER: &str = "/gta-greater-toronto-area/";

    #[test]
    fn page_one_is_the_base_url_verbatim() {
        assert_eq!(KijijiScraper::page_url(BASE, MARKER, 1), BASE);
    }

    #[test]
    fn later_pages_contain_the_literal_page_segment() {
        let url = KijijiScraper::page_url(BASE, MARKER, 3);
        assert!(url.contains("page-3"));
        assert_eq!(
            url,
            "https://www.kijiji.ca/b-apartments-condos/gta-greater-toronto-area/page-3/c37l1700272?msockid=abc"
        );
    }

    #[test]
    fn page_one_never_contains_a_page_segment() {
        assert!(!KijijiScraper::page_url(BASE, MARKER, 1).contains("page-1"));
    }
}
