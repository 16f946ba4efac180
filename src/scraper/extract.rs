use crate::scraper::models::RawListing;
use crate::scraper::ScraperError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(e.to_string()))
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Pulls every listing card out of one search-results page, in document
/// order. The link element is required per card; every other field is
/// independently optional. Detail hrefs come back site-relative, so they are
/// resolved against the page URL.
pub fn extract_listings(html: &str, page_url: &Url) -> Result<Vec<RawListing>, ScraperError> {
    let document = Html::parse_document(html);

    let card_sel = selector(r#"section[data-testid="listing-card"]"#)?;
    let link_sel = selector(r#"a[data-testid="listing-link"]"#)?;
    let price_sel = selector(r#"p[data-testid="listing-price"]"#)?;
    let details_sel = selector(r#"div[data-testid="listing-details"]"#)?;
    let unit_sel = selector(r#"li[aria-label="Unit type"]"#)?;
    let size_sel = selector(r#"li[aria-label="Size (sqft)"]"#)?;
    let beds_sel = selector(r#"li[aria-label="Bedrooms"]"#)?;

    let mut listings = Vec::new();

    for card in document.select(&card_sel) {
        let link = card
            .select(&link_sel)
            .next()
            .ok_or(ScraperError::MissingCardLink)?;
        let href = link
            .value()
            .attr("href")
            .ok_or(ScraperError::MissingCardHref)?;
        let url = page_url
            .join(href)
            .map_err(|e| ScraperError::InvalidUrl(e.to_string()))?;

        listings.push(RawListing {
            title: text_of(link),
            price_raw: card.select(&price_sel).next().map(text_of),
            location: card.select(&details_sel).next().map(text_of),
            unit_type: card.select(&unit_sel).next().map(text_of),
            sqft_raw: card.select(&size_sel).next().map(text_of),
            bedrooms_raw: card.select(&beds_sel).next().map(text_of),
            url: url.to_string(),
        });
    }

    Ok(listings)
}
