use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScraperError {
    Network(String),
    HtmlParse(String),
    MissingCardLink,
    MissingCardHref,
    InvalidUrl(String),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Network(msg) => write!(f, "Network error: {msg}"),
            ScraperError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScraperError::MissingCardLink => write!(f, "Listing card has no link element"),
            ScraperError::MissingCardHref => write!(f, "Listing link has no href attribute"),
            ScraperError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
        }
    }
}

impl Error for ScraperError {}
