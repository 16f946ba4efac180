// errors.rs
use crate::scraper::ScraperError;
use std::fmt;

/// Errors originating from the pipeline itself (config, storage, export)
/// or bubbled up from the scrape stage.
#[derive(Debug)]
pub enum PipelineError {
    Config(String),
    Scrape(ScraperError),
    DbError(String),
    CsvError(String),
    IoError(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(msg) => write!(f, "Config error: {msg}"),
            PipelineError::Scrape(e) => write!(f, "Scrape failed: {e}"),
            PipelineError::DbError(msg) => write!(f, "Database error: {msg}"),
            PipelineError::CsvError(msg) => write!(f, "CSV export error: {msg}"),
            PipelineError::IoError(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ScraperError> for PipelineError {
    fn from(e: ScraperError) -> Self {
        PipelineError::Scrape(e)
    }
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::CsvError(e.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::IoError(e.to_string())
    }
}
