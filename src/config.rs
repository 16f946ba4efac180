use crate::errors::PipelineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub database: DatabaseConfig,
    pub output: OutputConfig,
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapeConfig {
    pub base_url: String,
    /// Path segment after which `page-N/` is spliced for pages 2+.
    pub page_marker: String,
    pub max_pages: usize,
    pub page_delay_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub raw_csv: String,
    pub clean_csv: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Monthly prices strictly below this are flagged as implausible.
    pub extreme_low_price_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scrape: ScrapeConfig {
                base_url: "https://www.kijiji.ca/b-apartments-condos/gta-greater-toronto-area/c37l1700272?msockid=0133c66d12326754043ed03d131d665b".to_string(),
                page_marker: "/gta-greater-toronto-area/".to_string(),
                max_pages: 100,
                page_delay_secs: 2,
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                path: "ontario_rentals.sqlite3".to_string(),
            },
            output: OutputConfig {
                raw_csv: "kijiji_rentals_raw.csv".to_string(),
                clean_csv: "kijiji_rentals_clean.csv".to_string(),
            },
            normalize: NormalizeConfig {
                extreme_low_price_threshold: 300,
            },
        }
    }
}

pub fn load_config(path: &str) -> Result<Config, PipelineError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::Config(format!("read {path}: {e}")))?;
    serde_yaml::from_str(&content).map_err(|e| PipelineError::Config(format!("parse {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_file_parses() {
        let config: Config = serde_yaml::from_str(include_str!("../config.yml")).unwrap();
        assert_eq!(config.scrape.page_marker, "/gta-greater-toronto-area/");
        assert_eq!(config.normalize.extreme_low_price_threshold, 300);
    }

    #[test]
    fn defaults_match_the_scrape_contract() {
        let config = Config::default();
        assert!(config.scrape.base_url.contains(&config.scrape.page_marker));
        assert_eq!(config.scrape.page_delay_secs, 2);
        assert_eq!(config.scrape.max_pages, 100);
    }
}
