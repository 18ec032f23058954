use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// Placeholder replaced with the season year in `url_template`
pub const SEASON_PLACEHOLDER: &str = "{season}";

/// Configuration for the season stats scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Stats page URL, with `{season}` standing in for the year
    pub url_template: String,

    /// `id` attribute of the stats table
    pub table_id: String,

    /// Index of the overall wins cell within a row's `<td>` cells
    pub wins_column: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with the request
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url_template:
                "https://www.sports-reference.com/cbb/seasons/men/{season}-school-stats.html"
                    .to_string(),
            table_id: "basic_school_stats".to_string(),
            wins_column: 2,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl ScraperConfig {
    /// Check that the config can produce a usable request
    pub fn validate(&self) -> Result<()> {
        if !self.url_template.contains(SEASON_PLACEHOLDER) {
            return Err(ScrapeError::InvalidConfig {
                message: format!(
                    "url_template must contain {SEASON_PLACEHOLDER}: {}",
                    self.url_template
                ),
            });
        }
        if self.table_id.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig { message: "table_id is empty".to_string() });
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Build the stats page URL for a season
    pub fn season_url(&self, season: u16) -> String {
        self.url_template.replace(SEASON_PLACEHOLDER, &season.to_string())
    }
}
