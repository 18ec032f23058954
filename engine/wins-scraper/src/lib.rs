//! Wins Scraper
//!
//! Fetches the season school-stats page and extracts each program's win total
//! from the stats table.

pub mod config;
pub mod error;
pub mod scraper;
pub mod types;

pub use config::ScraperConfig;
pub use error::{Result, ScrapeError};
pub use crate::scraper::{parse_wins_table, WinsScraper};
pub use types::{TeamWins, WinsTable};
