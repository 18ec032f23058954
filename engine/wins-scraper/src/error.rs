//! Error types for the wins scraper

use thiserror::Error;

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP request to {url} failed with status: {status}")]
    Status { status: reqwest::StatusCode, url: String },

    #[error("Could not find table '{table_id}' on the page")]
    TableNotFound { table_id: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
