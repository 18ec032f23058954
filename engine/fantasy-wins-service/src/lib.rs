//! Fantasy Wins Service Library
//!
//! Runs the league pipeline: scrape season win totals, score every owner's
//! roster, render the standings page and optionally publish it through git.

use anyhow::{Context, Result};
use std::path::Path;

pub mod config;
pub mod logging;
pub mod publish;
pub mod service;
pub mod signals;

pub use config::ServiceConfig;
pub use logging::initialize_logging;
pub use publish::{GitPublisher, PublishError};
pub use service::{LeagueService, RunSummary};
pub use signals::{settle, SettleOutcome};

/// Load configuration from files and environment variables
pub fn load_configuration(path: Option<&Path>) -> Result<ServiceConfig> {
    config::load_config(path).context("Failed to load service configuration")
}
