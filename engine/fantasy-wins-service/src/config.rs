//! Service configuration management

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wins_scraper::ScraperConfig;

/// Config file read when no `--config` is given, if it exists
pub const DEFAULT_CONFIG_FILE: &str = "config/fantasy-wins.toml";

/// Environment variables with this prefix override file settings,
/// e.g. `FANTASY_PUBLISH__REPO_DIR`
pub const ENV_PREFIX: &str = "FANTASY";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Season to scrape; falls back to the league file's season
    pub season: Option<u16>,

    /// Stats page scraper configuration
    pub scraper: ScraperConfig,

    /// League roster configuration
    pub league: LeagueConfig,

    /// HTML report configuration
    pub report: ReportConfig,

    /// Git publishing configuration
    pub publish: PublishConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// League TOML file with owners and picks
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where the rendered page is written
    pub output: PathBuf,

    /// Document title
    pub title: String,

    /// Owner tables per row
    pub owners_per_row: usize,

    /// chrono format for the "Last updated" stamp (local time)
    pub timestamp_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Working tree of the web hosting repository
    pub repo_dir: PathBuf,

    /// Git executable
    pub git_binary: String,

    pub commit_message: String,

    /// Commit even when the page did not change
    pub allow_empty: bool,

    /// Delay between writing the page and committing it, in seconds
    pub settle_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("config/league-2026.toml") }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("index.html"),
            title: "Fantasy Basketball Results".to_string(),
            owners_per_row: 3,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from("."),
            git_binary: "git".to_string(),
            commit_message: "Automated standings update".to_string(),
            allow_empty: true,
            settle_secs: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl ServiceConfig {
    /// Apply command-line overrides on top of the loaded layers
    pub fn with_overrides(
        mut self,
        league: Option<PathBuf>,
        season: Option<u16>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = league {
            self.league.path = path;
        }
        if season.is_some() {
            self.season = season;
        }
        if let Some(output) = output {
            self.report.output = output;
        }
        self
    }

    /// Where `publish` writes the page. A relative `report.output` lands inside
    /// `publish.repo_dir` so the git commands pick it up.
    pub fn publish_output(&self) -> PathBuf {
        if self.report.output.is_relative() {
            self.publish.repo_dir.join(&self.report.output)
        } else {
            self.report.output.clone()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.scraper.validate().context("Invalid scraper configuration")?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format)),
        }

        if self.report.owners_per_row == 0 {
            return Err(anyhow::anyhow!("report.owners_per_row must be greater than zero"));
        }

        if self.publish.git_binary.trim().is_empty() {
            return Err(anyhow::anyhow!("publish.git_binary is empty"));
        }

        Ok(())
    }
}

/// Load configuration: defaults, then the config file, then `FANTASY_*` environment variables.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    let defaults = Config::try_from(&ServiceConfig::default())
        .context("Failed to build default configuration")?;

    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::from(Path::new(DEFAULT_CONFIG_FILE)).format(FileFormat::Toml).required(false),
    };

    let config: ServiceConfig = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to read configuration sources")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    tracing::debug!("Loaded configuration: {:?}", config);

    config.validate()?;
    Ok(config)
}
