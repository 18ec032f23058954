//! The scrape, score and render pipeline

use anyhow::{Context, Result};
use chrono::Local;
use league_ledger::{score, League, Standings};
use standings_report::{render_html, write_report, ReportOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use wins_scraper::WinsScraper;

use crate::config::ServiceConfig;
use crate::publish::GitPublisher;
use crate::signals::{settle, SettleOutcome};

/// What a pipeline run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub season: u16,
    pub teams_scraped: usize,
    pub output: PathBuf,
    pub standings: Standings,
}

/// Ties together the scraper, the league ledger and the report
pub struct LeagueService {
    config: ServiceConfig,
    scraper: WinsScraper,
}

impl LeagueService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let scraper =
            WinsScraper::new(config.scraper.clone()).context("Failed to create stats scraper")?;
        Ok(Self { config, scraper })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn load_league(&self) -> Result<League> {
        League::load(&self.config.league.path).with_context(|| {
            format!("Failed to load league file {}", self.config.league.path.display())
        })
    }

    /// Scrape the season and score every roster.
    ///
    /// Returns the standings and the number of teams found on the stats page.
    pub async fn compute_standings(&self) -> Result<(Standings, usize)> {
        let league = self.load_league()?;

        let season = self.config.season.unwrap_or(league.season);
        if season != league.season {
            warn!(
                season,
                league_season = league.season,
                "Scraping a different season than the league file names"
            );
        }

        let table = self
            .scraper
            .scrape_season(season)
            .await
            .with_context(|| format!("Failed to scrape wins for season {season}"))?;

        if table.is_empty() {
            return Err(anyhow::anyhow!(
                "Stats table for season {season} had no teams; refusing to score an empty season"
            ));
        }

        let mut standings = score(&league, &table);
        standings.season = season;

        Ok((standings, table.len()))
    }

    /// Render standings with the configured report settings and the current local time
    pub fn render(&self, standings: &Standings) -> String {
        let options = ReportOptions {
            title: self.config.report.title.clone(),
            updated_at: Local::now().format(&self.config.report.timestamp_format).to_string(),
            owners_per_row: self.config.report.owners_per_row,
        };
        render_html(standings, &options)
    }

    /// Scrape, score, render and write the page
    pub async fn run(&self) -> Result<RunSummary> {
        self.write_standings(&self.config.report.output).await
    }

    /// Write the page inside the hosting repository, wait the settle delay,
    /// then commit and push it.
    ///
    /// Returns None when the delay was cancelled; the page is written but not pushed.
    pub async fn publish(&self, delay: Duration, dry_run: bool) -> Result<Option<RunSummary>> {
        let output = self.config.publish_output();
        if !output.starts_with(&self.config.publish.repo_dir) {
            warn!(
                output = %output.display(),
                repo = %self.config.publish.repo_dir.display(),
                "Report is written outside the publish repository and will not be pushed"
            );
        }

        let summary = self.write_standings(&output).await?;

        if settle(delay).await == SettleOutcome::Cancelled {
            warn!("Publish cancelled; the page was written but not pushed");
            return Ok(None);
        }

        GitPublisher::new(&self.config.publish)
            .dry_run(dry_run)
            .publish()
            .await
            .context("Failed to publish standings")?;

        Ok(Some(summary))
    }

    async fn write_standings(&self, output: &Path) -> Result<RunSummary> {
        let (standings, teams_scraped) = self.compute_standings().await?;

        let html = self.render(&standings);
        write_report(output, &html)
            .with_context(|| format!("Failed to write report to {}", output.display()))?;

        info!(
            season = standings.season,
            teams_scraped,
            unmatched = standings.unmatched.len(),
            output = %output.display(),
            "Standings page written"
        );

        Ok(RunSummary {
            season: standings.season,
            teams_scraped,
            output: output.to_path_buf(),
            standings,
        })
    }
}
