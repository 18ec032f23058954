//! Fantasy Wins Draft CLI
//!
//! Scrapes the season's stats table, lets owners pick teams in turn and
//! writes the resulting rosters as a league file.

mod draft;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use wins_scraper::{ScraperConfig, WinsScraper};

use crate::draft::Draft;

#[derive(Parser)]
#[command(name = "draft-cli")]
#[command(about = "Run a team draft against the season's stats table and write a league file")]
#[command(version = "0.1.0")]
struct Cli {
    /// Season year (the year the season ends in)
    #[arg(short, long, default_value_t = 2026)]
    season: u16,

    /// Comma-separated owner names, in pick order
    #[arg(long, value_delimiter = ',', required = true)]
    owners: Vec<String>,

    /// Teams per owner
    #[arg(short, long, default_value_t = 1)]
    rounds: usize,

    /// League file to write
    #[arg(short, long, default_value = "league.toml")]
    output: PathBuf,

    /// Index of the wins cell in each table row
    #[arg(long, default_value_t = 2)]
    wins_column: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let owners: Vec<String> = cli
        .owners
        .iter()
        .map(|owner| owner.trim().to_string())
        .filter(|owner| !owner.is_empty())
        .collect();

    let scraper = WinsScraper::new(ScraperConfig {
        wins_column: cli.wins_column,
        ..ScraperConfig::default()
    })?;
    let table = scraper
        .scrape_season(cli.season)
        .await
        .with_context(|| format!("Failed to scrape season {}", cli.season))?;

    println!("{}", format!("🏀 {} Draft: {} teams available", cli.season, table.len()).bold());

    let mut draft = Draft::new(owners, table.rows(), cli.rounds)?;
    info!(season = cli.season, teams = table.len(), rounds = cli.rounds, "Draft started");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_round = 0;

    while let Some(owner) = draft.current_owner().map(str::to_string) {
        if draft.round() != last_round {
            last_round = draft.round();
            println!("\n{}", format!("--- Round {last_round} ---").cyan().bold());
        }

        println!("\n{}, it's your turn to pick a team!", owner.bold());
        print!("{owner}, select a team by typing its name (or '?' to list): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("Input closed before the draft finished");
        };
        let choice = line?;

        if choice.trim() == "?" {
            let names: Vec<&str> =
                draft.available().iter().map(|team| team.school.as_str()).collect();
            println!("Available teams: {}", names.join(", "));
            continue;
        }

        match draft.pick(&choice) {
            Ok(team) => {
                info!(owner = %owner, team = %team.school, wins = team.wins, "Pick recorded");
                println!(
                    "{} selected {} with {} wins.",
                    owner.green(),
                    team.school.green().bold(),
                    team.wins
                );
            }
            Err(e) => println!("{} {}", "Invalid team selection, please try again:".red(), e),
        }
    }

    println!("\n{}", "Draft complete".bold());
    for (owner, wins) in draft.totals() {
        println!("  {:<20} {:>4} wins", owner, wins);
        for team in draft.roster(owner).unwrap_or_default() {
            println!("      {:<28} {:>4}", team.school, team.wins);
        }
    }
    if let Some((leader, wins)) = draft.leader() {
        println!("{}", format!("Leader: {leader} ({wins} wins)").yellow().bold());
    }

    let league = draft.into_league(cli.season);
    league
        .save(&cli.output)
        .with_context(|| format!("Failed to write league file {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "League file written");

    println!(
        "League saved to {}. Fill in each pick's cost before the season run.",
        cli.output.display()
    );
    Ok(())
}
