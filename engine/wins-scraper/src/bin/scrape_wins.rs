use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use wins_scraper::{ScraperConfig, WinsScraper};

#[derive(Parser)]
#[command(name = "scrape-wins")]
#[command(about = "Scrape season win totals and save them as JSON")]
struct Args {
    /// Season year (the year the season ends in)
    #[arg(short, long, default_value_t = 2026)]
    season: u16,

    /// Output file (defaults to data/wins/season_<season>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Index of the wins cell in each table row
    #[arg(long, default_value_t = 2)]
    wins_column: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = ScraperConfig { wins_column: args.wins_column, ..ScraperConfig::default() };
    let scraper = WinsScraper::new(config)?;

    let table = scraper
        .scrape_season(args.season)
        .await
        .with_context(|| format!("Failed to scrape season {}", args.season))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("data/wins/season_{}.json", args.season)));
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let json_content = serde_json::to_string_pretty(&table)?;
    fs::write(&output, json_content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Saved {} teams to {}", table.len(), output.display());

    println!("\nTop 10 Teams by Wins ({}):", table.season);
    println!("{:<4} {:<32} {:<4}", "Rank", "School", "Wins");
    println!("{}", "-".repeat(42));

    for (index, team) in table.top_teams(10).iter().enumerate() {
        println!("{:<4} {:<32} {:<4}", index + 1, team.school, team.wins);
    }

    println!("\nTotal teams scraped: {}", table.len());
    Ok(())
}
