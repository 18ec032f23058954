//! Fantasy Wins
//!
//! Entry point for the league pipeline. `run` writes the standings page,
//! `standings` prints it to the terminal and `publish` writes the page and
//! pushes it to the hosting repository.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use fantasy_wins_service::{initialize_logging, load_configuration, LeagueService};
use league_ledger::Standings;

#[derive(Parser)]
#[command(name = "fantasy-wins")]
#[command(about = "Scrape college basketball wins, score the league and publish the standings")]
#[command(version)]
struct Cli {
    /// Config file (defaults to config/fantasy-wins.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// League file with owners and picks
    #[arg(long, global = true)]
    league: Option<PathBuf>,

    /// Season to scrape (the year the season ends in)
    #[arg(long, global = true)]
    season: Option<u16>,

    /// Where to write the standings page (relative to the repository for `publish`)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, score and write the standings page
    Run,

    /// Print the standings to the terminal without writing the page
    Standings {
        /// Print the standings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the standings page, then commit and push it
    Publish {
        /// Push immediately instead of waiting the settle delay
        #[arg(long)]
        skip_wait: bool,

        /// Log the git commands without running them
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_configuration(cli.config.as_deref())?
        .with_overrides(cli.league, cli.season, cli.output);
    initialize_logging(&config.logging)?;

    info!("Starting Fantasy Wins v{}", env!("CARGO_PKG_VERSION"));

    let service = LeagueService::new(config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let summary = service.run().await?;
            print_summary(&summary.standings);
            println!("\nResults have been saved to '{}'.", summary.output.display());
        }
        Commands::Standings { json } => {
            let (standings, _) = service.compute_standings().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print_standings(&standings);
            }
        }
        Commands::Publish { skip_wait, dry_run } => {
            info!("Running the standings pipeline...");
            let publish = &service.config().publish;
            let delay =
                if skip_wait { Duration::ZERO } else { Duration::from_secs(publish.settle_secs) };

            if let Some(summary) = service.publish(delay, dry_run).await? {
                print_summary(&summary.standings);
                println!(
                    "Standings published: {} from {}.",
                    summary.output.display(),
                    publish.repo_dir.display()
                );
            }
        }
    }

    Ok(())
}

fn print_summary(standings: &Standings) {
    if let Some(leader) = standings.winner() {
        println!(
            "Season {}: {} leads with {} wins across {} owners",
            standings.season,
            leader.name,
            leader.total_wins,
            standings.ranking.len()
        );
    }
    if !standings.unmatched.is_empty() {
        println!(
            "{} picks were not found on the stats page and scored 0:",
            standings.unmatched.len()
        );
        for pick in &standings.unmatched {
            println!("  - {} ({})", pick.team, pick.owner_name);
        }
    }
}

fn print_standings(standings: &Standings) {
    println!("\nStandings ({}):", standings.season);
    println!("{:<6} {:<20} {:<6}", "Place", "Owner", "Wins");
    println!("{}", "-".repeat(34));
    for (index, owner) in standings.ranking.iter().enumerate() {
        println!("{:<6} {:<20} {:<6}", index + 1, owner.name, owner.total_wins);
    }

    println!("\nTop Teams by Value (Wins - Cost):");
    println!("{:<20} {:<28} {:<5} {:<7} {:<7}", "Owner", "Team", "Wins", "Cost", "Value");
    println!("{}", "-".repeat(70));
    for pick in &standings.top_value {
        println!(
            "{:<20} {:<28} {:<5} {:<7.2} {:<7.2}",
            pick.owner_name, pick.team, pick.wins, pick.cost, pick.value
        );
    }

    println!(
        "\nMost Wins with Cost <= {}:",
        standings_report::format_cost(standings.low_cost_threshold)
    );
    println!("{:<20} {:<28} {:<5} {:<7}", "Owner", "Team", "Wins", "Cost");
    println!("{}", "-".repeat(62));
    for pick in &standings.top_low_cost {
        println!("{:<20} {:<28} {:<5} {:<7.2}", pick.owner_name, pick.team, pick.wins, pick.cost);
    }

    print_summary(standings);
}
