use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};
use wins_scraper::WinsTable;

use crate::types::League;

/// Length of the value and low-cost leaderboards
pub const TOP_N: usize = 5;

/// Source of season win totals, keyed by school name
pub trait WinsLookup {
    fn wins_for(&self, school: &str) -> Option<u32>;
}

impl WinsLookup for HashMap<String, u32> {
    fn wins_for(&self, school: &str) -> Option<u32> {
        self.get(school).copied()
    }
}

impl WinsLookup for BTreeMap<String, u32> {
    fn wins_for(&self, school: &str) -> Option<u32> {
        self.get(school).copied()
    }
}

impl WinsLookup for WinsTable {
    fn wins_for(&self, school: &str) -> Option<u32> {
        WinsTable::wins_for(self, school)
    }
}

/// Podium position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Place {
    First,
    Second,
    Third,
}

impl Place {
    /// Place for a zero-based ranking index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Place::First),
            1 => Some(Place::Second),
            2 => Some(Place::Third),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Place::First => "1st",
            Place::Second => "2nd",
            Place::Third => "3rd",
        }
    }
}

/// A pick joined with its scraped wins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPick {
    pub owner_key: String,
    pub owner_name: String,
    pub team: String,
    pub wins: u32,
    pub cost: f64,
    /// Wins minus cost
    pub value: f64,
    /// False when the school was missing from the wins table
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerStanding {
    pub key: String,
    pub name: String,
    pub picks: Vec<ScoredPick>,
    pub total_wins: u32,
    pub place: Option<Place>,
}

/// Season standings derived from a league and a wins table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub season: u16,
    pub low_cost_threshold: f64,
    /// Owners by total wins, highest first
    pub ranking: Vec<OwnerStanding>,
    /// Best picks by value
    pub top_value: Vec<ScoredPick>,
    /// Most wins among picks costing at most the low-cost threshold
    pub top_low_cost: Vec<ScoredPick>,
    /// Picks whose school was not found; they score zero wins
    pub unmatched: Vec<ScoredPick>,
}

impl Standings {
    pub fn winner(&self) -> Option<&OwnerStanding> {
        self.ranking.first()
    }

    /// All scored picks in ranking order
    pub fn all_picks(&self) -> impl Iterator<Item = &ScoredPick> {
        self.ranking.iter().flat_map(|owner| owner.picks.iter())
    }
}

/// Score every roster against the wins table
pub fn score<W: WinsLookup + ?Sized>(league: &League, wins: &W) -> Standings {
    let mut ranking: Vec<OwnerStanding> = Vec::with_capacity(league.owners.len());
    let mut unmatched = Vec::new();
    // Every pick in league order, so leaderboard ties resolve the same way every run
    let mut league_order = Vec::with_capacity(league.pick_count());

    for owner in &league.owners {
        let mut picks = Vec::with_capacity(owner.picks.len());

        for pick in &owner.picks {
            let lookup = pick.lookup_name();
            let found = wins.wins_for(lookup);
            if found.is_none() {
                warn!(
                    owner = %owner.name,
                    team = %pick.team,
                    lookup,
                    "School not found in wins table, scoring 0"
                );
            }

            let team_wins = found.unwrap_or(0);
            let scored = ScoredPick {
                owner_key: owner.key.clone(),
                owner_name: owner.name.clone(),
                team: pick.team.clone(),
                wins: team_wins,
                cost: pick.cost,
                value: f64::from(team_wins) - pick.cost,
                matched: found.is_some(),
            };

            if !scored.matched {
                unmatched.push(scored.clone());
            }
            league_order.push(scored.clone());
            picks.push(scored);
        }

        let total_wins = picks.iter().map(|pick| pick.wins).sum();
        ranking.push(OwnerStanding {
            key: owner.key.clone(),
            name: owner.name.clone(),
            picks,
            total_wins,
            place: None,
        });
    }

    // Stable: ties keep league order
    ranking.sort_by(|a, b| b.total_wins.cmp(&a.total_wins));
    for (index, standing) in ranking.iter_mut().enumerate() {
        standing.place = Place::from_index(index);
    }

    let mut top_low_cost: Vec<ScoredPick> = league_order
        .iter()
        .filter(|pick| pick.cost <= league.low_cost_threshold)
        .cloned()
        .collect();
    top_low_cost.sort_by(|a, b| b.wins.cmp(&a.wins));
    top_low_cost.truncate(TOP_N);

    let mut top_value = league_order;
    top_value.sort_by(|a, b| b.value.total_cmp(&a.value));
    top_value.truncate(TOP_N);

    let standings = Standings {
        season: league.season,
        low_cost_threshold: league.low_cost_threshold,
        ranking,
        top_value,
        top_low_cost,
        unmatched,
    };

    if let Some(leader) = standings.winner() {
        info!(
            season = standings.season,
            owners = standings.ranking.len(),
            unmatched = standings.unmatched.len(),
            "Scored standings, leader {} with {} wins",
            leader.name,
            leader.total_wins
        );
    }

    standings
}
