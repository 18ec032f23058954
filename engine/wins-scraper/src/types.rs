use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single row of the stats table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWins {
    /// School name as printed on the stats page (e.g., "Saint Mary's (CA)")
    pub school: String,
    /// Overall wins for the season
    pub wins: u32,
}

/// Container for one season of scraped win totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinsTable {
    /// Season year (the year the season ends in)
    pub season: u16,
    /// Page the table was scraped from
    pub source_url: String,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
    /// Wins keyed by school name
    pub teams: BTreeMap<String, u32>,
}

impl WinsTable {
    /// Create an empty table for a season
    pub fn new(season: u16, source_url: impl Into<String>) -> Self {
        Self {
            season,
            source_url: source_url.into(),
            fetched_at: Utc::now(),
            teams: BTreeMap::new(),
        }
    }

    /// Build a table from parsed rows. Later rows replace earlier ones with the same school.
    pub fn from_rows(season: u16, source_url: impl Into<String>, rows: Vec<TeamWins>) -> Self {
        let mut table = Self::new(season, source_url);
        for row in rows {
            table.teams.insert(row.school, row.wins);
        }
        table
    }

    pub fn wins_for(&self, school: &str) -> Option<u32> {
        self.teams.get(school).copied()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Get top N teams by wins, ties broken by name
    pub fn top_teams(&self, limit: usize) -> Vec<TeamWins> {
        let mut rows: Vec<TeamWins> = self
            .teams
            .iter()
            .map(|(school, wins)| TeamWins { school: school.clone(), wins: *wins })
            .collect();
        // BTreeMap iteration is already name-ordered, and the sort is stable
        rows.sort_by(|a, b| b.wins.cmp(&a.wins));
        rows.truncate(limit);
        rows
    }

    /// All rows in name order
    pub fn rows(&self) -> Vec<TeamWins> {
        self.teams
            .iter()
            .map(|(school, wins)| TeamWins { school: school.clone(), wins: *wins })
            .collect()
    }
}
