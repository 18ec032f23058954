//! Turn-based team draft

use league_ledger::{League, Owner, Pick, DEFAULT_LOW_COST_THRESHOLD};
use thiserror::Error;
use wins_scraper::TeamWins;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("The draft is already complete")]
    Complete,

    #[error("'{0}' is not an available team")]
    Unavailable(String),

    #[error("A draft needs at least one owner and one round")]
    Empty,

    #[error(
        "Not enough teams: {owners} owners x {rounds} rounds needs {needed}, \
         only {available} available"
    )]
    NotEnoughTeams { owners: usize, rounds: usize, needed: usize, available: usize },
}

/// Owners pick in the same order every round until each has `rounds` teams
#[derive(Debug)]
pub struct Draft {
    owners: Vec<String>,
    rosters: Vec<Vec<TeamWins>>,
    available: Vec<TeamWins>,
    rounds: usize,
    turn: usize,
}

impl Draft {
    pub fn new(
        owners: Vec<String>,
        teams: Vec<TeamWins>,
        rounds: usize,
    ) -> Result<Self, DraftError> {
        if owners.is_empty() || rounds == 0 {
            return Err(DraftError::Empty);
        }

        let needed = owners.len() * rounds;
        if teams.len() < needed {
            return Err(DraftError::NotEnoughTeams {
                owners: owners.len(),
                rounds,
                needed,
                available: teams.len(),
            });
        }

        let rosters = vec![Vec::new(); owners.len()];
        Ok(Self { owners, rosters, available: teams, rounds, turn: 0 })
    }

    pub fn is_complete(&self) -> bool {
        self.turn >= self.owners.len() * self.rounds
    }

    /// 1-based round of the next pick
    pub fn round(&self) -> usize {
        self.turn / self.owners.len() + 1
    }

    /// Owner whose turn it is, or None once the draft is over
    pub fn current_owner(&self) -> Option<&str> {
        if self.is_complete() {
            return None;
        }
        Some(&self.owners[self.turn % self.owners.len()])
    }

    pub fn available(&self) -> &[TeamWins] {
        &self.available
    }

    /// Take a team for the current owner. Names match case-insensitively.
    pub fn pick(&mut self, choice: &str) -> Result<&TeamWins, DraftError> {
        if self.is_complete() {
            return Err(DraftError::Complete);
        }

        let choice = choice.trim();
        let index = self
            .available
            .iter()
            .position(|team| team.school.eq_ignore_ascii_case(choice))
            .ok_or_else(|| DraftError::Unavailable(choice.to_string()))?;

        let owner_index = self.turn % self.owners.len();
        let team = self.available.remove(index);
        self.rosters[owner_index].push(team);
        self.turn += 1;

        Ok(&self.rosters[owner_index][self.rosters[owner_index].len() - 1])
    }

    pub fn roster(&self, owner: &str) -> Option<&[TeamWins]> {
        let index = self.owners.iter().position(|name| name == owner)?;
        Some(&self.rosters[index])
    }

    /// Current win total per owner, in draft order
    pub fn totals(&self) -> Vec<(&str, u32)> {
        self.owners
            .iter()
            .zip(&self.rosters)
            .map(|(owner, roster)| (owner.as_str(), roster.iter().map(|team| team.wins).sum()))
            .collect()
    }

    /// Owner with the most wins so far; the earliest owner wins ties
    pub fn leader(&self) -> Option<(&str, u32)> {
        self.totals().into_iter().fold(None, |best, (owner, wins)| match best {
            Some((_, best_wins)) if best_wins >= wins => best,
            _ => Some((owner, wins)),
        })
    }

    /// League file for the drafted rosters. Costs start at zero for the operator to fill in.
    pub fn into_league(self, season: u16) -> League {
        let owners = self
            .owners
            .into_iter()
            .zip(self.rosters)
            .enumerate()
            .map(|(index, (name, roster))| Owner {
                key: format!("owner-{}", index + 1),
                name,
                picks: roster.into_iter().map(|team| Pick::new(team.school, 0.0)).collect(),
            })
            .collect();

        League { season, low_cost_threshold: DEFAULT_LOW_COST_THRESHOLD, owners }
    }
}
