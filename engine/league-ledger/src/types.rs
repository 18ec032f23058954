use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{LedgerError, Result};

/// Picks costing at most this many wins count as low-cost
pub const DEFAULT_LOW_COST_THRESHOLD: f64 = 1.0;

fn default_low_cost_threshold() -> f64 {
    DEFAULT_LOW_COST_THRESHOLD
}

/// One program on an owner's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// Name shown in the report (e.g., "UNLV")
    pub team: String,

    /// School name on the stats page when it differs (e.g., "Nevada-Las Vegas")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<String>,

    /// Price paid for the pick, in wins
    pub cost: f64,
}

impl Pick {
    pub fn new(team: impl Into<String>, cost: f64) -> Self {
        Self { team: team.into(), lookup: None, cost }
    }

    pub fn with_lookup(mut self, lookup: impl Into<String>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }

    /// Name to look the pick up by in the wins table
    pub fn lookup_name(&self) -> &str {
        self.lookup.as_deref().unwrap_or(&self.team)
    }
}

/// A league participant and their roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Stable identifier (e.g., "owner-7")
    pub key: String,

    /// Display name (e.g., "John H")
    pub name: String,

    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// A season's owners and rosters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    /// Season year (the year the season ends in)
    pub season: u16,

    #[serde(default = "default_low_cost_threshold")]
    pub low_cost_threshold: f64,

    pub owners: Vec<Owner>,
}

impl League {
    /// Parse and validate a league from TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let league: League = toml::from_str(content)?;
        league.validate()?;
        Ok(league)
    }

    /// Load a league file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading league from: {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let league = Self::from_toml_str(&content)?;

        info!(
            "Loaded {} owners with {} picks for season {}",
            league.owners.len(),
            league.pick_count(),
            league.season
        );
        Ok(league)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate and write the league to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Check roster rules
    pub fn validate(&self) -> Result<()> {
        if self.owners.is_empty() {
            return Err(LedgerError::invalid("league has no owners"));
        }

        if !self.low_cost_threshold.is_finite() || self.low_cost_threshold < 0.0 {
            return Err(LedgerError::invalid(format!(
                "low_cost_threshold must be a non-negative number, got {}",
                self.low_cost_threshold
            )));
        }

        let mut keys = HashSet::new();
        for owner in &self.owners {
            if !keys.insert(owner.key.as_str()) {
                return Err(LedgerError::invalid(format!("duplicate owner key: {}", owner.key)));
            }
            if owner.name.trim().is_empty() {
                return Err(LedgerError::invalid(format!("owner {} has no name", owner.key)));
            }

            for pick in &owner.picks {
                if pick.team.trim().is_empty() {
                    return Err(LedgerError::invalid(format!(
                        "owner {} has a pick with no team name",
                        owner.key
                    )));
                }
                if !pick.cost.is_finite() || pick.cost < 0.0 {
                    return Err(LedgerError::invalid(format!(
                        "pick {} of owner {} has invalid cost {}",
                        pick.team, owner.key, pick.cost
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn pick_count(&self) -> usize {
        self.owners.iter().map(|owner| owner.picks.len()).sum()
    }

    pub fn owner(&self, key: &str) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAGUE: &str = r#"
        season = 2026

        [[owners]]
        key = "owner-1"
        name = "Dollar General"
        picks = [
            { team = "Arizona", cost = 20 },
            { team = "Tennessee Martin", lookup = "Tennessee-Martin", cost = 5.5 },
        ]

        [[owners]]
        key = "owner-2"
        name = "E-3"
        picks = [
            { team = "Temple", cost = 0.5 },
        ]
    "#;

    #[test]
    fn test_parse_league() {
        let league = League::from_toml_str(LEAGUE).unwrap();

        assert_eq!(league.season, 2026);
        assert_eq!(league.low_cost_threshold, DEFAULT_LOW_COST_THRESHOLD);
        assert_eq!(league.owners.len(), 2);
        assert_eq!(league.pick_count(), 3);

        let owner = league.owner("owner-1").unwrap();
        assert_eq!(owner.name, "Dollar General");
        assert_eq!(owner.picks[0].cost, 20.0);
        assert_eq!(owner.picks[0].lookup_name(), "Arizona");
        assert_eq!(owner.picks[1].lookup_name(), "Tennessee-Martin");
        assert!(league.owner("owner-9").is_none());
    }

    #[test]
    fn test_duplicate_owner_key_is_rejected() {
        let content = LEAGUE.replace("owner-2", "owner-1");
        let err = League::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(ref msg) if msg.contains("owner-1")));
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let content = LEAGUE.replace("cost = 0.5", "cost = -0.5");
        assert!(matches!(League::from_toml_str(&content), Err(LedgerError::Invalid(_))));
    }

    #[test]
    fn test_empty_owner_name_is_rejected() {
        let content = LEAGUE.replace("name = \"E-3\"", "name = \"  \"");
        let err = League::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(ref msg) if msg.contains("owner-2")));
    }

    #[test]
    fn test_non_finite_cost_is_rejected() {
        for cost in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut league = League::from_toml_str(LEAGUE).unwrap();
            league.owners[1].picks[0].cost = cost;

            let err = league.validate().unwrap_err();
            assert!(matches!(err, LedgerError::Invalid(ref msg) if msg.contains("Temple")));
        }
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let content = format!("low_cost_threshold = -1.0\n{LEAGUE}");
        let err = League::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(ref msg) if msg.contains("low_cost_threshold")));

        let mut league = League::from_toml_str(LEAGUE).unwrap();
        league.low_cost_threshold = f64::NAN;
        assert!(league.validate().is_err());
    }

    #[test]
    fn test_empty_league_is_rejected() {
        let err = League::from_toml_str("season = 2026\nowners = []").unwrap_err();
        assert!(matches!(err, LedgerError::Invalid(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = League::from_toml_str("season = \"soon\"").unwrap_err();
        assert!(matches!(err, LedgerError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let league = League::from_toml_str(LEAGUE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leagues").join("league.toml");

        league.save(&path).unwrap();
        let loaded = League::load(&path).unwrap();

        assert_eq!(loaded, league);
    }

    #[test]
    fn test_shipped_league_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/league-2026.toml");
        let league = League::load(path).unwrap();

        assert_eq!(league.season, 2026);
        assert_eq!(league.owners.len(), 19);
        assert!(league.owners.iter().all(|owner| owner.picks.len() == 10));

        let rick_dan = league.owner("owner-5").unwrap();
        let unlv = rick_dan.picks.iter().find(|pick| pick.team == "UNLV").unwrap();
        assert_eq!(unlv.lookup_name(), "Nevada-Las Vegas");
    }
}
