//! League Ledger - Owner rosters and season standings
//!
//! Owners hold rosters of college basketball programs, each bought at a cost
//! measured in wins. Scoring joins the rosters with a scraped wins table to
//! produce owner totals, places and the per-pick value leaderboards.

pub mod error;
pub mod standings;
pub mod types;

pub use error::{LedgerError, Result};
pub use standings::{score, OwnerStanding, Place, ScoredPick, Standings, WinsLookup, TOP_N};
pub use types::{League, Owner, Pick, DEFAULT_LOW_COST_THRESHOLD};
