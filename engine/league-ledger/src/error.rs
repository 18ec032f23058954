//! Error types for the league ledger

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// League file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("League file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("League serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// League parsed but breaks a roster rule
    #[error("Invalid league: {0}")]
    Invalid(String),
}

impl LedgerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
