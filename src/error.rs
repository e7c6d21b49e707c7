//! Error types shared across the game.
//!
//! Word-list problems are configuration errors and end the run. Leaderboard
//! write failures are reported to the player but never abort a round.
//! Rejected guesses are not errors at all, see [`crate::session::Rejection`].

use crate::difficulty::Difficulty;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a usable word list for a tier.
#[derive(Debug, Error)]
pub enum WordBankError {
    /// No word data exists for the requested tier.
    #[error("word list for {tier} not found at '{}'", .path.display())]
    NotFound { tier: Difficulty, path: PathBuf },

    /// The word data exists but could not be understood.
    #[error("word list for {tier} is not valid: {reason}")]
    InvalidFormat { tier: Difficulty, reason: String },

    /// The word data parsed but holds no entries to pick from.
    #[error("word list for {0} is empty")]
    Empty(Difficulty),
}

/// Failure to persist the leaderboard.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("could not write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors that end a game run.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Configuration(#[from] WordBankError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl GameError {
    /// Whether the interface already showed this error to the player.
    #[must_use]
    pub fn shown_to_player(&self) -> bool {
        matches!(self, GameError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
