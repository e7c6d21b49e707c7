// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod difficulty;
pub mod error;
pub mod gallows;
pub mod game_state;
pub mod leaderboard;
pub mod logging;
pub mod notifier;
pub mod scoring;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::Difficulty;
pub use error::{GameError, LeaderboardError, WordBankError};
pub use game_state::{Game, GameInterface, MenuChoice};
pub use leaderboard::{Leaderboard, ScoreRecord};
pub use scoring::compute_score;
pub use session::{GameSession, GameStatus, GuessOutcome, Rejection};
pub use wordbank::{
    DirWordSource, EmbeddedWordSource, WordEntry, WordSource, load_words_from_file,
    load_words_from_str, pick_random,
};
