//! High-score persistence.
//!
//! The file is re-read on every operation and rewritten as a whole snapshot
//! on every append. Reading is tolerant: a missing or unreadable file is an
//! empty leaderboard. Writing is strict: failures are returned to the caller.
//! Snapshots are staged in a sibling `.tmp` file and renamed into place.
//! Nothing guards against another process writing the same file.

use crate::difficulty::Difficulty;
use crate::error::LeaderboardError;
use crate::info_log;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_ENTRIES: usize = 10;
pub const SCORES_FILE: &str = "highscores.json";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One finished, won round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    #[serde(rename = "date")]
    pub timestamp: String,
}

impl ScoreRecord {
    /// Creates a record stamped with the current local time.
    pub fn new(name: impl Into<String>, score: u32, difficulty: Difficulty) -> Self {
        Self::with_timestamp(
            name,
            score,
            difficulty,
            Local::now().format(TIMESTAMP_FORMAT).to_string(),
        )
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        score: u32,
        difficulty: Difficulty,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score,
            difficulty,
            timestamp: timestamp.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    /// Leaderboard stored under the user's local data directory, or in the
    /// working directory when there is none.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: default_scores_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records sorted best first, at most [`MAX_ENTRIES`]. Never fails.
    #[must_use]
    pub fn load(&self) -> Vec<ScoreRecord> {
        let Ok(bytes) = fs::read(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_slice::<Vec<ScoreRecord>>(&bytes) {
            Ok(mut records) => {
                rank(&mut records);
                records
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable leaderboard '{}': {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Adds `record`, keeps the best [`MAX_ENTRIES`], and writes the result.
    ///
    /// Equal scores keep their existing order, so an older record stays ahead
    /// of a newer one with the same score. Returns the saved records.
    pub fn append(&self, record: ScoreRecord) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let mut records = self.load();
        records.push(record);
        rank(&mut records);
        self.save(&records)?;
        info_log!("Saved {} leaderboard entries", records.len());
        Ok(records)
    }

    fn save(&self, records: &[ScoreRecord]) -> Result<(), LeaderboardError> {
        let io_error = |source| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let data = serde_json::to_vec_pretty(records)?;

        // The target is only ever replaced whole
        let staging = self.staging_path();
        fs::write(&staging, data).map_err(io_error)?;
        fs::rename(&staging, &self.path).map_err(|source| {
            if let Err(e) = fs::remove_file(&staging) {
                log::debug!("Failed to remove '{}': {e}", staging.display());
            }
            io_error(source)
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| SCORES_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort best first, then cap at [`MAX_ENTRIES`].
fn rank(records: &mut Vec<ScoreRecord>) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(MAX_ENTRIES);
}

#[must_use]
pub fn default_scores_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("hangman").join(SCORES_FILE))
        .unwrap_or_else(|| PathBuf::from(SCORES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, score: u32) -> ScoreRecord {
        ScoreRecord::with_timestamp(name, score, Difficulty::Easy, "2024-01-01 12:00")
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let board = Leaderboard::with_path(dir.path().join("missing.json"));
        assert!(board.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "[{\"name\": \"broken\"").unwrap();
        assert!(Leaderboard::with_path(&path).load().is_empty());

        fs::write(&path, "{\"not\": \"a list\"}").unwrap();
        assert!(Leaderboard::with_path(&path).load().is_empty());
    }

    #[test]
    fn test_append_creates_file_and_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let board = Leaderboard::with_path(&path);

        let saved = board.append(record("ada", 40)).unwrap();
        assert_eq!(saved, vec![record("ada", 40)]);
        assert!(path.exists());
        assert_eq!(board.load(), saved);
    }

    #[test]
    fn test_append_sorts_descending() {
        let dir = tempdir().unwrap();
        let board = Leaderboard::with_path(dir.path().join("scores.json"));
        board.append(record("low", 10)).unwrap();
        board.append(record("high", 90)).unwrap();
        board.append(record("mid", 50)).unwrap();

        let names: Vec<String> = board.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_append_keeps_top_ten() {
        let dir = tempdir().unwrap();
        let board = Leaderboard::with_path(dir.path().join("scores.json"));
        for i in 0..11u32 {
            board.append(record(&format!("p{i}"), 200 - i * 10)).unwrap();
        }

        let loaded = board.load();
        assert_eq!(loaded.len(), MAX_ENTRIES);
        let scores: Vec<u32> = loaded.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![200, 190, 180, 170, 160, 150, 140, 130, 120, 110]);
        assert!(loaded.iter().all(|r| r.name != "p10"));
    }

    #[test]
    fn test_append_is_stable_on_ties() {
        let dir = tempdir().unwrap();
        let board = Leaderboard::with_path(dir.path().join("scores.json"));
        board.append(record("first", 50)).unwrap();
        board.append(record("second", 50)).unwrap();
        board.append(record("third", 50)).unwrap();

        let names: Vec<String> = board.load().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_over_corrupt_file_starts_fresh() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "garbage").unwrap();
        let board = Leaderboard::with_path(&path);

        let saved = board.append(record("ada", 30)).unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_append_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        // A directory cannot be replaced by a file
        let path = dir.path().join("scores.json");
        fs::create_dir(&path).unwrap();
        let board = Leaderboard::with_path(&path);

        let err = board.append(record("ada", 30)).unwrap_err();
        assert!(matches!(err, LeaderboardError::Io { .. }));
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_append_replaces_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let board = Leaderboard::with_path(&path);
        board.append(record("ada", 30)).unwrap();
        board.append(record("bob", 60)).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("scores.json")]);
        assert_eq!(board.load(), vec![record("bob", 60), record("ada", 30)]);
    }

    #[test]
    fn test_load_ranks_hand_edited_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let unordered: Vec<ScoreRecord> =
            (1..=12u32).map(|i| record(&format!("p{i}"), i)).collect();
        fs::write(&path, serde_json::to_vec(&unordered).unwrap()).unwrap();

        let loaded = Leaderboard::with_path(&path).load();
        let scores: Vec<u32> = loaded.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![12, 11, 10, 9, 8, 7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_file_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let board = Leaderboard::with_path(&path);
        board
            .append(ScoreRecord::with_timestamp("ada", 75, Difficulty::Medium, "2024-05-06 07:08"))
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "name": "ada",
                "score": 75,
                "difficulty": "medium",
                "date": "2024-05-06 07:08"
            }])
        );
    }

    #[test]
    fn test_new_record_timestamp_format() {
        let r = ScoreRecord::new("ada", 10, Difficulty::Hard);
        // e.g. 2024-05-06 07:08
        assert_eq!(r.timestamp.len(), 16);
        assert_eq!(&r.timestamp[4..5], "-");
        assert_eq!(&r.timestamp[10..11], " ");
        assert_eq!(&r.timestamp[13..14], ":");
    }
}
