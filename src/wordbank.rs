use crate::debug_log;
use crate::difficulty::Difficulty;
use crate::error::WordBankError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EMBEDDED_EASY: &str = include_str!("resources/words/easy.json");
pub const EMBEDDED_MEDIUM: &str = include_str!("resources/words/medium.json");
pub const EMBEDDED_HARD: &str = include_str!("resources/words/hard.json");

/// A word to guess and the hint shown alongside it.
///
/// The word is stored uppercase and holds only alphabetic characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    hint: String,
}

impl WordEntry {
    /// Returns `None` when `word` is empty or contains anything but letters.
    pub fn new(word: &str, hint: impl Into<String>) -> Option<Self> {
        let word = word.trim().to_uppercase();
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return None;
        }
        Some(Self {
            word,
            hint: hint.into(),
        })
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

#[derive(Deserialize)]
struct RawEntry {
    word: String,
    hint: String,
}

/// Where word lists come from.
pub trait WordSource {
    fn load_words(&self, difficulty: Difficulty) -> Result<Vec<WordEntry>, WordBankError>;
}

/// Word lists compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWordSource;

impl WordSource for EmbeddedWordSource {
    fn load_words(&self, difficulty: Difficulty) -> Result<Vec<WordEntry>, WordBankError> {
        let data = match difficulty {
            Difficulty::Easy => EMBEDDED_EASY,
            Difficulty::Medium => EMBEDDED_MEDIUM,
            Difficulty::Hard => EMBEDDED_HARD,
        };
        load_words_from_str(data, difficulty)
    }
}

/// Word lists read from `<dir>/<difficulty>.json` on every load.
#[derive(Debug, Clone)]
pub struct DirWordSource {
    dir: PathBuf,
}

impl DirWordSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path_for(&self, difficulty: Difficulty) -> PathBuf {
        self.dir.join(format!("{}.json", difficulty.label()))
    }
}

impl WordSource for DirWordSource {
    fn load_words(&self, difficulty: Difficulty) -> Result<Vec<WordEntry>, WordBankError> {
        load_words_from_file(self.path_for(difficulty), difficulty)
    }
}

/// Parses a JSON array of `{"word": .., "hint": ..}` objects.
///
/// Extra fields are ignored. Any entry whose word is empty or not purely
/// alphabetic makes the whole list invalid.
pub fn load_words_from_str(
    data: &str,
    difficulty: Difficulty,
) -> Result<Vec<WordEntry>, WordBankError> {
    let raw: Vec<RawEntry> =
        serde_json::from_str(data).map_err(|e| WordBankError::InvalidFormat {
            tier: difficulty,
            reason: e.to_string(),
        })?;

    let band = difficulty.length_band();
    let mut entries = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        let Some(entry) = WordEntry::new(&item.word, item.hint) else {
            return Err(WordBankError::InvalidFormat {
                tier: difficulty,
                reason: format!("entry {index} has unusable word '{}'", item.word),
            });
        };
        if !band.contains(&entry.word.chars().count()) {
            log::warn!(
                "'{}' does not fit the {difficulty} length band {:?}",
                entry.word,
                band
            );
        }
        entries.push(entry);
    }
    debug_log!("Loaded {} {} words", entries.len(), difficulty);
    Ok(entries)
}

pub fn load_words_from_file<P: AsRef<Path>>(
    path: P,
    difficulty: Difficulty,
) -> Result<Vec<WordEntry>, WordBankError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => WordBankError::NotFound {
            tier: difficulty,
            path: path.to_path_buf(),
        },
        _ => WordBankError::InvalidFormat {
            tier: difficulty,
            reason: format!("could not read '{}': {e}", path.display()),
        },
    })?;
    load_words_from_str(&data, difficulty)
}

/// Picks one entry uniformly at random, `None` when there is nothing to pick.
pub fn pick_random<'a, R: Rng + ?Sized>(
    entries: &'a [WordEntry],
    rng: &mut R,
) -> Option<&'a WordEntry> {
    entries.choose(rng)
}

/// Loads the list for `difficulty` and picks a word from it.
///
/// An empty list is a configuration error like a missing one.
pub fn choose_word<S, R>(
    source: &S,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<WordEntry, WordBankError>
where
    S: WordSource + ?Sized,
    R: Rng + ?Sized,
{
    let entries = source.load_words(difficulty)?;
    pick_random(&entries, rng)
        .cloned()
        .ok_or(WordBankError::Empty(difficulty))
}
