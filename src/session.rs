//! A single round of hangman.
//!
//! `GameSession` owns the hidden word and the letters guessed so far. The
//! masked word, error count and score are all derived from that state on
//! demand, so they can never drift apart.

use crate::difficulty::Difficulty;
use crate::scoring::compute_score;
use crate::wordbank::WordEntry;
use crate::{debug_log, info_log};
use std::collections::BTreeSet;

pub const MAX_ERRORS: usize = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Why a guess was ignored. The session is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Input was not exactly one letter.
    NotALetter(String),
    AlreadyGuessed(char),
    /// The round is already won or lost.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct(char),
    Wrong(char),
    Rejected(Rejection),
}

impl GuessOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    word: String,
    hint: String,
    difficulty: Difficulty,
    guessed: BTreeSet<char>,
    wrong: BTreeSet<char>,
    status: GameStatus,
}

impl GameSession {
    pub fn new(entry: WordEntry, difficulty: Difficulty) -> Self {
        info_log!("New {} session, {} letters", difficulty, entry.word().chars().count());
        Self {
            word: entry.word().to_string(),
            hint: entry.hint().to_string(),
            difficulty,
            guessed: BTreeSet::new(),
            wrong: BTreeSet::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Applies one guess and reports what happened.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        if self.status.is_terminal() {
            return GuessOutcome::Rejected(Rejection::GameOver);
        }
        let letter = match normalize_guess(input) {
            Ok(letter) => letter,
            Err(rejection) => return GuessOutcome::Rejected(rejection),
        };
        if !self.guessed.insert(letter) {
            return GuessOutcome::Rejected(Rejection::AlreadyGuessed(letter));
        }

        if self.word.contains(letter) {
            if self.is_revealed() {
                self.status = GameStatus::Won;
            }
            debug_log!("Guess {} correct, status {:?}", letter, self.status);
            GuessOutcome::Correct(letter)
        } else {
            self.wrong.insert(letter);
            if self.wrong.len() >= MAX_ERRORS {
                self.status = GameStatus::Lost;
            }
            debug_log!("Guess {} wrong, {} errors", letter, self.wrong.len());
            GuessOutcome::Wrong(letter)
        }
    }

    /// The word with unguessed letters replaced by [`PLACEHOLDER`].
    #[must_use]
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { PLACEHOLDER })
            .collect()
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.word.chars().all(|c| self.guessed.contains(&c))
    }

    #[must_use]
    pub fn errors(&self) -> usize {
        self.wrong.len()
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        MAX_ERRORS.saturating_sub(self.errors())
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        compute_score(self.word.chars().count(), self.errors(), self.difficulty)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Wrong letters in alphabetical order.
    pub fn wrong_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.wrong.iter().copied()
    }

    pub fn guessed_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed.iter().copied()
    }
}

/// Accepts exactly one alphabetic character and returns it uppercased.
fn normalize_guess(input: &str) -> Result<char, Rejection> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(Rejection::NotALetter(trimmed.to_string()));
    };
    if !c.is_alphabetic() {
        return Err(Rejection::NotALetter(trimmed.to_string()));
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Ok(u),
        _ => Err(Rejection::NotALetter(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn session(word: &str) -> GameSession {
        GameSession::new(WordEntry::new(word, "hint").unwrap(), Difficulty::Easy)
    }

    #[test]
    fn test_new_session_is_masked() {
        let s = session("cat");
        assert_eq!(s.status(), GameStatus::InProgress);
        assert_eq!(s.masked_word(), "___");
        assert_eq!(s.errors(), 0);
        assert_eq!(s.remaining_attempts(), MAX_ERRORS);
        assert_eq!(s.guessed_letters().count(), 0);
    }

    #[test]
    fn test_correct_guess_reveals_all_positions() {
        let mut s = session("banana");
        assert_eq!(s.guess("a"), GuessOutcome::Correct('A'));
        assert_eq!(s.masked_word(), "_A_A_A");
        assert_eq!(s.guess("N"), GuessOutcome::Correct('N'));
        assert_eq!(s.masked_word(), "_ANANA");
        assert_eq!(s.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_wrong_guess_counts_error() {
        let mut s = session("cat");
        assert_eq!(s.guess("z"), GuessOutcome::Wrong('Z'));
        assert_eq!(s.errors(), 1);
        assert_eq!(s.remaining_attempts(), 5);
        assert_eq!(s.wrong_letters().collect::<Vec<_>>(), vec!['Z']);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let mut s = session("cat");
        assert_eq!(s.guess(""), GuessOutcome::Rejected(Rejection::NotALetter(String::new())));
        assert_eq!(s.guess("ab"), GuessOutcome::Rejected(Rejection::NotALetter("ab".into())));
        assert_eq!(s.guess("7"), GuessOutcome::Rejected(Rejection::NotALetter("7".into())));
        assert_eq!(s.guess("?"), GuessOutcome::Rejected(Rejection::NotALetter("?".into())));
        assert_eq!(s.errors(), 0);
        assert_eq!(s.guessed_letters().count(), 0);
    }

    #[test]
    fn test_whitespace_around_letter_is_trimmed() {
        let mut s = session("cat");
        assert_eq!(s.guess("  c \n"), GuessOutcome::Correct('C'));
    }

    #[test]
    fn test_repeated_guess_is_noop() {
        let mut s = session("cat");
        s.guess("x");
        s.guess("c");
        let masked = s.masked_word();

        assert_eq!(s.guess("X"), GuessOutcome::Rejected(Rejection::AlreadyGuessed('X')));
        assert_eq!(s.guess("c"), GuessOutcome::Rejected(Rejection::AlreadyGuessed('C')));
        assert_eq!(s.errors(), 1);
        assert_eq!(s.masked_word(), masked);
        assert_eq!(s.guessed_letters().count(), 2);
    }

    #[test]
    fn test_cat_is_won_without_errors() {
        let mut s = session("CAT");
        s.guess("C");
        assert_eq!(s.masked_word(), "C__");
        s.guess("A");
        assert_eq!(s.masked_word(), "CA_");
        assert_eq!(s.status(), GameStatus::InProgress);
        s.guess("T");
        assert_eq!(s.masked_word(), "CAT");
        assert_eq!(s.status(), GameStatus::Won);
        assert_eq!(s.errors(), 0);
        assert_eq!(s.score(), compute_score(3, 0, Difficulty::Easy));
    }

    #[test]
    fn test_dog_is_lost_after_six_misses() {
        let mut s = session("DOG");
        for letter in ["X", "Q", "Z", "J", "V"] {
            s.guess(letter);
            assert_eq!(s.status(), GameStatus::InProgress);
        }
        s.guess("K");
        assert_eq!(s.status(), GameStatus::Lost);
        assert_eq!(s.errors(), MAX_ERRORS);
        assert_eq!(s.remaining_attempts(), 0);
        assert_eq!(s.masked_word(), "___");
    }

    #[test]
    fn test_terminal_session_ignores_guesses() {
        let mut s = session("DOG");
        for letter in ["X", "Q", "Z", "J", "V", "K"] {
            s.guess(letter);
        }
        assert_eq!(s.guess("D"), GuessOutcome::Rejected(Rejection::GameOver));
        assert_eq!(s.masked_word(), "___");
        assert_eq!(s.errors(), MAX_ERRORS);
    }

    #[test]
    fn test_score_tracks_errors() {
        let entry = WordEntry::new("hello", "greeting").unwrap();
        let mut s = GameSession::new(entry, Difficulty::Medium);
        assert_eq!(s.score(), 75);
        s.guess("z");
        s.guess("q");
        assert_eq!(s.score(), 65);
    }

    #[test]
    fn test_random_guess_sequences_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let words = ["CAT", "BANANA", "MISSISSIPPI", "RHYTHM", "QUIZ"];

        for round in 0..200 {
            let word = words[round % words.len()];
            let mut s = session(word);
            let mut previous_guessed = 0;

            for _ in 0..40 {
                let letter = char::from(b'A' + rng.gen_range(0..26u8));
                let was_guessed = s.guessed_letters().any(|g| g == letter);
                let before = (s.masked_word(), s.errors(), s.status());

                let outcome = s.guess(&letter.to_string());

                assert_eq!(s.errors(), s.wrong_letters().count());
                assert!(s.errors() <= MAX_ERRORS);
                assert!(s.wrong_letters().all(|w| s.guessed_letters().any(|g| g == w)));
                let guessed = s.guessed_letters().count();
                assert!(guessed >= previous_guessed);
                previous_guessed = guessed;

                if was_guessed || before.2.is_terminal() {
                    assert!(!outcome.is_accepted());
                    assert_eq!((s.masked_word(), s.errors(), s.status()), before);
                }

                match s.status() {
                    GameStatus::Won => {
                        assert!(s.is_revealed());
                        assert!(s.errors() < MAX_ERRORS);
                    }
                    GameStatus::Lost => {
                        assert_eq!(s.errors(), MAX_ERRORS);
                        assert!(!s.is_revealed());
                    }
                    GameStatus::InProgress => {
                        assert!(!s.is_revealed());
                        assert!(s.errors() < MAX_ERRORS);
                    }
                }
            }
        }
    }
}
