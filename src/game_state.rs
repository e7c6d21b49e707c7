use crate::difficulty::Difficulty;
use crate::error::{LeaderboardError, Result, WordBankError};
use crate::leaderboard::{Leaderboard, ScoreRecord};
use crate::notifier::{Notifier, Silent, SoundEvent};
use crate::session::{GameSession, GameStatus, GuessOutcome};
use crate::wordbank::{WordSource, choose_word};
use crate::{debug_log, info_log};
use rand::Rng;

/// What the player picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Difficulty),
    ShowLeaderboard,
}

/// Everything the game needs from whoever is talking to the player.
///
/// Methods returning `Option` yield `None` when the player is gone (input
/// closed or an explicit quit); the game then wraps up as if replay had been
/// declined.
pub trait GameInterface {
    fn choose_menu(&mut self) -> Option<MenuChoice>;
    fn display_leaderboard(&mut self, records: &[ScoreRecord]);
    /// Waits until the player is done reading the screen.
    fn acknowledge(&mut self);
    fn display_session(&mut self, session: &GameSession, last: Option<&GuessOutcome>);
    fn read_guess(&mut self) -> Option<String>;
    fn display_outcome(&mut self, session: &GameSession);
    fn read_player_name(&mut self) -> Option<String>;
    fn display_score_saved(&mut self, records: &[ScoreRecord]);
    fn display_save_error(&mut self, error: &LeaderboardError);
    fn confirm_replay(&mut self) -> bool;
    fn display_configuration_error(&mut self, error: &WordBankError);
    fn display_farewell(&mut self);
}

enum RoundEnd {
    Finished,
    Quit,
}

/// Drives rounds against a [`GameInterface`] until the player stops.
pub struct Game<R: Rng> {
    words: Box<dyn WordSource>,
    leaderboard: Leaderboard,
    notifier: Box<dyn Notifier>,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(words: Box<dyn WordSource>, leaderboard: Leaderboard, rng: R) -> Self {
        Self {
            words,
            leaderboard,
            notifier: Box::new(Silent),
            rng,
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Plays rounds until replay is declined, then shows the leaderboard.
    ///
    /// A word list that cannot be used is reported through the interface and
    /// returned as [`crate::error::GameError::Configuration`].
    pub fn run<I: GameInterface + ?Sized>(&mut self, ui: &mut I) -> Result<()> {
        loop {
            let Some(difficulty) = self.select_difficulty(ui) else {
                break;
            };
            match self.play_round(ui, difficulty) {
                Ok(RoundEnd::Finished) => {}
                Ok(RoundEnd::Quit) => break,
                Err(e) => {
                    log::error!("{e}");
                    ui.display_configuration_error(&e);
                    return Err(e.into());
                }
            }
            if !ui.confirm_replay() {
                break;
            }
        }

        ui.display_leaderboard(&self.leaderboard.load());
        ui.display_farewell();
        info_log!("Game finished");
        Ok(())
    }

    fn select_difficulty<I: GameInterface + ?Sized>(&self, ui: &mut I) -> Option<Difficulty> {
        loop {
            match ui.choose_menu()? {
                MenuChoice::Play(difficulty) => return Some(difficulty),
                MenuChoice::ShowLeaderboard => {
                    ui.display_leaderboard(&self.leaderboard.load());
                    ui.acknowledge();
                }
            }
        }
    }

    fn play_round<I: GameInterface + ?Sized>(
        &mut self,
        ui: &mut I,
        difficulty: Difficulty,
    ) -> std::result::Result<RoundEnd, WordBankError> {
        let entry = choose_word(self.words.as_ref(), difficulty, &mut self.rng)?;
        let mut session = GameSession::new(entry, difficulty);
        let mut last: Option<GuessOutcome> = None;

        while !session.status().is_terminal() {
            ui.display_session(&session, last.as_ref());
            let Some(input) = ui.read_guess() else {
                info_log!("Player left mid-round");
                return Ok(RoundEnd::Quit);
            };
            let outcome = session.guess(&input);
            match outcome {
                GuessOutcome::Correct(_) => self.notifier.notify(SoundEvent::Correct),
                GuessOutcome::Wrong(_) => self.notifier.notify(SoundEvent::Wrong),
                GuessOutcome::Rejected(ref reason) => {
                    debug_log!("Guess rejected: {:?}", reason);
                }
            }
            last = Some(outcome);
        }

        ui.display_session(&session, last.as_ref());
        ui.display_outcome(&session);

        match session.status() {
            GameStatus::Won => {
                self.notifier.notify(SoundEvent::Win);
                let Some(name) = ui.read_player_name() else {
                    return Ok(RoundEnd::Quit);
                };
                self.record_win(ui, &session, name.trim());
            }
            GameStatus::Lost => self.notifier.notify(SoundEvent::Lose),
            GameStatus::InProgress => {}
        }
        Ok(RoundEnd::Finished)
    }

    fn record_win<I: GameInterface + ?Sized>(&self, ui: &mut I, session: &GameSession, name: &str) {
        if name.is_empty() {
            return;
        }
        let record = ScoreRecord::new(name, session.score(), session.difficulty());
        match self.leaderboard.append(record) {
            Ok(records) => ui.display_score_saved(&records),
            Err(e) => {
                log::error!("Failed to save score: {e}");
                ui.display_save_error(&e);
            }
        }
    }
}
