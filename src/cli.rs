use crate::difficulty::Difficulty;
use crate::error::{LeaderboardError, WordBankError};
use crate::game_state::{GameInterface, MenuChoice};
use crate::gallows::{self, Danger};
use crate::leaderboard::ScoreRecord;
use crate::session::{GameSession, GameStatus, GuessOutcome, Rejection};
use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Stylize, style};
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const WIDE_RULE: usize = 60;
const RULE: usize = 50;

/// Hangman in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding easy.json, medium.json and hard.json word lists
    #[arg(short = 'w', long = "words")]
    pub words_dir: Option<PathBuf>,

    /// Leaderboard file (defaults to the user data directory)
    #[arg(short = 's', long = "scores")]
    pub scores_path: Option<PathBuf>,

    /// Seed for word selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Disable the terminal bell
    #[arg(long)]
    pub mute: bool,

    /// Use the full-screen interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Presentation capabilities, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub colors: bool,
    pub clear_screen: bool,
}

impl RenderConfig {
    /// Colors and screen clearing only when stdout is a terminal.
    #[must_use]
    pub fn detect(no_color: bool) -> Self {
        let tty = io::stdout().is_tty();
        Self {
            colors: tty && !no_color,
            clear_screen: tty,
        }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self {
            colors: false,
            clear_screen: false,
        }
    }
}

/// Line-based interface over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    out: W,
    config: RenderConfig,
}

impl<R: BufRead> CliInterface<R, io::Stdout> {
    pub fn new(reader: R, config: RenderConfig) -> Self {
        Self::with_writer(reader, io::stdout(), config)
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, out: W, config: RenderConfig) -> Self {
        Self {
            reader,
            out,
            config,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn paint(&self, text: impl Display, color: Color) -> String {
        if self.config.colors {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_bold(&self, text: impl Display, color: Color) -> String {
        if self.config.colors {
            style(text).with(color).attribute(Attribute::Bold).to_string()
        } else {
            text.to_string()
        }
    }

    fn rule(&self, width: usize) -> String {
        self.paint("=".repeat(width), Color::Cyan)
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            log::warn!("Failed to write to terminal: {e}");
        }
    }

    fn clear(&mut self) {
        if !self.config.clear_screen {
            return;
        }
        if let Err(e) = queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)) {
            log::debug!("Failed to clear screen: {e}");
        }
    }

    /// One line of input without its line ending, `None` once input is closed.
    /// Bytes that are not UTF-8 are replaced, so such a line is still an answer.
    fn read_line(&mut self) -> Option<String> {
        let mut input = Vec::new();
        match self.reader.read_until(b'\n', &mut input) {
            Ok(0) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&input);
                Some(line.trim_end_matches(['\r', '\n']).to_string())
            }
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        let prompt = format!("\n{} ", self.paint(text, Color::Cyan));
        self.emit(&prompt);
        self.read_line()
    }

    fn banner(&self, title: &str) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.rule(RULE),
            self.paint_bold(format!("{title:^RULE$}"), Color::Yellow),
            self.rule(RULE)
        )
    }

    fn feedback(&self, last: &GuessOutcome) -> Option<String> {
        match last {
            GuessOutcome::Correct(letter) => Some(format!(
                "{} Letter '{letter}' is in the word!",
                self.paint_bold("✓ Correct!", Color::Green)
            )),
            GuessOutcome::Wrong(letter) => Some(format!(
                "{} Letter '{letter}' is not in the word.",
                self.paint_bold("✗ Wrong!", Color::Red)
            )),
            GuessOutcome::Rejected(Rejection::NotALetter(_)) => {
                Some(self.paint("Please enter a single letter.", Color::Yellow))
            }
            GuessOutcome::Rejected(Rejection::AlreadyGuessed(letter)) => Some(self.paint(
                format!("You already tried '{letter}'."),
                Color::Yellow,
            )),
            GuessOutcome::Rejected(Rejection::GameOver) => None,
        }
    }
}

fn spaced(word: &str) -> String {
    let chars: Vec<String> = word.chars().map(String::from).collect();
    chars.join(" ")
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn choose_menu(&mut self) -> Option<MenuChoice> {
        let mut screen = self.banner("WELCOME TO HANGMAN GAME!");
        screen.push_str("\nChoose difficulty level:\n");
        let colors = [Color::Green, Color::Yellow, Color::Red];
        for (i, (difficulty, color)) in Difficulty::ALL.iter().zip(colors).enumerate() {
            screen.push_str(&format!(
                "{} - {}\n",
                self.paint((i + 1).to_string(), color),
                difficulty.describe()
            ));
        }
        screen.push_str(&format!("{} - View High Scores\n", self.paint("4", Color::Cyan)));
        self.emit(&screen);

        loop {
            let choice = self.prompt("Enter 1, 2, 3, or 4:")?;
            let choice = choice.trim();
            if let Some(difficulty) = Difficulty::from_menu_choice(choice) {
                return Some(MenuChoice::Play(difficulty));
            }
            if choice == "4" {
                return Some(MenuChoice::ShowLeaderboard);
            }
            let msg = format!("{}\n", self.paint("Invalid option! Try again.", Color::Red));
            self.emit(&msg);
        }
    }

    fn display_leaderboard(&mut self, records: &[ScoreRecord]) {
        if records.is_empty() {
            let msg = format!(
                "\n{}\n",
                self.paint("📊 No high scores yet! Be the first!", Color::Yellow)
            );
            self.emit(&msg);
            return;
        }

        let wide = self.paint("=".repeat(WIDE_RULE), Color::Cyan);
        let mut screen = format!(
            "\n{wide}\n{}\n{wide}\n",
            self.paint_bold(format!("{:^WIDE_RULE$}", "🏆 HIGH SCORES 🏆"), Color::Yellow)
        );
        screen.push_str(&format!(
            "{:<6} {:<15} {:<10} {:<12} {:<16}\n",
            "Rank", "Name", "Score", "Difficulty", "Date"
        ));
        screen.push_str(&format!("{}\n", self.paint("-".repeat(WIDE_RULE), Color::Cyan)));
        for (i, record) in records.iter().enumerate() {
            let rank = i + 1;
            let rank_color = match rank {
                1 => Color::Yellow,
                2 | 3 => Color::DarkYellow,
                _ => Color::White,
            };
            screen.push_str(&format!(
                "{} {:<15} {} {:<12} {:<16}\n",
                self.paint(format!("{:<6}", format!("{rank}.")), rank_color),
                record.name,
                self.paint(format!("{:<10}", record.score), Color::Green),
                record.difficulty,
                record.timestamp
            ));
        }
        screen.push_str(&format!("{wide}\n"));
        self.emit(&screen);
    }

    fn acknowledge(&mut self) {
        self.prompt("Press Enter to continue...");
        self.clear();
    }

    fn display_session(&mut self, session: &GameSession, last: Option<&GuessOutcome>) {
        self.clear();
        let errors = session.errors();
        let drawing_color = match gallows::danger(errors) {
            Danger::Calm => Color::White,
            Danger::Warning => Color::Yellow,
            Danger::Critical => Color::Red,
        };

        let mut screen = self.banner("HANGMAN GAME");
        screen.push_str(&format!("{}\n", self.paint(gallows::stage(errors), drawing_color)));
        screen.push_str(&format!(
            "\n{} {}\n",
            self.paint("Hint:", Color::Cyan),
            session.hint()
        ));
        screen.push_str(&format!(
            "\n{} {}\n",
            self.paint_bold("Word:", Color::Yellow),
            spaced(&session.masked_word())
        ));
        if let Some(line) = last.and_then(|outcome| self.feedback(outcome)) {
            screen.push_str(&format!("\n{line}\n"));
        }

        let wrong: Vec<String> = session.wrong_letters().map(String::from).collect();
        let wrong = if wrong.is_empty() {
            "None".to_string()
        } else {
            wrong.join(", ")
        };
        screen.push_str(&format!("\n{} {wrong}\n", self.paint("Wrong letters:", Color::Red)));
        screen.push_str(&format!(
            "{} {}\n",
            self.paint("Attempts remaining:", Color::Green),
            self.paint_bold(session.remaining_attempts(), Color::Green)
        ));
        screen.push_str(&format!(
            "{} {}\n",
            self.paint("Current Score:", Color::Magenta),
            self.paint_bold(session.score(), Color::Yellow)
        ));
        screen.push_str(&format!("{}\n", self.rule(RULE)));
        self.emit(&screen);
    }

    fn read_guess(&mut self) -> Option<String> {
        self.prompt("Enter a letter:")
    }

    fn display_outcome(&mut self, session: &GameSession) {
        let text = match session.status() {
            GameStatus::Won => format!(
                "\n{}\n{}\n",
                self.paint_bold("🎉 CONGRATULATIONS! You won! 🎉", Color::Green),
                self.paint_bold(format!("Final Score: {}", session.score()), Color::Yellow)
            ),
            GameStatus::Lost => format!(
                "\n{}\n{}\n",
                self.paint_bold(
                    format!("💀 GAME OVER! The word was: {}", session.word()),
                    Color::Red
                ),
                self.paint(format!("Final Score: {}", session.score()), Color::Yellow)
            ),
            GameStatus::InProgress => return,
        };
        self.emit(&text);
    }

    fn read_player_name(&mut self) -> Option<String> {
        self.prompt("Enter your name for the leaderboard:")
    }

    fn display_score_saved(&mut self, _records: &[ScoreRecord]) {
        let msg = format!("{}\n", self.paint("Score saved!", Color::Green));
        self.emit(&msg);
    }

    fn display_save_error(&mut self, error: &LeaderboardError) {
        let msg = format!(
            "{}\n",
            self.paint(format!("Could not save your score: {error}"), Color::Red)
        );
        self.emit(&msg);
    }

    fn confirm_replay(&mut self) -> bool {
        let rule = format!("\n{}\n", self.rule(RULE));
        self.emit(&rule);
        self.prompt("Do you want to play again? (y/n):")
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"))
    }

    fn display_configuration_error(&mut self, error: &WordBankError) {
        let msg = format!(
            "\n{}\nMake sure the word lists are in the correct folder.\n",
            self.paint(format!("❌ Error: {error}"), Color::Red)
        );
        self.emit(&msg);
    }

    fn display_farewell(&mut self) {
        let msg = format!(
            "{}\n{}\n{}\n\n",
            self.rule(RULE),
            self.paint_bold(
                format!("{:^RULE$}", "Thanks for playing! See you next time! 👋"),
                Color::Yellow
            ),
            self.rule(RULE)
        );
        self.emit(&msg);
    }
}
