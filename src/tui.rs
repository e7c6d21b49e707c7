//! Full-screen interface built on Ratatui.
//!
//! `TuiInterface` implements [`GameInterface`] by keeping a snapshot of what
//! to show and redrawing it every time the game asks for input.
//!
//! # Screens
//! `Menu` → `Playing` → `Outcome` → (`NamePrompt`) → `Replay` → back to
//! `Menu`, with `Leaderboard`, `Error` and `Farewell` reachable from the
//! game loop.

use crate::cli::RenderConfig;
use crate::difficulty::Difficulty;
use crate::error::{LeaderboardError, WordBankError};
use crate::gallows::{self, Danger};
use crate::game_state::{GameInterface, MenuChoice};
use crate::leaderboard::ScoreRecord;
use crate::session::{GameSession, GameStatus, GuessOutcome, Rejection};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_NAME_LENGTH: usize = 15;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Playing,
    Outcome,
    NamePrompt,
    Replay,
    Leaderboard,
    Error,
    Farewell,
}

/// What the board shows, copied out of the session.
#[derive(Debug, Clone)]
struct Board {
    masked: String,
    hint: String,
    wrong: Vec<char>,
    errors: usize,
    remaining: usize,
    score: u32,
    difficulty: Difficulty,
    status: GameStatus,
    word: String,
}

impl Board {
    fn from_session(session: &GameSession) -> Self {
        Self {
            masked: session.masked_word(),
            hint: session.hint().to_string(),
            wrong: session.wrong_letters().collect(),
            errors: session.errors(),
            remaining: session.remaining_attempts(),
            score: session.score(),
            difficulty: session.difficulty(),
            status: session.status(),
            word: session.word().to_string(),
        }
    }
}

struct RenderContext<'a> {
    screen: Screen,
    board: Option<&'a Board>,
    records: &'a [ScoreRecord],
    input: &'a str,
    message: &'a str,
    error_message: &'a str,
    colors: bool,
}

impl RenderContext<'_> {
    fn style(&self, style: Style) -> Style {
        if self.colors { style } else { Style::new() }
    }
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    config: RenderConfig,
    screen: Screen,
    board: Option<Board>,
    records: Vec<ScoreRecord>,
    input: String,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new(config: RenderConfig) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            config,
            screen: Screen::Menu,
            board: None,
            records: Vec::new(),
            input: String::new(),
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            screen: self.screen,
            board: self.board.as_ref(),
            records: &self.records,
            input: &self.input,
            message: &self.message,
            error_message: &self.error_message,
            colors: self.config.colors,
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.draw_or_log();
    }

    /// Next key press. `None` on Esc, Ctrl+C, or a terminal error.
    fn next_key(&mut self) -> Option<KeyEvent> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Esc
                        || (key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c'))
                    {
                        info_log!("next_key() - Quit requested");
                        return None;
                    }
                    return Some(key);
                }
                Ok(Event::Resize(..)) => self.draw_or_log(),
                Ok(other) => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
                Err(e) => {
                    log::warn!("Failed to read terminal event: {e}");
                    return None;
                }
            }
        }
    }

    fn set_feedback(&mut self, last: Option<&GuessOutcome>) {
        self.error_message.clear();
        self.message = match last {
            Some(GuessOutcome::Correct(letter)) => format!("Correct! '{letter}' is in the word."),
            Some(GuessOutcome::Wrong(letter)) => format!("Wrong! '{letter}' is not in the word."),
            Some(GuessOutcome::Rejected(Rejection::AlreadyGuessed(letter))) => {
                format!("You already tried '{letter}'.")
            }
            Some(GuessOutcome::Rejected(Rejection::NotALetter(_))) => {
                "Please enter a single letter.".to_string()
            }
            Some(GuessOutcome::Rejected(Rejection::GameOver)) | None => String::new(),
        };
    }
}

impl GameInterface for TuiInterface {
    fn choose_menu(&mut self) -> Option<MenuChoice> {
        self.board = None;
        self.message.clear();
        self.error_message.clear();
        loop {
            self.show(Screen::Menu);
            let key = self.next_key()?;
            match key.code {
                KeyCode::Char('4') => return Some(MenuChoice::ShowLeaderboard),
                KeyCode::Char('q') => return None,
                KeyCode::Char(c) => {
                    if let Some(difficulty) = Difficulty::from_menu_choice(&c.to_string()) {
                        return Some(MenuChoice::Play(difficulty));
                    }
                    self.error_message = "Invalid option! Press 1, 2, 3 or 4.".to_string();
                }
                _ => {
                    debug_log!("choose_menu() - Ignoring key: {:?}", key.code);
                }
            }
        }
    }

    fn display_leaderboard(&mut self, records: &[ScoreRecord]) {
        self.records = records.to_vec();
        self.show(Screen::Leaderboard);
    }

    fn acknowledge(&mut self) {
        self.message = "Press any key to continue...".to_string();
        self.draw_or_log();
        self.next_key();
        self.message.clear();
    }

    fn display_session(&mut self, session: &GameSession, last: Option<&GuessOutcome>) {
        self.board = Some(Board::from_session(session));
        self.set_feedback(last);
        self.screen = Screen::Playing;
    }

    fn read_guess(&mut self) -> Option<String> {
        loop {
            self.show(Screen::Playing);
            let key = self.next_key()?;
            if let KeyCode::Char(c) = key.code {
                return Some(c.to_string());
            }
            debug_log!("read_guess() - Ignoring key: {:?}", key.code);
        }
    }

    fn display_outcome(&mut self, session: &GameSession) {
        self.board = Some(Board::from_session(session));
        self.message = match session.status() {
            GameStatus::Won => {
                format!("CONGRATULATIONS! You won! Final score: {}", session.score())
            }
            GameStatus::Lost => format!(
                "GAME OVER! The word was {}. Final score: {}",
                session.word(),
                session.score()
            ),
            GameStatus::InProgress => String::new(),
        };
        self.show(Screen::Outcome);
    }

    fn read_player_name(&mut self) -> Option<String> {
        self.input.clear();
        loop {
            self.show(Screen::NamePrompt);
            let key = self.next_key()?;
            match key.code {
                KeyCode::Enter => return Some(std::mem::take(&mut self.input)),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) if self.input.chars().count() < MAX_NAME_LENGTH => {
                    self.input.push(c);
                }
                _ => {
                    debug_log!("read_player_name() - Ignoring key: {:?}", key.code);
                }
            }
        }
    }

    fn display_score_saved(&mut self, _records: &[ScoreRecord]) {
        self.message = "Score saved!".to_string();
        self.error_message.clear();
    }

    fn display_save_error(&mut self, error: &LeaderboardError) {
        self.error_message = format!("Could not save your score: {error}");
    }

    fn confirm_replay(&mut self) -> bool {
        self.show(Screen::Replay);
        matches!(
            self.next_key().map(|key| key.code),
            Some(KeyCode::Char('y' | 'Y'))
        )
    }

    fn display_configuration_error(&mut self, error: &WordBankError) {
        self.error_message = error.to_string();
        self.message = "Press any key to exit.".to_string();
        self.show(Screen::Error);
        self.next_key();
    }

    fn display_farewell(&mut self) {
        self.message = "Thanks for playing! Press any key to exit.".to_string();
        self.error_message.clear();
        self.show(Screen::Farewell);
        self.next_key();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("Failed to restore terminal: {e}");
        }
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title(f, chunks[0], ctx);
    match ctx.screen {
        Screen::Menu => render_menu(f, chunks[1], ctx),
        Screen::Leaderboard | Screen::Farewell => render_leaderboard(f, chunks[1], ctx),
        Screen::Error => render_error(f, chunks[1], ctx),
        Screen::Playing | Screen::Outcome | Screen::NamePrompt | Screen::Replay => {
            render_board(f, chunks[1], ctx);
        }
    }
    render_messages(f, chunks[2], ctx);
    render_instructions(f, chunks[3], ctx);
}

fn render_title(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let title = Paragraph::new(Line::from(Span::styled("HANGMAN", ctx.style(HEADER_STYLE))))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_menu(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let colors = [Color::Green, Color::Yellow, Color::Red];
    let mut lines = vec![Line::from("Choose difficulty level:"), Line::from("")];
    for (i, (difficulty, color)) in Difficulty::ALL.iter().zip(colors).enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{}", i + 1), ctx.style(Style::new().fg(color))),
            Span::raw(format!(" - {}", difficulty.describe())),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("4", ctx.style(MESSAGE_STYLE)),
        Span::raw(" - View High Scores"),
    ]));
    let menu = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Menu"));
    f.render_widget(menu, area);
}

fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let Some(board) = ctx.board else {
        return;
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(20)])
        .split(area);

    let drawing_style = match gallows::danger(board.errors) {
        Danger::Calm => Style::new(),
        Danger::Warning => Style::new().fg(Color::Yellow),
        Danger::Critical => Style::new().fg(Color::Red),
    };
    let drawing: Vec<Line> = gallows::stage(board.errors)
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), ctx.style(drawing_style))))
        .collect();
    f.render_widget(
        Paragraph::new(drawing).block(Block::default().borders(Borders::ALL)),
        columns[0],
    );

    let masked: Vec<String> = board.masked.chars().map(String::from).collect();
    let wrong = if board.wrong.is_empty() {
        "None".to_string()
    } else {
        board
            .wrong
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Hint: ", ctx.style(MESSAGE_STYLE)),
            Span::raw(board.hint.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Word: ", ctx.style(INFO_STYLE)),
            Span::styled(masked.join(" "), ctx.style(Style::new().add_modifier(Modifier::BOLD))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Wrong letters: ", ctx.style(ERROR_STYLE)),
            Span::raw(wrong),
        ]),
        Line::from(vec![
            Span::styled("Attempts remaining: ", ctx.style(Style::new().fg(Color::Green))),
            Span::styled(board.remaining.to_string(), ctx.style(SUCCESS_STYLE)),
        ]),
        Line::from(vec![
            Span::styled("Current Score: ", ctx.style(Style::new().fg(Color::Magenta))),
            Span::styled(board.score.to_string(), ctx.style(INFO_STYLE)),
        ]),
    ];
    if board.status == GameStatus::Lost {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("The word was: ", ctx.style(ERROR_STYLE)),
            Span::raw(board.word.clone()),
        ]));
    }
    let title = format!("Difficulty: {}", board.difficulty);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(title)),
        columns[1],
    );
}

fn render_leaderboard(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = Vec::new();
    if ctx.records.is_empty() {
        lines.push(Line::from(Span::styled(
            "No high scores yet! Be the first!",
            ctx.style(INFO_STYLE),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!(
                "{:<6} {:<15} {:<10} {:<12} {:<16}",
                "Rank", "Name", "Score", "Difficulty", "Date"
            ),
            ctx.style(HEADER_STYLE),
        )));
        for (i, record) in ctx.records.iter().enumerate() {
            let rank_style = match i {
                0 => INFO_STYLE,
                1 | 2 => Style::new().fg(Color::Yellow),
                _ => Style::new(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<6}", format!("{}.", i + 1)), ctx.style(rank_style)),
                Span::raw(format!(" {:<15} ", record.name)),
                Span::styled(
                    format!("{:<10}", record.score),
                    ctx.style(Style::new().fg(Color::Green)),
                ),
                Span::raw(format!(" {:<12} {:<16}", record.difficulty, record.timestamp)),
            ]));
        }
    }
    let table =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("High Scores"));
    f.render_widget(table, area);
}

fn render_error(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let text = vec![
        Line::from(Span::styled(ctx.error_message.to_string(), ctx.style(ERROR_STYLE))),
        Line::from(""),
        Line::from("Make sure the word lists are in the correct folder."),
    ];
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Error")),
        area,
    );
}

fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = Vec::new();
    match ctx.screen {
        Screen::NamePrompt => lines.push(Line::from(vec![
            Span::styled("Enter your name: ", ctx.style(MESSAGE_STYLE)),
            Span::raw(format!("{}_", ctx.input)),
        ])),
        Screen::Replay => lines.push(Line::from(Span::styled(
            "Do you want to play again? (y/n)",
            ctx.style(MESSAGE_STYLE),
        ))),
        _ => {}
    }
    if !ctx.message.is_empty() {
        lines.push(Line::from(Span::styled(
            ctx.message.to_string(),
            ctx.style(SUCCESS_STYLE),
        )));
    }
    if !ctx.error_message.is_empty() && ctx.screen != Screen::Error {
        lines.push(Line::from(Span::styled(
            ctx.error_message.to_string(),
            ctx.style(ERROR_STYLE),
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

fn render_instructions(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let text = match ctx.screen {
        Screen::Menu => "1-3: play | 4: high scores | q/Esc: quit",
        Screen::Playing => "Type a letter to guess | Esc: quit",
        Screen::NamePrompt => "Enter: save | empty name skips saving | Esc: quit",
        Screen::Replay => "y: play again | any other key: finish",
        Screen::Outcome | Screen::Leaderboard | Screen::Error | Screen::Farewell => "",
    };
    f.render_widget(
        Paragraph::new(Span::styled(text, ctx.style(Style::new().fg(Color::DarkGray)))),
        area,
    );
}
