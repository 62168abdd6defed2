//! TUI (Terminal User Interface) module for Name That Knight
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! - Knight panel on the left, showing the frame for the current miss count
//! - Masked name, letter grid and scoreboard on the right
//! - Message and instruction bars along the bottom
//!
//! # State Machine
//! - `Guessing` → `GameOver` when the round is won or lost
//! - `GameOver` → `Guessing` when the player chooses to play again

use crate::game_state::{GameOutcome, Guess};
use crate::session::{GameInterface, GameView, RoundSummary, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
const LETTERS_PER_ROW: usize = 7;
const KNIGHT_PANEL_WIDTH: u16 = 40;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Available,
    Hit,
    Missed,
}

impl LetterState {
    /// `(background, foreground)`. Used letters are greyed out, hits a shade lighter.
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Available => (Color::DarkGray, Color::White),
            Self::Hit => (Color::Black, Color::Gray),
            Self::Missed => (Color::Black, Color::DarkGray),
        }
    }

    fn is_used(self) -> bool {
        !matches!(self, Self::Available)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TuiState {
    Guessing,
    GameOver,
}

/// Owned copy of the last [`GameView`], kept so the screen can be redrawn
/// while waiting for a key.
#[derive(Clone, Debug)]
struct Board {
    word: String,
    revealed: BTreeSet<char>,
    guessed: BTreeSet<char>,
    frame: String,
    remaining: usize,
    max_misses: usize,
    wins: u32,
    losses: u32,
}

impl Board {
    fn empty() -> Self {
        Self {
            word: String::new(),
            revealed: BTreeSet::new(),
            guessed: BTreeSet::new(),
            frame: String::new(),
            remaining: 0,
            max_misses: 0,
            wins: 0,
            losses: 0,
        }
    }

    fn from_view(view: &GameView) -> Self {
        let word = match view.word {
            Some(word) => word
                .letters()
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            None => view.mask.to_string(),
        };
        Self {
            word,
            revealed: view.mask.positions().iter().flatten().copied().collect(),
            guessed: view.guessed.clone(),
            frame: view.frame.to_string(),
            remaining: view.remaining_attempts(),
            max_misses: view.max_misses,
            wins: view.scoreboard.wins(),
            losses: view.scoreboard.losses(),
        }
    }

    fn is_used(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_uppercase())
    }

    fn letter_state(&self, letter: char) -> LetterState {
        if !self.is_used(letter) {
            LetterState::Available
        } else if self.revealed.contains(&letter) {
            LetterState::Hit
        } else {
            LetterState::Missed
        }
    }
}

/// What a single key press amounts to.
#[derive(Debug, PartialEq)]
enum KeyResult {
    Action(UserAction),
    Rejected(String),
    Moved,
    Ignored,
}

/// Maps one key press to an action. The cursor walks the letter grid.
fn interpret_key(state: TuiState, cursor: &mut usize, board: &Board, key: KeyEvent) -> KeyResult {
    if key.code == KeyCode::Esc {
        return KeyResult::Action(UserAction::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            return KeyResult::Action(UserAction::Quit);
        }
        return KeyResult::Ignored;
    }

    match state {
        TuiState::GameOver => match key.code {
            KeyCode::Char('y' | 'Y') => KeyResult::Action(UserAction::PlayAgain),
            KeyCode::Char('n' | 'N') => KeyResult::Action(UserAction::Quit),
            _ => KeyResult::Ignored,
        },
        TuiState::Guessing => match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => pick_letter(board, c.to_ascii_uppercase()),
            KeyCode::Enter | KeyCode::Char(' ') => pick_letter(board, ALPHABET[*cursor]),
            KeyCode::Char(c) => KeyResult::Rejected(format!("Only letters are allowed! ('{c}' is not a letter)")),
            KeyCode::Left => {
                *cursor = (*cursor + ALPHABET.len() - 1) % ALPHABET.len();
                KeyResult::Moved
            }
            KeyCode::Right => {
                *cursor = (*cursor + 1) % ALPHABET.len();
                KeyResult::Moved
            }
            KeyCode::Up => {
                *cursor = cursor.saturating_sub(LETTERS_PER_ROW);
                KeyResult::Moved
            }
            KeyCode::Down => {
                *cursor = (*cursor + LETTERS_PER_ROW).min(ALPHABET.len() - 1);
                KeyResult::Moved
            }
            _ => KeyResult::Ignored,
        },
    }
}

fn pick_letter(board: &Board, letter: char) -> KeyResult {
    if board.is_used(letter) {
        KeyResult::Rejected(format!("'{letter}' has already been used"))
    } else {
        KeyResult::Action(UserAction::Guess(letter))
    }
}

/// Raw mode is switched on before the terminal exists, so a failed setup has
/// no `Drop` to switch it back off.
fn undo_raw_mode_on_error<T>(result: Result<T, io::Error>) -> Result<T, io::Error> {
    result.inspect_err(|e| {
        debug_log!("Terminal setup failed, leaving raw mode: {}", e);
        if let Err(e) = disable_raw_mode() {
            debug_log!("disable_raw_mode failed: {}", e);
        }
    })
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    board: &'a Board,
    state: TuiState,
    cursor: usize,
    message: &'a [String],
    message_style: Style,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Board,
    state: TuiState,
    cursor: usize,
    message: Vec<String>,
    message_style: Style,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = undo_raw_mode_on_error(Self::setup_terminal())?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: Board::empty(),
            state: TuiState::Guessing,
            cursor: 0,
            message: vec!["Try to guess the knight's name!".to_string()],
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
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
            board: &self.board,
            state: self.state,
            cursor: self.cursor,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn set_message(&mut self, lines: Vec<String>, style: Style) {
        self.message = lines;
        self.message_style = style;
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(14),   // Knight and board
                Constraint::Length(5), // Messages
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(KNIGHT_PANEL_WIDTH), Constraint::Min(30)])
            .split(rows[1]);

        let board = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(6), // Letter grid
                Constraint::Min(3),    // Status
            ])
            .split(body[1]);

        Self::render_title(f, rows[0]);
        Self::render_knight(f, body[0], &ctx.board.frame);
        Self::render_word(f, board[0], &ctx.board.word);
        Self::render_letters(f, board[1], ctx.board, ctx.state, ctx.cursor);
        Self::render_status(f, board[2], ctx.board);
        Self::render_message(f, rows[2], ctx.message, ctx.message_style, ctx.error_message);
        Self::render_instructions(f, rows[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("NAME THAT KNIGHT")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_knight(f: &mut Frame, area: Rect, frame: &str) {
        let lines: Vec<Line> = frame.lines().map(Line::from).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("The Black Knight").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, word: &str) {
        let paragraph = Paragraph::new(Line::from(Span::styled(format!("  {word}"), WORD_STYLE)))
            .block(Block::default().title("Name").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_letters(f: &mut Frame, area: Rect, board: &Board, state: TuiState, cursor: usize) {
        let lines: Vec<Line> = ALPHABET
            .chunks(LETTERS_PER_ROW)
            .enumerate()
            .map(|(row, letters)| {
                let mut spans = vec![Span::raw(" ")];
                for (col, &letter) in letters.iter().enumerate() {
                    let letter_state = board.letter_state(letter);
                    let (bg, fg) = letter_state.colors();
                    let mut style = Style::default().fg(fg).bg(bg);
                    if letter_state.is_used() {
                        style = style.add_modifier(Modifier::DIM);
                    }
                    if state == TuiState::Guessing && row * LETTERS_PER_ROW + col == cursor {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!(" {letter} "), style));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, board: &Board) {
        let lines = vec![
            Line::from(format!(
                "Attempts left: {} of {}",
                board.remaining, board.max_misses
            )),
            Line::from(format!("Named: {}  Lost: {}", board.wins, board.losses)),
        ];
        let paragraph = Paragraph::new(lines)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_message(f: &mut Frame, area: Rect, message: &[String], style: Style, error_message: &str) {
        let mut lines: Vec<Line> = message
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), style)))
            .collect();
        if !error_message.is_empty() {
            lines.push(Line::from(Span::styled(error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Guessing => "Type a letter | ARROWS + ENTER: Pick from grid | ESC: Quit",
            TuiState::GameOver => "Y: Play again | N or ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            other => {
                debug_log!("handle_input() - Ignoring non-key event: {:?}", other);
                return Ok(None);
            }
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        match interpret_key(self.state, &mut self.cursor, &self.board, key) {
            KeyResult::Action(action) => {
                self.error_message.clear();
                info_log!("handle_input() - {:?}", action);
                Ok(Some(action))
            }
            KeyResult::Rejected(message) => {
                self.error_message = message;
                Ok(None)
            }
            KeyResult::Moved => {
                self.error_message.clear();
                Ok(None)
            }
            KeyResult::Ignored => {
                debug_log!("handle_input() - Ignoring key: {:?}", key.code);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_game(&mut self, view: &GameView) {
        self.board = Board::from_view(view);
        self.state = if view.outcome.is_terminal() {
            TuiState::GameOver
        } else {
            TuiState::Guessing
        };
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Quit");
                return Some(UserAction::Quit);
            }

            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Quit");
                    return Some(UserAction::Quit);
                }
            }
        }
    }

    fn display_guess(&mut self, letter: char, guess: &Guess) {
        let (text, style) = match guess {
            Guess::Hit { positions } => (
                format!("Good guess! '{letter}' appears {} time(s).", positions.len()),
                SUCCESS_STYLE,
            ),
            Guess::Miss => (
                format!("No '{letter}' in this name. The knight loses a piece!"),
                LOSS_STYLE,
            ),
            Guess::AlreadyGuessed => (format!("'{letter}' has already been used"), ERROR_STYLE),
            Guess::NotALetter => ("Only letters are allowed!".to_string(), ERROR_STYLE),
            Guess::Finished => return,
        };
        self.set_message(vec![text], style);
    }

    fn display_game_over(&mut self, summary: &RoundSummary) {
        self.state = TuiState::GameOver;
        let style = if summary.outcome == GameOutcome::Won {
            SUCCESS_STYLE
        } else {
            LOSS_STYLE
        };
        self.set_message(summary.message_lines().to_vec(), style);
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.state = TuiState::Guessing;
        self.cursor = 0;
        self.error_message.clear();
        self.set_message(
            vec![
                "Try to guess the knight's name!".to_string(),
                format!("New round - {word_count} names in the list."),
            ],
            MESSAGE_STYLE,
        );
    }

    fn display_exit_message(&mut self) {
        self.set_message(vec!["Farewell...".to_string()], MESSAGE_STYLE);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
