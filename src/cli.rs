use crate::debug_log;
use crate::game_state::Guess;
use crate::session::{GameInterface, GameView, RoundSummary, UserAction};
use clap::Parser;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Name That Knight: guess the hero's name before the Black Knight is cut down to size
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a whitespace-separated list of names
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Directory holding knight1.txt, knight2.txt, ... frames
    #[arg(long = "art")]
    pub art_dir: Option<PathBuf>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Action(UserAction),
    Invalid,
}

/// Interprets one line. `Y` and `N` are replay answers only once the round is over.
pub fn parse_line(line: &str, round_over: bool) -> LineInput {
    let input = line.trim().to_uppercase();

    match input.as_str() {
        "QUIT" | "EXIT" => LineInput::Action(UserAction::Quit),
        "YES" | "Y" if round_over => LineInput::Action(UserAction::PlayAgain),
        "NO" | "N" if round_over => LineInput::Action(UserAction::Quit),
        _ if round_over => LineInput::Invalid,
        _ => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => LineInput::Action(UserAction::Guess(c)),
                _ => LineInput::Invalid,
            }
        }
    }
}

/// Line-based shell over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    round_over: bool,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            round_over: false,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("CliInterface write failed: {}", e);
        }
    }

    fn prompt(&mut self) {
        let prompt = if self.round_over {
            "\nPlay again? (yes/no):"
        } else {
            "\nGuess a letter (or 'quit'):"
        };
        self.say(prompt);
        if let Err(e) = self.writer.flush() {
            debug_log!("CliInterface flush failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_game(&mut self, view: &GameView) {
        self.round_over = view.outcome.is_terminal();
        if self.round_over {
            return;
        }

        self.say(view.frame.trim_end());
        self.say(format!("\n  {}\n", view.mask));
        let used: String = view.guessed.iter().collect();
        if !used.is_empty() {
            self.say(format!("Used letters: {used}"));
        }
        self.say(format!(
            "Attempts left: {} of {}",
            view.remaining_attempts(),
            view.max_misses
        ));
        let board = view.scoreboard;
        if board.rounds() > 0 {
            self.say(format!("Named: {}  Lost: {}", board.wins(), board.losses()));
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        self.prompt();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => return Some(UserAction::Quit),
            Ok(_) => {}
            Err(e) => {
                debug_log!("CliInterface read failed: {}", e);
                return Some(UserAction::Quit);
            }
        }

        match parse_line(&line, self.round_over) {
            LineInput::Action(action) => Some(action),
            LineInput::Invalid if self.round_over => {
                self.say("Please answer yes or no.");
                None
            }
            LineInput::Invalid => {
                self.say("Please enter a single letter A-Z.");
                None
            }
        }
    }

    fn display_guess(&mut self, letter: char, guess: &Guess) {
        match guess {
            Guess::Hit { positions } if positions.len() > 1 => {
                self.say(format!("Yes! '{letter}' appears {} times.", positions.len()));
            }
            Guess::Hit { .. } => self.say(format!("Yes! '{letter}' is in the name.")),
            Guess::Miss => self.say(format!("No '{letter}'. The knight loses a piece.")),
            Guess::AlreadyGuessed => self.say(format!("You already tried '{letter}'.")),
            Guess::NotALetter => self.say("Only the letters A-Z can be guessed."),
            Guess::Finished => {}
        }
    }

    fn display_game_over(&mut self, summary: &RoundSummary) {
        self.round_over = true;
        self.say("");
        for line in summary.message_lines() {
            self.say(line);
        }
        self.say(format!(
            "({} misses, {}s)",
            summary.misses,
            summary.elapsed.num_seconds()
        ));
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.round_over = false;
        self.say(format!(
            "\nNew round! {word_count} names to choose from. Try to guess the knight's name!"
        ));
    }

    fn display_exit_message(&mut self) {
        self.say("Farewell.");
    }
}
