use crate::error::KnightResult;
use crate::game_state::{Game, GameOutcome, Guess, RevealMask, Word};
use crate::knight::KnightFrames;
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use chrono::{DateTime, Local, TimeDelta};
use rand::Rng;
use std::collections::BTreeSet;

/// What the player asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    PlayAgain,
    Quit,
}

/// Borrowed snapshot of everything a shell needs to draw one screen.
#[derive(Debug)]
pub struct GameView<'a> {
    pub mask: &'a RevealMask,
    pub guessed: &'a BTreeSet<char>,
    pub misses: usize,
    pub max_misses: usize,
    pub frame: &'a str,
    pub outcome: GameOutcome,
    /// Only set once the round is won or lost.
    pub word: Option<&'a Word>,
    pub scoreboard: &'a Scoreboard,
}

impl GameView<'_> {
    pub fn remaining_attempts(&self) -> usize {
        self.max_misses.saturating_sub(self.misses)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub outcome: GameOutcome,
    pub word: String,
    pub misses: usize,
    pub elapsed: TimeDelta,
}

impl RoundSummary {
    /// The end-of-round prompt, one line per entry.
    pub fn message_lines(&self) -> [String; 3] {
        let headline = match self.outcome {
            GameOutcome::Won => "YOU WON!",
            _ => "YOU LOST!",
        };
        [
            headline.to_string(),
            format!("The name was {}", self.word),
            "Want to play again?".to_string(),
        ]
    }
}

/// Wins and losses for this run only.
#[derive(Clone, Debug)]
pub struct Scoreboard {
    wins: u32,
    losses: u32,
    round_started: DateTime<Local>,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            wins: 0,
            losses: 0,
            round_started: Local::now(),
        }
    }

    pub fn start_round(&mut self) {
        self.round_started = Local::now();
    }

    pub fn record(&mut self, game: &Game) -> RoundSummary {
        let outcome = game.check_outcome();
        match outcome {
            GameOutcome::Won => self.wins += 1,
            GameOutcome::Lost => self.losses += 1,
            GameOutcome::InProgress => {}
        }
        RoundSummary {
            outcome,
            word: game.word().to_string(),
            misses: game.misses(),
            elapsed: Local::now() - self.round_started,
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Abstraction over the presentation shell.
///
/// Implemented by [`crate::cli::CliInterface`] and [`crate::tui::TuiInterface`].
pub trait GameInterface {
    fn display_game(&mut self, view: &GameView);
    /// `None` means nothing actionable was entered; the loop asks again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_guess(&mut self, letter: char, guess: &Guess);
    fn display_game_over(&mut self, summary: &RoundSummary);
    fn display_new_game_message(&mut self, word_count: usize);
    fn display_exit_message(&mut self);
}

pub fn view<'a>(game: &'a Game, frames: &'a KnightFrames, scoreboard: &'a Scoreboard) -> GameView<'a> {
    let outcome = game.check_outcome();
    GameView {
        mask: game.mask(),
        guessed: game.guessed(),
        misses: game.misses(),
        max_misses: game.max_misses(),
        frame: frames.frame_for(game.misses()),
        outcome,
        word: outcome.is_terminal().then(|| game.word()),
        scoreboard,
    }
}

/// Runs rounds until the player quits. Returns the tally for the run.
pub fn game_loop<I, R>(
    bank: &WordBank,
    frames: &KnightFrames,
    interface: &mut I,
    rng: &mut R,
) -> KnightResult<Scoreboard>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut game = Game::start(bank, rng, frames.max_misses())?;
    let mut scoreboard = Scoreboard::new();
    info_log!("Round started, {} letters", game.word().len());

    loop {
        interface.display_game(&view(&game, frames, &scoreboard));

        let Some(action) = interface.read_action() else {
            continue;
        };

        match action {
            UserAction::Quit => {
                interface.display_exit_message();
                break;
            }
            UserAction::PlayAgain if game.check_outcome().is_terminal() => {
                game.reset(bank, rng)?;
                scoreboard.start_round();
                info_log!("New round started, {} letters", game.word().len());
                interface.display_new_game_message(bank.len());
            }
            UserAction::PlayAgain => {
                debug_log!("Ignoring play-again request while a round is in progress");
            }
            UserAction::Guess(letter) => handle_letter(&mut game, &mut scoreboard, interface, letter),
        }
    }

    Ok(scoreboard)
}

fn handle_letter<I: GameInterface + ?Sized>(
    game: &mut Game,
    scoreboard: &mut Scoreboard,
    interface: &mut I,
    letter: char,
) {
    if game.check_outcome().is_terminal() {
        debug_log!("Ignoring guess '{}' after the round ended", letter);
        return;
    }

    let guess = game.evaluate_guess(letter);
    debug_log!("Guess '{}' -> {:?}, misses {}", letter, guess, game.misses());
    interface.display_guess(letter.to_ascii_uppercase(), &guess);

    if game.check_outcome().is_terminal() {
        let summary = scoreboard.record(game);
        info_log!("Round over: {:?} ({})", summary.outcome, summary.word);
        interface.display_game_over(&summary);
    }
}
