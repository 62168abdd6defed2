//! Core hangman state: the hidden word, what has been revealed, and how many
//! misses the player has left.

use crate::error::KnightResult;
use crate::wordbank::WordBank;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

/// Number of misses allowed when no custom frame set is loaded.
pub const DEFAULT_MAX_MISSES: usize = 7;

/// The hidden name, stored as uppercase ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word(Vec<char>);

impl Word {
    /// Uppercases `raw` and accepts it only if it is a non-empty run of A-Z.
    pub fn parse(raw: &str) -> Option<Self> {
        let letters: Vec<char> = raw.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.is_empty() || !letters.iter().all(char::is_ascii_uppercase) {
            return None;
        }
        Some(Self(letters))
    }

    pub fn letters(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Per-position hidden/revealed state, same length as the word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealMask(Vec<Option<char>>);

impl RevealMask {
    pub fn hidden(len: usize) -> Self {
        Self(vec![None; len])
    }

    /// A mask with every position showing, used once a round is over.
    pub fn revealed(word: &Word) -> Self {
        Self(word.letters().iter().copied().map(Some).collect())
    }

    pub fn positions(&self) -> &[Option<char>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hidden_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.len() - self.hidden_count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    fn reveal(&mut self, index: usize, letter: char) {
        self.0[index] = Some(letter);
    }
}

/// Renders as `_ R _ H _ R`.
impl fmt::Display for RevealMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Result of evaluating one guessed letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guess {
    /// The letter occurs in the word; every matching index, ascending.
    Hit { positions: Vec<usize> },
    /// The letter is not in the word and cost one attempt.
    Miss,
    /// The letter was already played this round. Nothing changed.
    AlreadyGuessed,
    /// Not an A-Z letter. Nothing changed.
    NotALetter,
    /// The round is already won or lost. Nothing changed.
    Finished,
}

impl Guess {
    pub fn matched(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn positions(&self) -> &[usize] {
        match self {
            Self::Hit { positions } => positions,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    word: Word,
    mask: RevealMask,
    misses: usize,
    max_misses: usize,
    guessed: BTreeSet<char>,
}

impl Game {
    /// Starts a round with a word drawn from `bank`.
    pub fn start<R: Rng + ?Sized>(
        bank: &WordBank,
        rng: &mut R,
        max_misses: usize,
    ) -> KnightResult<Self> {
        let word = bank.choose_word(rng)?.clone();
        Ok(Self::with_word(word, max_misses))
    }

    pub fn with_word(word: Word, max_misses: usize) -> Self {
        Self {
            mask: RevealMask::hidden(word.len()),
            word,
            misses: 0,
            max_misses: max_misses.max(1),
            guessed: BTreeSet::new(),
        }
    }

    pub fn evaluate_guess(&mut self, letter: char) -> Guess {
        if self.check_outcome().is_terminal() {
            return Guess::Finished;
        }
        if !letter.is_ascii_alphabetic() {
            return Guess::NotALetter;
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Guess::AlreadyGuessed;
        }

        let positions: Vec<usize> = self
            .word
            .letters()
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == letter)
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            self.misses += 1;
            return Guess::Miss;
        }

        for &i in &positions {
            self.mask.reveal(i, letter);
        }
        Guess::Hit { positions }
    }

    pub fn check_outcome(&self) -> GameOutcome {
        if self.mask.is_fully_revealed() {
            GameOutcome::Won
        } else if self.misses >= self.max_misses {
            GameOutcome::Lost
        } else {
            GameOutcome::InProgress
        }
    }

    /// Draws a fresh word and clears all per-round state.
    pub fn reset<R: Rng + ?Sized>(&mut self, bank: &WordBank, rng: &mut R) -> KnightResult<()> {
        let word = bank.choose_word(rng)?.clone();
        self.restart_with(word);
        Ok(())
    }

    pub fn restart_with(&mut self, word: Word) {
        self.mask = RevealMask::hidden(word.len());
        self.word = word;
        self.misses = 0;
        self.guessed.clear();
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn mask(&self) -> &RevealMask {
        &self.mask
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn max_misses(&self) -> usize {
        self.max_misses
    }

    pub fn remaining_attempts(&self) -> usize {
        self.max_misses.saturating_sub(self.misses)
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }
}
