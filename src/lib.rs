// Library interface for name-that-knight
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod knight;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{KnightError, KnightResult};
pub use game_state::{DEFAULT_MAX_MISSES, Game, GameOutcome, Guess, RevealMask, Word};
pub use knight::KnightFrames;
pub use session::{GameInterface, GameView, RoundSummary, Scoreboard, UserAction, game_loop};
pub use wordbank::WordBank;
