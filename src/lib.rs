// Library interface for wordle-tui
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod word;
pub mod wordbank;

/// Letters in every word.
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed per game.
pub const MAX_TURNS: usize = 6;

/// Letters `A-Z`, one remaining-count slot each during evaluation.
pub(crate) const ALPHABET_SIZE: usize = 26;

// Re-export commonly used items for easier testing
pub use evaluator::{GuessFeedback, Verdict, evaluate};
pub use game_state::{
    GameInterface, GameSession, GuessError, Outcome, SessionEnd, SessionState, TurnReport,
    UserAction, game_loop,
};
pub use word::{Word, WordError, normalize_entry, normalize_guess};
pub use wordbank::{Dictionary, LoadError};
