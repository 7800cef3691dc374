use crate::evaluator::{GuessFeedback, evaluate};
use crate::word::{Word, WordError, normalize_guess};
use crate::wordbank::Dictionary;
use crate::{MAX_TURNS, WORD_LENGTH};
use rand::Rng;
use thiserror::Error;

/// Why a submitted guess was not accepted. None of these consume a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("word must be 5 characters long, got {found}")]
    InvalidLength { found: usize },

    #[error("word must only contain English letters")]
    InvalidCharacters,

    #[error("{0} is not in the word list")]
    NotInDictionary(Word),

    #[error("the game is already over")]
    GameOver,
}

impl From<WordError> for GuessError {
    fn from(err: WordError) -> Self {
        match err {
            WordError::Empty => Self::InvalidLength { found: 0 },
            WordError::InvalidLength { found } => Self::InvalidLength { found },
            WordError::Comment | WordError::InvalidCharacters => Self::InvalidCharacters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingGuess,
    Evaluating,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
struct GameState {
    current_turn: usize,
    max_turns: usize,
    secret: Word,
    outcome: Outcome,
}

/// What one accepted guess produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: usize,
    pub guess: Word,
    pub feedback: GuessFeedback,
    /// Outcome after this guess was applied.
    pub outcome: Outcome,
}

/// How a game loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Won { turns: usize, secret: Word },
    Lost { secret: Word },
    /// Input ended before the game did.
    Aborted,
}

/// Static facts about a session, shown before the first turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub word_count: usize,
    pub word_length: usize,
    pub max_turns: usize,
}

/// One game: a secret word, a turn counter and the guesses made so far.
///
/// # State Machine
/// `AwaitingGuess` → `Evaluating` → `AwaitingGuess` until a guess matches
/// (`Won`) or the last turn is used up (`Lost`). Both end states are final.
pub struct GameSession<'a> {
    dictionary: &'a Dictionary,
    state: GameState,
    phase: SessionState,
    history: Vec<TurnReport>,
}

impl<'a> GameSession<'a> {
    /// Start a game with a secret drawn from `dictionary`.
    pub fn new<R: Rng + ?Sized>(dictionary: &'a Dictionary, rng: &mut R) -> Self {
        let secret = dictionary.pick_secret(rng);
        Self::with_secret(dictionary, secret)
    }

    /// Start a game with a known secret.
    #[must_use]
    pub fn with_secret(dictionary: &'a Dictionary, secret: Word) -> Self {
        log::debug!("New session, secret drawn from {} words", dictionary.len());
        Self {
            dictionary,
            state: GameState {
                current_turn: 1,
                max_turns: MAX_TURNS,
                secret,
                outcome: Outcome::InProgress,
            },
            phase: SessionState::AwaitingGuess,
            history: Vec::new(),
        }
    }

    /// Validate, evaluate and apply one guess.
    ///
    /// Rejected guesses leave the session exactly as it was.
    pub fn submit_guess(&mut self, raw: &str) -> Result<TurnReport, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameOver);
        }

        let guess = normalize_guess(raw)?;
        if !self.dictionary.contains(&guess) {
            return Err(GuessError::NotInDictionary(guess));
        }

        self.phase = SessionState::Evaluating;
        let turn = self.state.current_turn;
        let feedback = evaluate(&self.state.secret, &guess);

        if guess == self.state.secret {
            self.state.outcome = Outcome::Won;
            self.phase = SessionState::Won;
            log::info!("Guessed {guess} on turn {turn}");
        } else if turn == self.state.max_turns {
            self.state.outcome = Outcome::Lost;
            self.phase = SessionState::Lost;
            log::info!("Out of turns after {guess}");
        } else {
            self.state.current_turn += 1;
            self.phase = SessionState::AwaitingGuess;
        }

        let report = TurnReport {
            turn,
            guess,
            feedback,
            outcome: self.state.outcome,
        };
        self.history.push(report.clone());
        Ok(report)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    #[must_use]
    pub fn current_turn(&self) -> usize {
        self.state.current_turn
    }

    #[must_use]
    pub fn max_turns(&self) -> usize {
        self.state.max_turns
    }

    #[must_use]
    pub fn remaining_turns(&self) -> usize {
        match self.state.outcome {
            Outcome::InProgress => self.state.max_turns - self.state.current_turn + 1,
            Outcome::Won | Outcome::Lost => 0,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.outcome != Outcome::InProgress
    }

    #[must_use]
    pub fn secret(&self) -> Word {
        self.state.secret
    }

    /// The secret, but only once the game has ended.
    #[must_use]
    pub fn revealed_secret(&self) -> Option<Word> {
        self.is_over().then_some(self.state.secret)
    }

    #[must_use]
    pub fn history(&self) -> &[TurnReport] {
        &self.history
    }

    #[must_use]
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            word_count: self.dictionary.len(),
            word_length: WORD_LENGTH,
            max_turns: self.state.max_turns,
        }
    }

    /// `Some` once the game has been won or lost.
    #[must_use]
    pub fn end(&self) -> Option<SessionEnd> {
        match self.state.outcome {
            Outcome::InProgress => None,
            Outcome::Won => Some(SessionEnd::Won {
                turns: self.state.current_turn,
                secret: self.state.secret,
            }),
            Outcome::Lost => Some(SessionEnd::Lost {
                secret: self.state.secret,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// End of input or an explicit quit.
    Exit,
}

/// Input and rendering collaborator driven by [`game_loop`].
pub trait GameInterface {
    fn display_intro(&mut self, info: &SessionInfo);
    fn read_guess(&mut self, turn: usize) -> UserAction;
    fn display_rejection(&mut self, error: &GuessError);
    fn display_feedback(&mut self, report: &TurnReport);
    fn display_result(&mut self, end: &SessionEnd);
}

/// Play `session` to the end against `interface`.
///
/// Rejected guesses are shown and the same turn is asked for again.
pub fn game_loop<I: GameInterface + ?Sized>(
    session: &mut GameSession<'_>,
    interface: &mut I,
) -> SessionEnd {
    interface.display_intro(&session.info());

    let end = loop {
        if let Some(end) = session.end() {
            break end;
        }

        let raw = match interface.read_guess(session.current_turn()) {
            UserAction::Guess(raw) => raw,
            UserAction::Exit => {
                log::info!("Input ended on turn {}", session.current_turn());
                break SessionEnd::Aborted;
            }
        };

        match session.submit_guess(&raw) {
            Ok(report) => interface.display_feedback(&report),
            Err(e) => {
                log::debug!("Rejected guess {raw:?}: {e}");
                interface.display_rejection(&e);
            }
        }
    };

    interface.display_result(&end);
    end
}
