//! Five-letter words and the normaliser that turns raw text into them.
//!
//! Every word in the game, whether it comes from the word list or from the
//! player, passes through [`normalize`]. The word list is read with
//! [`LengthPolicy::Truncate`], which keeps the first five characters of a
//! longer line; guesses use [`LengthPolicy::Exact`].

use crate::WORD_LENGTH;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a line of text could not become a [`Word`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("line is empty")]
    Empty,

    #[error("line is a comment")]
    Comment,

    #[error("word must be 5 characters long, got {found}")]
    InvalidLength { found: usize },

    #[error("word must only contain English letters")]
    InvalidCharacters,
}

/// How the normaliser treats input longer than [`WORD_LENGTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Keep the first five characters (word list entries).
    Truncate,
    /// Anything but exactly five characters is rejected (guesses).
    Exact,
}

/// A word of exactly five uppercase ASCII letters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// The letters as uppercase ASCII bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }

    /// Letter at `index` as a 0-25 alphabet offset.
    #[must_use]
    pub(crate) const fn letter_index(&self, index: usize) -> usize {
        (self.0[index] - b'A') as usize
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({self})")
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s, LengthPolicy::Exact)
    }
}

/// Validate and canonicalise one line of text.
///
/// Leading and trailing whitespace is stripped first. Lowercase letters are
/// uppercased; anything outside `A-Z` afterwards rejects the line.
pub fn normalize(raw: &str, policy: LengthPolicy) -> Result<Word, WordError> {
    let trimmed = raw.trim();

    if policy == LengthPolicy::Truncate {
        if trimmed.is_empty() {
            return Err(WordError::Empty);
        }
        if trimmed.starts_with('#') {
            return Err(WordError::Comment);
        }
    }

    let candidate: Vec<char> = match policy {
        LengthPolicy::Truncate => trimmed.chars().take(WORD_LENGTH).collect(),
        LengthPolicy::Exact => trimmed.chars().collect(),
    };
    if candidate.len() != WORD_LENGTH {
        return Err(WordError::InvalidLength {
            found: candidate.len(),
        });
    }

    let mut letters = [0u8; WORD_LENGTH];
    for (slot, c) in letters.iter_mut().zip(candidate) {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(WordError::InvalidCharacters);
        }
        // ASCII uppercase fits in one byte
        *slot = upper as u8;
    }
    Ok(Word(letters))
}

/// Normalise a word list line: comments and blanks rejected, long lines cut to five letters.
pub fn normalize_entry(line: &str) -> Result<Word, WordError> {
    normalize(line, LengthPolicy::Truncate)
}

/// Normalise a player's guess: exactly five letters, nothing else.
pub fn normalize_guess(input: &str) -> Result<Word, WordError> {
    normalize(input, LengthPolicy::Exact)
}
