//! Guess evaluation.
//!
//! Classifies every letter of a guess against the secret word. Repeated
//! letters are resolved against the secret's remaining letter budget:
//! exact matches are taken first, then displaced matches left to right
//! while that letter still has unconsumed occurrences in the secret.

use crate::word::Word;
use crate::{ALPHABET_SIZE, WORD_LENGTH};
use std::fmt;

/// Classification of one letter position in a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Right letter in the right position (green)
    Correct,
    /// Letter occurs elsewhere in the secret (yellow)
    Present,
    /// Letter not in the secret, or all its occurrences already accounted for (gray)
    Absent,
}

impl Verdict {
    /// G / Y / X, the usual shorthand for hand-entered feedback.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// The five verdicts for one guess, aligned with the guess letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuessFeedback([Verdict; WORD_LENGTH]);

impl GuessFeedback {
    #[must_use]
    pub const fn verdicts(&self) -> &[Verdict; WORD_LENGTH] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Verdict> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.0.iter().all(|&v| v == Verdict::Correct)
    }

    /// Parse a pattern such as `"GYXXG"`.
    #[must_use]
    pub fn from_pattern(pattern: &str) -> Option<Self> {
        let verdicts: Vec<Verdict> = pattern
            .chars()
            .map(Verdict::from_char)
            .collect::<Option<_>>()?;
        let verdicts: [Verdict; WORD_LENGTH] = verdicts.try_into().ok()?;
        Some(Self(verdicts))
    }
}

impl fmt::Display for GuessFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in self.iter() {
            write!(f, "{}", v.to_char())?;
        }
        Ok(())
    }
}

/// Compare `guess` against `secret`.
#[must_use]
pub fn evaluate(secret: &Word, guess: &Word) -> GuessFeedback {
    let mut remaining = [0u8; ALPHABET_SIZE];
    for i in 0..WORD_LENGTH {
        remaining[secret.letter_index(i)] += 1;
    }

    let mut verdicts = [None; WORD_LENGTH];

    // First pass: exact matches
    for (i, slot) in verdicts.iter_mut().enumerate() {
        if guess.as_bytes()[i] == secret.as_bytes()[i] {
            *slot = Some(Verdict::Correct);
            remaining[guess.letter_index(i)] -= 1;
        }
    }

    // Second pass: displaced letters, limited by what the exact matches left over
    let resolved = std::array::from_fn(|i| {
        verdicts[i].unwrap_or_else(|| {
            let letter = guess.letter_index(i);
            if remaining[letter] > 0 {
                remaining[letter] -= 1;
                Verdict::Present
            } else {
                Verdict::Absent
            }
        })
    });

    GuessFeedback(resolved)
}
