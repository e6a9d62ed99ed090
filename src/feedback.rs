//! Feedback calculation for Wordle guesses.
//!
//! This module computes the per-letter status (green/yellow/gray) of a guess
//! against a target word.

use serde::Serialize;

use crate::error::{Result, WordleError};
use crate::word::Word;

/// The status of a single letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word, or all of its occurrences already claimed (gray)
    Absent,
}

impl LetterStatus {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            LetterStatus::Correct => '🟩',
            LetterStatus::Present => '🟨',
            LetterStatus::Absent => '⬛',
        }
    }

    /// Compact letter form: g, y or b.
    pub fn to_code_char(self) -> char {
        match self {
            LetterStatus::Correct => 'g',
            LetterStatus::Present => 'y',
            LetterStatus::Absent => 'b',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(LetterStatus::Correct),
            'y' | '1' => Some(LetterStatus::Present),
            'b' | 'x' | '0' => Some(LetterStatus::Absent),
            _ => None,
        }
    }

    fn digit(self) -> u64 {
        match self {
            LetterStatus::Absent => 0,
            LetterStatus::Present => 1,
            LetterStatus::Correct => 2,
        }
    }
}

/// The statuses of every position of a guess, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Feedback(Vec<LetterStatus>);

impl Feedback {
    pub fn new(statuses: Vec<LetterStatus>) -> Self {
        Self(statuses)
    }

    /// The winning feedback for a word of `len` letters.
    pub fn all_correct(len: usize) -> Self {
        Self(vec![LetterStatus::Correct; len])
    }

    pub fn statuses(&self) -> &[LetterStatus] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if this feedback represents a win (all correct)
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&s| s == LetterStatus::Correct)
    }

    /// Base-3 encoding, position 0 least significant.
    /// Absent = 0, Present = 1, Correct = 2.
    ///
    /// `None` when the pattern does not fit in a `u64` (more than 40 letters).
    pub fn code(&self) -> Option<u64> {
        self.0.iter().rev().try_fold(0u64, |acc, status| {
            acc.checked_mul(3)?.checked_add(status.digit())
        })
    }

    /// Parse feedback from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        s.chars()
            .map(LetterStatus::from_char)
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Display as emoji string
    pub fn to_emoji_string(&self) -> String {
        self.0.iter().map(|s| s.to_char()).collect()
    }

    /// Display as a g/y/b string
    pub fn to_code_string(&self) -> String {
        self.0.iter().map(|s| s.to_code_char()).collect()
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// Calculate the feedback for a guess against a target word.
///
/// Correct positions are claimed first. Each remaining target letter can then
/// mark at most one guess letter as Present, scanning the guess left to right,
/// so a letter appearing k times in the target is never credited more than k
/// times.
pub fn evaluate(guess: &Word, target: &Word) -> Result<Feedback> {
    if guess.len() != target.len() {
        return Err(WordleError::LengthMismatch {
            guess: guess.clone(),
            target: target.len(),
        });
    }
    Ok(grade(guess.as_bytes(), target.as_bytes()))
}

/// Two-pass grading of equal-length lowercase ASCII words.
pub(crate) fn grade(guess: &[u8], target: &[u8]) -> Feedback {
    debug_assert_eq!(guess.len(), target.len());

    let mut feedback = vec![LetterStatus::Absent; guess.len()];
    let mut target_remaining = [0u8; 26];

    for (i, (&g, &t)) in guess.iter().zip(target).enumerate() {
        if g == t {
            feedback[i] = LetterStatus::Correct;
        } else {
            target_remaining[(t - b'a') as usize] += 1;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if feedback[i] != LetterStatus::Correct {
            let idx = (g - b'a') as usize;
            if target_remaining[idx] > 0 {
                feedback[i] = LetterStatus::Present;
                target_remaining[idx] -= 1;
            }
        }
    }

    Feedback(feedback)
}

/// Whether `candidate` could be the target given that `guess` produced `feedback`.
pub fn is_consistent(guess: &Word, feedback: &Feedback, candidate: &Word) -> bool {
    guess.len() == candidate.len() && grade(guess.as_bytes(), candidate.as_bytes()) == *feedback
}
