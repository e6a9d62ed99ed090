//! Error types for the simulator.

use std::path::PathBuf;

use crate::word::Word;

/// Errors raised while building a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The vocabulary has no words.
    #[error("vocabulary is empty")]
    Empty,

    /// A word does not have the configured length.
    #[error("word {word:?} has length {actual}, expected {expected}")]
    WrongLength {
        word: String,
        expected: usize,
        actual: usize,
    },

    /// A word contains something other than ASCII letters.
    #[error("invalid word {0:?}: only ASCII letters are allowed")]
    InvalidWord(String),

    /// The word list could not be read.
    #[error("failed to read word list {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by feedback evaluation, game sessions and the simulation runner.
#[derive(Debug, thiserror::Error)]
pub enum WordleError {
    /// Guess and target have different lengths.
    #[error("length mismatch: guess {guess} vs target of length {target}")]
    LengthMismatch { guess: Word, target: usize },

    /// The guess is not in the allowed vocabulary.
    #[error("{0} is not an allowed guess")]
    InvalidGuess(Word),

    /// The target is not in the possible vocabulary.
    #[error("{0} is not a possible target")]
    InvalidTarget(Word),

    /// A guess was submitted to a finished game.
    #[error("game is already over")]
    NotInProgress,

    /// A game needs at least one attempt.
    #[error("max attempts must be at least 1")]
    InvalidMaxAttempts,

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

pub type Result<T, E = WordleError> = std::result::Result<T, E>;
