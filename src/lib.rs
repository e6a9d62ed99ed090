//! # Wordle Sim
//!
//! A Wordle simulator for measuring guessing strategies.
//!
//! A [`GameSession`] hides a target word and grades guesses with the two-pass
//! duplicate-aware [`evaluate`]. Strategies implement [`Agent`]. The
//! [`SimulationRunner`] plays many seeded games with fresh agents and
//! [`summarize`] turns the outcomes into a [`HistogramReport`].

pub mod agent;
pub mod error;
pub mod feedback;
pub mod game;
pub mod simulation;
pub mod stats;
pub mod word;

pub use agent::{Agent, AgentBuilder, AgentKind, EntropyAgent, ExpectimaxAgent, RandomAgent};
pub use error::{VocabularyError, WordleError};
pub use feedback::{evaluate, Feedback, LetterStatus};
pub use game::{Attempt, GameOutcome, GameSession, GameStatus};
pub use simulation::{BatchResult, GameFailure, SimulationConfig, SimulationRunner};
pub use stats::{summarize, Bucket, HistogramReport};
pub use word::{default_allowed, default_possible, load_vocabulary, Vocabulary, Word};

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Guesses allowed per game
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;
