//! A single game of Wordle.
//!
//! [`GameSession`] owns the hidden target and the attempt history. It moves
//! from `InProgress` to `Won` or `Lost` one guess at a time and never leaves a
//! terminal state.

use rand::Rng;
use serde::Serialize;

use crate::agent::Agent;
use crate::error::{Result, VocabularyError, WordleError};
use crate::feedback::{evaluate, Feedback};
use crate::word::{Vocabulary, Word};

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// A guess and the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Attempt {
    pub guess: Word,
    pub feedback: Feedback,
}

/// Snapshot of a finished game.
///
/// Only a terminal [`GameSession`] produces one, so the status is never
/// `InProgress` and a win took between 1 and `max_attempts` guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    status: GameStatus,
    attempts_used: usize,
    max_attempts: usize,
    target: Word,
    guesses: Vec<Word>,
}

impl GameOutcome {
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_win(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn attempts_used(&self) -> usize {
        self.attempts_used
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }
}

/// State machine for one game.
pub struct GameSession<'v> {
    allowed: &'v Vocabulary,
    possible: &'v Vocabulary,
    target: Word,
    max_attempts: usize,
    history: Vec<Attempt>,
    status: GameStatus,
}

impl<'v> GameSession<'v> {
    /// Start a game with a known target.
    pub fn new(
        allowed: &'v Vocabulary,
        possible: &'v Vocabulary,
        target: Word,
        max_attempts: usize,
    ) -> Result<Self> {
        if max_attempts == 0 {
            return Err(WordleError::InvalidMaxAttempts);
        }
        if target.len() != allowed.word_length() {
            return Err(VocabularyError::WrongLength {
                actual: target.len(),
                word: target.to_string(),
                expected: allowed.word_length(),
            }
            .into());
        }
        if !possible.contains(&target) {
            return Err(WordleError::InvalidTarget(target));
        }
        Ok(Self {
            allowed,
            possible,
            target,
            max_attempts,
            history: Vec::with_capacity(max_attempts),
            status: GameStatus::InProgress,
        })
    }

    /// Start a game with a target drawn uniformly from `possible`.
    pub fn with_random_target<R: Rng + ?Sized>(
        allowed: &'v Vocabulary,
        possible: &'v Vocabulary,
        max_attempts: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let target = possible.choose(rng).clone();
        Self::new(allowed, possible, target, max_attempts)
    }

    /// Submit one guess and return the recorded attempt.
    pub fn submit_guess(&mut self, guess: &Word) -> Result<&Attempt> {
        if self.status.is_terminal() {
            return Err(WordleError::NotInProgress);
        }
        if !self.allowed.contains(guess) {
            return Err(WordleError::InvalidGuess(guess.clone()));
        }

        let feedback = evaluate(guess, &self.target)?;
        let won = feedback.is_win();
        self.history.push(Attempt {
            guess: guess.clone(),
            feedback,
        });

        if won {
            self.status = GameStatus::Won;
        } else if self.history.len() == self.max_attempts {
            self.status = GameStatus::Lost;
        }

        Ok(&self.history[self.history.len() - 1])
    }

    /// Let `agent` guess until the game ends.
    ///
    /// An agent that proposes a word outside the allowed vocabulary ends the
    /// game with [`WordleError::InvalidGuess`]; the guess is never retried.
    pub fn play<A: Agent + ?Sized>(&mut self, agent: &mut A) -> Result<GameOutcome> {
        while !self.status.is_terminal() {
            let guess = agent.propose_guess(self.allowed, self.possible, &self.history);
            self.submit_guess(&guess)?;
        }
        Ok(self.snapshot())
    }

    /// The final outcome, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.status.is_terminal().then(|| self.snapshot())
    }

    fn snapshot(&self) -> GameOutcome {
        GameOutcome {
            status: self.status,
            attempts_used: self.history.len(),
            max_attempts: self.max_attempts,
            target: self.target.clone(),
            guesses: self.history.iter().map(|a| a.guess.clone()).collect(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    pub fn remaining_attempts(&self) -> usize {
        self.max_attempts - self.history.len()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn allowed(&self) -> &'v Vocabulary {
        self.allowed
    }

    pub fn possible(&self) -> &'v Vocabulary {
        self.possible
    }
}
