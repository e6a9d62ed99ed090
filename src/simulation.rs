//! Batch simulation: play many independent games and collect their outcomes.
//!
//! Game `i` of a batch seeded with `seed` draws everything it needs (target
//! and agent seed) from `SmallRng::seed_from_u64(seed + i)`, so a batch
//! replays identically whether it runs sequentially or on the rayon pool.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::error::{Result, VocabularyError, WordleError};
use crate::game::{GameOutcome, GameSession};
use crate::stats::{summarize, HistogramReport};
use crate::word::{Vocabulary, Word};
use crate::DEFAULT_MAX_ATTEMPTS;

/// Default number of games per batch.
pub const DEFAULT_NUM_GAMES: usize = 1000;

/// Batch parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub num_games: usize,
    pub max_attempts: usize,
    /// Base seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Run games on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_games: DEFAULT_NUM_GAMES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            parallel: false,
        }
    }
}

/// A game aborted because the agent proposed a word outside the allowed
/// vocabulary. Never counted as a loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameFailure {
    pub game_index: usize,
    pub target: Word,
    pub rejected_guess: Word,
}

/// Everything a batch produced, in game order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub seed: u64,
    pub outcomes: Vec<GameOutcome>,
    pub failures: Vec<GameFailure>,
}

impl BatchResult {
    /// Summary statistics, with aborted games reported separately.
    pub fn report(&self) -> HistogramReport {
        let mut report = summarize(&self.outcomes);
        report.aborted_games = self.failures.len();
        report
    }
}

/// Runs batches of games against agents built by a factory.
#[derive(Debug, Clone, Default)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play `num_games` games, each against a target drawn uniformly (with
    /// replacement) from `possible` and a fresh agent from `agent_factory`.
    ///
    /// The factory receives a per-game seed for the agent's own randomness.
    pub fn run<A, F>(
        &self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        agent_factory: F,
    ) -> Result<BatchResult>
    where
        A: Agent,
        F: Fn(u64) -> A + Sync,
    {
        self.execute(
            allowed,
            possible,
            self.config.num_games,
            |_, rng| possible.choose(rng).clone(),
            &agent_factory,
        )
    }

    /// Play one game per word of `possible`, in vocabulary order.
    /// `num_games` is ignored.
    pub fn run_exhaustive<A, F>(
        &self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        agent_factory: F,
    ) -> Result<BatchResult>
    where
        A: Agent,
        F: Fn(u64) -> A + Sync,
    {
        self.execute(
            allowed,
            possible,
            possible.len(),
            |index, _| possible.words()[index].clone(),
            &agent_factory,
        )
    }

    fn execute<A, F, T>(
        &self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        num_games: usize,
        pick_target: T,
        agent_factory: &F,
    ) -> Result<BatchResult>
    where
        A: Agent,
        F: Fn(u64) -> A + Sync,
        T: Fn(usize, &mut SmallRng) -> Word + Sync,
    {
        check_vocabularies(allowed, possible)?;
        let max_attempts = self.config.max_attempts;
        if max_attempts == 0 {
            return Err(WordleError::InvalidMaxAttempts);
        }

        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        info!(
            seed,
            num_games,
            max_attempts,
            parallel = self.config.parallel,
            "starting simulation"
        );
        let start = Instant::now();

        let play = |index: usize| {
            let mut rng = game_rng(seed, index);
            let target = pick_target(index, &mut rng);
            let mut agent = agent_factory(rng.gen());
            let result = GameSession::new(allowed, possible, target.clone(), max_attempts)
                .and_then(|mut session| session.play(&mut agent));
            (index, target, result)
        };

        let results: Vec<_> = if self.config.parallel {
            (0..num_games).into_par_iter().map(&play).collect()
        } else {
            (0..num_games).map(&play).collect()
        };

        let mut outcomes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (index, target, result) in results {
            match result {
                Ok(outcome) => {
                    debug!(
                        game = index,
                        target = %outcome.target(),
                        status = ?outcome.status(),
                        attempts = outcome.attempts_used(),
                        "game finished"
                    );
                    outcomes.push(outcome);
                }
                Err(WordleError::InvalidGuess(guess)) => {
                    warn!(game = index, %target, %guess, "agent proposed a disallowed word; game aborted");
                    failures.push(GameFailure {
                        game_index: index,
                        target,
                        rejected_guess: guess,
                    });
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            games = outcomes.len(),
            aborted = failures.len(),
            elapsed = ?start.elapsed(),
            "simulation finished"
        );
        Ok(BatchResult {
            seed,
            outcomes,
            failures,
        })
    }
}

fn game_rng(seed: u64, index: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed.wrapping_add(index as u64))
}

/// Both vocabularies must share one word length. `possible` is expected, not
/// required, to be a subset of `allowed`.
fn check_vocabularies(allowed: &Vocabulary, possible: &Vocabulary) -> Result<()> {
    if allowed.word_length() != possible.word_length() {
        return Err(VocabularyError::WrongLength {
            word: possible.words()[0].to_string(),
            expected: allowed.word_length(),
            actual: possible.word_length(),
        }
        .into());
    }
    let missing = possible.missing_from(allowed).count();
    if missing > 0 {
        warn!(
            missing,
            "possible words missing from the allowed vocabulary; agents cannot guess them"
        );
    }
    Ok(())
}
