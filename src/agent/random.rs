//! Baseline agent: guess a random word that still fits the feedback.

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use super::{Agent, CandidatePool};
use crate::game::Attempt;
use crate::word::{Vocabulary, Word};

/// Picks uniformly among the remaining candidates that are legal guesses.
/// With no candidate left it picks uniformly from the allowed vocabulary.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SmallRng,
    pool: CandidatePool,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            pool: CandidatePool::new(),
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.pool.len()
    }
}

impl Agent for RandomAgent {
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word {
        let candidates = self.pool.sync(possible, history);
        candidates
            .iter()
            .filter(|w| allowed.contains(w))
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| allowed.choose(&mut self.rng).clone())
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
