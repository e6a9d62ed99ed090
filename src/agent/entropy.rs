//! Entropy-maximizing agent.
//!
//! The agent picks the guess whose feedback distribution over the remaining
//! candidates has the highest Shannon entropy, which minimizes the expected
//! number of candidates left after the guess.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use super::{first_allowed, Agent, CandidatePool};
use crate::feedback::{grade, Feedback};
use crate::game::Attempt;
use crate::word::{Vocabulary, Word};

/// Result of analyzing a potential guess
#[derive(Debug, Clone)]
pub struct GuessAnalysis {
    pub word: Word,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_candidate: bool,
}

/// Entropy of the feedback distribution of `guess` over `candidates`, in bits.
pub fn entropy_for_word(guess: &Word, candidates: &[Word]) -> f64 {
    let n = candidates.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let mut pattern_counts: HashMap<Feedback, u32> = HashMap::new();
    for answer in candidates {
        let pattern = grade(guess.as_bytes(), answer.as_bytes());
        *pattern_counts.entry(pattern).or_insert(0) += 1;
    }

    let mut entropy = 0.0;
    for &count in pattern_counts.values() {
        let p = count as f64 / n;
        entropy -= p * p.log2();
    }
    entropy
}

/// The `n` best guesses from `allowed`, highest entropy first. Ties prefer
/// words that could still be the answer, then vocabulary order.
pub fn rank_guesses(allowed: &Vocabulary, candidates: &[Word], n: usize) -> Vec<GuessAnalysis> {
    if candidates.is_empty() {
        return vec![];
    }

    let candidate_set: HashSet<&Word> = candidates.iter().collect();
    let mut analyses: Vec<GuessAnalysis> = allowed
        .words()
        .par_iter()
        .map(|word| {
            let entropy = entropy_for_word(word, candidates);
            GuessAnalysis {
                word: word.clone(),
                entropy,
                expected_remaining: candidates.len() as f64 / 2_f64.powf(entropy),
                is_candidate: candidate_set.contains(word),
            }
        })
        .collect();

    // Stable sort keeps vocabulary order among exact ties.
    analyses.sort_by(|a, b| match b.entropy.partial_cmp(&a.entropy) {
        Some(std::cmp::Ordering::Equal) => b.is_candidate.cmp(&a.is_candidate),
        Some(ord) => ord,
        None => std::cmp::Ordering::Equal,
    });

    analyses.truncate(n);
    analyses
}

/// The best first guess for a fresh game.
pub fn best_opening(allowed: &Vocabulary, possible: &Vocabulary) -> Option<Word> {
    rank_guesses(allowed, possible.words(), 1)
        .into_iter()
        .next()
        .map(|a| a.word)
}

/// Guesses the maximum-entropy word each turn.
#[derive(Debug, Clone, Default)]
pub struct EntropyAgent {
    pool: CandidatePool,
    opening: Option<Word>,
}

impl EntropyAgent {
    /// `opening` replaces the first-turn scan, which is the expensive one.
    pub fn new(opening: Option<Word>) -> Self {
        Self {
            pool: CandidatePool::new(),
            opening,
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.pool.len()
    }
}

impl Agent for EntropyAgent {
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word {
        let candidates = self.pool.sync(possible, history);

        if history.is_empty() {
            if let Some(opening) = self.opening.as_ref().filter(|w| allowed.contains(w)) {
                return opening.clone();
            }
        }

        // With one or two candidates left, guessing one of them is optimal.
        if candidates.len() <= 2 {
            if let Some(word) = first_allowed(candidates, allowed) {
                return word.clone();
            }
        }

        rank_guesses(allowed, candidates, 1)
            .into_iter()
            .next()
            .map(|a| a.word)
            .unwrap_or_else(|| allowed.words()[0].clone())
    }

    fn name(&self) -> &'static str {
        "entropy"
    }
}
