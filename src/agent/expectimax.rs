//! Expectimax agent.
//!
//! Each guess is scored by walking a ternary tree over its letters. At depth
//! `pos` the pool splits into words matching the guess letter at `pos`
//! (green), words containing it elsewhere (yellow) and the rest (grey). The
//! score of a node is the probability-weighted score of its children, so the
//! root score is the expected number of words left after the guess. Lower is
//! better.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;

use super::{first_allowed, Agent, CandidatePool};
use crate::game::Attempt;
use crate::word::{Vocabulary, Word};

/// Pools this small are answered by guessing a candidate outright.
const SMALL_POOL: usize = 3;

/// Fingerprints of the (allowed, possible) pair a path was played against.
type VocabularyKey = (u64, u64);

/// Best guesses keyed by the vocabularies and the feedback path that led to
/// them.
///
/// Shared by every agent a builder makes. For a deterministic agent the
/// vocabularies and the path fully determine the pool, so entries stay valid
/// across games and across runs; a different vocabulary pair gets its own
/// table.
#[derive(Debug, Clone, Default)]
pub struct GuessCache {
    inner: Arc<RwLock<HashMap<VocabularyKey, HashMap<String, Word>>>>,
}

impl GuessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, allowed: &Vocabulary, possible: &Vocabulary, path: &str) -> Option<Word> {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&vocabulary_key(allowed, possible))
            .and_then(|paths| paths.get(path))
            .cloned()
    }

    /// Insert unless present; returns the cached word.
    pub fn insert(
        &self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        path: String,
        word: Word,
    ) -> Word {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        map.entry(vocabulary_key(allowed, possible))
            .or_default()
            .entry(path)
            .or_insert(word)
            .clone()
    }

    /// Cached paths across every vocabulary pair.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn vocabulary_key(allowed: &Vocabulary, possible: &Vocabulary) -> VocabularyKey {
    (allowed.fingerprint(), possible.fingerprint())
}

/// Split `pool` on `letter` at `pos` into `[green, yellow, grey]`.
fn split<W: Borrow<Word> + Clone>(letter: u8, pos: usize, pool: &[W]) -> [Vec<W>; 3] {
    let mut branches: [Vec<W>; 3] = Default::default();
    for word in pool {
        let bytes = Borrow::<Word>::borrow(word).as_bytes();
        let branch = if bytes[pos] == letter {
            0
        } else if bytes.contains(&letter) {
            1
        } else {
            2
        };
        branches[branch].push(word.clone());
    }
    branches
}

/// Split `pool` on the letter of `guess` at `pos` into (green, yellow, grey).
pub fn split_pool(guess: &Word, pos: usize, pool: &[Word]) -> (Vec<Word>, Vec<Word>, Vec<Word>) {
    let [green, yellow, grey] = split(guess.as_bytes()[pos], pos, pool);
    (green, yellow, grey)
}

/// Expected number of words left in `pool` after guessing `guess`.
pub fn expected_remaining(guess: &Word, pool: &[Word]) -> f64 {
    let refs: Vec<&Word> = pool.iter().collect();
    node_score(guess.as_bytes(), 0, &refs)
}

fn node_score(guess: &[u8], pos: usize, pool: &[&Word]) -> f64 {
    let n = pool.len();
    if n <= 1 {
        return 1.0;
    }
    if pos >= guess.len() {
        return n as f64;
    }

    let n = n as f64;
    split(guess[pos], pos, pool)
        .iter()
        .map(|branch| branch.len() as f64 / n * node_score(guess, pos + 1, branch))
        .sum()
}

/// The allowed word with the lowest expected remaining pool; the earliest in
/// vocabulary order wins ties.
pub fn best_guess(allowed: &Vocabulary, pool: &[Word]) -> Option<Word> {
    allowed
        .words()
        .par_iter()
        .enumerate()
        .map(|(idx, word)| (idx, expected_remaining(word, pool)))
        .reduce_with(|a, b| if b.1 < a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a })
        .map(|(idx, _)| allowed.words()[idx].clone())
}

/// Guesses by expectimax score, memoizing per feedback path.
#[derive(Debug, Clone, Default)]
pub struct ExpectimaxAgent {
    pool: CandidatePool,
    cache: GuessCache,
}

impl ExpectimaxAgent {
    pub fn new(cache: GuessCache) -> Self {
        Self {
            pool: CandidatePool::new(),
            cache,
        }
    }

    pub fn remaining_count(&self) -> usize {
        self.pool.len()
    }
}

impl Agent for ExpectimaxAgent {
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word {
        let candidates = self.pool.sync(possible, history);

        if !history.is_empty() && candidates.len() <= SMALL_POOL {
            if let Some(word) = first_allowed(candidates, allowed) {
                return word.clone();
            }
        }

        let path: String = history
            .iter()
            .map(|a| a.feedback.to_code_string())
            .collect();
        if let Some(word) = self.cache.get(allowed, possible, &path) {
            return word;
        }

        let guess = match best_guess(allowed, candidates) {
            Some(word) => word,
            None => allowed.words()[0].clone(),
        };
        self.cache.insert(allowed, possible, path, guess)
    }

    fn name(&self) -> &'static str {
        "expectimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREES: [&str; 5] = ["birch", "beech", "cedar", "ebony", "maple"];

    fn trees() -> Vec<Word> {
        TREES.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn expected_remaining_of_ebony() {
        let score = expected_remaining(&Word::new("ebony").unwrap(), &trees());
        assert!((score - 1.4).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn split_on_first_letter() {
        let pool = trees();
        let (green, yellow, grey) = split_pool(&pool[0], 0, &pool);
        let names = |ws: Vec<Word>| ws.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        assert_eq!(names(green), ["birch", "beech"]);
        assert_eq!(names(yellow), ["ebony"]);
        assert_eq!(names(grey), ["cedar", "maple"]);
    }

    #[test]
    fn opening_guess_splits_best() {
        let vocab = Vocabulary::from_strs(TREES, 5).unwrap();
        let mut agent = ExpectimaxAgent::new(GuessCache::new());
        let guess = agent.propose_guess(&vocab, &vocab, &[]);
        assert!(guess.as_str() == "birch" || guess.as_str() == "beech");
    }

    #[test]
    fn split_of_references_matches_owned_split() {
        let pool = trees();
        let refs: Vec<&Word> = pool.iter().collect();
        let [green, yellow, grey] = split(b'e', 1, &refs);
        let (g, y, r) = split_pool(&Word::new("beech").unwrap(), 1, &pool);
        assert_eq!(green.into_iter().cloned().collect::<Vec<_>>(), g);
        assert_eq!(yellow.into_iter().cloned().collect::<Vec<_>>(), y);
        assert_eq!(grey.into_iter().cloned().collect::<Vec<_>>(), r);
    }

    #[test]
    fn cache_keeps_first_entry() {
        let vocab = Vocabulary::from_strs(TREES, 5).unwrap();
        let cache = GuessCache::new();
        let first = cache.insert(&vocab, &vocab, String::new(), Word::new("birch").unwrap());
        let second = cache.insert(&vocab, &vocab, String::new(), Word::new("cedar").unwrap());
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_entries_are_per_vocabulary() {
        let trees = Vocabulary::from_strs(TREES, 5).unwrap();
        let other = Vocabulary::from_strs(["crane", "slate"], 5).unwrap();
        let cache = GuessCache::new();
        cache.insert(&trees, &trees, String::new(), Word::new("birch").unwrap());

        assert_eq!(cache.get(&other, &other, ""), None);
        assert_eq!(cache.get(&trees, &other, ""), None);
        assert_eq!(cache.get(&trees, &trees, ""), Word::new("birch").ok());
    }
}
