//! Guessing strategies.
//!
//! An [`Agent`] sees the two vocabularies and the attempt history, never the
//! target. Every strategy in this module narrows the possible words with a
//! [`CandidatePool`] and differs only in how it picks from what is left.

mod entropy;
mod expectimax;
mod random;

pub use entropy::{best_opening, entropy_for_word, rank_guesses, EntropyAgent, GuessAnalysis};
pub use expectimax::{best_guess, expected_remaining, split_pool, ExpectimaxAgent, GuessCache};
pub use random::RandomAgent;

use std::fmt;
use std::str::FromStr;

use crate::feedback::is_consistent;
use crate::game::Attempt;
use crate::word::{Vocabulary, Word};

/// A Wordle guessing strategy.
pub trait Agent {
    /// Propose the next guess. The returned word must be in `allowed`.
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word;

    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word {
        (**self).propose_guess(allowed, possible, history)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<A: Agent + ?Sized> Agent for &mut A {
    fn propose_guess(
        &mut self,
        allowed: &Vocabulary,
        possible: &Vocabulary,
        history: &[Attempt],
    ) -> Word {
        (**self).propose_guess(allowed, possible, history)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Possible words still consistent with the attempts seen so far.
///
/// The pool is refiltered incrementally: only attempts added since the last
/// call are applied. An empty history, or one shorter than what was already
/// seen, means a new game and the pool starts over from the possible
/// vocabulary.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    words: Vec<Word>,
    seen: usize,
    initialized: bool,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the pool up to date with `history` and return the candidates.
    pub fn sync(&mut self, possible: &Vocabulary, history: &[Attempt]) -> &[Word] {
        if !self.initialized || history.is_empty() || history.len() < self.seen {
            self.reset(possible);
        }
        for attempt in &history[self.seen..] {
            self.words
                .retain(|word| is_consistent(&attempt.guess, &attempt.feedback, word));
        }
        self.seen = history.len();
        &self.words
    }

    pub fn reset(&mut self, possible: &Vocabulary) {
        self.words = possible.words().to_vec();
        self.seen = 0;
        self.initialized = true;
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The shipped strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AgentKind {
    /// Uniform pick among the remaining candidates
    Random,
    /// Maximize the information gained from the feedback
    Entropy,
    /// Minimize the expected pool size over a per-position split tree
    Expectimax,
}

impl AgentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Random => "random",
            AgentKind::Entropy => "entropy",
            AgentKind::Expectimax => "expectimax",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(AgentKind::Random),
            "entropy" => Ok(AgentKind::Entropy),
            "expectimax" => Ok(AgentKind::Expectimax),
            other => Err(format!("unknown agent: {other}")),
        }
    }
}

/// Builds a fresh agent per game.
///
/// The builder is shared by every worker of a simulation. Agents it builds
/// are not; the only state they share is the expectimax [`GuessCache`], which
/// is internally synchronized and keyed by vocabulary, so one builder can serve
/// runs over different word lists.
#[derive(Debug, Clone)]
pub struct AgentBuilder {
    kind: AgentKind,
    cache: GuessCache,
    opening: Option<Word>,
}

impl AgentBuilder {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            cache: GuessCache::new(),
            opening: None,
        }
    }

    /// Fixed first guess for the entropy agent.
    pub fn with_opening(mut self, opening: Word) -> Self {
        self.opening = Some(opening);
        self
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn build(&self, seed: u64) -> Box<dyn Agent> {
        match self.kind {
            AgentKind::Random => Box::new(RandomAgent::new(seed)),
            AgentKind::Entropy => Box::new(EntropyAgent::new(self.opening.clone())),
            AgentKind::Expectimax => Box::new(ExpectimaxAgent::new(self.cache.clone())),
        }
    }
}

/// The first word of `words` that is also a legal guess.
pub(crate) fn first_allowed<'a>(words: &'a [Word], allowed: &Vocabulary) -> Option<&'a Word> {
    words.iter().find(|w| allowed.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::evaluate;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary::from_strs(words.iter().copied(), 5).unwrap()
    }

    fn attempt(guess: &str, target: &str) -> Attempt {
        let guess = Word::new(guess).unwrap();
        let target = Word::new(target).unwrap();
        let feedback = evaluate(&guess, &target).unwrap();
        Attempt { guess, feedback }
    }

    #[test]
    fn pool_filters_incrementally_and_resets() {
        let possible = vocab(&["crane", "crate", "trace", "slate", "toast"]);
        let mut pool = CandidatePool::new();

        assert_eq!(pool.sync(&possible, &[]).len(), 5);

        let history = vec![attempt("crane", "crate")];
        let remaining = pool.sync(&possible, &history).to_vec();
        assert!(remaining.contains(&Word::new("crate").unwrap()));
        assert!(!remaining.contains(&Word::new("toast").unwrap()));

        assert_eq!(pool.sync(&possible, &[]).len(), 5);
    }

    #[test]
    fn agent_kind_parses() {
        assert_eq!("Entropy".parse::<AgentKind>(), Ok(AgentKind::Entropy));
        assert!("genius".parse::<AgentKind>().is_err());
        assert_eq!(AgentKind::Expectimax.to_string(), "expectimax");
    }
}
