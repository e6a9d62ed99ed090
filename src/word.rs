//! Words and vocabularies.
//!
//! A [`Vocabulary`] is loaded once per run and shared read-only by every game,
//! so membership checks go through a hash set while the ordered word list
//! backs uniform random draws.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::error::VocabularyError;

/// A lowercase ASCII word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Word(Box<str>);

impl Word {
    /// Normalize and validate a word. Surrounding whitespace is trimmed and
    /// letters are lowercased.
    pub fn new(raw: &str) -> Result<Self, VocabularyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(VocabularyError::InvalidWord(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase().into_boxed_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Word {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A non-empty set of unique words sharing one length.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<Word>,
    index: HashSet<Word>,
    word_length: usize,
    fingerprint: u64,
}

impl Vocabulary {
    /// Build a vocabulary, keeping the first occurrence of duplicates.
    pub fn new<I>(words: I, word_length: usize) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = Word>,
    {
        let mut ordered = Vec::new();
        let mut index = HashSet::new();
        for word in words {
            if word.len() != word_length {
                return Err(VocabularyError::WrongLength {
                    actual: word.len(),
                    word: word.to_string(),
                    expected: word_length,
                });
            }
            if index.insert(word.clone()) {
                ordered.push(word);
            }
        }
        if ordered.is_empty() {
            return Err(VocabularyError::Empty);
        }
        let mut hasher = DefaultHasher::new();
        word_length.hash(&mut hasher);
        ordered.hash(&mut hasher);
        Ok(Self {
            words: ordered,
            index,
            word_length,
            fingerprint: hasher.finish(),
        })
    }

    /// Build a vocabulary from string slices.
    pub fn from_strs<I, S>(words: I, word_length: usize) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| Word::new(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(words, word_length)
    }

    /// Parse a newline-delimited word list. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str, word_length: usize) -> Result<Self, VocabularyError> {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        Self::from_strs(lines, word_length)
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Hash of the ordered word list. Equal vocabularies share a fingerprint.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Draw a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    /// Words of `self` that are missing from `other`.
    pub fn missing_from<'a>(&'a self, other: &'a Vocabulary) -> impl Iterator<Item = &'a Word> {
        self.words.iter().filter(move |w| !other.contains(w))
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Load a newline-delimited word list from disk.
pub fn load_vocabulary(
    path: impl AsRef<Path>,
    word_length: usize,
) -> Result<Vocabulary, VocabularyError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Vocabulary::parse(&text, word_length)
}

/// The embedded list of legal guesses.
pub fn default_allowed() -> Result<Vocabulary, VocabularyError> {
    Vocabulary::parse(include_str!("../data/allowed.txt"), crate::WORD_LENGTH)
}

/// The embedded list of legal secrets.
pub fn default_possible() -> Result<Vocabulary, VocabularyError> {
    Vocabulary::parse(include_str!("../data/possible.txt"), crate::WORD_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_is_normalized() {
        let word = Word::new("  CrAnE\n").unwrap();
        assert_eq!(word.as_str(), "crane");
    }

    #[test]
    fn word_rejects_non_letters() {
        assert!(Word::new("cr4ne").is_err());
        assert!(Word::new("").is_err());
        assert!(Word::new("é").is_err());
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let vocab = Vocabulary::from_strs(["crane", "slate", "CRANE"], 5).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.words()[0].as_str(), "crane");
        assert_eq!(vocab.words()[1].as_str(), "slate");
    }

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let vocab = Vocabulary::parse("# list\ncrane\n\n  slate  \n", 5).unwrap();
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn empty_and_wrong_length_are_rejected() {
        assert!(matches!(
            Vocabulary::parse("\n\n", 5),
            Err(VocabularyError::Empty)
        ));
        assert!(matches!(
            Vocabulary::from_strs(["crane", "cat"], 5),
            Err(VocabularyError::WrongLength { expected: 5, actual: 3, .. })
        ));
    }

    #[test]
    fn fingerprint_follows_contents() {
        let a = Vocabulary::from_strs(["crane", "slate"], 5).unwrap();
        let b = Vocabulary::parse("crane\nslate\n", 5).unwrap();
        let c = Vocabulary::from_strs(["crane", "trace"], 5).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn embedded_lists_load() {
        let allowed = default_allowed().unwrap();
        let possible = default_possible().unwrap();
        assert!(allowed.len() >= possible.len());
        assert_eq!(possible.missing_from(&allowed).count(), 0);
    }
}
