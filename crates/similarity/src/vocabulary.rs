//! Fixed-size vocabulary selected from a tag corpus.
//!
//! Terms are ranked by total occurrence count across the corpus. Ties
//! go to the lexicographically smaller term, so identical input always
//! yields the identical vocabulary. Selected terms get column indices
//! in lexicographic order.

use std::collections::HashMap;

use tracing::debug;

use crate::tokenize::{tokenize, StopWords};

/// Immutable term → column mapping.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// column → term, sorted
    terms: Vec<String>,
    /// term → column
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from a corpus of tag strings.
    ///
    /// `max_features == 0` means no limit. An empty corpus gives an
    /// empty vocabulary.
    pub fn build<S: AsRef<str>>(
        corpus: &[S],
        max_features: usize,
        stop_words: &StopWords,
    ) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for doc in corpus {
            for term in tokenize(doc.as_ref(), stop_words) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let distinct = counts.len();
        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if max_features > 0 {
            ranked.truncate(max_features);
        }

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        debug!(
            documents = corpus.len(),
            distinct,
            selected = terms.len(),
            "vocabulary built"
        );

        Self::from_terms(terms)
    }

    fn from_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }

    /// Column index for a term, if it made the cut.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at a column.
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    /// All terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_corpus_gives_empty_vocabulary() {
        let corpus: Vec<&str> = vec![];
        let vocab = Vocabulary::build(&corpus, 5000, &StopWords::english());
        assert!(vocab.is_empty());
        assert_eq!(vocab.get("anything"), None);
    }

    #[test]
    fn columns_are_lexicographic() {
        let vocab = Vocabulary::build(&["zebra apple mango"], 0, &StopWords::none());
        assert_eq!(vocab.terms(), &["apple", "mango", "zebra"]);
        assert_eq!(vocab.get("apple"), Some(0));
        assert_eq!(vocab.get("zebra"), Some(2));
        assert_eq!(vocab.term(1), Some("mango"));
    }

    #[test]
    fn stop_words_excluded() {
        let vocab = Vocabulary::build(&["the space and the war"], 0, &StopWords::english());
        assert_eq!(vocab.terms(), &["space", "war"]);
    }

    #[test]
    fn keeps_most_frequent_terms() {
        let corpus = ["space space space war war future", "space war comedy"];
        let vocab = Vocabulary::build(&corpus, 2, &StopWords::none());
        assert_eq!(vocab.terms(), &["space", "war"]);
    }

    #[test]
    fn ties_break_lexicographically() {
        // All four terms occur once; the two smallest win.
        let vocab = Vocabulary::build(&["delta alpha charlie bravo"], 2, &StopWords::none());
        assert_eq!(vocab.terms(), &["alpha", "bravo"]);
    }

    #[test]
    fn build_is_reproducible() {
        let corpus = ["one two three four", "four five six", "six seven eight nine"];
        let a = Vocabulary::build(&corpus, 4, &StopWords::none());
        for _ in 0..10 {
            let b = Vocabulary::build(&corpus, 4, &StopWords::none());
            assert_eq!(a.terms(), b.terms());
        }
    }

    #[test]
    fn counts_repeats_within_a_document() {
        // "war" appears three times in one doc, "drama" once in each of two.
        let corpus = ["war war war", "drama", "drama"];
        let vocab = Vocabulary::build(&corpus, 1, &StopWords::none());
        assert_eq!(vocab.terms(), &["war"]);
    }
}
