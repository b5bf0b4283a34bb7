//! Bag-of-words count vectors over a fixed vocabulary.
//!
//! Vectors are stored sparse (sorted `(column, count)` pairs) but
//! behave as dense vectors of length `dims`.

use std::cmp::Ordering;

use crate::tokenize::{tokens, StopWords};
use crate::vocabulary::Vocabulary;

/// Term counts for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVector {
    dims: usize,
    /// (column, count), ascending by column, counts > 0
    entries: Vec<(usize, u32)>,
}

impl CountVector {
    /// All-zero vector of the given length.
    pub fn zeros(dims: usize) -> Self {
        Self {
            dims,
            entries: Vec::new(),
        }
    }

    /// Logical length (vocabulary size).
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Count at a column. Zero for out-of-range columns.
    pub fn get(&self, column: usize) -> u32 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// Non-zero entries, ascending by column.
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_dense(&self) -> Vec<u32> {
        let mut dense = vec![0u32; self.dims];
        for &(column, count) in &self.entries {
            dense[column] = count;
        }
        dense
    }

    /// Exact squared L2 norm.
    pub fn norm_squared(&self) -> u64 {
        self.entries
            .iter()
            .map(|&(_, c)| u64::from(c) * u64::from(c))
            .sum()
    }

    /// Exact dot product (merge join over sorted columns).
    pub fn dot(&self, other: &CountVector) -> u64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut acc = 0u64;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    acc += u64::from(a[i].1) * u64::from(b[j].1);
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// Count `tags` against `vocabulary`. Out-of-vocabulary tokens are ignored.
pub fn vectorize(tags: &str, vocabulary: &Vocabulary) -> CountVector {
    let mut counts = vec![0u32; vocabulary.len()];
    let mut touched = Vec::new();
    for token in tokens(tags) {
        if let Some(column) = vocabulary.get(&token) {
            if counts[column] == 0 {
                touched.push(column);
            }
            counts[column] += 1;
        }
    }
    touched.sort_unstable();
    CountVector {
        dims: vocabulary.len(),
        entries: touched.into_iter().map(|c| (c, counts[c])).collect(),
    }
}

/// Vocabulary plus the transform that goes with it.
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    /// Select the vocabulary from a corpus.
    pub fn fit<S: AsRef<str>>(corpus: &[S], max_features: usize, stop_words: &StopWords) -> Self {
        Self {
            vocabulary: Vocabulary::build(corpus, max_features, stop_words),
        }
    }

    /// Fit on `corpus` and vectorize every document, row-aligned with the input.
    pub fn fit_transform<S: AsRef<str>>(
        corpus: &[S],
        max_features: usize,
        stop_words: &StopWords,
    ) -> (Self, Vec<CountVector>) {
        let vectorizer = Self::fit(corpus, max_features, stop_words);
        let vectors = vectorizer.transform_all(corpus);
        (vectorizer, vectors)
    }

    pub fn transform(&self, tags: &str) -> CountVector {
        vectorize(tags, &self.vocabulary)
    }

    pub fn transform_all<S: AsRef<str>>(&self, corpus: &[S]) -> Vec<CountVector> {
        corpus.iter().map(|d| self.transform(d.as_ref())).collect()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }
}
