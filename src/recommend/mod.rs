//! Recommender: nearest neighbours by tag similarity.
//!
//! `Engine` is the immutable handle built once from a corpus: items,
//! title index, vocabulary, and the full similarity matrix. Queries
//! are pure reads of one matrix row.

pub mod cache;

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use cinerec_config::{SimilarityConfig, StopWordSet};
use cinerec_similarity::{CountVectorizer, SimilarityMatrix, StopWords, Vocabulary};

use crate::corpus::Item;

pub use cache::EngineCache;

/// Errors from recommendation queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendError {
    #[error("no item titled '{title}'")]
    NotFound { title: String },
}

/// One ranked neighbour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Row in the item table.
    pub index: usize,
    pub movie_id: u64,
    pub title: String,
    pub score: f32,
}

/// Rank row `query` of `matrix`, self excluded by index.
///
/// Score descending, ties by ascending row index.
fn rank(matrix: &SimilarityMatrix, query: usize, k: usize) -> Vec<(usize, f32)> {
    let Some(row) = matrix.row(query) else {
        return Vec::new();
    };
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(idx, _)| idx != query)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(k);
    scored
}

fn to_recommendations(items: &[Item], ranked: Vec<(usize, f32)>) -> Vec<Recommendation> {
    ranked
        .into_iter()
        .map(|(index, score)| Recommendation {
            index,
            movie_id: items[index].movie_id,
            title: items[index].title.clone(),
            score,
        })
        .collect()
}

/// Top `k` neighbours of `query_title` against an explicit item table
/// and matrix. First exact title match is the query row.
pub fn recommend(
    query_title: &str,
    items: &[Item],
    matrix: &SimilarityMatrix,
    k: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    let query = items
        .iter()
        .position(|item| item.title == query_title)
        .ok_or_else(|| RecommendError::NotFound {
            title: query_title.to_string(),
        })?;
    Ok(to_recommendations(items, rank(matrix, query, k)))
}

/// Stop word set described by the config.
pub fn stop_words(config: &SimilarityConfig) -> StopWords {
    let mut stop_words = match config.stop_words {
        StopWordSet::English => StopWords::english(),
        StopWordSet::None => StopWords::none(),
    };
    stop_words.extend(&config.extra_stop_words);
    stop_words
}

/// Built, read-only recommendation state.
#[derive(Debug)]
pub struct Engine {
    items: Vec<Item>,
    /// title → first row with that title
    by_title: HashMap<String, usize>,
    vocabulary: Vocabulary,
    matrix: SimilarityMatrix,
}

impl Engine {
    /// Vocabulary → vectors → matrix. The expensive step; run once.
    pub fn build(items: Vec<Item>, config: &SimilarityConfig) -> Self {
        let started = Instant::now();
        let tags: Vec<&str> = items.iter().map(|item| item.tags.as_str()).collect();
        let (vectorizer, vectors) =
            CountVectorizer::fit_transform(&tags, config.max_features, &stop_words(config));
        let matrix = SimilarityMatrix::build(&vectors);

        let mut by_title = HashMap::with_capacity(items.len());
        for (row, item) in items.iter().enumerate() {
            by_title.entry(item.title.clone()).or_insert(row);
        }

        info!(
            items = items.len(),
            vocabulary = vectorizer.vocabulary().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "similarity engine built"
        );

        Self {
            items,
            by_title,
            vocabulary: vectorizer.into_vocabulary(),
            matrix,
        }
    }

    /// Top `k` items most similar to `title`, never including `title` itself.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<Recommendation>, RecommendError> {
        let query = self.index_of(title).ok_or_else(|| RecommendError::NotFound {
            title: title.to_string(),
        })?;
        let results = to_recommendations(&self.items, rank(&self.matrix, query, k));
        debug!("'{title}' (row {query}) → {} recommendations", results.len());
        Ok(results)
    }

    /// Row of the first item with this exact title.
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    /// Titles in corpus order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
