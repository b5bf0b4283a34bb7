//! Offline similarity engine for tag-based recommendations.
//!
//! Tag strings in, N×N cosine similarity matrix out:
//! - `Vocabulary` picks the top terms by corpus frequency
//! - `CountVectorizer` turns each tag string into a count vector
//! - `SimilarityMatrix` holds every pairwise cosine score
//!
//! Pure and synchronous. Loading and caching live with the caller.

pub mod matrix;
pub mod tokenize;
pub mod vectorizer;
pub mod vocabulary;

pub use matrix::{cosine_similarity, SimilarityMatrix};
pub use tokenize::{tokenize, StopWords};
pub use vectorizer::{vectorize, CountVector, CountVectorizer};
pub use vocabulary::Vocabulary;
