//! cinerec: content-based movie recommendations.
//!
//! Tag strings become bag-of-words count vectors; every pair of movies
//! gets a cosine similarity score, computed once per process; a query
//! reads one row and returns the nearest neighbours.

pub mod app;
pub mod corpus;
pub mod poster;
pub mod recommend;

pub use cinerec_config as config;
pub use cinerec_similarity as similarity;
