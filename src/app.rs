//! App: wires config, corpus, engine cache, and poster source together.
//!
//! The query surface: pick a title, get up to `top_k` suggestions with
//! poster URLs. The engine is built on first query and reused after.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use cinerec_config::Config;

use crate::corpus::{self, CorpusError};
use crate::poster::{resolve_all, PosterSource};
use crate::recommend::{Engine, EngineCache, RecommendError};

/// Errors surfaced to the query caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

/// A recommendation ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub movie_id: u64,
    pub score: f32,
    pub poster_url: String,
}

pub struct App {
    config: Config,
    cache: EngineCache,
    posters: Box<dyn PosterSource>,
}

impl App {
    pub fn new(config: Config, posters: Box<dyn PosterSource>) -> Self {
        Self {
            config,
            cache: EngineCache::new(),
            posters,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn corpus_path(&self) -> &Path {
        &self.config.corpus_path
    }

    /// The engine, loading the corpus and building the matrix on first call.
    pub fn engine(&self) -> Result<Arc<Engine>, CorpusError> {
        self.cache.get_or_init(|| {
            let items = corpus::load(&self.config.corpus_path)?;
            Ok(Engine::build(items, &self.config.similarity))
        })
    }

    /// Selectable titles, corpus order.
    pub fn titles(&self) -> Result<Vec<String>, AppError> {
        Ok(self.engine()?.titles().map(str::to_string).collect())
    }

    /// Suggestions for `title`. `limit` defaults to `top_k`.
    pub async fn suggest(&self, title: &str, limit: Option<usize>) -> Result<Vec<Suggestion>, AppError> {
        let engine = self.engine()?;
        let recommendations = engine.recommend(title, limit.unwrap_or(self.config.top_k))?;
        let posters = resolve_all(self.posters.as_ref(), &recommendations).await;
        Ok(recommendations
            .into_iter()
            .zip(posters)
            .map(|(rec, poster_url)| Suggestion {
                title: rec.title,
                movie_id: rec.movie_id,
                score: rec.score,
                poster_url,
            })
            .collect())
    }
}
