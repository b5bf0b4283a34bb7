//! Poster resolution: decorates recommendations with display images.
//!
//! `TmdbClient` makes the raw call; `PosterResolver` never fails and
//! maps every problem to a placeholder image.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::warn;

use cinerec_config::PosterConfig;

use crate::recommend::Recommendation;
use client::{PosterError, TmdbClient};

pub const PLACEHOLDER_NO_API_KEY: &str = "https://via.placeholder.com/300x450?text=No+API+Key";
pub const PLACEHOLDER_NO_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";
pub const PLACEHOLDER_ERROR: &str = "https://via.placeholder.com/300x450?text=Error";

/// Anything that can turn a movie id into an image URL. Infallible.
#[async_trait]
pub trait PosterSource: Send + Sync {
    async fn poster_url(&self, movie_id: u64) -> String;
}

/// TMDB-backed source with placeholder fallback.
#[derive(Debug)]
pub struct PosterResolver {
    client: TmdbClient,
    image_base: String,
}

impl PosterResolver {
    pub fn new(client: TmdbClient, image_base: &str) -> Self {
        Self {
            client,
            image_base: image_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build from config, reading the API key from the environment.
    pub fn from_config(config: &PosterConfig) -> Result<Self, PosterError> {
        let client = TmdbClient::with_base_url(
            config.api_key(),
            config.api_base.clone(),
            Duration::from_secs(config.timeout_secs),
        )?
        .with_language(config.language.clone());
        Ok(Self::new(client, &config.image_base))
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_base, poster_path.trim_start_matches('/'))
    }
}

#[async_trait]
impl PosterSource for PosterResolver {
    async fn poster_url(&self, movie_id: u64) -> String {
        match self.client.poster_path(movie_id).await {
            Ok(Some(path)) => self.image_url(&path),
            Ok(None) => PLACEHOLDER_NO_POSTER.to_string(),
            Err(PosterError::MissingApiKey) => PLACEHOLDER_NO_API_KEY.to_string(),
            Err(e) => {
                warn!("poster lookup for movie {movie_id} failed: {e}");
                PLACEHOLDER_ERROR.to_string()
            }
        }
    }
}

/// Source that never touches the network.
#[derive(Debug, Clone)]
pub struct PlaceholderSource {
    url: String,
}

impl PlaceholderSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for PlaceholderSource {
    fn default() -> Self {
        Self::new(PLACEHOLDER_NO_POSTER)
    }
}

#[async_trait]
impl PosterSource for PlaceholderSource {
    async fn poster_url(&self, _movie_id: u64) -> String {
        self.url.clone()
    }
}

/// Resolve posters for every recommendation concurrently. Order preserved.
pub async fn resolve_all(
    source: &dyn PosterSource,
    recommendations: &[Recommendation],
) -> Vec<String> {
    join_all(
        recommendations
            .iter()
            .map(|rec| source.poster_url(rec.movie_id)),
    )
    .await
}
