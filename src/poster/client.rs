//! Raw HTTP client for the TMDB movie details endpoint.
//!
//! No fallback logic here. Errors come back as `PosterError`.

use std::time::Duration;

use reqwest::Client;

use super::types::MovieDetails;

/// Errors from poster lookups.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    ApiError { status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("missing API key")]
    MissingApiKey,
}

/// Raw HTTP client for `GET {api_base}/movie/{id}`.
#[derive(Debug)]
pub struct TmdbClient {
    http: Client,
    api_key: Option<String>,
    api_base: String,
    language: String,
}

impl TmdbClient {
    /// Create a client against the public TMDB API.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, PosterError> {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3".into(), timeout)
    }

    /// Create a client with a custom base URL (for testing with mock servers).
    pub fn with_base_url(
        api_key: Option<String>,
        api_base: String,
        timeout: Duration,
    ) -> Result<Self, PosterError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            language: "en-US".into(),
        })
    }

    /// Override the `language` query parameter.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the poster path for a movie. `Ok(None)` when TMDB has no poster.
    pub async fn poster_path(&self, movie_id: u64) -> Result<Option<String>, PosterError> {
        let api_key = self.api_key.as_deref().ok_or(PosterError::MissingApiKey)?;
        let url = format!("{}/movie/{movie_id}", self.api_base);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", api_key), ("language", self.language.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::ApiError {
                status: status.as_u16(),
            });
        }

        let details: MovieDetails = response
            .json()
            .await
            .map_err(|e| PosterError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(details.poster_path().map(str::to_string))
    }
}
