//! TMDB response types. Only the fields we read.

use serde::Deserialize;

/// `GET /movie/{id}` response body.
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetails {
    /// Poster path, treating an empty string like a missing one.
    pub fn poster_path(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.is_empty())
    }
}
