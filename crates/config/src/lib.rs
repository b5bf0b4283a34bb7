//! Configuration for cinerec.
//!
//! One YAML file, every field optional. Missing file means defaults.
//!
//! ```yaml
//! corpus_path: model/movie_list.json
//! top_k: 5
//! similarity:
//!   max_features: 5000
//!   stop_words: english
//!   extra_stop_words: [movie, film]
//! poster:
//!   timeout_secs: 5
//!   api_key_env: TMDB_API_KEY
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which built-in stop word list to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordSet {
    #[default]
    English,
    None,
}

/// Vocabulary and vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Vocabulary size cap. 0 = unlimited.
    pub max_features: usize,
    pub stop_words: StopWordSet,
    pub extra_stop_words: Vec<String>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            stop_words: StopWordSet::English,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Poster lookup settings (TMDB).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    pub api_base: String,
    pub image_base: String,
    pub language: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.themoviedb.org/3".into(),
            image_base: "https://image.tmdb.org/t/p/w500/".into(),
            language: "en-US".into(),
            timeout_secs: 5,
            api_key_env: "TMDB_API_KEY".into(),
        }
    }
}

impl PosterConfig {
    /// Read the API key from the configured environment variable.
    /// Empty values count as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON corpus file: `[{movie_id, title, tags}, ...]`.
    pub corpus_path: PathBuf,
    /// Recommendations per query.
    pub top_k: usize,
    pub similarity: SimilarityConfig,
    pub poster: PosterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("model/movie_list.json"),
            top_k: 5,
            similarity: SimilarityConfig::default(),
            poster: PosterConfig::default(),
        }
    }
}

impl Config {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Load from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be greater than 0".into()));
        }
        if self.poster.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "poster.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.similarity.max_features, 5000);
        assert_eq!(config.similarity.stop_words, StopWordSet::English);
        assert_eq!(config.poster.timeout_secs, 5);
        assert_eq!(config.poster.api_key_env, "TMDB_API_KEY");
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r#"
top_k: 3
similarity:
  stop_words: none
  extra_stop_words: [movie]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.similarity.stop_words, StopWordSet::None);
        assert_eq!(config.similarity.extra_stop_words, vec!["movie"]);
        assert_eq!(config.similarity.max_features, 5000);
        assert_eq!(config.poster, PosterConfig::default());
    }

    #[test]
    fn zero_top_k_rejected() {
        let err = Config::from_yaml("top_k: 0").unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = Config::from_yaml("poster:\n  timeout_secs: 0").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn bad_yaml_reported() {
        let err = Config::from_yaml("top_k: [not a number").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn unknown_stop_word_set_rejected() {
        assert!(Config::from_yaml("similarity:\n  stop_words: klingon").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cinerec.yaml");
        std::fs::write(&path, "corpus_path: data/movies.json\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("data/movies.json"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(Config::load(&dir.path().join("absent.yaml")).is_err());
    }

    #[test]
    fn api_key_from_env() {
        let poster = PosterConfig {
            api_key_env: "CINEREC_TEST_KEY_FROM_ENV".into(),
            ..PosterConfig::default()
        };
        std::env::remove_var("CINEREC_TEST_KEY_FROM_ENV");
        assert_eq!(poster.api_key(), None);
        std::env::set_var("CINEREC_TEST_KEY_FROM_ENV", "  ");
        assert_eq!(poster.api_key(), None);
        std::env::set_var("CINEREC_TEST_KEY_FROM_ENV", "abc123");
        assert_eq!(poster.api_key().as_deref(), Some("abc123"));
        std::env::remove_var("CINEREC_TEST_KEY_FROM_ENV");
    }
}
