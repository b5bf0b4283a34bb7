//! Corpus loading: the item table the engine is built from.
//!
//! A JSON array of `{movie_id, title, tags}` records. Row order is
//! preserved: an item's position is its row in the similarity matrix.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Errors from loading the corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid item at row {row}: {reason}")]
    Invalid { row: usize, reason: String },
}

/// One recommendable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// External identifier (TMDB movie id).
    #[serde(alias = "id")]
    pub movie_id: u64,
    /// Display title. Query key.
    pub title: String,
    /// Normalized keyword blob (genres, cast, crew, overview keywords).
    #[serde(default)]
    pub tags: String,
}

impl Item {
    pub fn new(movie_id: u64, title: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            tags: tags.into(),
        }
    }
}

/// Parse and validate a JSON corpus.
pub fn from_json(json: &str) -> Result<Vec<Item>, CorpusError> {
    let items: Vec<Item> = serde_json::from_str(json)?;
    validate(&items)?;
    Ok(items)
}

/// Read, parse, and validate a corpus file.
pub fn load(path: &Path) -> Result<Vec<Item>, CorpusError> {
    let json = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = from_json(&json)?;
    info!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Reject blank titles. Duplicate titles are allowed (first one wins at
/// lookup) but reported.
pub fn validate(items: &[Item]) -> Result<(), CorpusError> {
    for (row, item) in items.iter().enumerate() {
        if item.title.trim().is_empty() {
            return Err(CorpusError::Invalid {
                row,
                reason: "title is empty".into(),
            });
        }
    }
    for (title, rows) in duplicate_titles(items) {
        warn!("duplicate title '{title}' at rows {rows:?}; lookups resolve to row {}", rows[0]);
    }
    Ok(())
}

/// Titles that occur more than once, with every row they occur at.
pub fn duplicate_titles(items: &[Item]) -> Vec<(&str, Vec<usize>)> {
    let mut rows: HashMap<&str, Vec<usize>> = HashMap::new();
    for (row, item) in items.iter().enumerate() {
        rows.entry(item.title.as_str()).or_default().push(row);
    }
    let mut dups: Vec<(&str, Vec<usize>)> = rows.into_iter().filter(|(_, r)| r.len() > 1).collect();
    dups.sort_by_key(|(_, r)| r[0]);
    dups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_order() {
        let json = r#"[
            {"movie_id": 19995, "title": "Avatar", "tags": "action adventure fantasy"},
            {"movie_id": 285, "title": "Pirates of the Caribbean", "tags": "adventure ocean"}
        ]"#;
        let items = from_json(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Item::new(19995, "Avatar", "action adventure fantasy"));
        assert_eq!(items[1].movie_id, 285);
    }

    #[test]
    fn id_alias_and_missing_tags() {
        let items = from_json(r#"[{"id": 7, "title": "Untagged"}]"#).unwrap();
        assert_eq!(items[0].movie_id, 7);
        assert_eq!(items[0].tags, "");
    }

    #[test]
    fn empty_array_is_empty_corpus() {
        assert!(from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn blank_title_rejected() {
        let err = from_json(r#"[{"movie_id": 1, "title": "A"}, {"movie_id": 2, "title": "  "}]"#)
            .unwrap_err();
        match err {
            CorpusError::Invalid { row, .. } => assert_eq!(row, 1),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            from_json(r#"[{"movie_id": "not a number", "title": "A"}]"#),
            Err(CorpusError::Json(_))
        ));
    }

    #[test]
    fn duplicates_reported_not_rejected() {
        let items = vec![
            Item::new(1, "Heat", "crime"),
            Item::new(2, "Alien", "space"),
            Item::new(3, "Heat", "remake"),
        ];
        assert!(validate(&items).is_ok());
        assert_eq!(duplicate_titles(&items), vec![("Heat", vec![0, 2])]);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, r#"[{"movie_id": 1, "title": "A", "tags": "x y"}]"#).unwrap();
        assert_eq!(load(&path).unwrap().len(), 1);

        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
