//! People (actors, directors, crew) as returned by person search and listing.

use super::movie::MovieSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Stubs of the titles this person is best known for. Television entries
    /// have no `title` and are dropped during decoding.
    #[serde(default, deserialize_with = "known_for_movies")]
    pub known_for: Vec<MovieSummary>,
}

impl PersonSummary {
    /// Comma separated titles of the first `limit` known-for entries.
    #[must_use]
    pub fn known_for_titles(&self, limit: usize) -> String {
        self.known_for
            .iter()
            .take(limit)
            .map(|m| m.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn known_for_movies<'de, D>(deserializer: D) -> std::result::Result<Vec<MovieSummary>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter(|v| v.get("title").is_some())
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
