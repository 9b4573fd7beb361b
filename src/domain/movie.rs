//! Movie models as returned by the metadata service.
//!
//! [`MovieSummary`] is the list entry used everywhere (catalog results, known-for
//! stubs, favorites). [`MovieDetail`] is the richer record shown in the detail
//! panel, including credits and external identifiers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie as it appears in a result page.
///
/// Summaries are immutable once decoded. The same value may be copied into a
/// user's favorites, where it is persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Release date; empty strings and malformed dates decode to `None`.
    #[serde(default, with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Average rating on a 0-10 scale.
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre_ids: Vec<u64>,
}

impl MovieSummary {
    /// Creates a summary with only an id and title set.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: None,
            popularity: None,
            vote_average: None,
            poster_path: None,
            genre_ids: Vec::new(),
        }
    }

    /// Release year derived from the release date, `None` when the date is
    /// missing or could not be parsed.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    #[must_use]
    pub fn has_genre(&self, genre_id: u64) -> bool {
        self.genre_ids.contains(&genre_id)
    }
}

/// Full movie record with cast and external identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<super::genre::Genre>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

impl MovieDetail {
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// IMDb identifier, checked in `external_ids` first.
    #[must_use]
    pub fn imdb_id(&self) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| ids.imdb_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Top-billed cast members in credit order.
    pub fn top_cast(&self, limit: usize) -> impl Iterator<Item = &CastMember> {
        let mut cast: Vec<&CastMember> = self
            .credits
            .as_ref()
            .map(|c| c.cast.iter().collect())
            .unwrap_or_default();
        cast.sort_by_key(|member| member.order.unwrap_or(u32::MAX));
        cast.into_iter().take(limit)
    }

    /// Reduces the detail record to the summary stored in favorites.
    #[must_use]
    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            release_date: self.release_date,
            popularity: self.popularity,
            vote_average: self.vote_average,
            poster_path: self.poster_path.clone(),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// Treats an explicit JSON `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `YYYY-MM-DD` dates that tolerate `""`, `null` and garbage.
pub(crate) mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), FORMAT).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_missing_and_invalid_dates_as_none() {
        let json = r#"[
            {"id": 1, "title": "A", "release_date": ""},
            {"id": 2, "title": "B", "release_date": "not-a-date"},
            {"id": 3, "title": "C"},
            {"id": 4, "title": "D", "release_date": "1999-03-31", "genre_ids": null}
        ]"#;
        let movies: Vec<MovieSummary> = serde_json::from_str(json).unwrap();

        assert_eq!(movies[0].release_year(), None);
        assert_eq!(movies[1].release_year(), None);
        assert_eq!(movies[2].release_year(), None);
        assert_eq!(movies[3].release_year(), Some(1999));
        assert!(movies[3].genre_ids.is_empty());
    }

    #[test]
    fn persisted_summary_keeps_release_date() {
        let mut movie = MovieSummary::new(603, "The Matrix");
        movie.release_date = NaiveDate::from_ymd_opt(1999, 3, 31);

        let json = serde_json::to_string(&movie).unwrap();
        assert!(json.contains("\"release_date\":\"1999-03-31\""));

        let back: MovieSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, movie);
    }

    #[test]
    fn detail_exposes_imdb_id_and_ordered_cast() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "genres": [{"id": 28, "name": "Action"}],
            "credits": {"cast": [
                {"id": 2, "name": "Laurence Fishburne", "order": 1},
                {"id": 1, "name": "Keanu Reeves", "order": 0}
            ]},
            "external_ids": {"imdb_id": "tt0133093"}
        }"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.imdb_id(), Some("tt0133093"));
        let names: Vec<&str> = detail.top_cast(5).map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Keanu Reeves", "Laurence Fishburne"]);
        assert_eq!(detail.to_summary().genre_ids, vec![28]);
    }
}
