//! Response decoding.
//!
//! The host reports every completed request as a status code plus a raw body.
//! Non-2xx statuses become [`MarqueeError::Api`] with the service's
//! `status_message` when the body carries one.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::{CatalogItem, CompanySummary, Genre, MovieDetail, MovieSummary, PersonSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

const fn first_page() -> u32 {
    1
}

impl<T> Paged<T> {
    /// Converts every result, keeping the paging counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// Decodes a JSON body after checking the status.
///
/// # Errors
///
/// Returns [`MarqueeError::Api`] for a non-2xx status and
/// [`MarqueeError::Json`] for an undecodable body.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.status_message)
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(body);
                let text = text.trim();
                if text.is_empty() {
                    format!("HTTP {status}")
                } else {
                    text.chars().take(200).collect()
                }
            });
        return Err(MarqueeError::Api { status, message });
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decodes a movie page into catalog items.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_movie_page(status: u16, body: &[u8]) -> Result<Paged<CatalogItem>> {
    Ok(decode::<Paged<MovieSummary>>(status, body)?.map(CatalogItem::from))
}

/// Decodes a person page into catalog items.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_person_page(status: u16, body: &[u8]) -> Result<Paged<CatalogItem>> {
    Ok(decode::<Paged<PersonSummary>>(status, body)?.map(CatalogItem::from))
}

/// Decodes a company page into catalog items.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_company_page(status: u16, body: &[u8]) -> Result<Paged<CatalogItem>> {
    Ok(decode::<Paged<CompanySummary>>(status, body)?.map(CatalogItem::from))
}

/// Decodes a multi-search page.
///
/// Entries are dispatched on `media_type`. Anything other than a movie, person
/// or company is dropped, as are entries that fail to decode individually.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_multi_page(status: u16, body: &[u8]) -> Result<Paged<CatalogItem>> {
    let page = decode::<Paged<serde_json::Value>>(status, body)?;
    let mut results = Vec::with_capacity(page.results.len());
    for entry in page.results {
        let media_type = entry
            .get("media_type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let item = match media_type.as_str() {
            "movie" => serde_json::from_value::<MovieSummary>(entry).map(CatalogItem::from),
            "person" => serde_json::from_value::<PersonSummary>(entry).map(CatalogItem::from),
            "company" => serde_json::from_value::<CompanySummary>(entry).map(CatalogItem::from),
            other => {
                tracing::trace!(media_type = %other, "dropping multi-search entry");
                continue;
            }
        };
        match item {
            Ok(item) => results.push(item),
            Err(e) => tracing::debug!(error = %e, "skipping undecodable multi-search entry"),
        }
    }
    Ok(Paged {
        page: page.page,
        results,
        total_pages: page.total_pages,
        total_results: page.total_results,
    })
}

/// Decodes `/genre/movie/list`, mapping names to their display vocabulary.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_genres(status: u16, body: &[u8]) -> Result<Vec<Genre>> {
    Ok(decode::<GenreList>(status, body)?
        .genres
        .into_iter()
        .map(Genre::into_display)
        .collect())
}

/// Decodes a movie detail record.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_movie_detail(status: u16, body: &[u8]) -> Result<MovieDetail> {
    decode(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;

    #[test]
    fn non_success_status_uses_status_message() {
        let body = br#"{"status_code": 7, "status_message": "Invalid API key: You must be granted a valid key."}"#;
        let err = decode_movie_page(401, body).unwrap_err();
        match err {
            MarqueeError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(message.starts_with("Invalid API key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_error_body_reports_status() {
        let err = decode_genres(503, b"").unwrap_err();
        assert_eq!(err.to_string(), "API error (503): HTTP 503");
    }

    #[test]
    fn undecodable_body_is_json_error() {
        assert!(matches!(
            decode_movie_page(200, b"<html>"),
            Err(MarqueeError::Json(_))
        ));
    }

    #[test]
    fn movie_page_keeps_paging_counters() {
        let body = br#"{
            "page": 3,
            "total_pages": 12,
            "total_results": 230,
            "results": [{"id": 1, "title": "Heat", "release_date": "1995-12-15", "genre_ids": [80]}]
        }"#;
        let page = decode_movie_page(200, body).unwrap();

        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 12);
        assert_eq!(page.results[0].release_year(), Some(1995));
    }

    #[test]
    fn multi_search_drops_television() {
        let body = br#"{
            "page": 1,
            "total_pages": 1,
            "results": [
                {"media_type": "movie", "id": 1, "title": "Alien"},
                {"media_type": "tv", "id": 2, "name": "Alien Nation"},
                {"media_type": "person", "id": 3, "name": "Sigourney Weaver"},
                {"media_type": "company", "id": 4, "name": "Brandywine"}
            ]
        }"#;
        let page = decode_multi_page(200, body).unwrap();
        let kinds: Vec<ItemKind> = page.results.iter().map(CatalogItem::kind).collect();

        assert_eq!(kinds, vec![ItemKind::Movie, ItemKind::Person, ItemKind::Company]);
    }

    #[test]
    fn genre_list_maps_display_names() {
        let body = br#"{"genres": [{"id": 35, "name": "Comedy"}, {"id": 10770, "name": "TV Movie"}]}"#;
        let genres = decode_genres(200, body).unwrap();
        assert_eq!(genres[1].name, "TV Shows");
    }
}
