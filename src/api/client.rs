//! Request builders for the TMDB v3 endpoints.
//!
//! Nothing here performs I/O. Each builder returns an [`ApiRequest`] that the
//! plugin shim hands to the host's web-request facility.

use super::tag::Payload;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Base URL of the TMDB v3 API.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Base URL for poster images at `w500` width.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for IMDb title pages.
pub const IMDB_TITLE_URL: &str = "https://www.imdb.com/title";

/// A fully built GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// What the response body decodes to.
    pub payload: Payload,
}

/// Builds TMDB request URLs for one API key and language.
///
/// # Example
///
/// ```
/// use marquee::api::TmdbClient;
///
/// let client = TmdbClient::new("KEY", "en-US");
/// let request = client.search_by_title("the matrix", 1);
/// assert_eq!(
///     request.url,
///     "https://api.themoviedb.org/3/search/movie?api_key=KEY&language=en-US&query=the%20matrix&page=1"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: String,
    language: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: language.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different API root, without a trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn search_by_title(&self, query: &str, page: u32) -> ApiRequest {
        self.search("/search/movie", query, page, Payload::Movies)
    }

    pub fn search_by_person(&self, query: &str, page: u32) -> ApiRequest {
        self.search("/search/person", query, page, Payload::People)
    }

    pub fn search_by_company(&self, query: &str, page: u32) -> ApiRequest {
        self.search("/search/company", query, page, Payload::Companies)
    }

    /// Multi-search. Results are tagged by `media_type` and decoded with
    /// [`decode_multi_page`](super::decode_multi_page).
    pub fn search_any(&self, query: &str, page: u32) -> ApiRequest {
        self.search("/search/multi", query, page, Payload::Multi)
    }

    pub fn list_popular_movies(&self, page: u32) -> ApiRequest {
        self.get("/movie/popular", &[("page", page.to_string())], Payload::Movies)
    }

    pub fn list_popular_people(&self, page: u32) -> ApiRequest {
        self.get("/person/popular", &[("page", page.to_string())], Payload::People)
    }

    /// Movie details with credits and external ids in one round trip.
    pub fn get_movie_detail(&self, movie_id: u64) -> ApiRequest {
        self.get(
            &format!("/movie/{movie_id}"),
            &[("append_to_response", "credits,external_ids".to_string())],
            Payload::Detail,
        )
    }

    pub fn discover_by_genre(&self, genre_id: u64, page: u32) -> ApiRequest {
        self.get(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", page.to_string()),
            ],
            Payload::Movies,
        )
    }

    pub fn discover_by_company(&self, company_id: u64, page: u32) -> ApiRequest {
        self.get(
            "/discover/movie",
            &[
                ("with_companies", company_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", page.to_string()),
            ],
            Payload::Movies,
        )
    }

    pub fn list_genres(&self) -> ApiRequest {
        self.get("/genre/movie/list", &[], Payload::Genres)
    }

    fn search(&self, path: &str, query: &str, page: u32, payload: Payload) -> ApiRequest {
        self.get(
            path,
            &[("query", query.to_string()), ("page", page.to_string())],
            payload,
        )
    }

    fn get(&self, path: &str, params: &[(&str, String)], payload: Payload) -> ApiRequest {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.base_url,
            path,
            percent_encode(&self.api_key),
            percent_encode(&self.language)
        );
        for (key, value) in params {
            let _ = write!(url, "&{key}={}", percent_encode(value));
        }

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        ApiRequest {
            url,
            headers,
            payload,
        }
    }
}

/// Percent-encodes a query-string value.
///
/// Unreserved characters pass through, a space becomes `%20`, and every other
/// byte of the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(b));
            }
            b' ' => out.push_str("%20"),
            _ => {
                let _ = write!(out, "%{b:02X}");
            }
        }
    }
    out
}

/// Full poster URL for a relative image path, `None` for a missing or empty path.
#[must_use]
pub fn build_image_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{IMAGE_BASE_URL}{p}"))
}

/// IMDb title page for an IMDb id, `None` for a missing or empty id.
#[must_use]
pub fn build_external_reference_url(imdb_id: Option<&str>) -> Option<String> {
    imdb_id
        .filter(|id| !id.is_empty())
        .map(|id| format!("{IMDB_TITLE_URL}/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new("k", "en-US")
    }

    #[test]
    fn encodes_reserved_and_non_ascii_characters() {
        assert_eq!(percent_encode("Amélie & co"), "Am%C3%A9lie%20%26%20co");
        assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
    }

    #[test]
    fn builds_discovery_urls() {
        assert_eq!(
            client().discover_by_genre(35, 2).url,
            "https://api.themoviedb.org/3/discover/movie?api_key=k&language=en-US&with_genres=35&sort_by=popularity.desc&page=2"
        );
        assert!(client()
            .discover_by_company(420, 1)
            .url
            .contains("with_companies=420"));
    }

    #[test]
    fn detail_appends_credits_and_external_ids() {
        let request = client().get_movie_detail(603);
        assert!(request
            .url
            .starts_with("https://api.themoviedb.org/3/movie/603?"));
        assert!(request
            .url
            .ends_with("append_to_response=credits%2Cexternal_ids"));
        assert_eq!(request.payload, Payload::Detail);
    }

    #[test]
    fn search_endpoints_carry_their_payload() {
        assert_eq!(client().search_by_person("x", 1).payload, Payload::People);
        assert_eq!(client().search_by_company("x", 1).payload, Payload::Companies);
        assert_eq!(client().search_any("x", 1).payload, Payload::Multi);
        assert_eq!(client().list_genres().payload, Payload::Genres);
    }

    #[test]
    fn custom_base_url_drops_trailing_slash() {
        let client = client().with_base_url("http://localhost:9000/3/");
        assert!(client
            .list_popular_movies(1)
            .url
            .starts_with("http://localhost:9000/3/movie/popular?"));
    }

    #[test]
    fn image_and_imdb_urls() {
        assert_eq!(
            build_image_url(Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(build_image_url(Some("")), None);
        assert_eq!(build_image_url(None), None);
        assert_eq!(
            build_external_reference_url(Some("tt0133093")).as_deref(),
            Some("https://www.imdb.com/title/tt0133093")
        );
        assert_eq!(build_external_reference_url(None), None);
    }
}
