//! Production company model and the curated studio directory.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
}

/// `(id, name, country, founded)` for the studios offered in the company browser.
///
/// The service has no "popular companies" listing, so the browser starts from
/// this fixed directory and discovers movies per company on selection.
const MAJOR_STUDIOS: &[(u64, &str, &str, i32)] = &[
    (1, "Lucasfilm Ltd.", "US", 1971),
    (2, "Walt Disney Pictures", "US", 1923),
    (3, "Pixar Animation Studios", "US", 1986),
    (420, "Marvel Studios", "US", 1993),
    (174, "Warner Bros. Pictures", "US", 1923),
    (33, "Universal Pictures", "US", 1912),
    (5, "Columbia Pictures", "US", 1924),
    (4, "Paramount Pictures", "US", 1912),
    (127928, "20th Century Studios", "US", 1935),
    (7, "DreamWorks Pictures", "US", 1994),
    (12, "New Line Cinema", "US", 1967),
    (1632, "Lionsgate", "US", 1997),
    (41077, "A24", "US", 2012),
    (10342, "Studio Ghibli", "JP", 1985),
    (923, "Legendary Entertainment", "US", 2000),
    (3172, "Blumhouse Productions", "US", 2000),
    (10146, "Focus Features", "US", 2002),
    (21, "Metro-Goldwyn-Mayer", "US", 1924),
    (10163, "Working Title Films", "GB", 1983),
    (56, "Amblin Entertainment", "US", 1981),
];

/// Returns the curated studio directory, sorted by name.
#[must_use]
pub fn major_studios() -> Vec<CompanySummary> {
    let mut studios: Vec<CompanySummary> = MAJOR_STUDIOS
        .iter()
        .map(|&(id, name, country, founded)| CompanySummary {
            id,
            name: name.to_string(),
            logo_path: None,
            origin_country: Some(country.to_string()),
            founded_year: Some(founded),
        })
        .collect();
    studios.sort_by_key(|c| c.name.to_lowercase());
    studios
}
