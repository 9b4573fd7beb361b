//! Genre model and display-name mapping.

use serde::{Deserialize, Serialize};

/// A movie genre as returned by `/genre/movie/list` and movie details.
///
/// The same type doubles as the active genre filter: at most one is selected
/// at a time, tracked by the catalog controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// The active genre filter is a genre identity plus its display name.
pub type GenreFilter = Genre;

/// Service names that read poorly in a movie browser.
const DISPLAY_NAMES: &[(&str, &str)] = &[("TV Movie", "TV Shows")];

impl Genre {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Returns the genre with its name mapped to the display vocabulary.
    #[must_use]
    pub fn into_display(mut self) -> Self {
        if let Some((_, shown)) = DISPLAY_NAMES.iter().find(|(raw, _)| *raw == self.name) {
            self.name = (*shown).to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tv_movie_to_tv_shows() {
        assert_eq!(Genre::new(10770, "TV Movie").into_display().name, "TV Shows");
        assert_eq!(Genre::new(35, "Comedy").into_display().name, "Comedy");
    }
}
