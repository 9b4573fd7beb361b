//! Locally fabricated user identity.

use super::movie::MovieSummary;
use serde::{Deserialize, Serialize};

/// The record representing "being logged in".
///
/// There is no server-side account. The identity is created by an
/// [`Authenticator`](crate::favorites::Authenticator), persisted wholesale under
/// a single storage key and discarded on logout. Favorites are only ever replaced
/// by a freshly built list, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub favorites: Vec<MovieSummary>,
}

impl UserIdentity {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            favorites: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_favorite(&self, movie_id: u64) -> bool {
        self.favorites.iter().any(|m| m.id == movie_id)
    }

    /// Returns a copy of this identity carrying a different favorites list.
    #[must_use]
    pub fn with_favorites(&self, favorites: Vec<MovieSummary>) -> Self {
        Self {
            favorites,
            ..self.clone()
        }
    }
}
