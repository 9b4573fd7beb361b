//! Favorites operations over the current identity.

use super::session::IdentityStore;
use crate::domain::error::Result;
use crate::domain::{MovieSummary, UserIdentity};

/// Per-identity favorites list.
///
/// Every mutation builds a new favorites list, wraps it in a new identity and
/// persists that identity through the [`IdentityStore`] before returning. A
/// failed write therefore leaves the previous list in effect.
///
/// While logged out every operation is a no-op that reports `false`.
///
/// # Example
///
/// ```
/// use marquee::domain::{MovieSummary, UserIdentity};
/// use marquee::favorites::{FavoritesStore, Session};
/// use marquee::storage::MemoryStorage;
///
/// let mut store = FavoritesStore::new(Session::load(Box::new(MemoryStorage::new())));
/// store.login(UserIdentity::new(1, "ada", "ada@example.com"))?;
///
/// assert!(store.add(&MovieSummary::new(603, "The Matrix"))?);
/// assert!(store.is_favorite(603));
/// # Ok::<(), marquee::MarqueeError>(())
/// ```
pub struct FavoritesStore<I> {
    identities: I,
}

impl<I: IdentityStore> FavoritesStore<I> {
    pub const fn new(identities: I) -> Self {
        Self { identities }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identities.current()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.identities.current().is_some()
    }

    #[must_use]
    pub fn identity_store(&self) -> &I {
        &self.identities
    }

    /// Makes `identity` current and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity cannot be persisted.
    pub fn login(&mut self, identity: UserIdentity) -> Result<()> {
        tracing::info!(user = %identity.name, "logging in");
        self.identities.replace(identity)
    }

    /// Clears the current identity and its persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted record cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        tracing::info!("logging out");
        self.identities.clear()
    }

    /// Favorites of the current identity, empty when logged out.
    #[must_use]
    pub fn favorites(&self) -> &[MovieSummary] {
        self.identities
            .current()
            .map(|identity| identity.favorites.as_slice())
            .unwrap_or_default()
    }

    /// Appends `movie` to the favorites.
    ///
    /// Returns `Ok(false)` when logged out or when the movie id is already
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated identity cannot be persisted.
    pub fn add(&mut self, movie: &MovieSummary) -> Result<bool> {
        let _span = tracing::debug_span!("favorites_add", movie_id = movie.id).entered();

        let Some(current) = self.identities.current() else {
            return Ok(false);
        };
        if current.has_favorite(movie.id) {
            tracing::debug!("already a favorite");
            return Ok(false);
        }

        let mut favorites = current.favorites.clone();
        favorites.push(movie.clone());
        let next = current.with_favorites(favorites);
        self.identities.replace(next)?;
        Ok(true)
    }

    /// Removes every favorite with `movie_id`.
    ///
    /// Returns `Ok(true)` whenever logged in, even if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated identity cannot be persisted.
    pub fn remove(&mut self, movie_id: u64) -> Result<bool> {
        let _span = tracing::debug_span!("favorites_remove", movie_id).entered();

        let Some(current) = self.identities.current() else {
            return Ok(false);
        };

        let favorites: Vec<MovieSummary> = current
            .favorites
            .iter()
            .filter(|m| m.id != movie_id)
            .cloned()
            .collect();
        let next = current.with_favorites(favorites);
        self.identities.replace(next)?;
        Ok(true)
    }

    /// Adds the movie if absent, removes it otherwise.
    ///
    /// Returns `Ok(None)` when logged out, else the new favorite state.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated identity cannot be persisted.
    pub fn toggle(&mut self, movie: &MovieSummary) -> Result<Option<bool>> {
        if !self.is_logged_in() {
            return Ok(None);
        }
        if self.is_favorite(movie.id) {
            self.remove(movie.id)?;
            Ok(Some(false))
        } else {
            self.add(movie)?;
            Ok(Some(true))
        }
    }

    #[must_use]
    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.identities
            .current()
            .is_some_and(|identity| identity.has_favorite(movie_id))
    }
}
