//! The persisted login session.

use crate::domain::error::Result;
use crate::domain::UserIdentity;
use crate::storage::Storage;

/// Storage key of the persisted identity record.
pub const SESSION_KEY: &str = "marquee.session";

/// Capability to read and replace the current identity.
///
/// The favorites store depends only on this trait, so it never learns where
/// the identity lives or how it was established.
pub trait IdentityStore {
    fn current(&self) -> Option<&UserIdentity>;

    /// Persists `identity` and makes it current.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted, in which case the
    /// previous identity stays current.
    fn replace(&mut self, identity: UserIdentity) -> Result<()>;

    /// Forgets the current identity and removes its persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted record cannot be removed. The
    /// in-memory identity is cleared regardless.
    fn clear(&mut self) -> Result<()>;
}

/// Identity state backed by a [`Storage`] entry under [`SESSION_KEY`].
///
/// Constructed once at plugin load and owned by the application state.
pub struct Session {
    storage: Box<dyn Storage>,
    identity: Option<UserIdentity>,
}

impl Session {
    /// Restores the session persisted in `storage`.
    ///
    /// A record that cannot be read or decoded is discarded and the session
    /// starts logged out.
    #[must_use]
    pub fn load(mut storage: Box<dyn Storage>) -> Self {
        let _span = tracing::debug_span!("session_load").entered();

        let identity = match storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<UserIdentity>(&raw) {
                Ok(identity) => {
                    tracing::info!(
                        user = %identity.name,
                        favorites = identity.favorites.len(),
                        "restored session"
                    );
                    Some(identity)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding corrupt session record");
                    if let Err(e) = storage.remove(SESSION_KEY) {
                        tracing::warn!(error = %e, "failed to remove corrupt session record");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session record");
                None
            }
        };

        Self { storage, identity }
    }

    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}

impl IdentityStore for Session {
    fn current(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    fn replace(&mut self, identity: UserIdentity) -> Result<()> {
        let _span = tracing::debug_span!("session_replace", user_id = identity.id).entered();

        let record = serde_json::to_string(&identity)?;
        self.storage.set(SESSION_KEY, &record)?;
        self.identity = Some(identity);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_clear").entered();

        self.identity = None;
        self.storage.remove(SESSION_KEY)
    }
}
