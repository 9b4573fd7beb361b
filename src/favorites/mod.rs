//! Identity and favorites.
//!
//! - `session`: the persisted identity record and the [`IdentityStore`] capability
//! - `store`: favorites operations with copy-on-write persistence
//! - `auth`: the [`Authenticator`] seam and its local mock

pub mod auth;
pub mod session;
pub mod store;

pub use auth::{Authenticator, LocalAuthenticator};
pub use session::{IdentityStore, Session, SESSION_KEY};
pub use store::FavoritesStore;
