//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait, a minimal string key-value store.
//! Callers own the encoding of their values; the store only guarantees that a
//! successful `set` or `remove` has reached its backing medium.

use crate::domain::error::Result;

/// Abstraction over persistent key-value backends.
///
/// # Implementations
///
/// - [`JsonStorage`](super::JsonStorage): a JSON file with atomic writes (default)
/// - [`MemoryStorage`](super::MemoryStorage): process memory, used in tests and as
///   the fallback when the data directory is unusable
///
/// # Examples
///
/// ```
/// use marquee::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// storage.set("greeting", "hello")?;
/// assert_eq!(storage.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), marquee::MarqueeError>(())
/// ```
pub trait Storage: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// When this returns an error the previous value is still in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}
