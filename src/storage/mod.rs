//! Storage layer for the persisted session record.
//!
//! The application persists a single record (the logged-in identity and its
//! favorites) through a small key-value abstraction, so the favorites logic never
//! touches files directly.
//!
//! # Modules
//!
//! - `backend`: the [`Storage`] trait
//! - `json`: JSON file storage with atomic writes
//! - `memory`: volatile storage for tests and fallback

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::Storage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
