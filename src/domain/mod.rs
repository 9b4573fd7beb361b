//! Domain layer for the Marquee plugin.
//!
//! This module contains the core data types of the movie browser, independent of
//! Zellij APIs, storage and rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summaries and detail records
//! - [`person`]: People returned by person search and listing
//! - [`company`]: Production companies and the curated studio directory
//! - [`genre`]: Genres and the genre filter
//! - [`identity`]: The locally fabricated user identity
//! - [`item`]: The tagged result type held by the catalog

pub mod company;
pub mod error;
pub mod genre;
pub mod identity;
pub mod item;
pub mod movie;
pub mod person;

pub use company::CompanySummary;
pub use error::{MarqueeError, Result};
pub use genre::{Genre, GenreFilter};
pub use identity::UserIdentity;
pub use item::{CatalogItem, ItemKind};
pub use movie::{CastMember, MovieDetail, MovieSummary};
pub use person::PersonSummary;
