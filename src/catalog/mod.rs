//! Catalog state: raw results, filters, derived view and request sequencing.
//!
//! - `controller`: the [`CatalogController`] and its operations
//! - `derive`: the pure derivation of the visible list
//! - `modes`: view modes, search kinds and result sources
//! - `sequence`: out-of-order response handling

pub mod controller;
pub mod derive;
pub mod modes;
pub mod sequence;

pub use controller::{CatalogController, CatalogFetch};
pub use derive::{derive, Filters};
pub use modes::{SearchKind, Source, ViewMode};
pub use sequence::{RequestSequencer, ResponseOrdering};
