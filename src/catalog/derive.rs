//! Derivation of the visible list from the raw list.

use super::modes::ViewMode;
use crate::domain::{CatalogItem, Genre};
use crate::listing::compare_titles;

/// Filter and sort controls, independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub year: Option<i32>,
    pub genre: Option<Genre>,
    pub mode: ViewMode,
}

/// Computes the visible list.
///
/// 1. Keep items whose release year equals the year filter, if one is set.
///    Items without a parseable date never match.
/// 2. Keep items carrying the filtered genre, unless the mode is genre
///    discovery (the raw list already came from that genre).
/// 3. `AToZ` / `ZToA` sort stably by case-insensitive title. Other modes keep
///    the service's order.
///
/// Pure: the same inputs always give the same output.
#[must_use]
pub fn derive(raw: &[CatalogItem], filters: &Filters) -> Vec<CatalogItem> {
    let _span = tracing::trace_span!("catalog_derive", raw = raw.len()).entered();

    let genre_filter = filters
        .genre
        .as_ref()
        .filter(|_| filters.mode != ViewMode::Genre);

    let mut derived: Vec<CatalogItem> = raw
        .iter()
        .filter(|item| filters.year.map_or(true, |year| item.release_year() == Some(year)))
        .filter(|item| genre_filter.map_or(true, |genre| item.has_genre(genre.id)))
        .cloned()
        .collect();

    match filters.mode {
        ViewMode::AToZ => derived.sort_by(|a, b| compare_titles(a.title(), b.title())),
        ViewMode::ZToA => derived.sort_by(|a, b| compare_titles(b.title(), a.title())),
        _ => {}
    }

    derived
}
