//! The tagged result type held by the catalog.

use super::company::CompanySummary;
use super::movie::MovieSummary;
use super::person::PersonSummary;

/// One row of a result list.
///
/// Only movies carry release dates and genre ids, so people and companies never
/// survive an active year or genre filter.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogItem {
    Movie(MovieSummary),
    Person(PersonSummary),
    Company(CompanySummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Movie,
    Person,
    Company,
}

impl CatalogItem {
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Self::Movie(m) => m.id,
            Self::Person(p) => p.id,
            Self::Company(c) => c.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Movie(_) => ItemKind::Movie,
            Self::Person(_) => ItemKind::Person,
            Self::Company(_) => ItemKind::Company,
        }
    }

    /// Movie title, or the name of a person or company.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Person(p) => &p.name,
            Self::Company(c) => &c.name,
        }
    }

    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        match self {
            Self::Movie(m) => m.release_year(),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_genre(&self, genre_id: u64) -> bool {
        match self {
            Self::Movie(m) => m.has_genre(genre_id),
            _ => false,
        }
    }

    #[must_use]
    pub fn as_movie(&self) -> Option<&MovieSummary> {
        match self {
            Self::Movie(m) => Some(m),
            _ => None,
        }
    }
}

impl From<MovieSummary> for CatalogItem {
    fn from(movie: MovieSummary) -> Self {
        Self::Movie(movie)
    }
}

impl From<PersonSummary> for CatalogItem {
    fn from(person: PersonSummary) -> Self {
        Self::Person(person)
    }
}

impl From<CompanySummary> for CatalogItem {
    fn from(company: CompanySummary) -> Self {
        Self::Company(company)
    }
}
