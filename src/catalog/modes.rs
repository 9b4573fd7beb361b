//! View modes, search kinds and result sources.

use crate::api::{ApiRequest, TmdbClient};
use crate::domain::{CompanySummary, Genre, PersonSummary};

/// The active view of the catalog.
///
/// `AToZ` and `ZToA` are sort orders applied to whatever is loaded. The other
/// modes keep the service's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Popular,
    Search,
    AToZ,
    ZToA,
    Genre,
    Company,
    People,
}

impl ViewMode {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::Search => "Search",
            Self::AToZ => "A-Z",
            Self::ZToA => "Z-A",
            Self::Genre => "Genre",
            Self::Company => "Studios",
            Self::People => "People",
        }
    }
}

/// Which search endpoint a query goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    All,
    Movies,
    People,
    Companies,
}

impl SearchKind {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Movies,
            Self::Movies => Self::People,
            Self::People => Self::Companies,
            Self::Companies => Self::All,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Movies => "movies",
            Self::People => "people",
            Self::Companies => "companies",
        }
    }
}

/// Where the raw list came from, and how to fetch another page of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Popular,
    Search { kind: SearchKind, query: String },
    Genre(Genre),
    /// The curated studio directory. Local, never fetched.
    Studios,
    Company { id: u64, name: String },
    PopularPeople,
    /// Known-for titles of a person. Local, never fetched.
    KnownFor(PersonSummary),
}

impl Source {
    #[must_use]
    pub fn for_company(company: &CompanySummary) -> Self {
        Self::Company {
            id: company.id,
            name: company.name.clone(),
        }
    }

    /// Builds the request for `page`, `None` for local sources.
    #[must_use]
    pub fn request(&self, client: &TmdbClient, page: u32) -> Option<ApiRequest> {
        Some(match self {
            Self::Popular => client.list_popular_movies(page),
            Self::Search { kind, query } => match kind {
                SearchKind::All => client.search_any(query, page),
                SearchKind::Movies => client.search_by_title(query, page),
                SearchKind::People => client.search_by_person(query, page),
                SearchKind::Companies => client.search_by_company(query, page),
            },
            Self::Genre(genre) => client.discover_by_genre(genre.id, page),
            Self::Company { id, .. } => client.discover_by_company(*id, page),
            Self::PopularPeople => client.list_popular_people(page),
            Self::Studios | Self::KnownFor(_) => return None,
        })
    }

    /// Short description for the header.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Popular => "Popular movies".to_string(),
            Self::Search { kind, query } => format!("Search {}: \"{query}\"", kind.label()),
            Self::Genre(genre) => format!("Genre: {}", genre.name),
            Self::Studios => "Studios".to_string(),
            Self::Company { name, .. } => format!("Studio: {name}"),
            Self::PopularPeople => "Popular people".to_string(),
            Self::KnownFor(person) => format!("Known for: {}", person.name),
        }
    }
}
