//! The catalog state controller.
//!
//! Owns the raw result list, the filter and sort controls and the derived list.
//! Operations that need data from the service return a [`CatalogFetch`]
//! describing the request to issue; the response is fed back through
//! [`CatalogController::apply_response`].
//!
//! A request carries the query, source and filters it was issued for. They
//! replace the visible ones only when its response is applied successfully;
//! a failed or superseded request leaves the catalog as it was. Local
//! operations (year filter, alphabetical views, studio directory) apply
//! immediately.

use super::derive::{derive, Filters};
use super::modes::{SearchKind, Source, ViewMode};
use super::sequence::{RequestSequencer, ResponseOrdering};
use crate::api::Paged;
use crate::domain::error::Result;
use crate::domain::{company, CatalogItem, CompanySummary, Genre, PersonSummary};

/// Upper bound on remembered in-flight requests.
const MAX_IN_FLIGHT: usize = 16;

/// A request the controller wants issued.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFetch {
    pub source: Source,
    pub page: u32,
    pub seq: u64,
}

/// What the catalog will show once request `seq` succeeds.
#[derive(Debug, Clone, PartialEq)]
struct Intent {
    seq: u64,
    page: u32,
    source: Source,
    filters: Filters,
    /// Set when the request discards the year filter on success.
    clears_year: bool,
    query: String,
    search_kind: SearchKind,
}

pub struct CatalogController {
    raw: Vec<CatalogItem>,
    derived: Vec<CatalogItem>,
    filters: Filters,
    source: Source,
    query: String,
    search_kind: SearchKind,
    page: u32,
    total_pages: u32,
    total_results: u64,
    error: Option<String>,
    sequencer: RequestSequencer,
    in_flight: Vec<Intent>,
    /// The last request that failed, retried by [`reload`](Self::reload).
    failed: Option<Intent>,
}

impl CatalogController {
    #[must_use]
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            raw: Vec::new(),
            derived: Vec::new(),
            filters: Filters::default(),
            source: Source::Popular,
            query: String::new(),
            search_kind: SearchKind::default(),
            page: 1,
            total_pages: 0,
            total_results: 0,
            error: None,
            sequencer: RequestSequencer::new(ordering),
            in_flight: Vec::new(),
            failed: None,
        }
    }

    // ---- read access ----

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.derived
    }

    #[must_use]
    pub fn raw_items(&self) -> &[CatalogItem] {
        &self.raw
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.filters.mode
    }

    #[must_use]
    pub const fn year_filter(&self) -> Option<i32> {
        self.filters.year
    }

    #[must_use]
    pub const fn genre_filter(&self) -> Option<&Genre> {
        self.filters.genre.as_ref()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn search_kind(&self) -> SearchKind {
        self.search_kind
    }

    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    #[must_use]
    pub const fn total_results(&self) -> u64 {
        self.total_results
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Source of the most recent request still awaiting its response.
    #[must_use]
    pub fn pending_source(&self) -> Option<&Source> {
        self.in_flight
            .last()
            .filter(|intent| intent.seq == self.sequencer.last_issued())
            .map(|intent| &intent.source)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.sequencer.is_pending()
    }

    // ---- operations ----

    /// Replaces the raw list wholesale and re-derives.
    pub fn set_source(&mut self, raw: Vec<CatalogItem>) {
        self.raw = raw;
        self.rederive();
    }

    /// Switches the view mode.
    ///
    /// `Popular` clears the query and always issues a fresh popular request.
    /// `People` issues a popular-people request. `Company` loads the studio
    /// directory locally. `AToZ`, `ZToA` and `Search` only re-derive. `Genre`
    /// re-issues the active genre discovery and is ignored without one.
    pub fn set_active_view(&mut self, mode: ViewMode) -> Option<CatalogFetch> {
        tracing::debug!(mode = ?mode, "set active view");
        match mode {
            ViewMode::Popular => {
                let mut intent = self.intent(Source::Popular, ViewMode::Popular);
                intent.query.clear();
                Some(self.issue(intent, 1))
            }
            ViewMode::People => {
                let intent = self.intent(Source::PopularPeople, ViewMode::People);
                Some(self.issue(intent, 1))
            }
            ViewMode::Company => {
                self.filters.mode = ViewMode::Company;
                self.load_local(Source::Studios, company::major_studios().into_iter().map(CatalogItem::from).collect());
                None
            }
            ViewMode::Genre => {
                let genre = self.filters.genre.clone()?;
                let intent = self.intent(Source::Genre(genre), ViewMode::Genre);
                Some(self.issue(intent, 1))
            }
            ViewMode::AToZ | ViewMode::ZToA | ViewMode::Search => {
                self.filters.mode = mode;
                self.update_in_flight(|intent| intent.filters.mode = mode);
                self.rederive();
                None
            }
        }
    }

    /// Sets or clears the year filter and re-derives.
    pub fn set_year_filter(&mut self, year: Option<i32>) {
        tracing::debug!(year = ?year, "set year filter");
        self.filters.year = year;
        self.update_in_flight(|intent| {
            if !intent.clears_year {
                intent.filters.year = year;
            }
        });
        self.rederive();
    }

    /// Sets or clears the genre filter.
    ///
    /// Setting a genre requests that genre's discovery list; once it arrives
    /// the year filter and the query are cleared and the mode becomes genre.
    /// Clearing it while in genre mode falls back to popular movies; otherwise
    /// it only re-derives.
    pub fn set_genre_filter(&mut self, genre: Option<Genre>) -> Option<CatalogFetch> {
        tracing::debug!(genre = ?genre.as_ref().map(|g| &g.name), "set genre filter");
        if let Some(genre) = genre {
            let mut intent = self.intent(Source::Genre(genre.clone()), ViewMode::Genre);
            intent.filters.genre = Some(genre);
            intent.filters.year = None;
            intent.clears_year = true;
            intent.query.clear();
            return Some(self.issue(intent, 1));
        }

        if self.filters.mode == ViewMode::Genre {
            let mut intent = self.intent(Source::Popular, ViewMode::Popular);
            intent.filters.genre = None;
            return Some(self.issue(intent, 1));
        }
        self.filters.genre = None;
        self.update_in_flight(|intent| {
            if intent.filters.mode != ViewMode::Genre {
                intent.filters.genre = None;
            }
        });
        self.rederive();
        None
    }

    /// Runs a search.
    ///
    /// An empty or blank query reverts to popular movies. Otherwise, once the
    /// results arrive, the year and genre filters are cleared and the mode
    /// becomes `Search`.
    pub fn search(&mut self, kind: SearchKind, query: &str) -> CatalogFetch {
        let query = query.trim();
        if query.is_empty() {
            let mut intent = self.intent(Source::Popular, ViewMode::Popular);
            intent.query.clear();
            intent.search_kind = kind;
            return self.issue(intent, 1);
        }

        let source = Source::Search {
            kind,
            query: query.to_string(),
        };
        let mut intent = self.intent(source, ViewMode::Search);
        intent.query = query.to_string();
        intent.search_kind = kind;
        intent.filters.year = None;
        intent.filters.genre = None;
        intent.clears_year = true;
        self.issue(intent, 1)
    }

    /// Lists the movies of a production company.
    pub fn browse_company(&mut self, company: &CompanySummary) -> CatalogFetch {
        let intent = self.intent(Source::for_company(company), ViewMode::Company);
        self.issue(intent, 1)
    }

    /// Shows a person's known-for titles. Local, no request.
    pub fn browse_person(&mut self, person: &PersonSummary) {
        let items = person.known_for.iter().cloned().map(CatalogItem::from).collect();
        self.filters.mode = ViewMode::People;
        self.load_local(Source::KnownFor(person.clone()), items);
    }

    /// Requests page `page` of the current source.
    ///
    /// Returns `None` when the page is outside `1..=total_pages` or the source
    /// is local.
    pub fn go_to_page(&mut self, page: u32) -> Option<CatalogFetch> {
        if page == 0 || page > self.total_pages || !self.source_is_remote() {
            tracing::debug!(page, total_pages = self.total_pages, "page out of range");
            return None;
        }
        let intent = self.intent(self.source.clone(), self.filters.mode);
        Some(self.issue(intent, page))
    }

    /// Retries the last failed request, or re-issues the current one.
    pub fn reload(&mut self) -> Option<CatalogFetch> {
        if let Some(failed) = self.failed.take() {
            tracing::debug!(source = %failed.source.describe(), "retrying failed request");
            let page = failed.page;
            return Some(self.issue(failed, page));
        }
        if !self.source_is_remote() {
            return None;
        }
        let intent = self.intent(self.source.clone(), self.filters.mode);
        Some(self.issue(intent, self.page.max(1)))
    }

    /// Applies the response to request `seq`.
    ///
    /// A stale or superseded response is ignored. A success commits the
    /// request's query, source and filters along with the new list. A failure
    /// keeps everything visible as it was and records an error marker.
    ///
    /// Returns `true` if the response was applied.
    pub fn apply_response(&mut self, seq: u64, response: Result<Paged<CatalogItem>>) -> bool {
        let _span = tracing::debug_span!("catalog_apply_response", seq).entered();

        if !self.sequencer.accept(seq) {
            return false;
        }
        let Some(position) = self.in_flight.iter().position(|intent| intent.seq == seq) else {
            tracing::debug!("response to a superseded request");
            return false;
        };
        let intent = self.in_flight.remove(position);
        if self.sequencer.ordering() == ResponseOrdering::LatestRequest {
            self.in_flight.retain(|pending| pending.seq > seq);
        }

        match response {
            Ok(page) => {
                tracing::debug!(
                    page = page.page,
                    total_pages = page.total_pages,
                    results = page.results.len(),
                    "catalog page received"
                );
                self.page = page.page.max(1);
                self.total_pages = page.total_pages;
                self.total_results = page.total_results;
                self.error = None;
                self.failed = None;
                self.source = intent.source;
                self.filters = intent.filters;
                self.query = intent.query;
                self.search_kind = intent.search_kind;
                self.set_source(page.results);
            }
            Err(e) => {
                tracing::warn!(error = %e, source = %intent.source.describe(), "catalog request failed");
                self.error = Some(e.to_string());
                self.failed = Some(intent);
            }
        }
        true
    }

    // ---- internals ----

    fn source_is_remote(&self) -> bool {
        !matches!(self.source, Source::Studios | Source::KnownFor(_))
    }

    /// The current query and filters, retargeted at `source` in `mode`.
    fn intent(&self, source: Source, mode: ViewMode) -> Intent {
        Intent {
            seq: 0,
            page: 1,
            source,
            filters: Filters {
                mode,
                ..self.filters.clone()
            },
            clears_year: false,
            query: self.query.clone(),
            search_kind: self.search_kind,
        }
    }

    /// Carries a local filter change over to requests still awaiting a response.
    fn update_in_flight(&mut self, update: impl Fn(&mut Intent)) {
        self.in_flight.iter_mut().chain(self.failed.as_mut()).for_each(update);
    }

    fn issue(&mut self, mut intent: Intent, page: u32) -> CatalogFetch {
        intent.seq = self.sequencer.issue();
        intent.page = page;
        tracing::debug!(seq = intent.seq, page, source = %intent.source.describe(), "issuing catalog request");
        let fetch = CatalogFetch {
            source: intent.source.clone(),
            page,
            seq: intent.seq,
        };
        if self.in_flight.len() >= MAX_IN_FLIGHT {
            self.in_flight.remove(0);
        }
        self.in_flight.push(intent);
        self.failed = None;
        fetch
    }

    /// Replaces the list from a local source. Supersedes anything in flight.
    fn load_local(&mut self, source: Source, items: Vec<CatalogItem>) {
        let seq = self.sequencer.issue();
        self.sequencer.accept(seq);
        self.in_flight.clear();
        self.failed = None;
        self.source = source;
        self.page = 1;
        self.total_pages = 1;
        self.total_results = items.len() as u64;
        self.error = None;
        self.set_source(items);
    }

    fn rederive(&mut self) {
        self.derived = derive(&self.raw, &self.filters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarqueeError, MovieSummary};
    use chrono::NaiveDate;

    fn page_of(titles: &[&str], total_pages: u32) -> Paged<CatalogItem> {
        Paged {
            page: 1,
            results: titles
                .iter()
                .enumerate()
                .map(|(i, t)| CatalogItem::from(MovieSummary::new(i as u64 + 1, *t)))
                .collect(),
            total_pages,
            total_results: titles.len() as u64,
        }
    }

    fn controller() -> CatalogController {
        CatalogController::new(ResponseOrdering::LatestRequest)
    }

    fn movie(id: u64, title: &str, year: i32, genre: u64) -> CatalogItem {
        let mut m = MovieSummary::new(id, title);
        m.release_date = NaiveDate::from_ymd_opt(year, 6, 1);
        m.genre_ids = vec![genre];
        CatalogItem::from(m)
    }

    fn failure() -> Result<Paged<CatalogItem>> {
        Err(MarqueeError::Api {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    /// Popular list of 1999 and 1995 movies filtered to 1999.
    fn popular_in_1999() -> CatalogController {
        let mut catalog = controller();
        let fetch = catalog.set_active_view(ViewMode::Popular).unwrap();
        let page = Paged {
            page: 1,
            results: vec![
                movie(1, "The Matrix", 1999, 28),
                movie(2, "Office Space", 1999, 35),
                movie(3, "Heat", 1995, 28),
            ],
            total_pages: 1,
            total_results: 3,
        };
        catalog.apply_response(fetch.seq, Ok(page));
        catalog.set_year_filter(Some(1999));
        catalog
    }

    #[test]
    fn year_then_genre_clears_year_and_enters_genre_mode() {
        let mut catalog = controller();
        catalog.set_year_filter(Some(1999));

        let fetch = catalog.set_genre_filter(Some(Genre::new(35, "Comedy"))).unwrap();
        assert_eq!(fetch.source, Source::Genre(Genre::new(35, "Comedy")));
        assert_eq!(catalog.year_filter(), Some(1999));
        assert_eq!(catalog.pending_source(), Some(&fetch.source));

        catalog.apply_response(fetch.seq, Ok(page_of(&["Groundhog Day"], 1)));
        assert_eq!(catalog.year_filter(), None);
        assert_eq!(catalog.mode(), ViewMode::Genre);
        assert_eq!(catalog.genre_filter().map(|g| g.id), Some(35));
        assert_eq!(catalog.pending_source(), None);
    }

    #[test]
    fn failed_genre_request_keeps_previous_filters() {
        let mut catalog = popular_in_1999();

        let fetch = catalog.set_genre_filter(Some(Genre::new(35, "Comedy"))).unwrap();
        assert!(catalog.apply_response(fetch.seq, failure()));

        assert_eq!(catalog.mode(), ViewMode::Popular);
        assert_eq!(catalog.year_filter(), Some(1999));
        assert!(catalog.genre_filter().is_none());
        assert_eq!(catalog.source(), &Source::Popular);
        let titles: Vec<_> = catalog.items().iter().map(CatalogItem::title).collect();
        assert_eq!(titles, vec!["The Matrix", "Office Space"]);
        assert!(catalog.error().is_some());
    }

    #[test]
    fn reload_retries_the_failed_request() {
        let mut catalog = popular_in_1999();
        let fetch = catalog.set_genre_filter(Some(Genre::new(35, "Comedy"))).unwrap();
        catalog.apply_response(fetch.seq, failure());

        let retry = catalog.reload().unwrap();
        assert_eq!(retry.source, Source::Genre(Genre::new(35, "Comedy")));

        catalog.apply_response(retry.seq, Ok(page_of(&["Groundhog Day"], 1)));
        assert_eq!(catalog.mode(), ViewMode::Genre);
        assert_eq!(catalog.year_filter(), None);
        assert!(catalog.error().is_none());
    }

    #[test]
    fn year_set_while_loading_survives_the_response() {
        let mut catalog = controller();
        let fetch = catalog.set_active_view(ViewMode::Popular).unwrap();
        catalog.set_year_filter(Some(1995));

        catalog.apply_response(
            fetch.seq,
            Ok(Paged {
                page: 1,
                results: vec![movie(1, "The Matrix", 1999, 28), movie(3, "Heat", 1995, 28)],
                total_pages: 1,
                total_results: 2,
            }),
        );
        assert_eq!(catalog.year_filter(), Some(1995));
        assert_eq!(catalog.items().len(), 1);
    }

    #[test]
    fn clearing_genre_in_genre_mode_reloads_popular() {
        let mut catalog = controller();
        let genre = catalog.set_genre_filter(Some(Genre::new(35, "Comedy"))).unwrap();
        catalog.apply_response(genre.seq, Ok(page_of(&["Groundhog Day"], 1)));

        let fetch = catalog.set_genre_filter(None).unwrap();
        assert_eq!(fetch.source, Source::Popular);
        assert_eq!(catalog.mode(), ViewMode::Genre);

        catalog.apply_response(fetch.seq, Ok(page_of(&["Heat"], 1)));
        assert_eq!(catalog.mode(), ViewMode::Popular);
        assert!(catalog.genre_filter().is_none());
    }

    #[test]
    fn clearing_genre_outside_genre_mode_only_rederives() {
        let mut catalog = controller();
        let genre = catalog.set_genre_filter(Some(Genre::new(35, "Comedy"))).unwrap();
        catalog.apply_response(genre.seq, Ok(page_of(&["Groundhog Day"], 1)));
        catalog.set_active_view(ViewMode::AToZ);

        assert!(catalog.set_genre_filter(None).is_none());
        assert!(catalog.genre_filter().is_none());
        assert_eq!(catalog.mode(), ViewMode::AToZ);
    }

    #[test]
    fn switching_to_popular_always_fetches() {
        let mut catalog = controller();
        let search = catalog.search(SearchKind::Movies, "alien");
        catalog.apply_response(search.seq, Ok(page_of(&["Alien"], 1)));
        assert_eq!(catalog.query(), "alien");

        let fetch = catalog.set_active_view(ViewMode::Popular).unwrap();
        assert_eq!(fetch.source, Source::Popular);
        catalog.apply_response(fetch.seq, Ok(page_of(&["Heat"], 1)));
        assert_eq!(catalog.query(), "");
    }

    #[test]
    fn empty_search_reverts_to_popular() {
        let mut catalog = controller();
        let fetch = catalog.search(SearchKind::All, "   ");

        assert_eq!(fetch.source, Source::Popular);
        catalog.apply_response(fetch.seq, Ok(page_of(&["Heat"], 1)));
        assert_eq!(catalog.mode(), ViewMode::Popular);
    }

    #[test]
    fn search_clears_filters() {
        let mut catalog = popular_in_1999();

        let fetch = catalog.search(SearchKind::Movies, "heat");
        catalog.apply_response(fetch.seq, Ok(page_of(&["Heat"], 1)));
        assert_eq!(catalog.year_filter(), None);
        assert!(catalog.genre_filter().is_none());
        assert_eq!(catalog.mode(), ViewMode::Search);
        assert_eq!(catalog.query(), "heat");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut catalog = controller();
        let first = catalog.search(SearchKind::Movies, "ali");
        let second = catalog.search(SearchKind::Movies, "alien");

        assert!(catalog.apply_response(second.seq, Ok(page_of(&["Alien"], 1))));
        assert!(!catalog.apply_response(first.seq, Ok(page_of(&["Ali"], 1))));
        assert_eq!(catalog.items()[0].title(), "Alien");
    }

    #[test]
    fn last_arrival_ordering_applies_late_responses() {
        let mut catalog = CatalogController::new(ResponseOrdering::LastArrival);
        let first = catalog.search(SearchKind::Movies, "ali");
        let second = catalog.search(SearchKind::Movies, "alien");

        catalog.apply_response(second.seq, Ok(page_of(&["Alien"], 1)));
        assert!(catalog.apply_response(first.seq, Ok(page_of(&["Ali"], 1))));
        assert_eq!(catalog.items()[0].title(), "Ali");
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut catalog = controller();
        let ok = catalog.set_active_view(ViewMode::Popular).unwrap();
        catalog.apply_response(ok.seq, Ok(page_of(&["Heat", "Alien"], 3)));

        let failing = catalog.go_to_page(2).unwrap();
        let applied = catalog.apply_response(
            failing.seq,
            Err(MarqueeError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );

        assert!(applied);
        assert_eq!(catalog.items().len(), 2);
        assert!(catalog.error().unwrap().contains("boom"));
        assert!(!catalog.is_loading());
        assert_eq!(catalog.reload().unwrap().page, 2);
    }

    #[test]
    fn go_to_page_is_bounded() {
        let mut catalog = controller();
        let fetch = catalog.set_active_view(ViewMode::Popular).unwrap();
        catalog.apply_response(fetch.seq, Ok(page_of(&["Heat"], 4)));

        assert!(catalog.go_to_page(0).is_none());
        assert!(catalog.go_to_page(5).is_none());
        assert_eq!(catalog.go_to_page(4).unwrap().page, 4);
    }

    #[test]
    fn studio_directory_is_local() {
        let mut catalog = controller();
        assert!(catalog.set_active_view(ViewMode::Company).is_none());
        assert!(!catalog.items().is_empty());
        assert!(catalog.go_to_page(1).is_none());
        assert!(!catalog.is_loading());
    }

    #[test]
    fn local_source_supersedes_in_flight_request() {
        let mut catalog = controller();
        let pending = catalog.set_active_view(ViewMode::Popular).unwrap();
        catalog.set_active_view(ViewMode::Company);

        assert!(!catalog.apply_response(pending.seq, Ok(page_of(&["Heat"], 1))));
        assert_eq!(catalog.source(), &Source::Studios);
    }
}
