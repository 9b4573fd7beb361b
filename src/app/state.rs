//! Application state and view model computation.
//!
//! [`AppState`] owns every piece of runtime state: the catalog controller, the
//! favorites store, the genre list, the detail panel, the input mode and the
//! selection cursors. The event handler mutates it; the renderer only ever sees
//! the [`UIViewModel`] computed from it.
//!
//! # Example
//!
//! ```
//! use marquee::app::AppState;
//! use marquee::catalog::ResponseOrdering;
//! use marquee::favorites::Session;
//! use marquee::storage::MemoryStorage;
//! use marquee::ui::Theme;
//!
//! let session = Session::load(Box::new(MemoryStorage::new()));
//! let state = AppState::new(Theme::default(), None, session, ResponseOrdering::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.status.user.is_none());
//! ```

use super::modes::{InputMode, LoginField, Panel, SearchFocus};
use crate::api::{build_external_reference_url, build_image_url, TmdbClient};
use crate::catalog::{CatalogController, RequestSequencer, ResponseOrdering, SearchKind, Source, ViewMode};
use crate::domain::error::Result;
use crate::domain::{CatalogItem, Genre, MovieDetail, MovieSummary};
use crate::favorites::{Authenticator, FavoritesStore, LocalAuthenticator, Session};
use crate::listing::{compare_by_field, compute_page_window, SortDirection, SortField, DEFAULT_PAGE_WINDOW};
use crate::ui::helpers::{highlight_ranges, title_column_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailInfo, DisplayItem, EmptyState, FooterInfo, FormField, HeaderInfo, LoginInfo,
    PageBarInfo, PickerEntry, PickerInfo, PromptInfo, StatusInfo, TableInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Top-billed cast members shown in the detail panel.
const DETAIL_CAST_LIMIT: usize = 8;

/// The movie detail panel.
pub struct DetailState {
    /// The row the panel was opened from, shown while the detail loads.
    pub summary: Option<MovieSummary>,
    pub movie: Option<MovieDetail>,
    pub error: Option<String>,
    /// Panel to return to when the detail is closed.
    pub origin: Panel,
    requests: RequestSequencer,
}

impl DetailState {
    #[must_use]
    pub const fn new(ordering: ResponseOrdering) -> Self {
        Self {
            summary: None,
            movie: None,
            error: None,
            origin: Panel::Catalog,
            requests: RequestSequencer::new(ordering),
        }
    }

    /// Starts showing `summary` and returns the sequence number for its
    /// detail request.
    pub fn open(&mut self, summary: MovieSummary, origin: Panel) -> u64 {
        self.summary = Some(summary);
        self.origin = origin;
        self.movie = None;
        self.error = None;
        self.requests.issue()
    }

    /// Applies the response to detail request `seq`. Returns `false` when the
    /// response was stale.
    pub fn apply(&mut self, seq: u64, response: Result<MovieDetail>) -> bool {
        if !self.requests.accept(seq) {
            return false;
        }
        match response {
            Ok(movie) => {
                self.movie = Some(movie);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "movie detail request failed");
                self.error = Some(e.to_string());
            }
        }
        true
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.requests.is_pending()
    }

    /// The movie to act on: the loaded detail, else the row it was opened from.
    #[must_use]
    pub fn current_summary(&self) -> Option<MovieSummary> {
        self.movie
            .as_ref()
            .map(MovieDetail::to_summary)
            .or_else(|| self.summary.clone())
    }
}

/// Central application state container.
pub struct AppState {
    pub catalog: CatalogController,
    pub favorites: FavoritesStore<Session>,
    pub authenticator: Box<dyn Authenticator>,

    /// `None` when no API key is configured. No requests are issued then.
    pub client: Option<TmdbClient>,

    /// Movie genres, loaded once at startup.
    pub genres: Vec<Genre>,
    pub genre_requests: RequestSequencer,

    pub detail: DetailState,

    pub panel: Panel,
    pub input_mode: InputMode,

    /// Text being typed in the search bar. Committed to the catalog on Enter.
    pub search_input: String,
    pub search_kind: SearchKind,

    /// Cursor within the catalog results.
    pub selected_index: usize,
    /// Cursor within the sorted favorites.
    pub favorites_index: usize,
    pub favorites_sort: (SortField, SortDirection),

    /// One-shot message for the status line, cleared on the next key.
    pub notice: Option<String>,

    pub theme: Theme,

    /// Maximum number of page links in the page bar.
    pub page_window: u32,
}

impl AppState {
    #[must_use]
    pub fn new(
        theme: Theme,
        client: Option<TmdbClient>,
        session: Session,
        ordering: ResponseOrdering,
    ) -> Self {
        Self {
            catalog: CatalogController::new(ordering),
            favorites: FavoritesStore::new(session),
            authenticator: Box::new(LocalAuthenticator),
            client,
            genres: Vec::new(),
            genre_requests: RequestSequencer::new(ordering),
            detail: DetailState::new(ordering),
            panel: Panel::Catalog,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            search_kind: SearchKind::default(),
            selected_index: 0,
            favorites_index: 0,
            favorites_sort: (SortField::Title, SortField::Title.default_direction()),
            notice: None,
            theme,
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }

    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Box<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    #[must_use]
    pub fn with_page_window(mut self, page_window: u32) -> Self {
        self.page_window = page_window.max(1);
        self
    }

    // ---- selection ----

    fn visible_len(&self) -> usize {
        match self.panel {
            Panel::Catalog => self.catalog.items().len(),
            Panel::Favorites => self.favorites.favorites().len(),
            Panel::Detail => 0,
        }
    }

    fn cursor(&mut self) -> &mut usize {
        match self.panel {
            Panel::Favorites => &mut self.favorites_index,
            Panel::Catalog | Panel::Detail => &mut self.selected_index,
        }
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor();
        *cursor = (*cursor + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor();
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    /// Keeps both cursors inside their lists after the lists changed.
    pub fn clamp_selection(&mut self) {
        let catalog_len = self.catalog.items().len();
        self.selected_index = self.selected_index.min(catalog_len.saturating_sub(1));
        let favorites_len = self.favorites.favorites().len();
        self.favorites_index = self.favorites_index.min(favorites_len.saturating_sub(1));
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.catalog.items().get(self.selected_index)
    }

    /// The current identity's favorites in the chosen sort order.
    #[must_use]
    pub fn sorted_favorites(&self) -> Vec<&MovieSummary> {
        let (field, direction) = self.favorites_sort;
        let compare = compare_by_field::<MovieSummary>(field, direction);
        let mut favorites: Vec<&MovieSummary> = self.favorites.favorites().iter().collect();
        favorites.sort_by(|a, b| compare(*a, *b));
        favorites
    }

    #[must_use]
    pub fn selected_favorite(&self) -> Option<&MovieSummary> {
        self.sorted_favorites().get(self.favorites_index).copied()
    }

    /// Genres matching the picker query, best match first. All genres in list
    /// order when the query is empty.
    #[must_use]
    pub fn genre_matches(&self, query: &str) -> Vec<&Genre> {
        if query.is_empty() {
            return self.genres.iter().collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &Genre)> = self
            .genres
            .iter()
            .filter_map(|g| matcher.fuzzy_match(&g.name, query).map(|score| (score, g)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, g)| g).collect()
    }

    // ---- view model ----

    /// Computes the view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let prompt = self.compute_prompt();
        let page_bar = self.compute_page_bar();
        let available_rows = Self::calculate_available_rows(rows, prompt.is_some(), page_bar.is_some());

        let body = match &self.input_mode {
            InputMode::Login(form) => Body::Login(LoginInfo {
                title: if form.sign_up { "Sign up" } else { "Log in" }.to_string(),
                fields: Self::compute_login_fields(form),
            }),
            InputMode::GenrePicker { query, index } => {
                Body::Picker(self.compute_picker(query, *index, available_rows))
            }
            _ => match self.panel {
                Panel::Catalog => self.compute_catalog_body(available_rows, cols),
                Panel::Favorites => self.compute_favorites_body(available_rows, cols),
                Panel::Detail => self.compute_detail_body(),
            },
        };

        UIViewModel {
            header: self.compute_header(),
            prompt,
            body,
            page_bar,
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_catalog_body(&self, available_rows: usize, cols: usize) -> Body {
        if self.client.is_none() {
            return Body::Empty(EmptyState {
                message: "TMDB API key is not configured".to_string(),
                subtitle: "Set api_key in the plugin configuration block".to_string(),
            });
        }

        let items = self.catalog.items();
        if items.is_empty() {
            return Body::Empty(self.catalog_empty_state());
        }

        let (start, end) = Self::window(self.selected_index, items.len(), available_rows);
        let matcher = SkimMatcherV2::default();
        let query = if matches!(self.catalog.source(), Source::Search { .. }) {
            self.catalog.query()
        } else {
            ""
        };
        let title_width = title_column_width(cols);

        let display_items = items[start..end]
            .iter()
            .enumerate()
            .map(|(offset, item)| {
                let title = truncate(item.title(), title_width);
                let highlight_ranges = highlight_ranges(&matcher, &title, query);
                let (kind, rating) = match item {
                    CatalogItem::Movie(m) => ("movie", format_rating(m.vote_average)),
                    CatalogItem::Person(_) => ("person", format_rating(None)),
                    CatalogItem::Company(_) => ("studio", format_rating(None)),
                };
                DisplayItem {
                    kind: kind.to_string(),
                    year: format_year(item.release_year()),
                    rating,
                    is_favorite: item.as_movie().is_some_and(|m| self.favorites.is_favorite(m.id)),
                    is_selected: start + offset == self.selected_index,
                    highlight_ranges,
                    title,
                }
            })
            .collect();

        Body::Table(TableInfo {
            items: display_items,
            selected_index: self.selected_index.saturating_sub(start),
        })
    }

    fn catalog_empty_state(&self) -> EmptyState {
        if self.catalog.is_loading() {
            return EmptyState {
                message: "Loading...".to_string(),
                subtitle: self
                    .catalog
                    .pending_source()
                    .unwrap_or_else(|| self.catalog.source())
                    .describe(),
            };
        }
        if let Some(error) = self.catalog.error() {
            return EmptyState {
                message: "Failed to load".to_string(),
                subtitle: format!("{error}  (r to retry)"),
            };
        }
        let subtitle = if self.catalog.year_filter().is_some() || self.catalog.genre_filter().is_some() {
            "Nothing matches the active filters (x to clear)"
        } else {
            "Try another search"
        };
        EmptyState {
            message: "No results".to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    fn compute_favorites_body(&self, available_rows: usize, cols: usize) -> Body {
        let Some(identity) = self.favorites.identity() else {
            return Body::Empty(EmptyState {
                message: "Not logged in".to_string(),
                subtitle: "Press l to log in and keep favorites".to_string(),
            });
        };
        let favorites = self.sorted_favorites();
        if favorites.is_empty() {
            return Body::Empty(EmptyState {
                message: format!("{} has no favorites yet", identity.name),
                subtitle: "Press f on a movie to add it".to_string(),
            });
        }

        let (start, end) = Self::window(self.favorites_index, favorites.len(), available_rows);
        let title_width = title_column_width(cols);
        let items = favorites[start..end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| DisplayItem {
                title: truncate(&movie.title, title_width),
                kind: "movie".to_string(),
                year: format_year(movie.release_year()),
                rating: format_rating(movie.vote_average),
                is_favorite: true,
                is_selected: start + offset == self.favorites_index,
                highlight_ranges: Vec::new(),
            })
            .collect();

        Body::Table(TableInfo {
            items,
            selected_index: self.favorites_index.saturating_sub(start),
        })
    }

    fn compute_detail_body(&self) -> Body {
        let Some(movie) = &self.detail.movie else {
            let title = self
                .detail
                .summary
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_default();
            return Body::Empty(match &self.detail.error {
                Some(error) => EmptyState {
                    message: format!("Failed to load details for {title}"),
                    subtitle: format!("{error}  (r to retry)"),
                },
                None => EmptyState {
                    message: "Loading details...".to_string(),
                    subtitle: title,
                },
            });
        };

        let mut facts = Vec::new();
        if let Some(year) = movie.release_year() {
            facts.push(year.to_string());
        }
        if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
            facts.push(format!("{runtime} min"));
        }
        if let Some(vote) = movie.vote_average {
            let votes = movie.vote_count.unwrap_or(0);
            facts.push(format!("★ {vote:.1} ({votes} votes)"));
        }

        Body::Detail(DetailInfo {
            title: movie.title.clone(),
            tagline: movie.tagline.clone().filter(|t| !t.is_empty()),
            facts: facts.join(" · "),
            genres: movie
                .genres
                .iter()
                .map(|g| g.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            overview: movie
                .overview
                .clone()
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| "No overview available.".to_string()),
            cast: movie
                .top_cast(DETAIL_CAST_LIMIT)
                .map(|member| match member.character.as_deref() {
                    Some(character) if !character.is_empty() => {
                        format!("{} as {character}", member.name)
                    }
                    _ => member.name.clone(),
                })
                .collect(),
            imdb_url: build_external_reference_url(movie.imdb_id()),
            poster_url: build_image_url(movie.poster_path.as_deref()),
            is_favorite: self.favorites.is_favorite(movie.id),
        })
    }

    fn compute_picker(&self, query: &str, index: usize, available_rows: usize) -> PickerInfo {
        let matcher = SkimMatcherV2::default();
        let active_id = self.catalog.genre_filter().map(|g| g.id);

        let mut entries = vec![PickerEntry {
            label: "All genres".to_string(),
            is_selected: index == 0,
            is_active: active_id.is_none(),
            highlight_ranges: Vec::new(),
        }];
        entries.extend(self.genre_matches(query).into_iter().enumerate().map(|(i, genre)| {
            PickerEntry {
                label: genre.name.clone(),
                is_selected: index == i + 1,
                is_active: active_id == Some(genre.id),
                highlight_ranges: highlight_ranges(&matcher, &genre.name, query),
            }
        }));

        let (start, end) = Self::window(index, entries.len(), available_rows);
        let title = if self.genres.is_empty() {
            "Genres (not loaded)".to_string()
        } else {
            "Genres".to_string()
        };
        PickerInfo {
            title,
            query: query.to_string(),
            entries: entries.drain(start..end).collect(),
        }
    }

    fn compute_login_fields(form: &super::modes::LoginForm) -> Vec<FormField> {
        let mut fields = Vec::new();
        if form.sign_up {
            fields.push(FormField {
                label: "Name".to_string(),
                value: form.name.clone(),
                is_active: form.field == LoginField::Name,
            });
        }
        fields.push(FormField {
            label: "Email".to_string(),
            value: form.email.clone(),
            is_active: form.field == LoginField::Email,
        });
        fields.push(FormField {
            label: "Password".to_string(),
            value: "*".repeat(form.password.chars().count()),
            is_active: form.field == LoginField::Password,
        });
        fields
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match self.panel {
            Panel::Catalog => {
                let mut parts = vec![self.catalog.source().describe()];
                if matches!(self.catalog.mode(), ViewMode::AToZ | ViewMode::ZToA) {
                    parts.push(self.catalog.mode().label().to_string());
                }
                if let Some(genre) = self.catalog.genre_filter() {
                    if self.catalog.mode() != ViewMode::Genre {
                        parts.push(format!("genre {}", genre.name));
                    }
                }
                if let Some(year) = self.catalog.year_filter() {
                    parts.push(format!("year {year}"));
                }
                if self.catalog.total_results() > 0 {
                    parts.push(format!("{} results", self.catalog.total_results()));
                }
                parts.join(" · ")
            }
            Panel::Favorites => {
                let (field, direction) = self.favorites_sort;
                let arrow = match direction {
                    SortDirection::Ascending => "↑",
                    SortDirection::Descending => "↓",
                };
                format!(
                    "Favorites ({}) · sorted by {} {arrow}",
                    self.favorites.favorites().len(),
                    field.label()
                )
            }
            Panel::Detail => "Movie details".to_string(),
        };
        HeaderInfo {
            title: " Marquee ".to_string(),
            subtitle,
        }
    }

    fn compute_prompt(&self) -> Option<PromptInfo> {
        match &self.input_mode {
            InputMode::Search(_) => Some(PromptInfo {
                label: "Search".to_string(),
                text: self.search_input.clone(),
                hint: format!("[{}]", self.search_kind.label()),
            }),
            InputMode::YearPrompt(buffer) => Some(PromptInfo {
                label: "Year".to_string(),
                text: buffer.clone(),
                hint: "empty clears".to_string(),
            }),
            InputMode::GenrePicker { query, .. } => Some(PromptInfo {
                label: "Genre".to_string(),
                text: query.clone(),
                hint: String::new(),
            }),
            InputMode::Normal | InputMode::Login(_) => None,
        }
    }

    fn compute_page_bar(&self) -> Option<PageBarInfo> {
        if self.panel != Panel::Catalog || self.catalog.total_pages() <= 1 {
            return None;
        }
        let current = self.catalog.page();
        let total = self.catalog.total_pages();
        Some(PageBarInfo {
            pages: compute_page_window(current, total, self.page_window),
            current,
            total,
        })
    }

    fn compute_status(&self) -> StatusInfo {
        let (loading, error) = match self.panel {
            Panel::Detail => (self.detail.is_loading(), self.detail.error.clone()),
            _ => (
                self.catalog.is_loading(),
                self.catalog.error().map(str::to_string),
            ),
        };
        StatusInfo {
            loading,
            error,
            notice: self.notice.clone(),
            user: self.favorites.identity().map(|identity| identity.name.clone()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.input_mode, self.panel) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                "Enter: search  Tab: kind  Esc: cancel  Type to edit query"
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "j/k: navigate  Enter: open  /: edit query  f: favorite  Esc: exit search"
            }
            (InputMode::YearPrompt(_), _) => "Enter: apply  Esc: cancel  digits only",
            (InputMode::GenrePicker { .. }, _) => "Enter: apply  ↑/↓: move  Esc: cancel  Type to filter",
            (InputMode::Login(_), _) => "Enter: submit  Tab: next field  Ctrl+s: log in/sign up  Esc: cancel",
            (InputMode::Normal, Panel::Catalog) => {
                "j/k: nav  Enter: open  /: search  p/a/z/P/s: views  y/g/x: filters  [/]: page  f: fav  F: favorites  l/L: login  q: quit"
            }
            (InputMode::Normal, Panel::Favorites) => {
                "j/k: nav  Enter: details  f: remove  o: sort field  O: reverse  Esc: back"
            }
            (InputMode::Normal, Panel::Detail) => "f: favorite  r: reload  Esc: back  q: quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    // ---- layout ----

    /// Rows left for the body after the header, prompt, table heading, page
    /// bar, status line and footer.
    const fn calculate_available_rows(total_rows: usize, has_prompt: bool, has_page_bar: bool) -> usize {
        let mut chrome = 8;
        if has_prompt {
            chrome += 2;
        }
        if has_page_bar {
            chrome += 1;
        }
        let rows = total_rows.saturating_sub(chrome);
        if rows == 0 {
            1
        } else {
            rows
        }
    }

    /// Visible `start..end` of a list of `len` rows, keeping `selected` near
    /// the middle.
    fn window(selected: usize, len: usize, available: usize) -> (usize, usize) {
        let mut start = selected.saturating_sub(available / 2);
        let end = (start + available).min(len);
        if end - start < available && len >= available {
            start = end.saturating_sub(available);
        }
        (start, end)
    }
}

fn format_year(year: Option<i32>) -> String {
    year.map_or_else(|| "-".to_string(), |y| y.to_string())
}

fn format_rating(vote_average: Option<f64>) -> String {
    vote_average
        .filter(|v| *v > 0.0)
        .map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}
