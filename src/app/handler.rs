//! Event handling and state transitions.
//!
//! [`handle_event`] is the only place application state changes. It returns
//! whether the UI needs a re-render, plus the side effects for the shim to run.
//!
//! ```text
//! key / host event ──▶ Event ──▶ handle_event ──▶ state change + Vec<Action>
//!                                    ▲                       │
//!                                    └── Event::WebResponse ◀┘ (Action::Fetch)
//! ```
//!
//! Every request carries a [`RequestTag`] in its context map. The response is
//! decoded according to the tag's payload and offered to the owning channel,
//! which drops it if a newer request has already been answered.

use super::actions::{Action, ApiCall};
use super::modes::{InputMode, LoginForm, Panel, SearchFocus};
use super::state::AppState;
use crate::api::{
    decode_company_page, decode_genres, decode_movie_detail, decode_movie_page, decode_multi_page,
    decode_person_page, ApiRequest, Payload, RequestTag,
};
use crate::catalog::{CatalogFetch, ViewMode};
use crate::domain::error::{MarqueeError, Result};
use crate::domain::{CatalogItem, MovieSummary};
use std::collections::BTreeMap;

/// Oldest and newest release years accepted by the year prompt.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1870..=2100;

/// Events from key presses and the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyDown,
    KeyUp,
    /// Enter: submit the active prompt or open the selected row.
    Select,
    /// Hides the plugin pane.
    CloseFocus,
    /// Leaves the active prompt or panel.
    Escape,
    Char(char),
    Backspace,
    /// Cycles the search kind, or the login form field.
    Tab,

    /// Opens the search bar with typing focus.
    SearchMode,
    ShowView(ViewMode),
    YearPrompt,
    GenrePicker,
    /// Clears both the year and the genre filter.
    ClearFilters,
    NextPage,
    PrevPage,
    /// Re-issues the request behind the current panel.
    Reload,

    ToggleFavorite,
    ShowFavorites,
    CycleFavoritesSort,
    ReverseFavoritesSort,

    LoginPrompt,
    ToggleSignUp,
    Logout,

    /// Answer to the startup permission request. Loading starts once web
    /// access is granted.
    PermissionsResult { granted: bool },

    /// A web request finished.
    WebResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
}

impl Event {
    const fn is_user_input(&self) -> bool {
        !matches!(self, Self::PermissionsResult { .. } | Self::WebResponse { .. })
    }
}

/// Processes an event, mutates application state, and returns the actions to
/// execute.
///
/// The boolean is `true` when the UI should be re-rendered.
///
/// # Errors
///
/// Currently every failure is turned into a status-line notice or an error
/// marker, so this only returns `Ok`. The `Result` keeps the shim's error
/// logging in place for handlers that can fail.
///
/// # Example
///
/// ```
/// use marquee::app::{handle_event, AppState, Event};
/// use marquee::catalog::ResponseOrdering;
/// use marquee::favorites::Session;
/// use marquee::storage::MemoryStorage;
/// use marquee::ui::Theme;
///
/// let session = Session::load(Box::new(MemoryStorage::new()));
/// let mut state = AppState::new(Theme::default(), None, session, ResponseOrdering::default());
/// let (render, actions) = handle_event(&mut state, &Event::SearchMode)?;
/// assert!(render);
/// assert!(actions.is_empty());
/// # Ok::<(), marquee::MarqueeError>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = match event {
        Event::WebResponse { status, .. } => tracing::debug_span!("handle_event", event_type = "WebResponse", status),
        other => tracing::debug_span!("handle_event", event_type = ?other),
    }
    .entered();

    if event.is_user_input() {
        state.notice = None;
    }

    match event {
        Event::KeyDown => {
            if let InputMode::GenrePicker { query, index } = &state.input_mode {
                let len = state.genre_matches(query).len() + 1;
                let next = (index + 1) % len;
                if let InputMode::GenrePicker { index, .. } = &mut state.input_mode {
                    *index = next;
                }
            } else {
                state.move_selection_down();
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if let InputMode::GenrePicker { query, index } = &state.input_mode {
                let len = state.genre_matches(query).len() + 1;
                let prev = if *index == 0 { len - 1 } else { index - 1 };
                if let InputMode::GenrePicker { index, .. } = &mut state.input_mode {
                    *index = prev;
                }
            } else {
                state.move_selection_up();
            }
            Ok((true, vec![]))
        }
        Event::Select => handle_select(state),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Escape => Ok((handle_escape(state), vec![])),
        Event::Char(c) => Ok((handle_char(state, *c), vec![])),
        Event::Backspace => Ok((handle_backspace(state), vec![])),
        Event::Tab => match &mut state.input_mode {
            InputMode::Search(_) => {
                state.search_kind = state.search_kind.next();
                tracing::debug!(kind = state.search_kind.label(), "search kind changed");
                Ok((true, vec![]))
            }
            InputMode::Login(form) => {
                form.next_field();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.panel = Panel::Catalog;
            state.search_input = state.catalog.query().to_string();
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::ShowView(mode) => {
            state.panel = Panel::Catalog;
            state.input_mode = InputMode::Normal;
            let fetch = state.catalog.set_active_view(*mode);
            state.selected_index = 0;
            Ok((true, catalog_fetch(state, fetch)))
        }
        Event::YearPrompt => {
            let current = state
                .catalog
                .year_filter()
                .map(|y| y.to_string())
                .unwrap_or_default();
            state.input_mode = InputMode::YearPrompt(current);
            Ok((true, vec![]))
        }
        Event::GenrePicker => {
            let index = state
                .catalog
                .genre_filter()
                .and_then(|active| state.genres.iter().position(|g| g.id == active.id))
                .map_or(0, |i| i + 1);
            state.input_mode = InputMode::GenrePicker {
                query: String::new(),
                index,
            };
            let actions = if state.genres.is_empty() {
                genre_fetch(state)
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::ClearFilters => {
            state.catalog.set_year_filter(None);
            let fetch = state.catalog.set_genre_filter(None);
            state.clamp_selection();
            Ok((true, catalog_fetch(state, fetch)))
        }
        Event::NextPage | Event::PrevPage => {
            let page = state.catalog.page();
            let target = if *event == Event::NextPage {
                page.saturating_add(1)
            } else {
                page.saturating_sub(1)
            };
            let fetch = state.catalog.go_to_page(target);
            if fetch.is_none() {
                return Ok((false, vec![]));
            }
            state.selected_index = 0;
            Ok((true, catalog_fetch(state, fetch)))
        }
        Event::Reload => {
            if state.panel == Panel::Detail {
                let Some(summary) = state.detail.summary.clone() else {
                    return Ok((false, vec![]));
                };
                let origin = state.detail.origin;
                return Ok((true, open_detail(state, summary, origin)));
            }
            let fetch = state.catalog.reload();
            let mut actions = catalog_fetch(state, fetch);
            if state.genres.is_empty() {
                actions.extend(genre_fetch(state));
            }
            Ok((true, actions))
        }

        Event::ToggleFavorite => Ok((handle_toggle_favorite(state), vec![])),
        Event::ShowFavorites => {
            state.panel = Panel::Favorites;
            state.input_mode = InputMode::Normal;
            state.favorites_index = 0;
            Ok((true, vec![]))
        }
        Event::CycleFavoritesSort => {
            let field = state.favorites_sort.0.next();
            state.favorites_sort = (field, field.default_direction());
            state.favorites_index = 0;
            Ok((true, vec![]))
        }
        Event::ReverseFavoritesSort => {
            state.favorites_sort.1 = state.favorites_sort.1.reversed();
            state.favorites_index = 0;
            Ok((true, vec![]))
        }

        Event::LoginPrompt => {
            if let Some(identity) = state.favorites.identity() {
                state.notice = Some(format!("Already logged in as {}", identity.name));
            } else {
                state.input_mode = InputMode::Login(LoginForm::default());
            }
            Ok((true, vec![]))
        }
        Event::ToggleSignUp => {
            if let InputMode::Login(form) = &mut state.input_mode {
                form.toggle_sign_up();
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::Logout => {
            if !state.favorites.is_logged_in() {
                return Ok((false, vec![]));
            }
            state.notice = Some(match state.favorites.logout() {
                Ok(()) => "Logged out".to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to remove stored session");
                    format!("Logged out, but the stored session could not be removed: {e}")
                }
            });
            state.favorites_index = 0;
            Ok((true, vec![]))
        }

        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access not granted, nothing will load");
                state.notice = Some("Web access was not granted".to_string());
                return Ok((true, vec![]));
            }
            tracing::info!("permissions granted, loading popular movies and genres");
            let fetch = state.catalog.set_active_view(ViewMode::Popular);
            let mut actions = catalog_fetch(state, fetch);
            actions.extend(genre_fetch(state));
            Ok((true, actions))
        }

        Event::WebResponse {
            status,
            body,
            context,
        } => Ok((handle_web_response(state, *status, body, context), vec![])),
    }
}

fn handle_select(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.input_mode.clone() {
        InputMode::Search(SearchFocus::Typing) => {
            let query = state.search_input.trim().to_string();
            let fetch = state.catalog.search(state.search_kind, &query);
            tracing::debug!(query = %query, kind = state.search_kind.label(), "search submitted");
            state.input_mode = if query.is_empty() {
                InputMode::Normal
            } else {
                InputMode::Search(SearchFocus::Navigating)
            };
            state.panel = Panel::Catalog;
            state.selected_index = 0;
            Ok((true, catalog_fetch(state, Some(fetch))))
        }
        InputMode::YearPrompt(buffer) => {
            let buffer = buffer.trim();
            let year = if buffer.is_empty() {
                None
            } else {
                match buffer.parse::<i32>() {
                    Ok(year) if YEAR_RANGE.contains(&year) => Some(year),
                    _ => {
                        state.notice = Some(format!("Not a release year: {buffer}"));
                        return Ok((true, vec![]));
                    }
                }
            };
            state.catalog.set_year_filter(year);
            state.input_mode = InputMode::Normal;
            state.clamp_selection();
            Ok((true, vec![]))
        }
        InputMode::GenrePicker { query, index } => {
            let genre = index
                .checked_sub(1)
                .and_then(|i| state.genre_matches(&query).get(i).map(|g| (*g).clone()));
            let fetch = state.catalog.set_genre_filter(genre);
            state.input_mode = InputMode::Normal;
            state.panel = Panel::Catalog;
            state.selected_index = 0;
            state.clamp_selection();
            Ok((true, catalog_fetch(state, fetch)))
        }
        InputMode::Login(form) => {
            submit_login(state, &form);
            Ok((true, vec![]))
        }
        InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => open_selected(state),
    }
}

fn open_selected(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    match state.panel {
        Panel::Catalog => {
            let Some(item) = state.selected_item().cloned() else {
                tracing::debug!("nothing selected");
                return Ok((false, vec![]));
            };
            match item {
                CatalogItem::Movie(movie) => Ok((true, open_detail(state, movie, Panel::Catalog))),
                CatalogItem::Person(person) => {
                    tracing::debug!(person = %person.name, "browsing known-for titles");
                    state.catalog.browse_person(&person);
                    state.input_mode = InputMode::Normal;
                    state.selected_index = 0;
                    Ok((true, vec![]))
                }
                CatalogItem::Company(company) => {
                    tracing::debug!(company = %company.name, "browsing studio");
                    let fetch = state.catalog.browse_company(&company);
                    state.input_mode = InputMode::Normal;
                    state.selected_index = 0;
                    Ok((true, catalog_fetch(state, Some(fetch))))
                }
            }
        }
        Panel::Favorites => {
            let Some(movie) = state.selected_favorite().cloned() else {
                return Ok((false, vec![]));
            };
            Ok((true, open_detail(state, movie, Panel::Favorites)))
        }
        Panel::Detail => Ok((false, vec![])),
    }
}

fn handle_escape(state: &mut AppState) -> bool {
    match state.input_mode {
        InputMode::Search(_)
        | InputMode::YearPrompt(_)
        | InputMode::GenrePicker { .. }
        | InputMode::Login(_) => {
            state.input_mode = InputMode::Normal;
            true
        }
        InputMode::Normal => match state.panel {
            Panel::Detail => {
                state.panel = state.detail.origin;
                true
            }
            Panel::Favorites => {
                state.panel = Panel::Catalog;
                true
            }
            Panel::Catalog => false,
        },
    }
}

fn handle_char(state: &mut AppState, c: char) -> bool {
    match &mut state.input_mode {
        InputMode::Search(SearchFocus::Typing) => {
            state.search_input.push(c);
            true
        }
        InputMode::YearPrompt(buffer) => {
            if !c.is_ascii_digit() || buffer.len() >= 4 {
                return false;
            }
            buffer.push(c);
            true
        }
        InputMode::GenrePicker { query, .. } => {
            query.push(c);
            reset_picker_index(state);
            true
        }
        InputMode::Login(form) => {
            form.active_buffer().push(c);
            true
        }
        InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => false,
    }
}

fn handle_backspace(state: &mut AppState) -> bool {
    match &mut state.input_mode {
        InputMode::Search(SearchFocus::Typing) => state.search_input.pop().is_some(),
        InputMode::YearPrompt(buffer) => buffer.pop().is_some(),
        InputMode::GenrePicker { query, .. } => {
            let changed = query.pop().is_some();
            reset_picker_index(state);
            changed
        }
        InputMode::Login(form) => form.active_buffer().pop().is_some(),
        InputMode::Normal | InputMode::Search(SearchFocus::Navigating) => false,
    }
}

/// Points the picker at the best match, or at "all genres" when the query is
/// empty or matches nothing.
fn reset_picker_index(state: &mut AppState) {
    let InputMode::GenrePicker { query, .. } = &state.input_mode else {
        return;
    };
    let best = usize::from(!query.is_empty() && !state.genre_matches(query).is_empty());
    if let InputMode::GenrePicker { index, .. } = &mut state.input_mode {
        *index = best;
    }
}

fn submit_login(state: &mut AppState, form: &LoginForm) {
    let result = if form.sign_up {
        state.authenticator.sign_up(&form.name, &form.email, &form.password)
    } else {
        state.authenticator.log_in(&form.email, &form.password)
    };

    let identity = match result {
        Ok(identity) => identity,
        Err(e) => {
            tracing::debug!(error = %e, "login rejected");
            state.notice = Some(e.to_string());
            return;
        }
    };

    let name = identity.name.clone();
    match state.favorites.login(identity) {
        Ok(()) => {
            tracing::info!(user = %name, "logged in");
            state.notice = Some(format!("Logged in as {name}"));
            state.input_mode = InputMode::Normal;
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to persist session");
            state.notice = Some(format!("Could not save session: {e}"));
        }
    }
}

fn handle_toggle_favorite(state: &mut AppState) -> bool {
    let movie: Option<MovieSummary> = match state.panel {
        Panel::Catalog => state.selected_item().and_then(CatalogItem::as_movie).cloned(),
        Panel::Favorites => state.selected_favorite().cloned(),
        Panel::Detail => state.detail.current_summary(),
    };
    let Some(movie) = movie else {
        if state.selected_item().is_some() && state.panel == Panel::Catalog {
            state.notice = Some("Only movies can be favorites".to_string());
            return true;
        }
        return false;
    };

    match state.favorites.toggle(&movie) {
        Ok(None) => {
            tracing::debug!("favorite toggle while logged out, opening login");
            state.notice = Some("Log in to keep favorites".to_string());
            state.input_mode = InputMode::Login(LoginForm::default());
        }
        Ok(Some(true)) => state.notice = Some(format!("Added {} to favorites", movie.title)),
        Ok(Some(false)) => {
            state.notice = Some(format!("Removed {} from favorites", movie.title));
            state.clamp_selection();
        }
        Err(e) => {
            tracing::warn!(error = %e, movie_id = movie.id, "failed to save favorites");
            state.notice = Some(format!("Could not save favorites: {e}"));
        }
    }
    true
}

fn open_detail(state: &mut AppState, movie: MovieSummary, origin: Panel) -> Vec<Action> {
    tracing::debug!(movie_id = movie.id, title = %movie.title, "opening movie detail");
    let movie_id = movie.id;
    let seq = state.detail.open(movie, origin);
    state.panel = Panel::Detail;
    state.input_mode = InputMode::Normal;

    let Some(client) = &state.client else {
        state.detail.apply(seq, Err(missing_api_key()));
        return vec![];
    };
    vec![fetch_action(client.get_movie_detail(movie_id), seq)]
}

/// Turns a catalog request into a fetch action.
///
/// Without an API key the request fails immediately, which leaves the catalog
/// with an error marker instead of a pending request.
fn catalog_fetch(state: &mut AppState, fetch: Option<CatalogFetch>) -> Vec<Action> {
    let Some(fetch) = fetch else {
        return vec![];
    };
    let Some(client) = &state.client else {
        state.catalog.apply_response(fetch.seq, Err(missing_api_key()));
        return vec![];
    };
    fetch
        .source
        .request(client, fetch.page)
        .map(|request| fetch_action(request, fetch.seq))
        .into_iter()
        .collect()
}

fn genre_fetch(state: &mut AppState) -> Vec<Action> {
    let Some(client) = &state.client else {
        return vec![];
    };
    let request = client.list_genres();
    let seq = state.genre_requests.issue();
    vec![fetch_action(request, seq)]
}

fn fetch_action(request: ApiRequest, seq: u64) -> Action {
    let tag = RequestTag::new(request.payload, seq);
    Action::Fetch(ApiCall { request, tag })
}

fn missing_api_key() -> MarqueeError {
    MarqueeError::Config("api_key is not configured".to_string())
}

/// Decodes a response and hands it to the channel that requested it.
///
/// Returns `true` when state changed.
fn handle_web_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> bool {
    let Some(tag) = RequestTag::from_context(context) else {
        tracing::debug!("ignoring web response without a request tag");
        return false;
    };

    let _trace = tag.trace.as_ref().and_then(|trace| trace.attach());
    let _span = tracing::info_span!(
        "web_response",
        payload = ?tag.payload,
        seq = tag.seq,
        status,
        bytes = body.len()
    )
    .entered();

    match tag.payload {
        Payload::Movies | Payload::People | Payload::Companies | Payload::Multi => {
            let page = match tag.payload {
                Payload::People => decode_person_page(status, body),
                Payload::Companies => decode_company_page(status, body),
                Payload::Multi => decode_multi_page(status, body),
                _ => decode_movie_page(status, body),
            };
            let applied = state.catalog.apply_response(tag.seq, page);
            if applied {
                state.selected_index = 0;
            } else {
                tracing::debug!(seq = tag.seq, "stale catalog response discarded");
            }
            applied
        }
        Payload::Detail => {
            let applied = state.detail.apply(tag.seq, decode_movie_detail(status, body));
            if !applied {
                tracing::debug!(seq = tag.seq, "stale detail response discarded");
            }
            applied
        }
        Payload::Genres => {
            if !state.genre_requests.accept(tag.seq) {
                return false;
            }
            match decode_genres(status, body) {
                Ok(genres) => {
                    tracing::debug!(count = genres.len(), "genres loaded");
                    state.genres = genres;
                }
                Err(e) => tracing::warn!(error = %e, "failed to load genres"),
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TmdbClient;
    use crate::catalog::ResponseOrdering;
    use crate::domain::UserIdentity;
    use crate::favorites::Session;
    use crate::storage::MemoryStorage;
    use crate::ui::theme::Theme;

    fn state() -> AppState {
        AppState::new(
            Theme::default(),
            Some(TmdbClient::new("KEY", "en-US")),
            Session::load(Box::new(MemoryStorage::new())),
            ResponseOrdering::LatestRequest,
        )
    }

    fn fetches(actions: &[Action]) -> Vec<&ApiCall> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch(call) => Some(call),
                Action::CloseFocus => None,
            })
            .collect()
    }

    fn respond(state: &mut AppState, call: &ApiCall, body: &str) -> bool {
        let event = Event::WebResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
            context: call.tag.to_context(),
        };
        handle_event(state, &event).unwrap().0
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    const MOVIES: &str = r#"{"page":1,"total_pages":2,"total_results":2,"results":[
        {"id":603,"title":"The Matrix","release_date":"1999-03-30","genre_ids":[28]},
        {"id":604,"title":"The Matrix Reloaded","release_date":"2003-05-15","genre_ids":[28]}]}"#;

    #[test]
    fn granted_permissions_load_popular_and_genres() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        let calls = fetches(&actions);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tag.payload, Payload::Movies);
        assert!(calls[0].request.url.contains("/movie/popular"));
        assert_eq!(calls[1].tag.payload, Payload::Genres);
    }

    #[test]
    fn search_round_trip_fills_catalog() {
        let mut state = state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "matrix");
        handle_event(&mut state, &Event::Tab).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();

        let calls = fetches(&actions);
        assert!(calls[0].request.url.contains("/search/movie"));
        assert!(calls[0].request.url.contains("query=matrix"));
        assert_eq!(state.input_mode, InputMode::Search(SearchFocus::Navigating));

        assert!(respond(&mut state, calls[0], MOVIES));
        assert_eq!(state.catalog.items().len(), 2);
        assert_eq!(state.catalog.total_pages(), 2);
    }

    #[test]
    fn stale_search_response_is_dropped() {
        let mut state = state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "ma");
        let (_, first) = handle_event(&mut state, &Event::Select).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        type_text(&mut state, "trix");
        let (_, second) = handle_event(&mut state, &Event::Select).unwrap();

        let empty = r#"{"page":1,"total_pages":1,"total_results":0,"results":[]}"#;
        assert!(respond(&mut state, fetches(&second)[0], MOVIES));
        assert!(!respond(&mut state, fetches(&first)[0], empty));
        assert_eq!(state.catalog.items().len(), 2);
    }

    #[test]
    fn year_prompt_rejects_non_years() {
        let mut state = state();
        handle_event(&mut state, &Event::YearPrompt).unwrap();
        type_text(&mut state, "19a9");
        assert_eq!(state.input_mode, InputMode::YearPrompt("199".to_string()));

        handle_event(&mut state, &Event::Select).unwrap();
        assert!(state.notice.is_some());
        assert!(matches!(state.input_mode, InputMode::YearPrompt(_)));

        handle_event(&mut state, &Event::Char('9')).unwrap();
        handle_event(&mut state, &Event::Select).unwrap();
        assert_eq!(state.catalog.year_filter(), Some(1999));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn genre_picker_selects_best_match() {
        let mut state = state();
        state.genres = vec![
            crate::domain::Genre::new(28, "Action"),
            crate::domain::Genre::new(35, "Comedy"),
        ];
        handle_event(&mut state, &Event::GenrePicker).unwrap();
        type_text(&mut state, "com");
        let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();

        let call = fetches(&actions)[0];
        assert!(call.request.url.contains("with_genres=35"));
        respond(&mut state, call, MOVIES);
        assert_eq!(state.catalog.genre_filter().map(|g| g.id), Some(35));
    }

    #[test]
    fn failed_genre_fetch_keeps_year_filter() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, fetches(&actions)[0], MOVIES);
        handle_event(&mut state, &Event::YearPrompt).unwrap();
        type_text(&mut state, "1999");
        handle_event(&mut state, &Event::Select).unwrap();

        state.genres = vec![crate::domain::Genre::new(35, "Comedy")];
        handle_event(&mut state, &Event::GenrePicker).unwrap();
        type_text(&mut state, "com");
        let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();
        let failure = Event::WebResponse {
            status: 500,
            body: br#"{"status_message":"Internal error"}"#.to_vec(),
            context: fetches(&actions)[0].tag.to_context(),
        };
        handle_event(&mut state, &failure).unwrap();

        assert_eq!(state.catalog.year_filter(), Some(1999));
        assert_eq!(state.catalog.mode(), ViewMode::Popular);
        assert!(state.catalog.genre_filter().is_none());
        assert_eq!(state.catalog.items().len(), 1);
        assert!(state.catalog.error().is_some());
    }

    #[test]
    fn favorite_while_logged_out_opens_login() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, fetches(&actions)[0], MOVIES);

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(matches!(state.input_mode, InputMode::Login(_)));
        assert!(state.favorites.favorites().is_empty());
    }

    #[test]
    fn login_then_toggle_favorite() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, fetches(&actions)[0], MOVIES);

        handle_event(&mut state, &Event::LoginPrompt).unwrap();
        type_text(&mut state, "neo@example.com");
        handle_event(&mut state, &Event::Tab).unwrap();
        type_text(&mut state, "secret");
        handle_event(&mut state, &Event::Select).unwrap();
        assert_eq!(state.favorites.identity().map(|i| i.name.as_str()), Some("neo"));

        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(state.favorites.is_favorite(603));
        handle_event(&mut state, &Event::ToggleFavorite).unwrap();
        assert!(!state.favorites.is_favorite(603));
    }

    #[test]
    fn enter_on_movie_opens_detail() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, fetches(&actions)[0], MOVIES);

        let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();
        let call = fetches(&actions)[0].clone();
        assert_eq!(state.panel, Panel::Detail);
        assert!(call.request.url.contains("/movie/603"));

        let body = r#"{"id":603,"title":"The Matrix","runtime":136,
            "external_ids":{"imdb_id":"tt0133093"},
            "credits":{"cast":[{"id":6384,"name":"Keanu Reeves","character":"Neo","order":0}]}}"#;
        assert!(respond(&mut state, &call, body));
        assert_eq!(state.detail.movie.as_ref().map(|m| m.runtime), Some(Some(136)));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.panel, Panel::Catalog);
    }

    #[test]
    fn missing_api_key_fails_without_requests() {
        let mut state = AppState::new(
            Theme::default(),
            None,
            Session::load(Box::new(MemoryStorage::new())),
            ResponseOrdering::LatestRequest,
        );
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        assert!(actions.is_empty());
        assert!(!state.catalog.is_loading());
        assert!(state.catalog.error().unwrap().contains("api_key"));
    }

    #[test]
    fn failed_response_keeps_results_and_sets_marker() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        respond(&mut state, fetches(&actions)[0], MOVIES);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        let call = fetches(&actions)[0];
        assert!(call.request.url.contains("page=2"));
        let event = Event::WebResponse {
            status: 401,
            body: br#"{"status_message":"Invalid API key"}"#.to_vec(),
            context: call.tag.to_context(),
        };
        handle_event(&mut state, &event).unwrap();

        assert_eq!(state.catalog.items().len(), 2);
        assert!(state.catalog.error().unwrap().contains("Invalid API key"));
    }

    #[test]
    fn logout_clears_identity() {
        let mut state = state();
        state
            .favorites
            .login(UserIdentity::new(1, "ana", "ana@example.com"))
            .unwrap();
        handle_event(&mut state, &Event::Logout).unwrap();
        assert!(!state.favorites.is_logged_in());
        assert_eq!(state.notice.as_deref(), Some("Logged out"));
    }
}
