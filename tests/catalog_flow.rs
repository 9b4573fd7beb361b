use marquee::api::Payload;
use marquee::app::ApiCall;
use marquee::catalog::{RequestSequencer, ResponseOrdering, ViewMode};
use marquee::listing::compute_page_window;
use marquee::{handle_event, initialize_in, Action, AppState, Config, Event};

const POPULAR: &str = r#"{"page":1,"total_pages":3,"total_results":4,"results":[
    {"id":603,"title":"The Matrix","release_date":"1999-03-30","genre_ids":[28,878]},
    {"id":137,"title":"Groundhog Day","release_date":"1993-02-11","genre_ids":[35]},
    {"id":550,"title":"Fight Club","release_date":"1999-10-15","genre_ids":[18]},
    {"id":680,"title":"Pulp Fiction","release_date":"","genre_ids":[80]}]}"#;

const COMEDIES: &str = r#"{"page":1,"total_pages":1,"total_results":2,"results":[
    {"id":137,"title":"Groundhog Day","release_date":"1993-02-11","genre_ids":[35]},
    {"id":1542,"title":"Office Space","release_date":"1999-02-19","genre_ids":[35]}]}"#;

const GENRES: &str = r#"{"genres":[{"id":28,"name":"Action"},{"id":35,"name":"Comedy"}]}"#;

fn calls(actions: &[Action]) -> Vec<ApiCall> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Fetch(call) => Some(call.clone()),
            Action::CloseFocus => None,
        })
        .collect()
}

fn respond(state: &mut AppState, call: &ApiCall, status: u16, body: &str) {
    handle_event(
        state,
        &Event::WebResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: call.tag.to_context(),
        },
    )
    .unwrap();
}

fn loaded(ordering: ResponseOrdering) -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        api_key: Some("KEY".to_string()),
        response_ordering: ordering,
        ..Config::default()
    };
    let mut state = initialize_in(&config, dir.path());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    for call in calls(&actions) {
        let body = if call.tag.payload == Payload::Genres { GENRES } else { POPULAR };
        respond(&mut state, &call, 200, body);
    }
    (dir, state)
}

fn titles(state: &AppState) -> Vec<&str> {
    state.catalog.items().iter().map(|i| i.title()).collect()
}

#[test]
fn year_filter_then_genre_selection() {
    let (_dir, mut state) = loaded(ResponseOrdering::LatestRequest);
    assert_eq!(state.catalog.items().len(), 4);

    handle_event(&mut state, &Event::YearPrompt).unwrap();
    for c in "1999".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::Select).unwrap();
    assert_eq!(state.catalog.year_filter(), Some(1999));
    assert_eq!(titles(&state), vec!["The Matrix", "Fight Club"]);

    handle_event(&mut state, &Event::GenrePicker).unwrap();
    for c in "Comedy".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();
    let genre_call = &calls(&actions)[0];
    assert!(genre_call.request.url.contains("with_genres=35"));
    assert_eq!(state.catalog.year_filter(), Some(1999));

    respond(&mut state, genre_call, 200, COMEDIES);
    assert_eq!(state.catalog.year_filter(), None);
    assert_eq!(state.catalog.mode(), ViewMode::Genre);
    assert_eq!(state.catalog.genre_filter().map(|g| g.name.as_str()), Some("Comedy"));
    assert_eq!(titles(&state), vec!["Groundhog Day", "Office Space"]);
}

#[test]
fn failed_genre_request_leaves_year_filtered_list() {
    let (_dir, mut state) = loaded(ResponseOrdering::LatestRequest);
    handle_event(&mut state, &Event::YearPrompt).unwrap();
    for c in "1999".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::Select).unwrap();

    handle_event(&mut state, &Event::GenrePicker).unwrap();
    for c in "Comedy".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    let (_, actions) = handle_event(&mut state, &Event::Select).unwrap();
    respond(&mut state, &calls(&actions)[0], 503, r#"{"status_message":"Service unavailable"}"#);

    assert_eq!(state.catalog.mode(), ViewMode::Popular);
    assert_eq!(state.catalog.year_filter(), Some(1999));
    assert!(state.catalog.genre_filter().is_none());
    assert_eq!(titles(&state), vec!["The Matrix", "Fight Club"]);
    assert!(state.catalog.error().is_some());

    let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
    assert!(calls(&actions)[0].request.url.contains("with_genres=35"));
}

#[test]
fn alphabetical_views_reorder_without_requests() {
    let (_dir, mut state) = loaded(ResponseOrdering::LatestRequest);

    let (_, actions) = handle_event(&mut state, &Event::ShowView(ViewMode::AToZ)).unwrap();
    assert!(actions.is_empty());
    assert_eq!(
        titles(&state),
        vec!["Fight Club", "Groundhog Day", "Pulp Fiction", "The Matrix"]
    );

    handle_event(&mut state, &Event::ShowView(ViewMode::ZToA)).unwrap();
    assert_eq!(titles(&state)[0], "The Matrix");
}

#[test]
fn stale_response_is_dropped_under_latest_request() {
    let (_dir, mut state) = loaded(ResponseOrdering::LatestRequest);

    let (_, first) = handle_event(&mut state, &Event::NextPage).unwrap();
    let (_, second) = handle_event(&mut state, &Event::Reload).unwrap();
    let (first, second) = (calls(&first).remove(0), calls(&second).remove(0));
    assert!(second.tag.seq > first.tag.seq);

    let page_two = POPULAR.replace(r#""page":1"#, r#""page":2"#);
    respond(&mut state, &second, 200, &page_two);
    respond(&mut state, &first, 500, r#"{"status_message":"late failure"}"#);

    assert_eq!(state.catalog.page(), 2);
    assert!(state.catalog.error().is_none());
    assert!(!state.catalog.is_loading());
}

#[test]
fn last_arrival_applies_every_response() {
    let mut sequencer = RequestSequencer::new(ResponseOrdering::LastArrival);
    let first = sequencer.issue();
    let second = sequencer.issue();
    assert!(sequencer.accept(second));
    assert!(sequencer.accept(first));
}

#[test]
fn failed_request_keeps_results() {
    let (_dir, mut state) = loaded(ResponseOrdering::LatestRequest);

    let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
    respond(&mut state, &calls(&actions)[0], 401, r#"{"status_message":"Invalid API key"}"#);

    assert_eq!(state.catalog.items().len(), 4);
    assert!(state.catalog.error().is_some_and(|e| e.contains("Invalid API key")));
}

#[test]
fn page_window_is_centred_and_clamped() {
    assert_eq!(compute_page_window(50, 100, 5), vec![48, 49, 50, 51, 52]);
    assert_eq!(compute_page_window(1, 3, 5), vec![1, 2, 3]);
    assert_eq!(compute_page_window(100, 100, 5), vec![96, 97, 98, 99, 100]);
}

#[test]
fn rendered_frame_shows_results() {
    let (_dir, state) = loaded(ResponseOrdering::LatestRequest);
    let frame = marquee::ui::render(&state, 24, 100);
    assert!(frame.contains("The Matrix"));
    assert!(frame.contains("Groundhog Day"));
}
