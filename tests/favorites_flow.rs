use marquee::domain::{MovieSummary, UserIdentity};
use marquee::favorites::{FavoritesStore, Session, SESSION_KEY};
use marquee::storage::{JsonStorage, MemoryStorage, Storage};
use marquee::{handle_event, initialize_in, Action, Config, Event, InputMode, Panel};
use std::path::Path;

fn open_store(path: &Path) -> FavoritesStore<Session> {
    let storage = JsonStorage::new(path.to_path_buf()).unwrap();
    FavoritesStore::new(Session::load(Box::new(storage)))
}

#[test]
fn favorites_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marquee.json");

    let mut store = open_store(&path);
    store.login(UserIdentity::new(1_700_000_000_000, "ada", "ada@example.com")).unwrap();
    assert_eq!(store.toggle(&MovieSummary::new(603, "The Matrix")).unwrap(), Some(true));
    assert_eq!(store.toggle(&MovieSummary::new(13, "Forrest Gump")).unwrap(), Some(true));
    assert_eq!(store.toggle(&MovieSummary::new(603, "The Matrix")).unwrap(), Some(false));
    drop(store);

    let store = open_store(&path);
    assert_eq!(store.identity().map(|i| i.name.as_str()), Some("ada"));
    let ids: Vec<u64> = store.favorites().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![13]);
}

#[test]
fn logout_removes_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marquee.json");

    let mut store = open_store(&path);
    store.login(UserIdentity::new(1, "ada", "ada@example.com")).unwrap();
    store.logout().unwrap();
    drop(store);

    let store = open_store(&path);
    assert!(!store.is_logged_in());
    assert!(store.favorites().is_empty());
}

#[test]
fn corrupt_session_record_starts_logged_out() {
    let storage = MemoryStorage::with_entry(SESSION_KEY, "{not json");
    let session = Session::load(Box::new(storage));
    assert!(session.storage().get(SESSION_KEY).unwrap().is_none());

    let store = FavoritesStore::new(session);
    assert!(!store.is_logged_in());
}

#[test]
fn logged_out_toggle_opens_login_then_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        api_key: Some("KEY".to_string()),
        ..Config::default()
    };
    let mut state = initialize_in(&config, dir.path());

    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let Action::Fetch(call) = &actions[0] else {
        panic!("expected a fetch");
    };
    let body = r#"{"page":1,"total_pages":1,"total_results":1,
        "results":[{"id":603,"title":"The Matrix","release_date":"1999-03-30"}]}"#;
    handle_event(
        &mut state,
        &Event::WebResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
            context: call.tag.to_context(),
        },
    )
    .unwrap();

    handle_event(&mut state, &Event::ToggleFavorite).unwrap();
    assert!(matches!(state.input_mode, InputMode::Login(_)));

    for c in "ada@example.com".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::Select).unwrap();
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.favorites.identity().map(|i| i.name.as_str()), Some("ada"));

    handle_event(&mut state, &Event::ToggleFavorite).unwrap();
    assert!(state.favorites.is_favorite(603));

    handle_event(&mut state, &Event::ShowFavorites).unwrap();
    assert_eq!(state.panel, Panel::Favorites);
    assert_eq!(state.selected_favorite().map(|m| m.id), Some(603));

    let reloaded = initialize_in(&config, dir.path());
    assert!(reloaded.favorites.is_favorite(603));
}
