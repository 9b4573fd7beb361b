//! Zellij plugin wrapper and entry point.
//!
//! The thin integration layer between the Marquee library and the Zellij plugin
//! system. It owns nothing but the library's `AppState`: host events are
//! translated into library events, and the returned actions are turned into
//! host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request web and filesystem access, subscribe to events
//! 3. **Granted**: `Event::PermissionsResult` issues the first catalog requests
//! 4. **Update**: Keys and web responses are delegated to `handle_event`
//! 5. **Render**: Print the frame produced by the library
//!
//! # Event Mapping
//!
//! - `Key` → [`marquee::Key`] → `map_key` (bindings depend on mode and panel)
//! - `WebRequestResult` → `Event::WebResponse { status, body, context }`
//! - `PermissionRequestResult` → `Event::PermissionsResult { granted }`
//!
//! # Keybindings
//!
//! Catalog:
//! - `j`/`k`, arrows, `Ctrl+n`/`Ctrl+p`: Move selection
//! - `Enter`: Open the movie detail (or browse a studio / person's movies)
//! - `/`: Search, `Tab` cycles the search kind
//! - `p` popular, `a` A–Z, `z` Z–A, `P` people, `s` studios
//! - `y` year filter, `g` genre picker, `x` clear filters
//! - `]`/`[` or `Right`/`Left`: Next / previous page
//!
//! Everywhere:
//! - `f`: Toggle favorite, `F`: Favorites panel (`o`/`O` sort)
//! - `l`: Log in, `L`: Log out (`Ctrl+s` switches to sign-up in the form)
//! - `r`: Reload, `Esc`: Back, `q`: Close

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(plugin::State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("marquee is a Zellij plugin; build it for wasm32-wasip1 and load it from Zellij");
}

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use marquee::api::{ApiRequest, RequestTag};
    use marquee::app::ApiCall;
    use marquee::infrastructure::get_data_dir;
    use marquee::{handle_event, map_key, Action, AppState, Config, Key};

    /// Plugin state wrapper around the library's `AppState`.
    pub struct State {
        app: AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: marquee::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, builds the application state, requests
        /// permissions and subscribes to events.
        ///
        /// # Permissions
        ///
        /// - `WebAccess`: TMDB requests
        /// - `FullHdAccess`: the session store and trace file under `/host`
        /// - `ReadApplicationState` / `ChangeApplicationState`: hiding the pane
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            marquee::observability::init_tracing(&config, &get_data_dir());

            let _guard = tracing::debug_span!("plugin_load").entered();
            self.app = marquee::initialize(&config);

            request_permission(&[
                PermissionType::ReadApplicationState,
                PermissionType::ChangeApplicationState,
                PermissionType::WebAccess,
                PermissionType::FullHdAccess,
            ]);
            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: Event) -> bool {
            let event_name = Self::event_name(&event);
            let _guard =
                tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

            let our_event = match event {
                Event::Key(ref key) => {
                    let Some(key) = Self::convert_key(key) else {
                        return false;
                    };
                    match map_key(&self.app.input_mode, self.app.panel, key) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                Event::WebRequestResult(status, _headers, body, context) => {
                    marquee::Event::WebResponse {
                        status,
                        body,
                        context,
                    }
                }
                Event::PermissionRequestResult(status) => marquee::Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                },
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled");
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            print!("{}", marquee::ui::render(&self.app, rows, cols));
        }
    }

    impl State {
        fn event_name(event: &Event) -> String {
            match event {
                Event::Key(key) => format!("Key({:?})", key.bare_key),
                Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
                Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        /// Converts a host key into the library's key type.
        ///
        /// `Ctrl` chords keep their letter; other modifier chords are ignored.
        fn convert_key(key: &KeyWithModifier) -> Option<Key> {
            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char(c) => Some(Key::Ctrl(c)),
                    _ => None,
                };
            }
            if !key.key_modifiers.is_empty() && !key.has_only_modifiers(&[KeyModifier::Shift]) {
                return None;
            }

            Some(match key.bare_key {
                BareKey::Char(c) => Key::Char(c),
                BareKey::Enter => Key::Enter,
                BareKey::Esc => Key::Esc,
                BareKey::Backspace => Key::Backspace,
                BareKey::Tab => Key::Tab,
                BareKey::Up => Key::Up,
                BareKey::Down => Key::Down,
                BareKey::Left => Key::Left,
                BareKey::Right => Key::Right,
                _ => return None,
            })
        }

        #[tracing::instrument(level = "debug", skip_all)]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("hiding plugin pane");
                    hide_self();
                }
                Action::Fetch(ApiCall { request, tag }) => Self::issue(request, tag),
            }
        }

        fn issue(request: &ApiRequest, tag: &RequestTag) {
            tracing::debug!(payload = ?tag.payload, seq = tag.seq, "issuing web request");
            web_request(
                request.url.clone(),
                HttpVerb::Get,
                request.headers.clone(),
                vec![],
                tag.to_context(),
            );
        }
    }
}
