//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the catalog, favorites and API
//! layers. Data flows one way:
//!
//! ```text
//! Key → map_key → Event → handle_event → state change → Vec<Action> → host
//!                           ↑                                    │
//!                           └────── Event::WebResponse ◀─────────┘
//! ```
//!
//! - [`actions`]: side effects returned by the handler
//! - [`handler`]: event processing and state transitions
//! - [`keys`]: key bindings per input mode and panel
//! - [`modes`]: input modes, the login form and panels
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::{Action, ApiCall};
pub use handler::{handle_event, Event};
pub use keys::{map_key, Key};
pub use modes::{InputMode, LoginField, LoginForm, Panel, SearchFocus};
pub use state::{AppState, DetailState};
