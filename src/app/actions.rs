//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` and the
//! shim in `main.rs` executes them in order.

use crate::api::{ApiRequest, RequestTag};

/// A web request ready to be issued, with the tag the response will carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub request: ApiRequest,
    pub tag: RequestTag,
}

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Issues an HTTP GET through the host. The response comes back as
    /// [`Event::WebResponse`](crate::app::Event::WebResponse) with
    /// `tag.to_context()` as its context.
    Fetch(ApiCall),
}
