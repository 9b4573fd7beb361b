//! TMDB v3 API support.
//!
//! The plugin runs in a sandbox without sockets, so this module only builds
//! requests and decodes responses. The shim in `main.rs` performs the actual
//! HTTP GET through Zellij's `web_request`.
//!
//! - `client`: URL builders and image / IMDb link helpers
//! - `response`: status checking and body decoding
//! - `tag`: the context map that links a response to its request

mod client;
mod response;
mod tag;

pub use client::{
    build_external_reference_url, build_image_url, percent_encode, ApiRequest, TmdbClient,
    DEFAULT_BASE_URL,
};
pub use response::{
    decode, decode_company_page, decode_genres, decode_movie_detail, decode_movie_page,
    decode_multi_page, decode_person_page, Paged,
};
pub use tag::{Channel, Payload, RequestTag, TraceContext};
