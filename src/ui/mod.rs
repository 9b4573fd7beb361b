//! Terminal UI: view models, ANSI components and themes.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! - [`viewmodel`]: display-ready snapshot of the state
//! - [`renderer`]: entry point producing a frame
//! - [`components`]: per-section renderers
//! - [`helpers`]: cursor positioning, truncation, wrapping and highlighting
//! - [`theme`]: color themes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{Body, DisplayItem, EmptyState, FooterInfo, HeaderInfo, UIViewModel};
