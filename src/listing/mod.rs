//! Stateless pagination and ordering helpers.
//!
//! - [`pagination`]: the bounded page window shown in the page bar
//! - [`sort`]: field comparators shared by the catalog and favorites panels

pub mod pagination;
pub mod sort;

pub use pagination::{compute_page_window, DEFAULT_PAGE_WINDOW};
pub use sort::{compare_by_field, compare_titles, SortDirection, SortField, Sortable};
