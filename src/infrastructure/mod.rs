//! Infrastructure layer for filesystem interactions inside the Zellij sandbox,
//! where the host filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, STORAGE_FILE_NAME};
