//! Shared helpers

pub mod paths;

pub use paths::{normalize_path, resolve_against, to_slash};
