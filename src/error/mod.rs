//! Error handling for pkgdiff
//!
//! This module provides the error taxonomy, result alias, and error context
//! utilities used across the scanner, graph builder and CLI.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt};
pub use types::{ErrorSeverity, PkgDiffError, Result, ScanError};
