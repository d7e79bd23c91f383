//! pkgdiff - package graph and redeploy analysis for Go modules
//!
//! This library scans a Go module, builds the graph of its packages and their
//! imports, and maps a set of changed files to the entry-point (`main`)
//! packages that must be rebuilt and redeployed.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;
pub mod vcs;

// Re-export commonly used types
pub use crate::core::{
    BuildOptions, ChangeSetMapper, PackageGraphBuilder, ReverseDependencyResolver,
};
pub use error::{ErrorSeverity, OptionExt, PkgDiffError, Result, ResultExt, ScanError};
pub use models::{Package, PackageGraph, RedeployReport, Settings, SourceFile};
pub use parsers::SourceScanner;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
