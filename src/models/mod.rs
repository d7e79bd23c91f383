//! Data models and structures for pkgdiff

pub mod config;
pub mod package;
pub mod package_graph;
pub mod report;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use package::{Package, SourceFile, ENTRY_POINT_PACKAGE};
pub use package_graph::PackageGraph;
pub use report::RedeployReport;
