//! Result of mapping a change set onto the package graph

use super::package::Package;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a redeploy analysis
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeployReport {
    /// Changed paths as supplied by the caller
    pub changed_files: Vec<PathBuf>,
    /// Names of packages that own at least one changed file, sorted
    pub changed_packages: Vec<String>,
    /// Changed paths that matched no package
    pub unmatched_files: Vec<PathBuf>,
    /// Entry points to redeploy, sorted by name
    #[serde(rename = "packages")]
    pub redeploy: Vec<Package>,
    /// When the analysis finished
    pub generated_at: DateTime<Utc>,
}

impl RedeployReport {
    /// Names of the entry points to redeploy
    pub fn redeploy_names(&self) -> Vec<&str> {
        self.redeploy.iter().map(|p| p.name.as_str()).collect()
    }

    /// Whether nothing needs redeploying
    pub fn is_empty(&self) -> bool {
        self.redeploy.is_empty()
    }
}
