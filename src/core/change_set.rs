//! Mapping changed files to the entry points that must be redeployed
//!
//! Given a set of changed files:
//! 1. map each file to the packages owning it (exact normalized path match)
//! 2. expand those packages with their transitive dependents
//! 3. keep only entry points

use super::resolver::ReverseDependencyResolver;
use crate::models::{Package, PackageGraph, RedeployReport};
use crate::utils::resolve_against;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ownership lookup and redeploy computation over a frozen graph
pub struct ChangeSetMapper<'g> {
    graph: &'g PackageGraph,
    resolver: ReverseDependencyResolver<'g>,
    owners: HashMap<&'g Path, Vec<&'g str>>,
}

impl<'g> ChangeSetMapper<'g> {
    pub fn new(graph: &'g PackageGraph) -> Self {
        let mut owners: HashMap<&'g Path, Vec<&'g str>> = HashMap::new();
        for pkg in graph.packages() {
            for file in &pkg.files {
                owners.entry(file.as_path()).or_default().push(pkg.name.as_str());
            }
        }

        Self {
            graph,
            resolver: ReverseDependencyResolver::new(graph),
            owners,
        }
    }

    /// Normalized form of a changed path; relative paths resolve against the graph root
    pub fn normalize(&self, changed: &Path) -> PathBuf {
        resolve_against(self.graph.root(), changed)
    }

    /// Names of packages that own `changed`
    pub fn owners_of(&self, changed: &Path) -> &[&'g str] {
        self.owners
            .get(self.normalize(changed).as_path())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Packages owning at least one changed file
    pub fn direct_packages<P: AsRef<Path>>(&self, changed_files: &[P]) -> BTreeSet<&'g str> {
        let mut direct = BTreeSet::new();
        for changed in changed_files {
            let owners = self.owners_of(changed.as_ref());
            if owners.is_empty() {
                debug!(path = %changed.as_ref().display(), "changed file matches no package");
            }
            direct.extend(owners.iter().copied());
        }
        direct
    }

    /// Direct packages plus every transitive dependent
    pub fn affected_packages<P: AsRef<Path>>(&self, changed_files: &[P]) -> BTreeSet<&'g str> {
        let direct = self.direct_packages(changed_files);
        let mut affected = direct.clone();
        for name in &direct {
            affected.extend(self.resolver.dependents(name));
        }
        affected
    }

    /// Entry points to redeploy, sorted by name
    pub fn redeploy_set<P: AsRef<Path>>(&self, changed_files: &[P]) -> Vec<&'g Package> {
        self.affected_packages(changed_files)
            .into_iter()
            .filter_map(|name| self.graph.get(name))
            .filter(|pkg| pkg.is_entry_point)
            .collect()
    }

    /// Full analysis record for output
    pub fn analyze<P: AsRef<Path>>(&self, changed_files: &[P]) -> RedeployReport {
        let changed: Vec<PathBuf> =
            changed_files.iter().map(|p| p.as_ref().to_path_buf()).collect();
        let unmatched = changed
            .iter()
            .filter(|p| self.owners_of(p).is_empty())
            .cloned()
            .collect();
        let changed_packages = self
            .direct_packages(&changed)
            .into_iter()
            .map(str::to_string)
            .collect();
        let redeploy: Vec<Package> = self.redeploy_set(&changed).into_iter().cloned().collect();

        info!(
            changed_files = changed.len(),
            redeploy = redeploy.len(),
            "computed redeploy set"
        );

        RedeployReport {
            changed_files: changed,
            changed_packages,
            unmatched_files: unmatched,
            redeploy,
            generated_at: Utc::now(),
        }
    }
}
