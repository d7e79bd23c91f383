//! Reverse dependency traversal

use crate::models::{Package, PackageGraph};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::trace;

/// Answers "who depends on this package" over a frozen graph.
///
/// The reversed edge index is built once on construction; every query is a
/// depth-first walk guarded by a visited set, so cycles terminate.
pub struct ReverseDependencyResolver<'g> {
    graph: &'g PackageGraph,
    reverse: HashMap<&'g str, Vec<&'g str>>,
}

impl<'g> ReverseDependencyResolver<'g> {
    pub fn new(graph: &'g PackageGraph) -> Self {
        let mut reverse: HashMap<&'g str, Vec<&'g str>> = HashMap::new();
        for pkg in graph.packages() {
            for dep in &pkg.dependencies {
                reverse.entry(dep.as_str()).or_default().push(pkg.name.as_str());
            }
        }
        Self { graph, reverse }
    }

    /// Packages that import `target` directly
    pub fn direct_dependents(&self, target: &str) -> &[&'g str] {
        self.reverse.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of every package that imports `target` directly or transitively.
    ///
    /// `target` itself is never part of the result, even inside a cycle.
    pub fn dependents(&self, target: &str) -> BTreeSet<&'g str> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![target];
        let mut dependents = BTreeSet::new();

        while let Some(name) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }
            for &dependent in self.direct_dependents(name) {
                if dependent != target {
                    dependents.insert(dependent);
                }
                if !visited.contains(dependent) {
                    stack.push(dependent);
                }
            }
        }

        trace!(package = target, count = dependents.len(), "resolved dependents");
        dependents
    }

    /// Same as [`dependents`](Self::dependents), returning the package nodes sorted by name
    pub fn dependent_packages(&self, target: &Package) -> Vec<&'g Package> {
        self.dependents(&target.name)
            .into_iter()
            .filter_map(|name| self.graph.get(name))
            .collect()
    }
}
