//! Package graph: one node per fully-qualified package name

use super::package::Package;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Read-only mapping from package name to package node.
///
/// Built once by the graph builder; there is no public way to mutate a graph
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageGraph {
    module_name: String,
    #[serde(skip)]
    root: PathBuf,
    packages: BTreeMap<String, Package>,
}

impl PackageGraph {
    /// Freeze a set of packages into a graph
    pub fn from_packages(
        module_name: impl Into<String>,
        packages: impl IntoIterator<Item = Package>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            root: PathBuf::new(),
            packages: packages.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    /// Record the directory the graph was built from
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Canonical module root; empty for graphs assembled by hand
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Module every package name is qualified under
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Look up a package by its fully-qualified name
    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Whether a package with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Iterate packages in name order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Package names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Entry-point packages in name order
    pub fn entry_points(&self) -> impl Iterator<Item = &Package> {
        self.packages.values().filter(|p| p.is_entry_point)
    }

    /// Every package whose file set contains exactly `path`
    pub fn owners_of(&self, path: &Path) -> Vec<&Package> {
        self.packages.values().filter(|p| p.owns_file(path)).collect()
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.packages.values().map(|p| p.dependencies.len()).sum()
    }

    /// Render the graph in Graphviz DOT format.
    ///
    /// Dependency names with no node (external imports) are drawn as ellipses.
    pub fn to_dot(&self) -> String {
        let mut graph: DiGraph<(String, bool, bool), ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for pkg in self.packages.values() {
            let idx = graph.add_node((pkg.name.clone(), pkg.is_entry_point, true));
            index.insert(pkg.name.as_str(), idx);
        }

        for pkg in self.packages.values() {
            let from = index[pkg.name.as_str()];
            for dep in &pkg.dependencies {
                let to = match index.get(dep.as_str()) {
                    Some(idx) => *idx,
                    None => {
                        let idx = graph.add_node((dep.clone(), false, false));
                        index.insert(dep.as_str(), idx);
                        idx
                    }
                };
                graph.add_edge(from, to, ());
            }
        }

        let dot = Dot::with_attr_getters(
            &graph,
            &[Config::EdgeNoLabel, Config::NodeNoLabel],
            &|_, _| String::new(),
            &|_, (_idx, (name, is_main, internal))| {
                if *is_main {
                    format!("label=\"{}\" shape=box style=filled fillcolor=lightblue", name)
                } else if *internal {
                    format!("label=\"{}\" shape=box", name)
                } else {
                    format!("label=\"{}\" shape=ellipse style=dashed", name)
                }
            },
        );

        format!("{:?}", dot)
    }
}
