//! Package-related data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Facts extracted from a single source file.
///
/// Produced by the source scanner and consumed immediately by the graph
/// builder; it is never stored in the graph itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the scanned file (empty when scanning raw text)
    pub path: PathBuf,
    /// Package name as declared in the file, unqualified
    pub package_name: String,
    /// Import paths in file order, duplicates preserved
    pub imports: Vec<String>,
}

impl SourceFile {
    /// Attach the path the text was read from
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Whether the file declares the entry-point package
    pub fn is_entry_point(&self) -> bool {
        self.package_name == ENTRY_POINT_PACKAGE
    }
}

/// Package name that marks a program root
pub const ENTRY_POINT_PACKAGE: &str = "main";

/// A fully-qualified package node in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Fully-qualified name: module path plus (corrected) relative directory
    pub name: String,
    /// Source files that make up the package
    pub files: BTreeSet<PathBuf>,
    /// Fully-qualified names of imported packages
    pub dependencies: BTreeSet<String>,
    /// Whether the package is independently deployable
    #[serde(rename = "isMain")]
    pub is_entry_point: bool,
}

impl Package {
    /// Create an empty package node
    pub fn new(name: impl Into<String>, is_entry_point: bool) -> Self {
        Self {
            name: name.into(),
            files: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            is_entry_point,
        }
    }

    /// Builder-style helper for adding a file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    /// Builder-style helper for adding a dependency edge
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.add_dependency(name);
        self
    }

    /// Union a file and its imports into this node.
    pub fn merge_file<I, S>(&mut self, path: impl Into<PathBuf>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.insert(path.into());
        for dep in dependencies {
            self.add_dependency(dep);
        }
    }

    /// Add a dependency edge; a package never depends on itself
    pub fn add_dependency(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.dependencies.insert(name);
        }
    }

    /// Whether this package imports `name` directly
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains(name)
    }

    /// Whether `path` is one of this package's files.
    ///
    /// Both sides are compared by exact equality; callers normalize first.
    pub fn owns_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}
