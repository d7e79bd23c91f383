//! Package graph construction
//!
//! The builder walks a module tree once, scans every source file (in
//! parallel when enabled), and folds the per-file results into a
//! [`PackageGraph`] through a single aggregator. Files are merged in path
//! order so the resulting graph is identical across runs.

use super::parallel::{self, ProgressUpdate};
use crate::error::{PkgDiffError, Result};
use crate::models::{Package, PackageGraph, SourceFile};
use crate::parsers::{ManifestParser, SourceScanner};
use crate::utils::to_slash;
use glob::Pattern;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Directory name whose subtree is never scanned
pub const VENDOR_DIR: &str = "vendor";

/// Extension of scanned source files, compared case-insensitively
pub const SOURCE_EXTENSION: &str = "go";

/// Options controlling a single graph build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Module name override; read from go.mod when `None`
    pub module_name: Option<String>,
    /// Keep imports from outside the module as dangling edges
    pub include_external_deps: bool,
    /// Extra glob patterns matched against root-relative paths and entry names
    pub exclude_patterns: Vec<String>,
    /// Scan files on a rayon pool
    pub parallel: bool,
    /// Pool size when `parallel` is set
    pub threads: Option<usize>,
    /// Follow symbolic links during the walk
    pub follow_links: bool,
}

impl BuildOptions {
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    pub fn with_external_deps(mut self, include: bool) -> Self {
        self.include_external_deps = include;
        self
    }
}

/// Builds a [`PackageGraph`] from a module tree
pub struct PackageGraphBuilder {
    options: BuildOptions,
}

impl PackageGraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the graph for the module rooted at `module_root`
    pub fn build(&self, module_root: &Path) -> Result<PackageGraph> {
        self.build_with_progress(module_root, |_| {})
    }

    /// Build the graph, reporting each scanned file to `progress`
    pub fn build_with_progress<P>(&self, module_root: &Path, progress: P) -> Result<PackageGraph>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let root = canonical_root(module_root)?;
        let module_name =
            ManifestParser::resolve_module_name(&root, self.options.module_name.as_deref())?;
        info!(module = %module_name, root = %root.display(), "building package graph");

        let patterns = compile_patterns(&self.options.exclude_patterns)?;
        let files = collect_source_files(&root, &patterns, self.options.follow_links)?;
        debug!(count = files.len(), "collected source files");

        let scanned = if self.options.parallel && files.len() > 1 {
            let pool = parallel::build_pool(self.options.threads)?;
            pool.install(|| {
                parallel::parallel_process_with_progress_and_errors(
                    &files,
                    |path| SourceScanner::scan_file(path),
                    &progress,
                )
            })?
        } else {
            let total = files.len();
            let mut scanned = Vec::with_capacity(total);
            for (i, path) in files.iter().enumerate() {
                scanned.push(SourceScanner::scan_file(path)?);
                let done = i + 1;
                progress(ProgressUpdate::new(
                    done,
                    total,
                    format!("Scanned {}/{} files", done, total),
                ));
            }
            scanned
        };

        let mut aggregator =
            GraphAggregator::new(&root, module_name, self.options.include_external_deps);
        for file in scanned {
            aggregator.add(file);
        }

        let graph = aggregator.finish();
        info!(
            packages = graph.len(),
            entry_points = graph.entry_points().count(),
            edges = graph.edge_count(),
            "package graph built"
        );
        Ok(graph)
    }
}

fn canonical_root(module_root: &Path) -> Result<PathBuf> {
    if !module_root.is_dir() {
        return Err(PkgDiffError::InvalidPath {
            path: module_root.to_path_buf(),
        });
    }
    module_root
        .canonicalize()
        .map_err(|e| PkgDiffError::file_read_error(module_root, e))
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns.iter().map(|p| Pattern::new(p).map_err(Into::into)).collect()
}

fn is_excluded(entry: &DirEntry, root: &Path, patterns: &[Pattern]) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    if entry.file_type().is_dir() && entry.file_name() == VENDOR_DIR {
        debug!(path = %entry.path().display(), "skipping vendor subtree");
        return true;
    }
    if patterns.is_empty() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    let relative = entry
        .path()
        .strip_prefix(root)
        .map(to_slash)
        .unwrap_or_else(|_| name.to_string());
    let excluded = patterns.iter().any(|p| p.matches(&relative) || p.matches(&name));
    if excluded {
        debug!(path = %relative, "excluded by pattern");
    }
    excluded
}

fn is_source_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// Every source file under `root`, sorted, with vendor and excluded subtrees pruned
fn collect_source_files(
    root: &Path,
    patterns: &[Pattern],
    follow_links: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, root, patterns));

    for entry in walker {
        let entry = entry?;
        if is_source_file(&entry) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Fully-qualified name for a file in `relative_dir` declaring `declared`.
///
/// The last directory segment is replaced by the declared name when they
/// differ, except for entry-point files and files at the module root.
pub fn qualified_package_name(module_name: &str, relative_dir: &Path, declared: &str) -> String {
    let relative = to_slash(relative_dir);
    if relative.is_empty() {
        return module_name.to_string();
    }

    let mut segments: Vec<&str> = relative.split('/').collect();
    let is_entry_point = declared == crate::models::ENTRY_POINT_PACKAGE;
    if let Some(last) = segments.last_mut() {
        if !is_entry_point && *last != declared {
            *last = declared;
        }
    }

    format!("{}/{}", module_name, segments.join("/"))
}

/// Whether an import becomes a dependency edge
pub fn retains_import(module_name: &str, import: &str, include_external_deps: bool) -> bool {
    include_external_deps || import.contains(module_name)
}

/// Single writer that owns the name-to-node map during a build
struct GraphAggregator<'a> {
    root: &'a Path,
    module_name: String,
    include_external_deps: bool,
    packages: BTreeMap<String, Package>,
}

impl<'a> GraphAggregator<'a> {
    fn new(root: &'a Path, module_name: String, include_external_deps: bool) -> Self {
        Self {
            root,
            module_name,
            include_external_deps,
            packages: BTreeMap::new(),
        }
    }

    fn add(&mut self, file: SourceFile) {
        let relative_dir = file
            .path
            .parent()
            .and_then(|dir| dir.strip_prefix(self.root).ok())
            .unwrap_or_else(|| Path::new(""));
        let name = qualified_package_name(&self.module_name, relative_dir, &file.package_name);
        let is_entry_point = file.is_entry_point();

        let module_name = &self.module_name;
        let include_external = self.include_external_deps;
        let dependencies: Vec<String> = file
            .imports
            .into_iter()
            .filter(|import| retains_import(module_name, import, include_external))
            .collect();

        let package = self.packages.entry(name.clone()).or_insert_with(|| {
            debug!(package = %name, "new package");
            Package::new(name.clone(), is_entry_point)
        });
        package.is_entry_point |= is_entry_point;
        package.merge_file(file.path, dependencies);
    }

    fn finish(self) -> PackageGraph {
        PackageGraph::from_packages(self.module_name, self.packages.into_values())
            .with_root(self.root)
    }
}
