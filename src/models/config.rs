//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for pkgdiff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root of the module to analyze (directory holding go.mod)
    pub module_path: PathBuf,

    /// Module name override; read from go.mod when absent
    pub module_name: Option<String>,

    /// Keep imports from outside the module as dependency edges
    pub include_external_deps: bool,

    /// Extra glob patterns to exclude from the walk (vendor is always skipped)
    pub exclude_patterns: Vec<String>,

    /// Output format (text, json, csv, dot)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to scan files in parallel
    pub parallel: bool,

    /// Worker thread count for parallel scanning
    pub threads: Option<usize>,

    /// Whether to follow symbolic links during the walk
    pub follow_links: bool,

    /// Base revision of the diff
    pub from_ref: Option<String>,

    /// Target revision of the diff
    pub to_ref: Option<String>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show files and dependencies in text output
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show a progress bar while scanning
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from("."),
            module_name: None,
            include_external_deps: false,
            exclude_patterns: Vec::new(),
            output_format: OutputFormat::Text,
            output_file: None,
            parallel: true,
            threads: None,
            follow_links: false,
            from_ref: None,
            to_ref: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Options handed to the graph builder
    pub fn build_options(&self) -> crate::core::BuildOptions {
        crate::core::BuildOptions {
            module_name: self.module_name.clone(),
            include_external_deps: self.include_external_deps,
            exclude_patterns: self.exclude_patterns.clone(),
            parallel: self.parallel,
            threads: self.threads,
            follow_links: self.follow_links,
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
    /// Graphviz DOT rendering of the graph
    Dot,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub module_path: Option<PathBuf>,
    pub module_name: Option<String>,
    pub include_external_deps: Option<bool>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub follow_links: Option<bool>,
    pub from_ref: Option<String>,
    pub to_ref: Option<String>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.module_path.is_some() {
            self.module_path = other.module_path;
        }
        if other.module_name.is_some() {
            self.module_name = other.module_name;
        }
        if other.include_external_deps.is_some() {
            self.include_external_deps = other.include_external_deps;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.from_ref.is_some() {
            self.from_ref = other.from_ref;
        }
        if other.to_ref.is_some() {
            self.to_ref = other.to_ref;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(module_path) = &self.module_path {
            settings.module_path = module_path.clone();
        }
        if let Some(module_name) = &self.module_name {
            settings.module_name = Some(module_name.clone());
        }
        if let Some(include) = self.include_external_deps {
            settings.include_external_deps = include;
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(from_ref) = &self.from_ref {
            settings.from_ref = Some(from_ref.clone());
        }
        if let Some(to_ref) = &self.to_ref {
            settings.to_ref = Some(to_ref.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
