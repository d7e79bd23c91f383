//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::RULE_WIDTH;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::{OutputFormat, Package, PackageGraph, RedeployReport};

/// Trait for different output formatters
pub trait Formatter {
    /// Format a whole package graph
    fn format_graph(&self, graph: &PackageGraph) -> Result<String>;

    /// Format the outcome of a change-set analysis
    fn format_redeploy(&self, report: &RedeployReport) -> Result<String>;

    /// Format an arbitrary selection of packages from `graph`
    fn format_packages(&self, graph: &PackageGraph, packages: &[&Package]) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool) -> Self {
        Self { use_colors, verbose }
    }
}

impl Formatter for TextFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        Ok(formatters::format_packages_text(
            graph.packages(),
            self.use_colors,
            self.verbose,
        ))
    }

    fn format_redeploy(&self, report: &RedeployReport) -> Result<String> {
        Ok(formatters::format_redeploy_text(report, self.use_colors, self.verbose))
    }

    fn format_packages(&self, _graph: &PackageGraph, packages: &[&Package]) -> Result<String> {
        Ok(formatters::format_packages_text(
            packages.iter().copied(),
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        formatters::format_packages_json(graph.packages())
    }

    fn format_redeploy(&self, report: &RedeployReport) -> Result<String> {
        formatters::format_redeploy_json(report)
    }

    fn format_packages(&self, _graph: &PackageGraph, packages: &[&Package]) -> Result<String> {
        formatters::format_packages_json(packages.iter().copied())
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        formatters::format_packages_csv(graph.packages())
    }

    fn format_redeploy(&self, report: &RedeployReport) -> Result<String> {
        formatters::format_packages_csv(&report.redeploy)
    }

    fn format_packages(&self, _graph: &PackageGraph, packages: &[&Package]) -> Result<String> {
        formatters::format_packages_csv(packages.iter().copied())
    }
}

/// Graphviz DOT formatter
pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        Ok(graph.to_dot())
    }

    fn format_redeploy(&self, report: &RedeployReport) -> Result<String> {
        Ok(formatters::format_packages_dot("", &report.redeploy))
    }

    fn format_packages(&self, graph: &PackageGraph, packages: &[&Package]) -> Result<String> {
        Ok(formatters::format_packages_dot(
            graph.module_name(),
            packages.iter().copied(),
        ))
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Dot => Box::new(DotFormatter),
    }
}
