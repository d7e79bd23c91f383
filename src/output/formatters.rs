//! Output formatting functionality
//!
//! Rendering helpers shared by the formatter types in the parent module.

use crate::error::{PkgDiffError, Result};
use crate::models::{Package, PackageGraph, RedeployReport};
use ansi_term::Colour::{Blue, Green, Yellow};
use ansi_term::Style;
use serde::Serialize;

/// Width of the rule separating packages in verbose text output
pub const RULE_WIDTH: usize = 80;

fn paint_name(package: &Package, use_colors: bool) -> String {
    if !use_colors {
        return package.name.clone();
    }
    if package.is_entry_point {
        Green.bold().paint(package.name.as_str()).to_string()
    } else {
        Blue.paint(package.name.as_str()).to_string()
    }
}

/// Format a single package as text
pub fn format_package_text(package: &Package, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&paint_name(package, use_colors));
    if verbose && package.is_entry_point {
        output.push_str(" (main)");
    }
    output.push('\n');

    if verbose {
        output.push_str("  files:\n");
        for file in &package.files {
            output.push_str(&format!("    {}\n", file.display()));
        }
        if !package.dependencies.is_empty() {
            output.push_str("  dependencies:\n");
            for dep in &package.dependencies {
                if use_colors {
                    let dep = Style::new().dimmed().paint(dep.as_str());
                    output.push_str(&format!("    {}\n", dep));
                } else {
                    output.push_str(&format!("    {}\n", dep));
                }
            }
        }
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
    }

    output
}

/// Format a sequence of packages as text, one per line
pub fn format_packages_text<'a, I>(packages: I, use_colors: bool, verbose: bool) -> String
where
    I: IntoIterator<Item = &'a Package>,
{
    packages
        .into_iter()
        .map(|pkg| format_package_text(pkg, use_colors, verbose))
        .collect()
}

/// Format a redeploy report as text
pub fn format_redeploy_text(report: &RedeployReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    if verbose {
        let heading = |title: &str| {
            if use_colors {
                format!("{}\n", Blue.bold().paint(title))
            } else {
                format!("{}\n", title)
            }
        };

        output.push_str(&heading("Changed files:"));
        for file in &report.changed_files {
            output.push_str(&format!("  {}\n", file.display()));
        }
        output.push_str(&heading("Changed packages:"));
        for name in &report.changed_packages {
            output.push_str(&format!("  {}\n", name));
        }
        if !report.unmatched_files.is_empty() {
            let title = format!("Unmatched files: {}", report.unmatched_files.len());
            if use_colors {
                output.push_str(&format!("{}\n", Yellow.paint(title)));
            } else {
                output.push_str(&format!("{}\n", title));
            }
        }
        output.push_str(&heading("Redeploy:"));
    }

    output.push_str(&format_packages_text(&report.redeploy, use_colors, verbose));
    output
}

#[derive(Serialize)]
struct PackagesDocument<'a> {
    packages: Vec<&'a Package>,
}

/// Format packages as a `{"packages": [...]}` JSON document
pub fn format_packages_json<'a, I>(packages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Package>,
{
    let document = PackagesDocument {
        packages: packages.into_iter().collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Format a redeploy report as JSON
pub fn format_redeploy_json(report: &RedeployReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format packages as CSV: `name,is_main,file_count,dependencies`
pub fn format_packages_csv<'a, I>(packages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Package>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "is_main", "file_count", "dependencies"])?;

    for package in packages {
        let dependencies = package
            .dependencies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(";");
        let is_main = package.is_entry_point.to_string();
        let file_count = package.files.len().to_string();
        writer.write_record([
            package.name.as_str(),
            is_main.as_str(),
            file_count.as_str(),
            dependencies.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| PkgDiffError::Csv {
        source: e.into_error().into(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render a subset of packages as DOT, keeping the graph's module name
pub fn format_packages_dot<'a, I>(module_name: &str, packages: I) -> String
where
    I: IntoIterator<Item = &'a Package>,
{
    PackageGraph::from_packages(module_name, packages.into_iter().cloned()).to_dot()
}
