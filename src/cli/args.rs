//! Command-line argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pkgdiff - Go module package graph and redeploy analyzer
#[derive(Parser, Debug, Clone)]
#[command(name = "pkgdiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map a Go module's package graph and find the entry points affected by a change")]
#[command(long_about = "pkgdiff scans a Go module, builds the graph of its packages and their imports, \
and answers which main packages must be redeployed when a set of files changes. \
Changed files come from the last git commit, an explicit revision range, or the command line.")]
#[command(after_help = "EXAMPLES:

Package graph:
    # Print every package of the module in the current directory
    pkgdiff

    # Same, for another module, as JSON
    pkgdiff --path ./services/api structure --output json

    # Render the graph for Graphviz
    pkgdiff structure --output dot --output-file graph.dot

Redeploy set:
    # Entry points affected by the last commit
    pkgdiff diff

    # Entry points affected between two revisions
    pkgdiff diff --from origin/main --to HEAD

    # Entry points affected by explicit files (relative paths are taken
    # from the module root, not the repository root or the current directory)
    pkgdiff diff --changed-file internal/db/conn.go --changed-file pkg/log/log.go

    # Read changed files from another tool; run it from the module root so
    # the listed paths are relative to it
    git diff --name-only --relative main | pkgdiff diff --changed-from -

Reverse dependencies:
    # Everything that imports a package, directly or transitively
    pkgdiff dependents internal/db

Configuration:
    # Create a .pkgdiff.toml in the current directory
    pkgdiff init
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Module root to scan
    #[arg(short, long, global = true, value_name = "PATH", help = "Module root containing go.mod (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Module name override
    #[arg(short, long, global = true, value_name = "NAME", help = "Module name to qualify packages with (read from go.mod when not given)")]
    pub module: Option<String>,

    /// Keep imports from outside the module
    #[arg(long, global = true, help = "Keep imports from outside the module as dependency edges (they have no node in the graph)")]
    pub external_deps: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, help = "Output format: 'text' (alias 'plain') for one package per line, 'json', 'csv', or 'dot' for Graphviz")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, global = true, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Exclude paths matching these glob patterns
    #[arg(short, long, global = true, value_name = "PATTERN", help = "Glob patterns for files or directories to skip in addition to vendor (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Disable parallel scanning
    #[arg(long, global = true, help = "Scan files on a single thread")]
    pub no_parallel: bool,

    /// Worker threads for scanning
    #[arg(long, global = true, value_name = "N", help = "Number of scanning threads (defaults to the number of logical CPUs)")]
    pub threads: Option<usize>,

    /// Follow symbolic links
    #[arg(long, global = true, help = "Follow symbolic links while walking the module tree")]
    pub follow_links: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, help = "Only print results and errors")]
    pub quiet: bool,

    /// Show files, dependencies, and progress details
    #[arg(short, long, global = true, help = "Show files and dependencies for each package and log progress to stderr")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help = "Disable colored output (useful when piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, global = true, help = "Disable the progress bar (useful for CI environments)")]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE", help = "Path to configuration file (defaults to .pkgdiff.toml in the current directory)")]
    pub config: Option<PathBuf>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the package graph of the module
    Structure,

    /// Print the entry points that must be redeployed for a change
    Diff(DiffArgs),

    /// Print every package that depends on PACKAGE
    Dependents {
        /// Fully-qualified package name, or a path relative to the module name
        package: String,
    },

    /// Create a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Sources of the changed file list
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffArgs {
    /// Changed file, relative to the module root or absolute
    #[arg(long = "changed-file", value_name = "PATH")]
    pub changed_files: Vec<PathBuf>,

    /// Read changed files, one per line, from FILE ('-' for stdin)
    #[arg(long, value_name = "FILE")]
    pub changed_from: Option<PathBuf>,

    /// Base revision for git (defaults to HEAD~1)
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,

    /// Target revision for git (defaults to HEAD)
    #[arg(long, value_name = "REV")]
    pub to: Option<String>,
}

impl DiffArgs {
    /// Whether changed files were given explicitly instead of coming from git
    pub fn has_explicit_files(&self) -> bool {
        !self.changed_files.is_empty() || self.changed_from.is_some()
    }
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One package per line
    #[value(alias = "plain")]
    Text,
    /// JSON document
    Json,
    /// CSV table
    Csv,
    /// Graphviz DOT
    Dot,
}

impl From<OutputFormat> for crate::models::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => crate::models::OutputFormat::Text,
            OutputFormat::Json => crate::models::OutputFormat::Json,
            OutputFormat::Csv => crate::models::OutputFormat::Csv,
            OutputFormat::Dot => crate::models::OutputFormat::Dot,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Subcommand to run; `structure` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Structure)
    }
}
