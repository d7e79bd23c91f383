//! Command implementations

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::args::{Args, Commands, DiffArgs};
use crate::config::{self, CliArgs, FileConfig, DEFAULT_CONFIG_FILE};
use crate::core::{ChangeSetMapper, PackageGraphBuilder, ReverseDependencyResolver};
use crate::error::{OptionExt, PkgDiffError, Result};
use crate::models::{Package, PackageGraph, Settings};
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};
use crate::vcs::SystemGit;

/// Revision compared against when only `--to` is given
const DEFAULT_FROM_REF: &str = "HEAD~1";
/// Revision compared when only `--from` is given
const DEFAULT_TO_REF: &str = "HEAD";

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Print the package graph
    Structure(Args),
    /// Print the entry points affected by a change
    Diff(Args, DiffArgs),
    /// Print the transitive dependents of one package
    Dependents(Args, String),
    /// Write a default configuration file
    Init { force: bool },
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        match args.command() {
            Commands::Structure => Command::Structure(args),
            Commands::Diff(diff) => Command::Diff(args, diff),
            Commands::Dependents { package } => Command::Dependents(args, package),
            Commands::Init { force } => Command::Init { force },
        }
    }

    fn args(&self) -> Option<&Args> {
        match self {
            Command::Structure(args)
            | Command::Diff(args, _)
            | Command::Dependents(args, _) => Some(args),
            Command::Init { .. } => None,
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        self.validate()?;

        let Some(args) = self.args() else {
            return match self {
                Command::Init { force } => init_config(Path::new(DEFAULT_CONFIG_FILE), *force),
                _ => Ok(()),
            };
        };

        let settings = config::load_config(CliArgs::from_args(args))?;
        debug!(?settings, "resolved settings");
        let graph = build_graph(&settings)?;
        let formatter =
            create_formatter(settings.output_format, settings.use_colors, settings.verbose);

        let output = match self {
            Command::Structure(_) => formatter.format_graph(&graph)?,
            Command::Diff(_, diff) => {
                let changed = changed_files(diff, &settings, graph.root())?;
                let report = ChangeSetMapper::new(&graph).analyze(&changed);
                formatter.format_redeploy(&report)?
            }
            Command::Dependents(_, query) => {
                let target =
                    resolve_package(&graph, query).ok_or_error(|| PkgDiffError::PackageNotFound {
                        name: query.clone(),
                    })?;
                let dependents = ReverseDependencyResolver::new(&graph).dependent_packages(target);
                formatter.format_packages(&graph, &dependents)?
            }
            Command::Init { .. } => return Ok(()),
        };

        create_writer(settings.output_file.as_ref()).write(&output)
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        let Some(args) = self.args() else {
            return Ok(());
        };

        if let Some(path) = &args.path {
            if !path.exists() {
                return Err(PkgDiffError::InvalidPath { path: path.clone() });
            }
        }

        if let Some(config_path) = &args.config {
            if !config_path.exists() {
                return Err(PkgDiffError::ConfigNotFound {
                    path: config_path.clone(),
                });
            }
        }

        if let Command::Diff(_, diff) = self {
            if let Some(list) = &diff.changed_from {
                if list != Path::new("-") && !list.is_file() {
                    return Err(PkgDiffError::InvalidPath { path: list.clone() });
                }
            }
            if diff.has_explicit_files() && (diff.from.is_some() || diff.to.is_some()) {
                return Err(PkgDiffError::config_error(
                    "--from/--to cannot be combined with --changed-file or --changed-from",
                ));
            }
        }

        Ok(())
    }

    /// Run the command and return the process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                err.exit_code()
            }
        }
    }
}

/// Scan the configured module into a graph, drawing a progress bar when enabled
pub fn build_graph(settings: &Settings) -> Result<PackageGraph> {
    let reporter = Arc::new(ProgressReporter::new(settings.show_progress && !settings.quiet));
    reporter.start(&format!("Scanning {}", settings.module_path.display()));

    let builder = PackageGraphBuilder::new(settings.build_options());
    let result = builder.build_with_progress(
        &settings.module_path,
        create_progress_callback(reporter.clone()),
    );
    reporter.finish();

    result
}

/// Changed files from the command line, a list file, or git
fn changed_files(diff: &DiffArgs, settings: &Settings, module_root: &Path) -> Result<Vec<PathBuf>> {
    if diff.has_explicit_files() {
        let mut files = diff.changed_files.clone();
        if let Some(list) = &diff.changed_from {
            files.extend(read_changed_list(list)?);
        }
        return Ok(files);
    }

    let git = SystemGit::open(module_root)?;
    let files = match (&settings.from_ref, &settings.to_ref) {
        (None, None) => git.changed_files_in_last_commit()?,
        (from, to) => git.changed_files_between(
            from.as_deref().unwrap_or(DEFAULT_FROM_REF),
            to.as_deref().unwrap_or(DEFAULT_TO_REF),
        )?,
    };
    debug!(count = files.len(), work_tree = %git.work_tree().display(), "changed files from git");
    Ok(files)
}

/// Read one path per line from `list`, or from stdin when it is `-`
pub fn read_changed_list(list: &Path) -> Result<Vec<PathBuf>> {
    if list == Path::new("-") {
        return parse_changed_list(io::stdin().lock());
    }
    let file = fs::File::open(list).map_err(|e| PkgDiffError::file_read_error(list, e))?;
    parse_changed_list(BufReader::new(file))
}

fn parse_changed_list<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            files.push(PathBuf::from(trimmed));
        }
    }
    Ok(files)
}

/// Look a package up by its full name, or by its path below the module name
pub fn resolve_package<'g>(graph: &'g PackageGraph, query: &str) -> Option<&'g Package> {
    if let Some(pkg) = graph.get(query) {
        return Some(pkg);
    }

    let relative = query.trim_start_matches("./").trim_matches('/');
    let qualified = if relative.is_empty() || relative == "." {
        graph.module_name().to_string()
    } else {
        format!("{}/{}", graph.module_name(), relative)
    };
    graph.get(&qualified)
}

/// Write the default configuration template to `path`
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        eprintln!(
            "Configuration file already exists at {}. Use --force to overwrite it.",
            path.display()
        );
        return Ok(());
    }

    FileConfig::with_path(path).create_default()?;
    eprintln!("Created default configuration file at {}", path.display());
    Ok(())
}
