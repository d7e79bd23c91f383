//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, Commands};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

/// Flags that feed settings, detached from the clap parser
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub module: Option<String>,
    pub external_deps: bool,
    pub exclude: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub follow_links: bool,
    pub from_ref: Option<String>,
    pub to_ref: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_args(args: &Args) -> Self {
        let (from_ref, to_ref) = match &args.command {
            Some(Commands::Diff(diff)) => (diff.from.clone(), diff.to.clone()),
            _ => (None, None),
        };

        Self {
            path: args.path.clone(),
            module: args.module.clone(),
            external_deps: args.external_deps,
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            output_format: args.output.map(Into::into),
            output_file: args.output_file.clone(),
            no_parallel: args.no_parallel,
            threads: args.threads,
            follow_links: args.follow_links,
            from_ref,
            to_ref,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from_args(args))
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        // Unset switches leave lower layers in charge.
        let on = |set: bool| set.then_some(true);
        let off = |set: bool| set.then_some(false);

        Ok(PartialSettings {
            module_path: args.path.clone(),
            module_name: args.module.clone(),
            include_external_deps: on(args.external_deps),
            exclude_patterns: args.exclude.clone(),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            parallel: off(args.no_parallel),
            threads: args.threads,
            follow_links: on(args.follow_links),
            from_ref: args.from_ref.clone(),
            to_ref: args.to_ref.clone(),
            quiet: on(args.quiet),
            verbose: on(args.verbose),
            use_colors: off(args.no_colors),
            show_progress: off(args.no_progress),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
