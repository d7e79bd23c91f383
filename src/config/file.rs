//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{PkgDiffError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".pkgdiff.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "PKGDIFF";

/// Configuration file source
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Source reading [`DEFAULT_CONFIG_FILE`] from the current directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the default configuration template at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(PkgDiffError::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys read from the environment, appended to `<PREFIX>_`
const ENV_KEYS: &[&str] = &[
    "PATH",
    "MODULE",
    "EXTERNAL_DEPS",
    "EXCLUDE",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "THREADS",
    "NO_PARALLEL",
    "NO_COLORS",
    "NO_PROGRESS",
];

/// Environment variable configuration source
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: String,
    name: String,
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", prefix),
            prefix,
        }
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key)
    }

    /// Build settings from a variable lookup; unparsable values are errors
    pub fn load_with<F>(&self, lookup: F) -> Result<PartialSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(&self.var_name(key)).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| -> Result<Option<bool>> {
            get(key)
                .map(|value| parse_bool(&value).ok_or_else(|| invalid(&self.var_name(key), &value)))
                .transpose()
        };

        let mut settings = PartialSettings {
            module_path: get("PATH").map(PathBuf::from),
            module_name: get("MODULE"),
            output_file: get("OUTPUT_FILE").map(PathBuf::from),
            include_external_deps: flag("EXTERNAL_DEPS")?,
            ..Default::default()
        };

        if let Some(exclude) = get("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        if let Some(format) = get("OUTPUT_FORMAT") {
            settings.output_format = Some(
                format
                    .parse()
                    .map_err(|_| invalid(&self.var_name("OUTPUT_FORMAT"), &format))?,
            );
        }

        if let Some(threads) = get("THREADS") {
            settings.threads = Some(
                threads
                    .trim()
                    .parse()
                    .map_err(|_| invalid(&self.var_name("THREADS"), &threads))?,
            );
        }

        settings.parallel = flag("NO_PARALLEL")?.map(|off| !off);
        settings.use_colors = flag("NO_COLORS")?.map(|off| !off);
        settings.show_progress = flag("NO_PROGRESS")?.map(|off| !off);

        Ok(settings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(var: &str, value: &str) -> PkgDiffError {
    PkgDiffError::config_error(format!("invalid value '{}' for {}", value, var))
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        self.load_with(|name| std::env::var(name).ok())
    }

    fn is_available(&self) -> bool {
        ENV_KEYS
            .iter()
            .any(|key| std::env::var_os(self.var_name(key)).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
