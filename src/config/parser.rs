//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{PkgDiffError, Result};
use crate::models::config::PartialSettings;

/// Template written by `pkgdiff init`
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PkgDiffError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| PkgDiffError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| PkgDiffError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Reject values that can never be valid, naming the file they came from
pub fn validate_partial_settings<P: AsRef<Path>>(
    settings: &PartialSettings,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let fail = |message: String| {
        Err(PkgDiffError::config_error(format!(
            "{} in {}",
            message,
            path.display()
        )))
    };

    if let Some(module_path) = &settings.module_path {
        if module_path.as_os_str().is_empty() {
            return fail("empty module_path".to_string());
        }
    }

    if let Some(name) = &settings.module_name {
        if name.trim().is_empty() {
            return fail("empty module_name".to_string());
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return fail("empty exclude pattern".to_string());
            }
            if let Err(e) = glob::Pattern::new(pattern) {
                return fail(format!("invalid exclude pattern '{}': {}", pattern, e));
            }
        }
    }

    if settings.threads == Some(0) {
        return fail("threads must be at least 1".to_string());
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return fail("empty output_file".to_string());
        }
    }

    Ok(())
}

/// Candidate configuration files, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("pkgdiff").join("config.toml"));
    }
    locations
}

/// Load the first configuration file found in the default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!(path = %location.display(), "using configuration file");
            return parse_config_file(location).map(Some);
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| PkgDiffError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
