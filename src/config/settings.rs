//! Validation of fully merged settings

use std::path::Path;

use crate::error::{PkgDiffError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.module_path.is_dir() {
            return Err(PkgDiffError::InvalidPath {
                path: settings.module_path.clone(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("invalid exclude pattern '{}'", pattern))?;
        }

        if settings.threads == Some(0) {
            return Err(PkgDiffError::config_error("threads must be at least 1"));
        }

        if settings.quiet && settings.verbose {
            return Err(PkgDiffError::config_error("quiet and verbose cannot both be set"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The output file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(PkgDiffError::InvalidPath {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
