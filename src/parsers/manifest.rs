//! go.mod parsing

use crate::error::{PkgDiffError, Result};
use std::path::{Path, PathBuf};

/// File name of the module manifest
pub const MANIFEST_FILE: &str = "go.mod";

/// Parser for the `module` directive of a go.mod file
pub struct ManifestParser;

impl ManifestParser {
    /// Extract the module name from manifest text.
    ///
    /// The first line whose first field is `module` wins. Trailing `//`
    /// comments and surrounding quotes are stripped.
    pub fn parse(content: &str) -> Option<String> {
        content.lines().find_map(|line| {
            let line = match line.find("//") {
                Some(idx) => &line[..idx],
                None => line,
            };
            let mut fields = line.split_whitespace();
            if fields.next() != Some("module") {
                return None;
            }
            let name = fields.next()?.trim_matches(|c| c == '"' || c == '`');
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
    }

    /// Path of the manifest for a module root
    pub fn manifest_path(module_root: &Path) -> PathBuf {
        module_root.join(MANIFEST_FILE)
    }

    /// Read the module name declared under `module_root`
    pub fn parse_file(module_root: &Path) -> Result<String> {
        let path = Self::manifest_path(module_root);
        let content = std::fs::read_to_string(&path).map_err(|e| PkgDiffError::ManifestNotFound {
            path: path.clone(),
            source: Some(e),
        })?;

        Self::parse(&content).ok_or(PkgDiffError::ModuleNameNotDeclared { path })
    }

    /// Use the override when given, otherwise read the manifest
    pub fn resolve_module_name(module_root: &Path, override_name: Option<&str>) -> Result<String> {
        match override_name {
            Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => Self::parse_file(module_root),
        }
    }
}
