//! Error types and definitions for pkgdiff
//!
//! Every failure the analysis can hit maps to exactly one variant here, so the
//! caller always learns one specific, identifiable reason when a run aborts.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error level - the analysis failed on its input
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Failure of the source scanner on a single file's text.
///
/// The scanner works on text only, so it does not know the path; the graph
/// builder attaches it through [`PkgDiffError::from_scan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// No `package` clause before end of input
    #[error("no package clause found")]
    PackageClauseMissing,

    /// An import declaration was opened but never completed
    #[error("malformed import declaration at line {line}: {message}")]
    ImportBlockMalformed { line: usize, message: String },
}

/// Main error type for pkgdiff operations
#[derive(Debug, Error)]
pub enum PkgDiffError {
    /// Module manifest absent or unreadable
    #[error("module manifest not found at {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Manifest present but without a `module` line
    #[error("no module directive declared in {path}")]
    ModuleNameNotDeclared { path: PathBuf },

    /// Source file without a package clause
    #[error("no package clause found in {path}")]
    PackageClauseMissing { path: PathBuf },

    /// Import block or declaration never terminated
    #[error("malformed import declaration in {path} at line {line}: {message}")]
    ImportBlockMalformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Failure reading a single source file during the walk
    #[error("error reading source file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal errors
    #[error("directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Invalid path errors
    #[error("invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Permission denied errors
    #[error("permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Output file write errors
    #[error("error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Path is not inside a git work tree
    #[error("not a git repository: {path}")]
    GitRepoNotFound { path: PathBuf },

    /// A git subprocess failed
    #[error("git command `{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    /// Package lookup by name failed
    #[error("package '{name}' not found in the package graph")]
    PackageNotFound { name: String },

    /// Parallel execution error
    #[error("parallel execution error: {message}")]
    ParallelExecution { message: String },
}

impl PkgDiffError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PkgDiffError::ManifestNotFound { .. } => ErrorSeverity::Critical,
            PkgDiffError::ModuleNameNotDeclared { .. } => ErrorSeverity::Critical,
            PkgDiffError::Config { .. } => ErrorSeverity::Critical,
            PkgDiffError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            PkgDiffError::ConfigRead { .. } => ErrorSeverity::Critical,
            PkgDiffError::ConfigParse { .. } => ErrorSeverity::Critical,
            PkgDiffError::StdoutWrite { .. } => ErrorSeverity::Critical,
            PkgDiffError::GitRepoNotFound { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Error => 1,
            ErrorSeverity::Critical => 2,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PkgDiffError::ManifestNotFound { path, .. } => format!(
                "Could not find go.mod at '{}'. Point --path at the module root or pass --module explicitly.",
                path.display()
            ),
            PkgDiffError::ModuleNameNotDeclared { path } => format!(
                "'{}' has no `module` line. Add one or pass --module explicitly.",
                path.display()
            ),
            PkgDiffError::PackageClauseMissing { path } => format!(
                "'{}' has no package clause; every .go file must start with `package <name>`.",
                path.display()
            ),
            PkgDiffError::ImportBlockMalformed {
                path,
                line,
                message,
            } => format!(
                "Import declaration in '{}' is malformed (line {}): {}.",
                path.display(),
                line,
                message
            ),
            PkgDiffError::PermissionDenied { path } => format!(
                "Cannot access '{}' due to permission denied. Check file permissions.",
                path.display()
            ),
            PkgDiffError::InvalidPath { path } => format!(
                "Invalid path: '{}'. Please provide a valid directory path.",
                path.display()
            ),
            PkgDiffError::ConfigNotFound { path } => format!(
                "Configuration file not found at '{}'. Create one with `pkgdiff init` or use command line options.",
                path.display()
            ),
            PkgDiffError::GitRepoNotFound { path } => format!(
                "'{}' is not inside a git repository. Pass the changed files explicitly with --changed-file.",
                path.display()
            ),
            PkgDiffError::PackageNotFound { name } => {
                format!("Package '{}' is not part of the scanned module.", name)
            }
            _ => self.to_string(),
        }
    }

    /// Attach a path to a scanner failure
    pub fn from_scan(path: impl Into<PathBuf>, err: ScanError) -> Self {
        let path = path.into();
        match err {
            ScanError::PackageClauseMissing => PkgDiffError::PackageClauseMissing { path },
            ScanError::ImportBlockMalformed { line, message } => {
                PkgDiffError::ImportBlockMalformed { path, line, message }
            }
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        PkgDiffError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        PkgDiffError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        PkgDiffError::PermissionDenied { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PkgDiffError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file read error, mapping permission problems to `PermissionDenied`
    pub fn file_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            return PkgDiffError::permission_denied(path);
        }
        PkgDiffError::FileRead { path, source }
    }
}

impl From<std::io::Error> for PkgDiffError {
    fn from(err: std::io::Error) -> Self {
        PkgDiffError::io_error(err)
    }
}

impl From<glob::PatternError> for PkgDiffError {
    fn from(err: glob::PatternError) -> Self {
        PkgDiffError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for PkgDiffError {
    fn from(err: serde_json::Error) -> Self {
        PkgDiffError::JsonSerialize { source: err }
    }
}

impl From<csv::Error> for PkgDiffError {
    fn from(err: csv::Error) -> Self {
        PkgDiffError::Csv { source: err }
    }
}

impl From<walkdir::Error> for PkgDiffError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        match err.into_io_error() {
            Some(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
                PkgDiffError::permission_denied(path)
            }
            Some(io_err) => PkgDiffError::directory_traversal_error(path, io_err.to_string()),
            None => PkgDiffError::directory_traversal_error(path, "filesystem loop detected"),
        }
    }
}

/// Result type alias for pkgdiff operations
pub type Result<T> = std::result::Result<T, PkgDiffError>;
