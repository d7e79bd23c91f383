//! Shared fixtures: throwaway Go modules on disk
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use pkgdiff::{BuildOptions, PackageGraph, PackageGraphBuilder};

pub const MODULE: &str = "example.com/shop";

/// A temporary module directory
pub struct TestModule {
    dir: TempDir,
}

impl TestModule {
    /// Empty module with a go.mod declaring [`MODULE`]
    pub fn new() -> Self {
        let module = Self {
            dir: TempDir::new().unwrap(),
        };
        module.write("go.mod", &format!("module {}\n\ngo 1.22\n", MODULE));
        module
    }

    /// Module laid out as:
    ///
    /// ```text
    /// internal/db        <- internal/orders <- cmd/api (main)
    ///                                       <- cmd/worker (main)
    /// pkg/log            <- cmd/cli (main)
    /// ```
    pub fn shop() -> Self {
        let module = Self::new();
        module.write(
            "internal/db/conn.go",
            "package db\n\nimport \"database/sql\"\n\nvar _ sql.DB\n",
        );
        module.write("internal/db/query.go", "package db\n");
        module.write(
            "internal/orders/orders.go",
            &format!(
                "package orders\n\nimport (\n\t\"fmt\"\n\t\"{m}/internal/db\"\n)\n",
                m = MODULE
            ),
        );
        module.write(
            "cmd/api/main.go",
            &format!(
                "package main\n\nimport \"{m}/internal/orders\"\n\nfunc main() {{}}\n",
                m = MODULE
            ),
        );
        module.write(
            "cmd/worker/main.go",
            &format!("package main\n\nimport (\n\to \"{m}/internal/orders\"\n)\n", m = MODULE),
        );
        module.write("pkg/log/log.go", "package log\n");
        module.write(
            "cmd/cli/main.go",
            &format!("package main\n\nimport _ \"{m}/pkg/log\"\n", m = MODULE),
        );
        module
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical root, as recorded in built graphs
    pub fn root(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    /// Write `content` at `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn build(&self) -> PackageGraph {
        self.build_with(BuildOptions::default())
    }

    pub fn build_with(&self, options: BuildOptions) -> PackageGraph {
        PackageGraphBuilder::new(options).build(self.path()).unwrap()
    }

    /// Run git in the module; false when git is unavailable
    pub fn git(&self, args: &[&str]) -> bool {
        Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args([
                "-c",
                "user.name=pkgdiff",
                "-c",
                "user.email=pkgdiff@example.com",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Initialize a repository and commit everything; false when git is unavailable
    pub fn commit_all(&self, message: &str) -> bool {
        if !self.path().join(".git").exists() && !self.git(&["init", "-q"]) {
            return false;
        }
        self.git(&["add", "-A"]) && self.git(&["commit", "-q", "-m", message])
    }
}

/// Fully-qualified name of a package below [`MODULE`]
pub fn qualified(relative: &str) -> String {
    if relative.is_empty() {
        MODULE.to_string()
    } else {
        format!("{}/{}", MODULE, relative)
    }
}

/// Names of packages, in the order given
pub fn names<'a, I>(packages: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a pkgdiff::Package>,
{
    packages.into_iter().map(|p| p.name.clone()).collect()
}
