//! Changed-file discovery through the system `git` binary

use crate::error::{PkgDiffError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Handle on a git work tree
pub struct SystemGit {
    repo_path: PathBuf,
    work_tree: PathBuf,
}

impl SystemGit {
    /// Open the repository containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let output = git_command(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| PkgDiffError::Git {
                command: "git rev-parse --show-toplevel".to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") || !path.exists() {
                return Err(PkgDiffError::GitRepoNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Err(PkgDiffError::Git {
                command: "git rev-parse --show-toplevel".to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let work_tree = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(work_tree = %work_tree.display(), "opened git repository");

        Ok(Self {
            repo_path: path.to_path_buf(),
            work_tree,
        })
    }

    /// Top-level directory of the work tree
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Files touched by HEAD relative to its first parent.
    ///
    /// A root commit is compared against the empty tree.
    pub fn changed_files_in_last_commit(&self) -> Result<Vec<PathBuf>> {
        if self.rev_exists("HEAD~1")? {
            self.changed_files_between("HEAD~1", "HEAD")
        } else {
            let output =
                self.run(&["diff-tree", "--no-commit-id", "--name-only", "-r", "--root", "HEAD"])?;
            Ok(self.absolute_paths(&output))
        }
    }

    /// Files that differ between two revisions
    pub fn changed_files_between(&self, from: &str, to: &str) -> Result<Vec<PathBuf>> {
        let output = self.run(&["diff", "--name-only", from, to])?;
        let files = self.absolute_paths(&output);
        debug!(from, to, count = files.len(), "collected changed files");
        Ok(files)
    }

    fn rev_exists(&self, rev: &str) -> Result<bool> {
        let output = self
            .git_cmd()
            .args(["rev-parse", "--verify", "--quiet"])
            .arg(format!("{}^{{commit}}", rev))
            .output()
            .map_err(|e| PkgDiffError::Git {
                command: format!("git rev-parse --verify {}", rev),
                stderr: e.to_string(),
            })?;
        Ok(output.status.success())
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let command = format!("git {}", args.join(" "));
        let output = self.git_cmd().args(args).output().map_err(|e| PkgDiffError::Git {
            command: command.clone(),
            stderr: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(PkgDiffError::Git {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    fn absolute_paths(&self, output: &Output) -> Vec<PathBuf> {
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.work_tree.join(line))
            .collect()
    }

    fn git_cmd(&self) -> Command {
        git_command(&self.repo_path)
    }
}

/// `git` run in `dir` with an isolated environment, untranslated messages and
/// stable path output
fn git_command(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(dir);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
        cmd.env("HOME", home);
    }
    cmd.env("LC_ALL", "C");

    cmd.arg("-c").arg("core.quotePath=false");
    cmd
}
