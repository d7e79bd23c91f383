//! Changed files sourced from a real git repository.
//!
//! Every test returns early when no usable `git` binary is available.

use super::helpers::{names, qualified, TestModule};
use pkgdiff::vcs::SystemGit;
use pkgdiff::ChangeSetMapper;
use std::fs;

#[test]
fn test_root_commit_lists_every_file() {
    let module = TestModule::shop();
    if !module.commit_all("initial") {
        return;
    }

    let git = SystemGit::open(module.path()).unwrap();
    assert_eq!(git.work_tree(), module.root());

    let changed = git.changed_files_in_last_commit().unwrap();
    assert!(changed.contains(&module.root().join("go.mod")));
    assert!(changed.contains(&module.root().join("cmd/api/main.go")));
    assert!(changed.iter().all(|p| p.is_absolute()));
}

#[test]
fn test_last_commit_drives_redeploy() {
    let module = TestModule::shop();
    if !module.commit_all("initial") {
        return;
    }
    module.write("internal/db/query.go", "package db\n\nfunc Query() {}\n");
    assert!(module.commit_all("touch db"));

    let git = SystemGit::open(module.path()).unwrap();
    let changed = git.changed_files_in_last_commit().unwrap();
    assert_eq!(changed, vec![module.root().join("internal/db/query.go")]);

    let graph = module.build();
    assert_eq!(
        names(ChangeSetMapper::new(&graph).redeploy_set(&changed)),
        vec![qualified("cmd/api"), qualified("cmd/worker")]
    );
}

#[test]
fn test_revision_range() {
    let module = TestModule::shop();
    if !module.commit_all("initial") {
        return;
    }
    module.write("pkg/log/log.go", "package log\n\nfunc Info() {}\n");
    assert!(module.commit_all("log"));
    module.write("cmd/api/main.go", "package main\n\nfunc main() {}\n");
    assert!(module.commit_all("api"));

    let git = SystemGit::open(module.path()).unwrap();
    let mut changed = git.changed_files_between("HEAD~2", "HEAD").unwrap();
    changed.sort();
    assert_eq!(
        changed,
        vec![
            module.root().join("cmd/api/main.go"),
            module.root().join("pkg/log/log.go")
        ]
    );

    // cmd/api no longer imports orders, so it only redeploys for itself.
    let graph = module.build();
    assert_eq!(
        names(ChangeSetMapper::new(&graph).redeploy_set(&changed)),
        vec![qualified("cmd/api"), qualified("cmd/cli")]
    );
}

#[test]
fn test_module_nested_below_repository_root() {
    let module = TestModule::new();
    fs::remove_file(module.path().join("go.mod")).unwrap();
    module.write("services/shop/go.mod", "module example.com/shop\n");
    module.write("services/shop/lib/lib.go", "package lib\n");
    module.write(
        "services/shop/cmd/app/main.go",
        "package main\n\nimport \"example.com/shop/lib\"\n",
    );
    module.write("README.md", "monorepo\n");
    if !module.commit_all("initial") {
        return;
    }
    module.write("services/shop/lib/lib.go", "package lib\n\nconst V = 2\n");
    module.write("README.md", "monorepo v2\n");
    assert!(module.commit_all("bump lib"));

    let service = module.path().join("services/shop");
    let git = SystemGit::open(&service).unwrap();
    let changed = git.changed_files_in_last_commit().unwrap();
    assert_eq!(changed.len(), 2);

    let graph = pkgdiff::PackageGraphBuilder::new(Default::default())
        .build(&service)
        .unwrap();
    let report = ChangeSetMapper::new(&graph).analyze(&changed);
    assert_eq!(report.redeploy_names(), vec![qualified("cmd/app").as_str()]);
    assert_eq!(report.unmatched_files, vec![module.root().join("README.md")]);
}

#[test]
fn test_unknown_revision_is_a_git_error() {
    let module = TestModule::shop();
    if !module.commit_all("initial") {
        return;
    }

    let git = SystemGit::open(module.path()).unwrap();
    let err = git.changed_files_between("no-such-branch", "HEAD").unwrap_err();
    assert!(matches!(err, pkgdiff::PkgDiffError::Git { .. }));
}
