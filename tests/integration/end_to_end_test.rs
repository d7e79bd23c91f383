//! Changed files in, redeploy set out

use super::helpers::{names, qualified, TestModule};
use pkgdiff::{ChangeSetMapper, Package, PackageGraph, ReverseDependencyResolver};
use std::path::PathBuf;

fn redeploy(graph: &PackageGraph, changed: &[&str]) -> Vec<String> {
    names(ChangeSetMapper::new(graph).redeploy_set(changed))
}

#[test]
fn test_library_change_reaches_every_dependent_entry_point() {
    let module = TestModule::shop();
    let graph = module.build();

    assert_eq!(
        redeploy(&graph, &["internal/db/query.go"]),
        vec![qualified("cmd/api"), qualified("cmd/worker")]
    );
    assert_eq!(
        redeploy(&graph, &["internal/orders/orders.go"]),
        vec![qualified("cmd/api"), qualified("cmd/worker")]
    );
    assert_eq!(redeploy(&graph, &["pkg/log/log.go"]), vec![qualified("cmd/cli")]);
}

#[test]
fn test_entry_point_change_redeploys_itself_only() {
    let graph = TestModule::shop().build();
    assert_eq!(redeploy(&graph, &["cmd/api/main.go"]), vec![qualified("cmd/api")]);
}

#[test]
fn test_absolute_and_relative_paths_agree() {
    let module = TestModule::shop();
    let graph = module.build();
    let absolute = module.root().join("pkg/log/log.go");

    let mapper = ChangeSetMapper::new(&graph);
    assert_eq!(
        names(mapper.redeploy_set(&[absolute])),
        names(mapper.redeploy_set(&["./pkg/log/../log/log.go"]))
    );
}

#[test]
fn test_unowned_files_change_nothing() {
    let graph = TestModule::shop().build();

    assert!(redeploy(&graph, &["go.mod", "README.md", "internal/db"]).is_empty());
    assert!(redeploy(&graph, &[]).is_empty());
    // Paths are matched exactly, not by suffix.
    assert!(redeploy(&graph, &["db/conn.go"]).is_empty());
}

#[test]
fn test_report_lists_inputs_and_unmatched_files() {
    let module = TestModule::shop();
    let graph = module.build();

    let report = ChangeSetMapper::new(&graph).analyze(&[
        "internal/db/conn.go",
        "docs/design.md",
        "pkg/log/log.go",
    ]);

    assert_eq!(report.changed_files.len(), 3);
    assert_eq!(report.unmatched_files, vec![PathBuf::from("docs/design.md")]);
    assert_eq!(
        report.changed_packages,
        vec![qualified("internal/db"), qualified("pkg/log")]
    );
    assert_eq!(
        report.redeploy_names(),
        vec![
            qualified("cmd/api").as_str(),
            qualified("cmd/cli").as_str(),
            qualified("cmd/worker").as_str()
        ]
    );
}

#[test]
fn test_import_cycle_terminates() {
    let module = TestModule::new();
    module.write("a/a.go", "package a\n\nimport \"example.com/shop/b\"\n");
    module.write("b/b.go", "package b\n\nimport \"example.com/shop/a\"\n");
    module.write("cmd/svc/main.go", "package main\n\nimport \"example.com/shop/b\"\n");

    let graph = module.build();
    assert_eq!(redeploy(&graph, &["a/a.go"]), vec![qualified("cmd/svc")]);

    let resolver = ReverseDependencyResolver::new(&graph);
    let dependents: Vec<_> = resolver.dependents(&qualified("a")).into_iter().collect();
    assert_eq!(dependents, vec![qualified("b"), qualified("cmd/svc")]);
}

#[test]
fn test_dependents_of_shared_library() {
    let graph = TestModule::shop().build();
    let resolver = ReverseDependencyResolver::new(&graph);
    let db: &Package = graph.get(&qualified("internal/db")).unwrap();

    assert_eq!(
        names(resolver.dependent_packages(db)),
        vec![qualified("cmd/api"), qualified("cmd/worker"), qualified("internal/orders")]
    );
    assert_eq!(resolver.direct_dependents(&db.name), &[qualified("internal/orders").as_str()]);
}

#[test]
fn test_two_package_clauses_in_one_directory() {
    let module = TestModule::new();
    // Each file belongs to the node it declared.
    module.write("lib/lib.go", "package lib\n");
    module.write("lib/lib_test.go", "package lib_test\n\nimport \"example.com/shop/lib\"\n");
    module.write("cmd/app/main.go", "package main\n\nimport \"example.com/shop/lib\"\n");

    let graph = module.build();
    assert!(graph.contains(&qualified("lib")));
    assert!(graph.contains(&qualified("lib_test")));
    assert_eq!(redeploy(&graph, &["lib/lib.go"]), vec![qualified("cmd/app")]);
    assert!(redeploy(&graph, &["lib/lib_test.go"]).is_empty());
}
