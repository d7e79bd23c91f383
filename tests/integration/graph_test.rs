//! Graph construction over real module trees

use super::helpers::{names, qualified, TestModule, MODULE};
use pkgdiff::{BuildOptions, PackageGraphBuilder, PkgDiffError};
use std::collections::BTreeSet;

#[test]
fn test_shop_graph_nodes_and_edges() {
    let module = TestModule::shop();
    let graph = module.build();

    assert_eq!(graph.module_name(), MODULE);
    assert_eq!(graph.root(), module.root());
    assert_eq!(
        graph.names().collect::<Vec<_>>(),
        vec![
            qualified("cmd/api"),
            qualified("cmd/cli"),
            qualified("cmd/worker"),
            qualified("internal/db"),
            qualified("internal/orders"),
            qualified("pkg/log"),
        ]
    );
    assert_eq!(
        names(graph.entry_points()),
        vec![qualified("cmd/api"), qualified("cmd/cli"), qualified("cmd/worker")]
    );

    let db = graph.get(&qualified("internal/db")).unwrap();
    assert_eq!(db.files.len(), 2);
    assert!(db.files.iter().all(|f| f.is_absolute() && f.starts_with(module.root())));
    assert!(db.dependencies.is_empty());

    let orders = graph.get(&qualified("internal/orders")).unwrap();
    assert_eq!(orders.dependencies, BTreeSet::from([qualified("internal/db")]));

    let worker = graph.get(&qualified("cmd/worker")).unwrap();
    assert_eq!(worker.dependencies, BTreeSet::from([qualified("internal/orders")]));
}

#[test]
fn test_external_imports_are_opt_in() {
    let module = TestModule::shop();

    let graph = module.build_with(BuildOptions::default().with_external_deps(true));
    let orders = graph.get(&qualified("internal/orders")).unwrap();
    assert!(orders.dependencies.contains("fmt"));
    assert!(orders.dependencies.contains(&qualified("internal/db")));
    assert!(graph.get("fmt").is_none());

    let db = graph.get(&qualified("internal/db")).unwrap();
    assert_eq!(db.dependencies, BTreeSet::from(["database/sql".to_string()]));
}

#[test]
fn test_root_package_and_name_correction() {
    let module = TestModule::new();
    module.write("main.go", "package main\n\nimport \"example.com/shop/internal/legacy-db\"\n");
    module.write("doc.go", "package shop\n");
    module.write("internal/legacy-db/db.go", "package legacydb\n");
    module.write("cmd/tool/tool.go", "package main\n");

    let graph = module.build();

    let root = graph.get(MODULE).unwrap();
    assert!(root.is_entry_point);
    assert_eq!(root.files.len(), 2);

    assert!(graph.contains(&qualified("internal/legacydb")));
    assert!(!graph.contains(&qualified("internal/legacy-db")));
    // The import names the directory, so the edge points at no node.
    assert!(root.dependencies.contains(&qualified("internal/legacy-db")));

    assert!(graph.get(&qualified("cmd/tool")).unwrap().is_entry_point);
}

#[test]
fn test_vendor_and_excluded_trees_are_skipped() {
    let module = TestModule::shop();
    module.write("vendor/github.com/x/y/y.go", "package y\n");
    module.write("internal/db/testdata/fixture.go", "package fixture\n");
    module.write("gen/gen.go", "package gen\n");
    module.write("notes/README.md", "not go\n");
    module.write("pkg/log/LEGACY.GO", "package log\n");

    let options = BuildOptions {
        exclude_patterns: vec!["testdata".to_string(), "gen/*".to_string()],
        ..BuildOptions::default()
    };
    let graph = module.build_with(options);

    assert!(graph
        .names()
        .all(|n| !n.contains("vendor") && !n.contains("fixture") && !n.ends_with("/gen")));
    assert!(graph.contains(&qualified("pkg/log")));
    assert_eq!(graph.get(&qualified("pkg/log")).unwrap().files.len(), 2);
}

#[test]
fn test_sequential_and_parallel_builds_agree() {
    let module = TestModule::shop();

    let sequential = module.build_with(BuildOptions {
        parallel: false,
        ..BuildOptions::default()
    });
    let parallel = module.build_with(BuildOptions {
        parallel: true,
        threads: Some(2),
        ..BuildOptions::default()
    });

    assert_eq!(
        sequential.packages().collect::<Vec<_>>(),
        parallel.packages().collect::<Vec<_>>()
    );
}

#[test]
fn test_module_name_override() {
    let module = TestModule::shop();
    let graph = module.build_with(BuildOptions::default().with_module_name("corp.internal/shop"));

    assert_eq!(graph.module_name(), "corp.internal/shop");
    assert!(graph.contains("corp.internal/shop/cmd/api"));
    // Imports still name example.com/shop, which the override no longer matches.
    assert!(graph.get("corp.internal/shop/cmd/api").unwrap().dependencies.is_empty());
}

#[test]
fn test_missing_manifest() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("main.go"), "package main\n").unwrap();

    let err = PackageGraphBuilder::new(BuildOptions::default())
        .build(dir.path())
        .unwrap_err();
    assert!(matches!(err, PkgDiffError::ManifestNotFound { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_malformed_file_aborts_the_build() {
    let module = TestModule::shop();
    let broken = module.write("internal/bad/bad.go", "package bad\n\nimport (\n\t\"fmt\"\n");

    match PackageGraphBuilder::new(BuildOptions::default()).build(module.path()) {
        Err(PkgDiffError::ImportBlockMalformed { path, line, .. }) => {
            assert_eq!(path, broken.canonicalize().unwrap());
            assert_eq!(line, 3);
        }
        other => panic!("expected a malformed import error, got {:?}", other.map(|g| g.len())),
    }
}

#[test]
fn test_file_without_package_clause() {
    let module = TestModule::shop();
    module.write("internal/empty/empty.go", "// nothing here\n");

    let err = PackageGraphBuilder::new(BuildOptions::default())
        .build(module.path())
        .unwrap_err();
    assert!(matches!(err, PkgDiffError::PackageClauseMissing { .. }));
}
