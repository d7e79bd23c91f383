//! Rendering real graphs in every output format

use super::helpers::{qualified, TestModule};
use pkgdiff::models::OutputFormat;
use pkgdiff::output::{create_formatter, create_writer};
use pkgdiff::ChangeSetMapper;
use serde_json::Value;
use std::fs;

#[test]
fn test_json_graph_document() {
    let graph = TestModule::shop().build();
    let json = create_formatter(OutputFormat::Json, false, false)
        .format_graph(&graph)
        .unwrap();

    let doc: Value = serde_json::from_str(&json).unwrap();
    let packages = doc["packages"].as_array().unwrap();
    assert_eq!(packages.len(), graph.len());

    let api = packages
        .iter()
        .find(|p| p["name"] == qualified("cmd/api").as_str())
        .unwrap();
    assert_eq!(api["isMain"], true);
    assert_eq!(api["dependencies"], serde_json::json!([qualified("internal/orders")]));
    assert_eq!(api["files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_json_redeploy_report() {
    let graph = TestModule::shop().build();
    let report = ChangeSetMapper::new(&graph).analyze(&["pkg/log/log.go", "notes.txt"]);
    let json = create_formatter(OutputFormat::Json, false, false)
        .format_redeploy(&report)
        .unwrap();

    let doc: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["changedPackages"], serde_json::json!([qualified("pkg/log")]));
    assert_eq!(doc["unmatchedFiles"], serde_json::json!(["notes.txt"]));
    assert_eq!(doc["packages"][0]["name"], qualified("cmd/cli").as_str());
    assert!(doc["generatedAt"].is_string());
}

#[test]
fn test_text_outputs() {
    let graph = TestModule::shop().build();

    let plain = create_formatter(OutputFormat::Text, false, false)
        .format_graph(&graph)
        .unwrap();
    assert_eq!(plain.lines().count(), graph.len());
    assert_eq!(plain.lines().next(), Some(qualified("cmd/api").as_str()));

    let report = ChangeSetMapper::new(&graph).analyze(&["internal/db/conn.go"]);
    let redeploy = create_formatter(OutputFormat::Text, false, false)
        .format_redeploy(&report)
        .unwrap();
    assert_eq!(
        redeploy,
        format!("{}\n{}\n", qualified("cmd/api"), qualified("cmd/worker"))
    );

    let verbose = create_formatter(OutputFormat::Text, false, true)
        .format_redeploy(&report)
        .unwrap();
    assert!(verbose.contains("Changed packages:"));
    assert!(verbose.contains(&format!("  {}", qualified("internal/db"))));
}

#[test]
fn test_csv_graph() {
    let graph = TestModule::shop().build();
    let csv = create_formatter(OutputFormat::Csv, false, false)
        .format_graph(&graph)
        .unwrap();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("name,is_main,file_count,dependencies"));
    assert!(csv.contains(&format!("{},false,2,\n", qualified("internal/db"))));
    assert!(csv.contains(&format!(
        "{},true,1,{}\n",
        qualified("cmd/worker"),
        qualified("internal/orders")
    )));
}

#[test]
fn test_dot_graph() {
    let graph = TestModule::shop().build();
    let dot = create_formatter(OutputFormat::Dot, false, false)
        .format_graph(&graph)
        .unwrap();

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains(&format!("label=\"{}\" shape=box style=filled", qualified("cmd/api"))));
    assert!(dot.contains(&format!("label=\"{}\" shape=box", qualified("internal/db"))));
    assert!(!dot.contains("shape=ellipse"));
    assert_eq!(dot.matches("->").count(), graph.edge_count());
}

#[test]
fn test_file_writer_round_trip() {
    let module = TestModule::shop();
    let graph = module.build();
    let target = module.path().join("graph.txt");

    let text = create_formatter(OutputFormat::Text, false, false)
        .format_graph(&graph)
        .unwrap();
    create_writer(Some(&target)).write(&text).unwrap();

    assert_eq!(fs::read_to_string(&target).unwrap(), text);
}
