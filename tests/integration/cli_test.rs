//! Commands driven from parsed arguments, as the binary runs them

use super::helpers::{qualified, TestModule};
use clap::Parser;
use pkgdiff::cli::{Args, Command};
use pkgdiff::models::OutputFormat;
use pkgdiff::PkgDiffError;
use std::fs;
use std::path::PathBuf;

/// Arguments pointing at `module` with an empty config file and output to `out`
fn run_args(module: &TestModule, out: &str, extra: &[&str]) -> (Args, PathBuf) {
    let config = module.write(".pkgdiff.toml", "");
    let output = module.path().join(out);

    let mut argv = vec![
        "pkgdiff".to_string(),
        "--path".to_string(),
        module.path().display().to_string(),
        "--config".to_string(),
        config.display().to_string(),
        "--output-file".to_string(),
        output.display().to_string(),
        "--no-progress".to_string(),
        "--no-colors".to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));

    (Args::try_parse_from(argv).unwrap(), output)
}

#[test]
fn test_cli_args_defaults() {
    let args = Args::try_parse_from(["pkgdiff"]).unwrap();
    assert_eq!(args.path, None);
    assert_eq!(args.module, None);
    assert!(args.exclude.is_empty());
    assert!(args.output.is_none());
    assert!(!args.external_deps);
    assert!(!args.quiet);
    assert!(!args.verbose);
}

#[test]
fn test_cli_output_formats() {
    for (flag, expected) in [
        ("text", OutputFormat::Text),
        ("plain", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("csv", OutputFormat::Csv),
        ("dot", OutputFormat::Dot),
    ] {
        let args = Args::try_parse_from(["pkgdiff", "--output", flag]).unwrap();
        assert_eq!(args.output.map(OutputFormat::from), Some(expected));
    }
    assert!(Args::try_parse_from(["pkgdiff", "--output", "yaml"]).is_err());
}

#[test]
fn test_structure_command_writes_json() {
    let module = TestModule::shop();
    let (args, output) = run_args(&module, "graph.json", &["structure", "-o", "json"]);

    assert_eq!(Command::from_args(args).run(), 0);

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(doc["packages"].as_array().unwrap().len(), 6);
}

#[test]
fn test_diff_command_with_changed_list() {
    let module = TestModule::shop();
    let list = module.write("changed.txt", "internal/orders/orders.go\n\nREADME.md\n");
    let (args, output) = run_args(
        &module,
        "redeploy.txt",
        &["diff", "--changed-from", list.to_str().unwrap(), "--changed-file", "pkg/log/log.go"],
    );

    Command::from_args(args).execute().unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        format!(
            "{}\n{}\n{}\n",
            qualified("cmd/api"),
            qualified("cmd/cli"),
            qualified("cmd/worker")
        )
    );
}

#[test]
fn test_diff_command_from_last_commit() {
    let module = TestModule::shop();
    module.write(".pkgdiff.toml", "");
    if !module.commit_all("initial") {
        return;
    }
    module.write("pkg/log/log.go", "package log\n\nfunc Debug() {}\n");
    assert!(module.commit_all("log"));

    let (args, output) = run_args(&module, "redeploy.txt", &["diff"]);
    Command::from_args(args).execute().unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), format!("{}\n", qualified("cmd/cli")));
}

#[test]
fn test_dependents_command_accepts_relative_names() {
    let module = TestModule::shop();
    let (args, output) = run_args(
        &module,
        "dependents.csv",
        &["-o", "csv", "dependents", "internal/orders"],
    );

    Command::from_args(args).execute().unwrap();

    let csv = fs::read_to_string(output).unwrap();
    let names: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(names, vec![qualified("cmd/api").as_str(), qualified("cmd/worker").as_str()]);
}

#[test]
fn test_dependents_command_unknown_package() {
    let module = TestModule::shop();
    let (args, _) = run_args(&module, "out.txt", &["dependents", "internal/payments"]);

    let command = Command::from_args(args);
    assert!(matches!(command.execute(), Err(PkgDiffError::PackageNotFound { .. })));
    assert_eq!(command.run(), 1);
}

#[test]
fn test_missing_manifest_is_critical() {
    let module = TestModule::shop();
    fs::remove_file(module.path().join("go.mod")).unwrap();
    let (args, _) = run_args(&module, "out.txt", &["structure"]);

    assert_eq!(Command::from_args(args).run(), 2);
}

#[test]
fn test_module_flag_replaces_missing_manifest() {
    let module = TestModule::shop();
    fs::remove_file(module.path().join("go.mod")).unwrap();
    let (args, output) =
        run_args(&module, "out.txt", &["--module", "example.com/shop", "structure"]);

    assert_eq!(Command::from_args(args).run(), 0);
    assert_eq!(fs::read_to_string(output).unwrap().lines().count(), 6);
}

#[test]
fn test_invalid_config_file() {
    let module = TestModule::shop();
    let (args, _) = run_args(&module, "out.txt", &["structure"]);
    module.write(".pkgdiff.toml", "unknown_key = 1\n");

    let err = Command::from_args(args).execute().unwrap_err();
    assert!(matches!(err, PkgDiffError::ConfigParse { .. }));
    assert_eq!(err.exit_code(), 2);
}
