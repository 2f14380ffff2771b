// tests/cli.rs
mod common;

use std::fs;

use assert_cmd::Command;
use common::{ClassTree, FUN_SUITE, sample_tree};
use predicates::prelude::*;

fn suite_select() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_suite-select"));
    cmd.env_remove("SUITE_SELECT_LOG");
    cmd
}

#[test]
fn shows_help() {
    suite_select().arg("--help").assert().success().stdout(predicate::str::contains("--tests"));
}

#[test]
fn lists_every_suite_without_filters() {
    let tree = sample_tree();

    suite_select()
        .args(["--format", "plain", &tree.root_arg()])
        .assert()
        .success()
        .stdout("com.example.BarSuite\ncom.example.FooSpec\norg.other.SlowSuite\n")
        .stderr(predicate::str::contains("cannot inspect com/example/Broken.class"));
}

#[test]
fn command_line_tests_and_excludes_compose() {
    let tree = sample_tree();

    suite_select()
        .args(["--format", "plain", "-t", "com.example.*,org.other.SlowSuite", "--exclude", "*Slow*", &tree.root_arg()])
        .assert()
        .success()
        .stdout("com.example.BarSuite\ncom.example.FooSpec\n");
}

#[test]
fn json_report_carries_counters_and_styles() {
    let tree = sample_tree();

    let output = suite_select().args(["--format", "json", "-t", "com.example.FooSpec#adds*", &tree.root_arg()]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["suites"].as_array().unwrap().len(), 1);
    assert_eq!(report["suites"][0]["class_name"], "com.example.FooSpec");
    assert_eq!(report["suites"][0]["style"], "flat-spec");
    assert_eq!(report["suites"][0]["restricts_tests"], true);
    assert_eq!(report["scan"]["examined"], 6);
    assert_eq!(report["scan"]["skipped"], 2);
    assert_eq!(report["scan"]["discovered"], 3);
    assert_eq!(report["filter"]["admitted"], 1);
    assert_eq!(report["filter"]["rejected"], 2);
    assert_eq!(report["dispatch"]["delivered"], 1);
}

#[test]
fn table_output_ends_with_summary() {
    let tree = sample_tree();

    suite_select()
        .arg(tree.root_arg())
        .assert()
        .success()
        .stdout(predicate::str::contains("BarSuite").and(predicate::str::contains("3 selected, 0 rejected")));
}

#[test]
fn no_match_only_fails_when_requested() {
    let tree = sample_tree();

    suite_select().args(["--format", "plain", "-t", "net.*", &tree.root_arg()]).assert().success().stdout("");

    suite_select()
        .args(["--format", "plain", "-t", "net.*", "--fail-on-no-match", &tree.root_arg()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command-line patterns: 'net.*'"));
}

#[test]
fn invalid_pattern_is_a_configuration_error() {
    let tree = sample_tree();

    suite_select()
        .args(["-t", "com..Bar", &tree.root_arg()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("com..Bar"));
}

#[test]
fn missing_root_is_a_runtime_failure() {
    let tree = ClassTree::new();
    let missing = tree.root().join("not-built-yet");

    suite_select().arg(missing.to_str().unwrap()).assert().code(1).stderr(predicate::str::contains("not-built-yet"));
}

#[test]
fn settings_file_and_custom_suite_types() {
    let tree = ClassTree::new().class("app/MunitSuite", "munit/FunSuite").class("app/LegacySuite", FUN_SUITE);
    let settings = tree.root().join("suite-select.yaml");
    fs::write(&settings, "roots: ['.']\nsuite_types:\n  munit.FunSuite: munit\n").unwrap();

    let output = suite_select().args(["--format", "json", "--config", settings.to_str().unwrap()]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let suites = report["suites"].as_array().unwrap();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0]["class_name"], "app.MunitSuite");
    assert_eq!(suites[0]["style"], "munit");
}

#[test]
fn candidate_file_globs_limit_the_scan() {
    let tree = sample_tree();

    suite_select()
        .args(["--format", "plain", "--exclude-files", "org/**", &tree.root_arg()])
        .assert()
        .success()
        .stdout("com.example.BarSuite\ncom.example.FooSpec\n");
}

#[test]
fn excluding_one_test_keeps_its_suite() {
    let tree = sample_tree();

    let output = suite_select()
        .args(["--format", "json", "--exclude", "com.example.BarSuite#slow test", &tree.root_arg()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let suites = report["suites"].as_array().unwrap();
    assert_eq!(suites.len(), 3);
    assert_eq!(suites[0]["class_name"], "com.example.BarSuite");
    assert_eq!(suites[0]["restricts_tests"], true);
    assert_eq!(suites[1]["restricts_tests"], false);
}

#[test]
fn same_class_path_in_two_roots_is_inspected_in_each() {
    let main = ClassTree::new().class("app/X", "java/lang/Object");
    let test = ClassTree::new().class("app/X", FUN_SUITE);

    suite_select()
        .args(["--format", "plain", &main.root_arg(), &test.root_arg()])
        .assert()
        .success()
        .stdout("app.X\n");
}
