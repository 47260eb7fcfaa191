use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::tempdir;

fn sales_report() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sales-report"))
}

#[test]
fn generate_prints_summary_json_and_exits_zero() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("sales.csv");
    let output = temp_dir.path().join("report.xlsx");
    fs::write(&input, "Region,Total Sales\nnorth,10\nsouth,20\nnorth,5\n").expect("CSV written");

    let assert = sales_report()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--print-summary")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(
        summary,
        serde_json::json!([
            {"Region": "South", "Total Sales": 20.0},
            {"Region": "North", "Total Sales": 15.0}
        ])
    );
    assert!(output.exists());
}

#[test]
fn missing_input_exits_with_failure_and_writes_nothing() {
    let temp_dir = tempdir().expect("temporary directory");
    let input = temp_dir.path().join("missing.csv");
    let output = temp_dir.path().join("report.xlsx");

    let assert = sales_report()
        .arg("generate")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("error: input file not found"), "stderr:\n{stderr}");
    assert!(!output.exists());
}
