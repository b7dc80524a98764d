//! Integration tests for the cable-cli command line

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A scratch directory holding an isolated config path, so tests never read
/// the user's own configuration.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("cable-cli");
        cmd.arg("--config").arg(self.config());
        cmd
    }
}

const THREE_CORE_95: [&str; 10] = [
    "--material",
    "copper",
    "--construction",
    "threeCore",
    "--voltage",
    "0.6/1kV",
    "--size",
    "95",
    "--installation",
    "buriedDirect",
];

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn rate_prints_summary_table() {
    let sb = Sandbox::new();
    sb.cmd()
        .arg("rate")
        .args(THREE_CORE_95)
        .args(["--required-current", "200", "--supply-voltage", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Base rating"))
        .stdout(predicate::str::contains("290 A"))
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn rate_json_contains_parameters_and_result() {
    let sb = Sandbox::new();
    let output = sb
        .cmd()
        .arg("rate")
        .args(THREE_CORE_95)
        .args(["--format", "json", "--sc-current", "14"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["parameters"]["conductorSize"].as_f64(), Some(95.0));
    assert_eq!(doc["result"]["baseRating"].as_f64(), Some(290.0));
    assert_eq!(doc["result"]["shortCircuit"]["withstand"].as_f64(), Some(14.0));
    assert_eq!(doc["result"]["shortCircuit"]["status"], "pass");
}

#[test]
fn rate_reads_parameter_file_and_flags_override() {
    let sb = Sandbox::new();
    let params = sb.path("cable.toml");
    write(
        &params,
        r#"
material = "copper"
construction = "singleCore"
voltageRating = "0.6/1kV"
conductorSize = 240
installation = "inAir"
arrangement = "trefoil"
ambientTemperature = 40
"#,
    );
    let output = sb
        .cmd()
        .args(["rate", "--params"])
        .arg(&params)
        .args(["--size", "95", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["parameters"]["conductorSize"].as_f64(), Some(95.0));
    assert_eq!(doc["parameters"]["ambientTemperature"].as_f64(), Some(40.0));
    assert_eq!(doc["result"]["derating"]["temperature"].as_f64(), Some(0.91));
    assert_eq!(doc["result"]["derating"]["groundFactorsApplicable"], false);
}

#[test]
fn rate_report_written_to_file() {
    let sb = Sandbox::new();
    let out = sb.path("reports/cable.txt");
    sb.cmd()
        .arg("rate")
        .args(THREE_CORE_95)
        .args(["--required-current", "500", "--report", "--out"])
        .arg(&out)
        .assert()
        .success();
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("CABLE SIZING CALCULATION REPORT"));
    assert!(text.contains("DERATING FACTORS"));
    assert!(text.contains("NOT ADEQUATE"));
}

#[test]
fn rate_unsupported_size_fails() {
    let sb = Sandbox::new();
    let mut args = THREE_CORE_95;
    args[7] = "630";
    sb.cmd()
        .arg("rate")
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported size"));
}

#[test]
fn rate_single_core_without_arrangement_fails() {
    let sb = Sandbox::new();
    let mut args = THREE_CORE_95;
    args[3] = "singleCore";
    sb.cmd()
        .arg("rate")
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("arrangement"));
}

#[test]
fn rate_missing_material_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["rate", "--size", "95"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("material"));
}

#[test]
fn sizes_csv_marks_selected_and_recommended() {
    let sb = Sandbox::new();
    let output = sb
        .cmd()
        .arg("sizes")
        .args(THREE_CORE_95)
        .args(["--required-current", "400", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].contains("meetsRequirement"));
    // header plus twelve three-core sizes
    assert_eq!(lines.len(), 13);
    // columns: ..., meetsRequirement, recommended, selected, size, voltageDropPercent
    assert!(lines.iter().any(|l| l.contains(",false,false,true,95.0,")));
    assert!(lines.iter().any(|l| l.contains(",true,true,false,185.0,")));
}

#[test]
fn sizes_table_lists_every_size() {
    let sb = Sandbox::new();
    sb.cmd()
        .arg("sizes")
        .args(THREE_CORE_95)
        .args(["--required-current", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SIZE (mm²)"))
        .stdout(predicate::str::contains("selected"))
        .stdout(predicate::str::contains("recommended"));
}

#[test]
fn sizes_json_carries_derating_warnings() {
    let sb = Sandbox::new();
    let output = sb
        .cmd()
        .arg("sizes")
        .args(THREE_CORE_95)
        .args(["--ambient-temp", "22.5", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["rows"].as_array().map(Vec::len), Some(12));
    let issues = doc["diagnostics"]["issues"].as_array().unwrap();
    assert!(issues
        .iter()
        .any(|i| i["category"] == "derating" && i["message"].as_str().unwrap().contains("closest")));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not tabulated"));
}

#[test]
fn tables_validate_bundled() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["tables", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues"));
}

#[test]
fn tables_validate_reports_errors() {
    let sb = Sandbox::new();
    let tables = sb.path("bad.json");
    write(
        &tables,
        r#"{
            "conductorSizes": { "singleCore": [35, 25], "threeCore": [25] },
            "ampacity": { "threeCoreCopper": { "0.6/1kV": { "inAir": [100, 120] } } }
        }"#,
    );
    sb.cmd()
        .args(["tables", "validate", "--tables"])
        .arg(&tables)
        .assert()
        .failure()
        .stdout(predicate::str::contains("cannot be aligned"))
        .stderr(predicate::str::contains("table validation failed"));
}

#[test]
fn tables_list_shows_partitions() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["tables", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("singleCoreAluminum"))
        .stdout(predicate::str::contains("6.35/11kV"))
        .stdout(predicate::str::contains("threeCore sizes (mm²): 25, 35"));
}

#[test]
fn config_init_then_show() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(sb.config().exists());

    sb.cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    sb.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_voltage_drop_percent = 5.0"))
        .stdout(predicate::str::contains("level = \"info\""));
}

#[test]
fn config_output_format_applies_to_rate() {
    let sb = Sandbox::new();
    write(&sb.config(), "[output]\nformat = \"json\"\n");
    let output = sb.cmd().arg("rate").args(THREE_CORE_95).output().unwrap();
    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["result"].is_object());
}

#[test]
fn completions_bash() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cable-cli"));
}
