//! Integration tests for the labeval binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::TempDir;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

// Runs from `dir` so no stray `labeval.yaml` is picked up.
fn run_labeval(dir: &Path, args: &[&str]) -> (ExitStatus, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_labeval"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute labeval");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (output.status, stdout, stderr)
}

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn demo_args() -> (String, String) {
    (
        demo("hemograma.yaml").to_string_lossy().to_string(),
        demo("results.yaml").to_string_lossy().to_string(),
    )
}

// ============================================================================
// evaluate
// ============================================================================

#[test]
fn test_evaluate_critical_result_exits_2() {
    let dir = TempDir::new().unwrap();
    let (panel, results) = demo_args();

    let (status, stdout, _) = run_labeval(dir.path(), &["evaluate", &panel, &results]);

    assert_eq!(status.code(), Some(2));
    assert!(stdout.contains("Patient sex: female"), "{stdout}");
    assert!(stdout.contains("⇊ Critical low"), "{stdout}");
}

#[test]
fn test_evaluate_without_critical_exits_0() {
    let dir = TempDir::new().unwrap();
    let (panel, _) = demo_args();
    let results = write(
        &dir,
        "results.yaml",
        "patient_sex: M\nvalues:\n  Hemoglobin: 14.0\n  Platelets: \"38\"\n",
    );

    let (status, _, _) = run_labeval(dir.path(), &["evaluate", &panel, &results]);
    assert_eq!(status.code(), Some(2));

    let results = write(
        &dir,
        "results.yaml",
        "patient_sex: M\nvalues:\n  Hemoglobin: 14.0\n  Platelets: \"120\"\n",
    );
    let (status, stdout, _) = run_labeval(dir.path(), &["evaluate", &panel, &results]);
    assert!(status.success(), "{stdout}");
    assert!(stdout.contains("14.0"));
}

#[test]
fn test_evaluate_public_view() {
    let dir = TempDir::new().unwrap();
    let (panel, results) = demo_args();

    let (status, stdout, _) = run_labeval(dir.path(), &["evaluate", &panel, &results, "--public"]);
    assert_eq!(status.code(), Some(2));

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    assert_eq!(rows[0]["parameter"], "Hemoglobin");
    assert_eq!(rows[0]["value"], "11.4");
    assert_eq!(rows[0]["reference_text"], "12.0 - 15.5");
    assert_eq!(rows[0]["label"], "Low");
    assert_eq!(rows[0]["severity"], "caution");
    assert_eq!(rows[4]["label"], "");

    assert!(!stdout.contains("fingerprint"));
    assert!(!stdout.contains("critical_min"));
}

#[test]
fn test_evaluate_sex_override() {
    let dir = TempDir::new().unwrap();
    let (panel, results) = demo_args();

    let (_, stdout, _) = run_labeval(
        dir.path(),
        &["evaluate", &panel, &results, "--sex", "M", "--json"],
    );
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["patient_sex"], "male");
    assert_eq!(report["rows"][0]["reference_text"], "13.5 - 17.5");
}

#[test]
fn test_evaluate_missing_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let (panel, _) = demo_args();

    let (status, _, stderr) = run_labeval(dir.path(), &["evaluate", &panel, "absent.yaml"]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Error:"), "{stderr}");
}

#[test]
fn test_config_in_working_directory() {
    let dir = TempDir::new().unwrap();
    let (panel, results) = demo_args();
    write(&dir, "labeval.yaml", "locale: es\n");

    let (_, stdout, _) = run_labeval(dir.path(), &["evaluate", &panel, &results, "--public"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["label"], "Bajo");
}

// ============================================================================
// classify
// ============================================================================

#[test]
fn test_classify_text_and_json() {
    let dir = TempDir::new().unwrap();

    let (status, stdout, _) = run_labeval(dir.path(), &["classify", "151", "--min", "0", "--max", "150"]);
    assert!(status.success());
    assert!(stdout.starts_with("HIGH"), "{stdout}");

    let (_, stdout, _) = run_labeval(
        dir.path(),
        &["classify", "1.0", "--min", "4.5", "--critical-min", "2.0", "--json"],
    );
    let evaluation: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(evaluation["classification"], "CRITICAL_LOW");
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_demo_panel_is_clean() {
    let dir = TempDir::new().unwrap();
    let (panel, _) = demo_args();

    let (status, stdout, _) = run_labeval(dir.path(), &["validate", &panel, "--strict"]);
    assert!(status.success(), "{stdout}");
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_validate_errors_exit_1() {
    let dir = TempDir::new().unwrap();
    let panel = write(
        &dir,
        "panel.yaml",
        "id: bad\nparameters:\n  - name: Glucose\n    reference_min_male: 100\n    reference_max_male: 70\n",
    );

    let (status, stdout, _) = run_labeval(dir.path(), &["validate", &panel, "--json"]);
    assert_eq!(status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["issues"][0]["code"], "E003");
}

#[test]
fn test_validate_warnings_fail_only_when_strict() {
    let dir = TempDir::new().unwrap();
    let panel = write(
        &dir,
        "panel.yaml",
        "id: masked\nparameters:\n  - name: Potassium\n    critical_min: 2.5\n",
    );

    let (status, stdout, _) = run_labeval(dir.path(), &["validate", &panel]);
    assert!(status.success(), "{stdout}");
    assert!(stdout.contains("W004"));

    let (status, _, _) = run_labeval(dir.path(), &["validate", &panel, "--strict"]);
    assert_eq!(status.code(), Some(1));
}

// ============================================================================
// schema
// ============================================================================

#[test]
fn test_schema_names() {
    let dir = TempDir::new().unwrap();

    for name in ["panel", "results", "config"] {
        let (status, stdout, _) = run_labeval(dir.path(), &["schema", name]);
        assert!(status.success(), "schema {name}");
        let schema: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert!(schema.is_object());
    }

    let (status, _, stderr) = run_labeval(dir.path(), &["schema", "patient"]);
    assert_eq!(status.code(), Some(1));
    assert!(stderr.contains("Unknown schema 'patient'"), "{stderr}");
}
