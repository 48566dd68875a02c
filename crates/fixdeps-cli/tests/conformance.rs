//! Conformance tests for fixdeps.
//!
//! These tests validate:
//! 1. All check IDs and codes have explanations
//! 2. ID naming conventions
//! 3. Reports emitted by the CLI validate against the exported report schema

use assert_cmd::Command;
use fixdeps_types::{explain, ids};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn fixdeps_cmd() -> Command {
    Command::cargo_bin("fixdeps").expect("fixdeps binary")
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("fixdeps-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

fn exported_schema(kind: &str) -> Value {
    let output = fixdeps_cmd()
        .args(["schema", kind])
        .output()
        .expect("run schema");
    assert!(output.status.success(), "schema {kind} should succeed");
    serde_json::from_slice(&output.stdout).expect("schema json")
}

// =============================================================================
// Explanation Coverage Tests
// =============================================================================

#[test]
fn all_identifiers_have_explanations() {
    for id in explain::all_check_ids().iter().chain(explain::all_codes()) {
        let exp = explain::lookup_explanation(id)
            .unwrap_or_else(|| panic!("'{id}' has no explanation in registry"));
        assert!(!exp.title.is_empty(), "'{id}' has empty title");
        assert!(!exp.description.is_empty(), "'{id}' has empty description");
        assert!(!exp.remediation.is_empty(), "'{id}' has empty remediation");
    }
}

#[test]
fn check_ids_are_dotted_and_codes_snake_case() {
    for check_id in explain::all_check_ids() {
        assert!(check_id.contains('.'), "check ID '{check_id}' should be dotted");
    }
    for code in explain::all_codes() {
        assert!(
            code.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
            "code '{code}' should be snake_case"
        );
    }
}

#[test]
fn emitted_codes_are_registered() {
    let registered = explain::all_codes();
    for code in [
        ids::CODE_MISSING_DEPENDENCY,
        ids::CODE_DEV_DEPENDENCY_NOT_ALLOWED,
        ids::CODE_OPTIONAL_DEPENDENCY_NOT_ALLOWED,
        ids::CODE_MANIFEST_NOT_FOUND,
        ids::CODE_MANIFEST_PARSE_ERROR,
        ids::CODE_WORKSPACE_INVALID,
    ] {
        assert!(registered.contains(&code), "code '{code}' is not registered");
    }
}

// =============================================================================
// Schema conformance
// =============================================================================

#[test]
fn config_schema_is_a_valid_schema() {
    let schema = exported_schema("config");
    let validator = jsonschema::validator_for(&schema).expect("compile config schema");
    let sample = serde_json::json!({
        "project_dir": ".",
        "dev_dependencies": ["**/*.test.js"],
        "optional_dependencies": false,
        "package_dir": "packages/app"
    });
    assert!(validator.is_valid(&sample));
}

#[test]
fn fixture_reports_validate_against_report_schema() {
    let schema = exported_schema("report");
    let validator = jsonschema::validator_for(&schema).expect("compile report schema");

    for fixture in ["solo", "yarn_monorepo", "missing_names", "broken_manifest", "dev_only"] {
        let tmp = TempDir::new().expect("temp dir");
        let report_path = tmp.path().join("report.json");
        let project = fixtures_dir().join(fixture);

        fixdeps_cmd()
            .arg("--project-dir")
            .arg(&project)
            .arg("check")
            .arg("--sites")
            .arg(project.join("sites.json"))
            .arg("--assume-resolved")
            .arg("--report-out")
            .arg(&report_path)
            .output()
            .expect("run check");

        let report: Value = serde_json::from_str(
            &std::fs::read_to_string(&report_path).expect("read report"),
        )
        .expect("report json");
        let errors: Vec<String> = validator
            .iter_errors(&report)
            .map(|e| format!("{} at {}", e, e.instance_path()))
            .collect();
        assert!(errors.is_empty(), "{fixture}: {errors:#?}");
    }
}
