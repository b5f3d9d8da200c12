use std::fs;

use provision_core::{
    load_manifest_file, parse_manifest_str, validate_manifest, LoadError, ManifestFormat, StepKind,
};
use tempfile::TempDir;

fn minimal_valid_yaml() -> &'static str {
    r#"
version: "1.0"
name: example
steps:
  - id: refresh
    kind: package-index
    command: apt-get
    args: [update]
  - id: install
    kind: package-install
    command: apt-get
    args: [install, -y, curl]
    env:
      DEBIAN_FRONTEND: noninteractive
"#
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_manifest_str(minimal_valid_yaml(), ManifestFormat::Yaml).unwrap();
    validate_manifest(&parsed.manifest).unwrap();

    let install = parsed.manifest.step("install").unwrap();
    assert_eq!(install.kind, StepKind::PackageInstall);
    assert_eq!(install.expected_exit_code, 0);
    assert_eq!(install.env.get("DEBIAN_FRONTEND").map(String::as_str), Some("noninteractive"));
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_manifest_str(minimal_valid_yaml(), ManifestFormat::Auto).unwrap();
    assert_eq!(parsed.format, ManifestFormat::Yaml);
}

#[test]
fn parse_auto_detects_json() {
    let json = r#"{ "version": "1.0", "name": "example", "steps": [ { "id": "s1", "command": "true" } ] }"#;
    let parsed = parse_manifest_str(json, ManifestFormat::Auto).unwrap();
    assert_eq!(parsed.format, ManifestFormat::Json);
    assert_eq!(parsed.manifest.steps[0].kind, StepKind::Command);
    assert!(parsed.manifest.steps[0].args.is_empty());
}

#[test]
fn parse_empty_input_is_rejected() {
    let err = parse_manifest_str("   \n", ManifestFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("neither JSON nor YAML"));
}

#[test]
fn parse_broken_yaml_reports_yaml_error() {
    let err = parse_manifest_str("steps: [unclosed", ManifestFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("YAML"));
}

#[test]
fn unknown_step_kind_is_a_parse_error() {
    let doc = minimal_valid_yaml().replace("kind: package-index", "kind: teleport");
    assert!(parse_manifest_str(&doc, ManifestFormat::Yaml).is_err());
}

#[test]
fn unsupported_version_is_rejected() {
    let bad = minimal_valid_yaml().replace("version: \"1.0\"", "version: \"2.0\"");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.version"));
}

#[test]
fn malformed_version_is_rejected() {
    let bad = minimal_valid_yaml().replace("version: \"1.0\"", "version: latest");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.version" && v.message.contains("major.minor")));
}

#[test]
fn duplicate_step_ids_are_rejected() {
    let bad = minimal_valid_yaml().replace("id: install", "id: refresh");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.steps[1].id" && v.message == "must be unique"));
}

#[test]
fn invalid_step_id_is_rejected() {
    let bad = minimal_valid_yaml().replace("id: install", "id: \"install packages\"");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.steps[1].id"));
}

#[test]
fn command_with_inline_arguments_is_rejected() {
    let bad = minimal_valid_yaml().replace("command: apt-get\n    args: [update]", "command: apt-get update");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.steps[0].command"));
}

#[test]
fn empty_command_is_rejected() {
    let json = r#"{ "version": "1.0", "name": "x", "steps": [ { "id": "s1", "command": "  " } ] }"#;
    let parsed = parse_manifest_str(json, ManifestFormat::Json).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert_eq!(err.violations[0].path, "$.steps[0].command");
    assert_eq!(err.violations[0].message, "must not be empty");
}

#[test]
fn bad_env_key_and_exit_code_are_rejected() {
    let json = r#"{
        "version": "1.0",
        "name": "x",
        "steps": [ { "id": "s1", "command": "true", "env": { "1BAD": "v" }, "expectedExitCode": 300 } ]
    }"#;
    let parsed = parse_manifest_str(json, ManifestFormat::Json).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.steps[0].env.1BAD"));
    assert!(err
        .violations
        .iter()
        .any(|v| v.path == "$.steps[0].expectedExitCode"));
}

#[test]
fn unknown_fields_must_be_extensions() {
    let doc = format!("{}x-owner: infra\nretries: 3\n", minimal_valid_yaml());
    let parsed = parse_manifest_str(&doc, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "$.retries");
}

#[test]
fn blank_name_is_rejected() {
    let bad = minimal_valid_yaml().replace("name: example", "name: \"\"");
    let parsed = parse_manifest_str(&bad, ManifestFormat::Yaml).unwrap();
    let err = validate_manifest(&parsed.manifest).unwrap_err();
    assert!(err.violations.iter().any(|v| v.path == "$.name"));
}

#[test]
fn load_manifest_file_keeps_content_and_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("site.yaml");
    fs::write(&path, minimal_valid_yaml()).unwrap();

    let file = load_manifest_file(&path).unwrap();
    assert_eq!(file.path, path);
    assert_eq!(file.parsed.format, ManifestFormat::Yaml);
    assert_eq!(file.parsed.manifest.steps.len(), 2);
    assert_eq!(file.content, minimal_valid_yaml());
}

#[test]
fn load_error_names_the_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let err = load_manifest_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn load_error_names_the_unparseable_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "steps: [unclosed").unwrap();

    let err = load_manifest_file(&path).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(message.contains("broken.yaml"), "{message}");
    assert!(message.contains("not valid YAML"), "{message}");
}

#[test]
fn validation_error_reports_count_and_first_violation() {
    let yaml = r#"
version: "1.0"
name: example
steps:
  - id: a
    command: ""
  - id: a
    command: "true"
"#;
    let manifest = parse_manifest_str(yaml, ManifestFormat::Yaml).unwrap().manifest;
    let err = validate_manifest(&manifest).unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with(&format!("manifest has {} violation(s)", err.violations.len())));
    assert!(message.contains("$.steps[0].command"), "{message}");
    assert_eq!(err.messages().len(), err.violations.len());
}
