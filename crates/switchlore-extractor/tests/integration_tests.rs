//! Integration tests for querying configuration files on disk

use std::fs;
use std::path::{Path, PathBuf};
use switchlore_domain::FieldMap;
use switchlore_extractor::{
    ExtractorConfig, FailureKind, IngestOptions, QueryEngine, QueryError, QueryInput,
};
use switchlore_templates::MockTemplates;
use tempfile::TempDir;

/// Helper to write a capture file into a temp directory
fn write_config(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn engine() -> QueryEngine {
    QueryEngine::new(MockTemplates::new(), ExtractorConfig::default()).unwrap()
}

fn interface_query() -> QueryInput {
    QueryInput::from_json(
        r#"{"section": "show running-config interface", "action": "capture_interface_config"}"#,
    )
    .unwrap()
}

#[test]
fn test_template_command_receives_section_text() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "switch.cfg",
        &["--- show cdp neighbors detail", "Device ID: SwitchA"],
    );

    let mut templates = MockTemplates::new();
    let mut neighbor = FieldMap::new();
    neighbor.insert("neighbor".into(), "SwitchA".into());
    templates.add_response("show cdp neighbors detail", vec![neighbor]);

    let config = ExtractorConfig {
        include_command: true,
        ..ExtractorConfig::default()
    };
    let engine = QueryEngine::new(templates.clone(), config).unwrap();
    let result = engine
        .query_paths(&[&path], &IngestOptions::default(), vec!["show cdp neighbors detail"])
        .unwrap();

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.get("neighbor"), Some("SwitchA"));
    assert_eq!(row.get("command"), Some("show cdp neighbors detail"));
    assert_eq!(
        row.source_file(),
        path.canonicalize().unwrap().display().to_string()
    );

    let calls = templates.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].platform, "cisco_ios");
    assert_eq!(calls[0].data, "Device ID: SwitchA");
}

#[test]
fn test_interface_values_with_colons() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "switch.cfg",
        &[
            "--- show running-config interface",
            "interface GigabitEthernet1/0/3",
            " description Link to ISP: Primary",
            " ipv6 address 2001:db8::1/64",
            "!",
        ],
    );

    let result = engine()
        .query_paths(&[&path], &IngestOptions::default(), interface_query())
        .unwrap();

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.get("interface"), Some("GigabitEthernet1/0/3"));
    assert_eq!(row.get("description"), Some("Link to ISP: Primary"));
    assert_eq!(row.get("ipv6 address"), Some("2001:db8::1/64"));
}

#[test]
fn test_interface_alias_with_custom_pattern_and_raw() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "switch.cfg",
        &[
            "--- show running-config interface",
            "interface Loopback0",
            " ip address 192.0.2.1 255.255.255.255",
            " quit",
            "Some unrelated line",
            "PORT: Ethernet1",
            " description Test port",
            "ENDPORT",
        ],
    );

    let input = QueryInput::from_json(
        r#"[{
            "section": "show running-config interface",
            "action": "capture_interfaces",
            "options": {
                "terminators": ["quit", "ENDPORT"],
                "interface_pattern": "^(?:interface|PORT:)\\s+(.+)$"
            }
        }]"#,
    )
    .unwrap();
    let engine = QueryEngine::new(MockTemplates::new(), ExtractorConfig::verbose()).unwrap();
    let result = engine
        .query_paths(&[&path], &IngestOptions::default(), input)
        .unwrap();

    let names: Vec<_> = result.rows.iter().filter_map(|r| r.get("interface")).collect();
    assert_eq!(names, vec!["Loopback0", "Ethernet1"]);

    let loopback = &result.rows[0];
    let ethernet = &result.rows[1];
    assert_eq!(loopback.get("ip address"), Some("192.0.2.1 255.255.255.255"));
    assert_eq!(ethernet.get("description"), Some("Test port"));
    assert!(loopback.get("raw").unwrap().starts_with("interface Loopback0"));
    assert!(ethernet.get("raw").unwrap().starts_with("PORT: Ethernet1"));
    assert_ne!(loopback.get("raw"), ethernet.get("raw"));
}

#[test]
fn test_directory_query_is_file_major() {
    let dir = TempDir::new().unwrap();
    let block = ["--- show running-config interface", "interface Gi0/1", " shutdown", "!"];
    write_config(dir.path(), "b/sw2.cfg", &block);
    write_config(dir.path(), "a/sw1.cfg", &block);
    write_config(dir.path(), "a/readme.md", &["interface Gi9/9"]);
    write_config(dir.path(), "backup/sw1.cfg", &block);

    let ingest = IngestOptions::default()
        .with_extension(".cfg")
        .with_exclude("^backup$");
    let result = engine()
        .query_paths(&[dir.path()], &ingest, interface_query())
        .unwrap();

    let sources: Vec<String> = result
        .rows
        .iter()
        .map(|r| {
            Path::new(r.source_file())
                .strip_prefix(dir.path().canonicalize().unwrap())
                .unwrap()
                .display()
                .to_string()
        })
        .collect();
    assert_eq!(
        sources,
        vec![
            Path::new("a").join("sw1.cfg").display().to_string(),
            Path::new("b").join("sw2.cfg").display().to_string(),
        ]
    );
    assert_eq!(result.metadata.files_processed, 2);
}

#[test]
fn test_unsupported_template_is_reported_per_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "switch.cfg", &["--- show inventory", "Chassis"]);

    let result = engine()
        .query_paths(&[&path], &IngestOptions::default(), vec!["show inventory"])
        .unwrap();

    assert!(result.rows.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].kind, FailureKind::UnsupportedSection);
}

#[test]
fn test_invalid_specs_fail_before_ingest() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let bad = QueryInput::from_json(r#"[{"action": "capture_interface_config"}]"#).unwrap();
    let result = engine().query_paths(&[&missing], &IngestOptions::default(), bad);
    assert!(matches!(result, Err(QueryError::InvalidSpec(_))));

    let result = engine().query_paths(&[&missing], &IngestOptions::default(), "show version");
    assert!(matches!(result, Err(QueryError::Ingest(_))));

    assert!(matches!(
        QueryInput::from_json(r#"[{"section": 42}]"#),
        Err(QueryError::InvalidSpec(_))
    ));
}
