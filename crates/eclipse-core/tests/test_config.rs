use std::path::PathBuf;

use eclipse_core::consts::DEFAULT_MIN_CONFIDENCE;
use eclipse_core::error::EclipseError;
use eclipse_core::pipeline::config::EclipseConfig;
use eclipse_core::pipeline::ScanStage;
use eclipse_core::snapshot::SnapshotFormat;
use eclipse_core::stage::StageLabel;

#[test]
fn test_default_config_uses_standard_rules() {
    let config = EclipseConfig::default();
    assert_eq!(config.rules.len(), 6);
    assert_eq!(config.classifier.min_confidence, DEFAULT_MIN_CONFIDENCE);
    assert_eq!(config.snapshots.directory, PathBuf::from("snapshots"));
    assert_eq!(config.snapshots.format, SnapshotFormat::Png);
    assert_eq!(config.rule_table().unwrap().len(), 6);
}

#[test]
fn test_empty_document_is_default() {
    let config = EclipseConfig::from_toml_str("").unwrap();
    assert_eq!(config.rules, EclipseConfig::default().rules);
}

#[test]
fn test_partial_document() {
    let config = EclipseConfig::from_toml_str(
        r#"
[classifier]
min_confidence = 0.6

[snapshots]
format = "jpeg"
"#,
    )
    .unwrap();
    assert_eq!(config.classifier.min_confidence, 0.6);
    assert_eq!(config.snapshots.format, SnapshotFormat::Jpeg);
    assert_eq!(config.snapshots.directory, PathBuf::from("snapshots"));
    assert_eq!(config.rules.len(), 6);
}

#[test]
fn test_custom_rules_replace_standard_table() {
    let config = EclipseConfig::from_toml_str(
        r#"
[[rules]]
from = "Sun"
to = "Partial Solar Eclipse"
event_name = "first contact"

[[rules]]
from = "Partial Solar Eclipse"
to = "Diamond Ring"
event_name = "second contact"
"#,
    )
    .unwrap();
    let table = config.rule_table().unwrap();
    assert_eq!(table.len(), 2);
    let rule = table
        .lookup(&StageLabel::PartialSolarEclipse, &StageLabel::Other("Diamond Ring".into()))
        .unwrap();
    assert_eq!(rule.event_name, "second contact");
}

#[test]
fn test_duplicate_rules_fail_validation() {
    let config = EclipseConfig::from_toml_str(
        r#"
[[rules]]
from = "Sun"
to = "PartialSolarEclipse"
event_name = "a"

[[rules]]
from = "Sun"
to = "Partial Solar Eclipse"
event_name = "b"
"#,
    )
    .unwrap();
    assert!(matches!(
        config.rule_table(),
        Err(EclipseError::RuleTable(_))
    ));
}

#[test]
fn test_invalid_toml_is_config_error() {
    assert!(matches!(
        EclipseConfig::from_toml_str("[classifier\nmin_confidence ="),
        Err(EclipseError::Config(_))
    ));
}

#[test]
fn test_config_round_trips_through_toml() {
    let text = EclipseConfig::default().to_toml_string().unwrap();
    assert!(text.contains("onset of totality"));
    assert!(text.contains("PartialSolarEclipse"));
    let parsed = EclipseConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed.rules, EclipseConfig::default().rules);
    assert_eq!(parsed.snapshots.format, SnapshotFormat::Png);
}

#[test]
fn test_scan_stage_display() {
    assert_eq!(format!("{}", ScanStage::Classifying), "Classifying frames");
    assert_eq!(format!("{}", ScanStage::Discarding), "Discarding snapshots");
}

#[test]
fn test_snapshot_format_display() {
    assert_eq!(format!("{}", SnapshotFormat::Jpeg), "JPEG");
}
