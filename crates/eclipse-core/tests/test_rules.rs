use eclipse_core::error::EclipseError;
use eclipse_core::rules::{standard_rules, RuleTable, TransitionRule};
use eclipse_core::stage::StageLabel;

// ---------------------------------------------------------------------------
// StageLabel parsing
// ---------------------------------------------------------------------------

#[test]
fn test_label_parses_model_class_names() {
    assert_eq!("Sun".parse::<StageLabel>().unwrap(), StageLabel::Sun);
    assert_eq!(
        "Partial Solar Eclipse".parse::<StageLabel>().unwrap(),
        StageLabel::PartialSolarEclipse
    );
    assert_eq!(
        "Total Solar Eclipse".parse::<StageLabel>().unwrap(),
        StageLabel::TotalSolarEclipse
    );
    assert_eq!(
        "annular_solar_eclipse".parse::<StageLabel>().unwrap(),
        StageLabel::AnnularSolarEclipse
    );
}

#[test]
fn test_label_parses_camel_case() {
    assert_eq!(
        "PartialSolarEclipse".parse::<StageLabel>().unwrap(),
        StageLabel::PartialSolarEclipse
    );
}

#[test]
fn test_unknown_label_kept_verbatim() {
    let label: StageLabel = " Diamond Ring ".parse().unwrap();
    assert_eq!(label, StageLabel::Other("Diamond Ring".into()));
    assert!(!label.is_known());
    assert_eq!(label.to_string(), "Diamond Ring");
}

#[test]
fn test_empty_label_rejected() {
    assert!("   ".parse::<StageLabel>().is_err());
}

#[test]
fn test_label_display_is_canonical() {
    assert_eq!(StageLabel::TotalSolarEclipse.to_string(), "TotalSolarEclipse");
}

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

#[test]
fn test_standard_table_lookups() {
    let table = RuleTable::standard();
    assert_eq!(table.len(), 6);

    let onset = table
        .lookup(&StageLabel::Sun, &StageLabel::PartialSolarEclipse)
        .unwrap();
    assert_eq!(onset.event_name, "onset of partial eclipse");

    let end = table
        .lookup(&StageLabel::TotalSolarEclipse, &StageLabel::PartialSolarEclipse)
        .unwrap();
    assert_eq!(end.event_name, "end of totality");
}

#[test]
fn test_absent_pairs_are_not_events() {
    let table = RuleTable::standard();
    assert!(table
        .lookup(&StageLabel::Sun, &StageLabel::TotalSolarEclipse)
        .is_none());
    assert!(table
        .lookup(&StageLabel::TotalSolarEclipse, &StageLabel::AnnularSolarEclipse)
        .is_none());
}

#[test]
fn test_standard_matches_validated_table() {
    let validated = RuleTable::new(standard_rules()).unwrap();
    let standard = RuleTable::standard();
    assert_eq!(validated.rules(), standard.rules());
    for rule in standard.rules() {
        assert_eq!(validated.lookup(&rule.from, &rule.to), Some(rule));
    }
}

#[test]
fn test_duplicate_pair_rejected() {
    let rules = vec![
        TransitionRule::new(StageLabel::Sun, StageLabel::PartialSolarEclipse, "a"),
        TransitionRule::new(StageLabel::Sun, StageLabel::PartialSolarEclipse, "b"),
    ];
    let err = RuleTable::new(rules).unwrap_err();
    assert!(matches!(err, EclipseError::RuleTable(ref m) if m.contains("duplicate")));
}

#[test]
fn test_reverse_pair_is_not_duplicate() {
    let rules = vec![
        TransitionRule::new(StageLabel::Sun, StageLabel::PartialSolarEclipse, "in"),
        TransitionRule::new(StageLabel::PartialSolarEclipse, StageLabel::Sun, "out"),
    ];
    assert_eq!(RuleTable::new(rules).unwrap().len(), 2);
}

#[test]
fn test_self_transition_rejected() {
    let rules = vec![TransitionRule::new(StageLabel::Sun, StageLabel::Sun, "noop")];
    assert!(matches!(
        RuleTable::new(rules),
        Err(EclipseError::RuleTable(_))
    ));
}

#[test]
fn test_blank_event_name_rejected() {
    let rules = vec![TransitionRule::new(
        StageLabel::Sun,
        StageLabel::PartialSolarEclipse,
        "  ",
    )];
    assert!(matches!(
        RuleTable::new(rules),
        Err(EclipseError::RuleTable(_))
    ));
}

#[test]
fn test_empty_table_is_valid() {
    let table = RuleTable::new(Vec::new()).unwrap();
    assert!(table.is_empty());
}
