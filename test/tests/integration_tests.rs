//! # Contract Testing Framework: Integration Tests
//!
//! Tests exercising the medical records contract through the framework:
//! - Property-based testing with invariant verification
//! - State space exploration against a reference model
//! - Mutation detection on hand-corrupted scan payloads

extern crate std;

use std::collections::BTreeMap;

use proptest::prelude::*;

use medical_records::{seed, ContractError, MedicalRecord};
use test_framework::generators::*;
use test_framework::invariants::*;
use test_framework::state_explorer::*;
use test_framework::*;

fn model_of(entries: &[(&str, MedicalRecord)]) -> BTreeMap<String, MedicalRecord> {
    entries
        .iter()
        .map(|(key, record)| (key.to_string(), record.clone()))
        .collect()
}

fn snapshot_of(raw: &str, expected: BTreeMap<String, MedicalRecord>) -> RecordsSnapshot {
    RecordsSnapshot {
        raw_scan: raw.as_bytes().to_vec(),
        expected,
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// **Property**: a created record reads back with identical fields.
    #[test]
    fn prop_create_then_query(key in key_strategy(), record in record_strategy()) {
        let env = TestEnv::new();
        let records = RecordsHarness::new(&env);

        records.create_record(&key, &record);
        prop_assert_eq!(records.query_record(&key), record);
    }

    /// **Property**: a scanned record appears in the scan exactly as stored.
    #[test]
    fn prop_scan_embeds_stored_bytes(key in scanned_key_strategy(), record in record_strategy()) {
        let env = TestEnv::new();
        let records = RecordsHarness::new(&env);
        records.create_record(&key, &record);

        let stored = String::from_utf8(records.query_raw(&key)).unwrap();
        let scan = String::from_utf8(records.query_all_raw()).unwrap();
        prop_assert!(scan.contains(&stored),
            "scan {} does not embed stored value {}", scan, stored);
    }

    /// **Property**: changing the patient leaves the other three fields alone.
    #[test]
    fn prop_change_patient_preserves_fields(
        key in key_strategy(),
        record in record_strategy(),
        patient in field_strategy(),
    ) {
        let env = TestEnv::new();
        let records = RecordsHarness::new(&env);
        records.create_record(&key, &record);
        records.change_patient(&key, &patient);

        let mut expected = record;
        expected.patient = patient;
        prop_assert_eq!(records.query_record(&key), expected);
    }

    /// **Property**: all built-in invariants hold under random action sequences.
    #[test]
    fn prop_invariants_hold_under_random_actions(actions in records_action_sequence(20)) {
        let env = TestEnv::new();
        let records = RecordsHarness::new(&env);
        let mut explorer = StateExplorer::with_defaults(&records);

        let result = explorer.explore(&actions);
        prop_assert!(result.passed(),
            "violations: {:?}", result.summary.invariant_violations);
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Harness & Invariant Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_all_invariants_hold_on_fresh_contract() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);

    let snapshot = records.snapshot(&BTreeMap::new());
    assert_eq!(snapshot.raw_scan, b"[]".to_vec());
    assert!(InvariantSet::records_defaults().check_all(&snapshot).is_empty());
}

#[test]
fn test_invariants_hold_after_seeding() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    records.init_ledger();

    let model: BTreeMap<_, _> = seed::seed_records().collect();
    let snapshot = records.snapshot(&model);
    assert_eq!(snapshot.members().unwrap().len(), 12);
    assert!(InvariantSet::records_defaults().check_all(&snapshot).is_empty());
}

#[test]
fn test_seeding_twice_keeps_twelve_records() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    records.init_ledger();
    records.init_ledger();

    let model: BTreeMap<_, _> = seed::seed_records().collect();
    assert_eq!(records.snapshot(&model).members().unwrap().len(), 12);
}

#[test]
fn test_out_of_window_record_is_queryable_but_not_scanned() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let record = MedicalRecord::new("A", "B", "C", "D");
    records.create_record("REC999", &record);
    records.create_record("PAT-7", &record);

    assert_eq!(records.query_record("REC999"), record);
    assert_eq!(records.query_record("PAT-7"), record);

    let model = model_of(&[("REC999", record.clone()), ("PAT-7", record)]);
    let snapshot = records.snapshot(&model);
    assert!(snapshot.members().unwrap().is_empty());
    assert!(InvariantSet::records_defaults().check_all(&snapshot).is_empty());
}

#[test]
fn test_json_sensitive_fields_survive_scan() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let record = MedicalRecord::new("O\"Brien \\ Jr", "Dr. Chloé", "X-ray\tchest", "中 12");
    records.create_record("REC3", &record);

    let members = records
        .snapshot(&model_of(&[("REC3", record.clone())]))
        .members()
        .unwrap();
    assert_eq!(members, vec![("REC3".to_string(), record)]);
}

#[test]
fn test_contract_errors_are_reported() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);

    assert_eq!(
        records.try_dispatch("createRecord", &["REC0", "A"]),
        Err(ContractError::IncorrectArgumentCount)
    );
    assert_eq!(
        records.try_dispatch("dropTable", &[]),
        Err(ContractError::InvalidFunction)
    );
    assert!(records.try_dispatch("queryAllRecords", &["ignored"]).is_ok());
}

// ═════════════════════════════════════════════════════════════════════════════
//  State Explorer Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_explorer_simple_sequence() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let mut explorer = StateExplorer::with_defaults(&records);

    let actions = vec![
        RecordsAction::InitLedger,
        RecordsAction::CreateRecord {
            key: "REC12".into(),
            record: MedicalRecord::new("A", "B", "C", "D"),
        },
        RecordsAction::ChangePatient {
            key: "REC0".into(),
            patient: "Renamed".into(),
        },
        RecordsAction::QueryRecord { key: "REC0".into() },
        RecordsAction::QueryAllRecords,
    ];

    let result = explorer.explore(&actions);
    assert!(result.passed(), "{:?}", result.summary.invariant_violations);
    assert_eq!(result.summary.actions_executed, 5);
    assert_eq!(result.summary.invariant_checks, 5);
    assert_eq!(result.model.len(), 13);
    assert_eq!(result.model["REC0"].patient, "Renamed");
}

#[test]
fn test_explorer_records_expected_errors() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let mut explorer = StateExplorer::with_defaults(&records);

    let actions = vec![
        RecordsAction::WrongArity {
            function: "changeRecordPatient",
            args: vec!["REC1".into()],
        },
        RecordsAction::UnknownFunction {
            name: "deleteRecord".into(),
        },
    ];

    let result = explorer.explore(&actions);
    assert!(result.passed());
    assert_eq!(
        result.action_log[0].1,
        ActionOutcome::ExpectedError(ContractError::IncorrectArgumentCount as u32)
    );
    assert_eq!(
        result.action_log[1].1,
        ActionOutcome::ExpectedError(ContractError::InvalidFunction as u32)
    );
    assert!(result.model.is_empty());
}

#[test]
fn test_explorer_coverage_tracking() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let mut explorer = StateExplorer::with_defaults(&records);

    let actions = vec![
        RecordsAction::InitLedger,
        RecordsAction::CreateRecord {
            key: "REC1".into(),
            record: MedicalRecord::default(),
        },
        RecordsAction::ChangePatient {
            key: "REC1".into(),
            patient: "P".into(),
        },
        RecordsAction::QueryRecord { key: "REC1".into() },
        RecordsAction::QueryAllRecords,
    ];

    let result = explorer.explore(&actions);
    assert!(result.passed());
    assert_eq!(result.summary.entry_point_coverage(ENTRY_POINT_COUNT), 1.0);
}

#[test]
fn test_explorer_respects_max_steps_and_snapshots() {
    let env = TestEnv::new();
    let records = RecordsHarness::new(&env);
    let config = ExplorerConfig {
        max_steps: 2,
        fail_fast: true,
        record_snapshots: true,
    };
    let mut explorer = StateExplorer::new(&records, InvariantSet::records_defaults(), config);

    let actions = vec![RecordsAction::QueryAllRecords; 5];
    let result = explorer.explore(&actions);
    assert_eq!(result.summary.actions_executed, 2);
    // Initial snapshot plus one per step.
    assert_eq!(result.snapshots.len(), 3);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Mutation Detection
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_mutation_trailing_comma_detected() {
    let snapshot = snapshot_of(
        r#"[{"Key":"REC0", "Record":{"patient":"","doctor":"","procedure":"","cost":""}},]"#,
        BTreeMap::new(),
    );
    let violations = InvariantSet::records_defaults().check_all(&snapshot);
    assert!(violations.iter().any(|(name, _)| name.contains("JSON array")));
}

#[test]
fn test_mutation_unsorted_keys_detected() {
    let snapshot = snapshot_of(
        r#"[{"Key":"REC2", "Record":{}}, {"Key":"REC10", "Record":{}}]"#,
        BTreeMap::new(),
    );
    assert!(AscendingKeys.check(&snapshot).is_err());
}

#[test]
fn test_mutation_out_of_window_key_detected() {
    let snapshot = snapshot_of(r#"[{"Key":"REC999", "Record":{}}]"#, BTreeMap::new());
    assert!(WindowRespected.check(&snapshot).is_err());
}

#[test]
fn test_mutation_stale_record_detected() {
    let model = model_of(&[("REC4", MedicalRecord::new("New", "B", "C", "D"))]);
    let snapshot = snapshot_of(
        r#"[{"Key":"REC4", "Record":{"patient":"Old","doctor":"B","procedure":"C","cost":"D"}}]"#,
        model,
    );
    assert!(MatchesModel.check(&snapshot).is_err());
}

#[test]
fn test_matches_model_ignores_unscanned_model_entries() {
    let model = model_of(&[("PAT-1", MedicalRecord::default())]);
    let snapshot = snapshot_of("[]", model);
    assert!(MatchesModel.check(&snapshot).is_ok());
}
