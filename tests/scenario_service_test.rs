//! Integration tests for ScenarioService: domain lookup, validation and attribute loading.

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use dtviz::domain::{Attributes, ChestPain, Outcome, PatientRecord, StudentRecord, Level};
use dtviz::util::testing;
use dtviz::{ApplicationError, DomainError, ScenarioService};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn out_of_range_student() -> Attributes {
    StudentRecord {
        attendance_rate: -5.0,
        homework_completion: 40.0,
        parent_involvement: Level::Low,
        quiz_score: 45.0,
        participation: Level::Low,
        study_hours: 1.0,
    }
    .into()
}

#[rstest]
#[case("student", 13)]
#[case("cardiology", 13)]
#[case("cardiologist", 13)]
fn given_domain_key_when_getting_nodes_then_returns_table(#[case] key: &str, #[case] len: usize) {
    let nodes = ScenarioService::default().get_nodes(key).unwrap();
    assert_eq!(nodes.len(), len);
    for (index, node) in nodes.iter().enumerate() {
        assert_eq!(node.id, index);
    }
}

#[test]
fn given_unknown_domain_when_executing_then_invalid_domain() {
    let service = ScenarioService::default();
    let attributes = service.preset("student", "0").unwrap().attributes;

    let err = service
        .execute_decision_tree("astrology", &attributes)
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidDomain(ref key)) if key == "astrology"
    ));
}

#[test]
fn given_mismatched_attributes_when_executing_then_invalid_input() {
    let service = ScenarioService::default();
    let attributes = service.preset("student", "0").unwrap().attributes;

    let err = service
        .execute_decision_tree("cardiology", &attributes)
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidInput { field: "domain", .. })
    ));
}

#[test]
fn given_out_of_range_value_when_strict_then_refuses_without_steps() {
    let err = ScenarioService::new(true)
        .execute_decision_tree("student", &out_of_range_student())
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidInput {
            field: "attendanceRate",
            ..
        })
    ));
}

#[test]
fn given_out_of_range_value_when_lenient_then_classifies_anyway() {
    let trace = ScenarioService::new(false)
        .trace("student", &out_of_range_student())
        .unwrap();
    assert_eq!(trace.path, vec![0, 1, 2]);
}

#[test]
fn given_bare_record_file_when_loading_then_tags_with_requested_domain() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patient.json");
    fs::write(
        &path,
        r#"{"chestPain": "Severe/Radiating", "ecg": "Normal", "bloodPressure": 140, "cholesterol": 240}"#,
    )
    .unwrap();

    let service = ScenarioService::default();
    let attributes = service.load_attributes("cardiology", &path).unwrap();

    assert_eq!(
        attributes,
        Attributes::Cardiology(PatientRecord {
            chest_pain: ChestPain::SevereRadiating,
            ecg: dtviz::domain::EcgResult::Normal,
            blood_pressure: 140.0,
            cholesterol: 240.0,
        })
    );
    let trace = service.trace("cardiology", &attributes).unwrap();
    assert_eq!(trace.outcome, Some(Outcome::Treatment));
}

#[test]
fn given_tagged_record_of_other_domain_when_tracing_then_invalid_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("student.json");
    fs::write(
        &path,
        r#"{"domain": "student", "attendanceRate": 95, "homeworkCompletion": 90,
            "parentInvolvement": "High", "quizScore": 88, "participation": "High", "studyHours": 6}"#,
    )
    .unwrap();

    let service = ScenarioService::default();
    let attributes = service.load_attributes("cardiology", &path).unwrap();
    assert!(service.trace("cardiology", &attributes).is_err());
    assert!(service.trace("student", &attributes).is_ok());
}

#[test]
fn given_missing_field_when_loading_then_invalid_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patient.json");
    fs::write(&path, r#"{"chestPain": "Mild/Occasional", "ecg": "Normal"}"#).unwrap();

    let err = ScenarioService::default()
        .load_attributes("cardiology", &path)
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidInput { .. })
    ));
}

#[test]
fn given_missing_file_when_loading_then_operation_failed() {
    let dir = TempDir::new().unwrap();
    let err = ScenarioService::default()
        .load_attributes("student", &dir.path().join("nope.json"))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}

#[test]
fn given_preset_and_override_when_tracing_then_override_changes_branch() {
    let service = ScenarioService::default();
    let overrides = vec![("ecg".to_string(), "abnormal".to_string())];
    let attributes = service
        .attributes_with_overrides("cardiology", Some("Preventive Care"), &overrides)
        .unwrap();

    let trace = service.trace("cardiology", &attributes).unwrap();
    assert_eq!(trace.path, vec![0, 8, 9, 11]);
    assert_eq!(trace.outcome, Some(Outcome::Counseling));
}
