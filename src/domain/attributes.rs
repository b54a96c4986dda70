//! Input records for the two scenarios, with their value sets and ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Three-step ordinal used for parent involvement and class participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Level {
    /// Parse the value of `field` (`parentInvolvement` or `participation`).
    pub fn parse_field(field: &'static str, s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "medium" => Ok(Level::Medium),
            "high" => Ok(Level::High),
            other => Err(DomainError::invalid_input(
                field,
                format!("'{other}' is not one of Low, Medium, High"),
            )),
        }
    }
}

impl FromStr for Level {
    type Err = DomainError;

    /// Field-agnostic parse; errors name `level`. Use [`Level::parse_field`]
    /// when the attribute is known.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("level", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestPain {
    #[serde(rename = "Severe/Radiating")]
    SevereRadiating,
    #[serde(rename = "Mild/Occasional")]
    MildOccasional,
}

impl ChestPain {
    pub fn as_str(self) -> &'static str {
        match self {
            ChestPain::SevereRadiating => "Severe/Radiating",
            ChestPain::MildOccasional => "Mild/Occasional",
        }
    }
}

impl fmt::Display for ChestPain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChestPain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "severe/radiating" | "severe" => Ok(ChestPain::SevereRadiating),
            "mild/occasional" | "mild" => Ok(ChestPain::MildOccasional),
            other => Err(DomainError::invalid_input(
                "chestPain",
                format!("'{other}' is not one of Severe/Radiating, Mild/Occasional"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcgResult {
    Normal,
    Abnormal,
}

impl EcgResult {
    pub fn as_str(self) -> &'static str {
        match self {
            EcgResult::Normal => "Normal",
            EcgResult::Abnormal => "Abnormal",
        }
    }
}

impl fmt::Display for EcgResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcgResult {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(EcgResult::Normal),
            "abnormal" => Ok(EcgResult::Abnormal),
            other => Err(DomainError::invalid_input(
                "ecg",
                format!("'{other}' is not one of Normal, Abnormal"),
            )),
        }
    }
}

/// Values classified by the student performance tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Percent, 0–100.
    pub attendance_rate: f64,
    /// Percent, 0–100.
    pub homework_completion: f64,
    pub parent_involvement: Level,
    /// 0–100.
    pub quiz_score: f64,
    pub participation: Level,
    /// Hours per week, 0–10 in half-hour steps.
    pub study_hours: f64,
}

impl StudentRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_range("attendanceRate", self.attendance_rate, 0.0, 100.0)?;
        check_range("homeworkCompletion", self.homework_completion, 0.0, 100.0)?;
        check_range("quizScore", self.quiz_score, 0.0, 100.0)?;
        check_range("studyHours", self.study_hours, 0.0, 10.0)?;
        if (self.study_hours * 2.0).fract() != 0.0 {
            return Err(DomainError::invalid_input(
                "studyHours",
                format!("{} is not a multiple of 0.5", self.study_hours),
            ));
        }
        Ok(())
    }
}

/// Values classified by the cardiac triage tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub chest_pain: ChestPain,
    pub ecg: EcgResult,
    /// Systolic, mmHg, 100–200.
    pub blood_pressure: f64,
    /// mg/dL, 150–350.
    pub cholesterol: f64,
}

impl PatientRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_range("bloodPressure", self.blood_pressure, 100.0, 200.0)?;
        check_range("cholesterol", self.cholesterol, 150.0, 350.0)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), DomainError> {
    if value.is_nan() {
        return Err(DomainError::invalid_input(field, "value is not a number"));
    }
    if value < min || value > max {
        return Err(DomainError::invalid_input(
            field,
            format!("{value} is outside {min}–{max}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn student() -> StudentRecord {
        StudentRecord {
            attendance_rate: 80.0,
            homework_completion: 60.0,
            parent_involvement: Level::Medium,
            quiz_score: 70.0,
            participation: Level::Low,
            study_hours: 4.5,
        }
    }

    #[rstest]
    #[case("High", Level::High)]
    #[case("medium", Level::Medium)]
    #[case(" LOW ", Level::Low)]
    fn given_level_text_when_parsing_then_matches(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(input.parse::<Level>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_category_when_parsing_then_invalid_input() {
        let err = "sometimes".parse::<Level>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput { field: "level", .. }));
        assert!("Severe/Radiating".parse::<ChestPain>().is_ok());
        assert!("flat".parse::<EcgResult>().is_err());
    }

    #[rstest]
    #[case("parentInvolvement")]
    #[case("participation")]
    fn given_known_field_when_parsing_level_then_error_names_field(#[case] field: &'static str) {
        match Level::parse_field(field, "sometimes") {
            Err(DomainError::InvalidInput { field: named, .. }) => assert_eq!(named, field),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(Level::parse_field(field, "HIGH").unwrap(), Level::High);
    }

    #[test]
    fn given_in_range_student_when_validating_then_ok() {
        assert!(student().validate().is_ok());
    }

    #[rstest]
    #[case::negative_attendance(StudentRecord { attendance_rate: -1.0, ..student() }, "attendanceRate")]
    #[case::quiz_over_100(StudentRecord { quiz_score: 101.0, ..student() }, "quizScore")]
    #[case::quarter_hour(StudentRecord { study_hours: 2.25, ..student() }, "studyHours")]
    #[case::nan_homework(StudentRecord { homework_completion: f64::NAN, ..student() }, "homeworkCompletion")]
    fn given_out_of_range_student_when_validating_then_names_field(
        #[case] record: StudentRecord,
        #[case] expected_field: &str,
    ) {
        match record.validate() {
            Err(DomainError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[rstest]
    #[case::bp_low_edge(100.0, 150.0, None)]
    #[case::bp_high_edge(200.0, 350.0, None)]
    #[case::bp_below(99.0, 200.0, Some("bloodPressure"))]
    #[case::bp_above(201.0, 200.0, Some("bloodPressure"))]
    #[case::cholesterol_below(140.0, 149.0, Some("cholesterol"))]
    #[case::cholesterol_above(140.0, 351.0, Some("cholesterol"))]
    fn given_patient_values_when_validating_then_uses_slider_ranges(
        #[case] blood_pressure: f64,
        #[case] cholesterol: f64,
        #[case] expected_field: Option<&str>,
    ) {
        let patient = PatientRecord {
            chest_pain: ChestPain::SevereRadiating,
            ecg: EcgResult::Normal,
            blood_pressure,
            cholesterol,
        };
        match (patient.validate(), expected_field) {
            (Ok(()), None) => {}
            (Err(DomainError::InvalidInput { field, .. }), Some(expected)) => {
                assert_eq!(field, expected)
            }
            (other, _) => panic!("unexpected {other:?} for {patient:?}"),
        }
    }

    #[test]
    fn given_patient_json_when_deserializing_then_uses_literal_categories() {
        let json = r#"{"chestPain":"Mild/Occasional","ecg":"Normal","bloodPressure":120,"cholesterol":190}"#;
        let patient: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(patient.chest_pain, ChestPain::MildOccasional);
        assert_eq!(patient.blood_pressure, 120.0);
        assert!(patient.validate().is_ok());
    }
}
