//! The two fixed scenarios and the attribute record each one consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::attributes::{PatientRecord, StudentRecord};
use crate::domain::error::DomainError;
use crate::domain::step::Trace;
use crate::domain::tree::DecisionTree;
use crate::domain::{cardiology, student};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Student,
    #[serde(alias = "cardiologist")]
    Cardiology,
}

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Student, Domain::Cardiology];

    pub fn key(self) -> &'static str {
        match self {
            Domain::Student => "student",
            Domain::Cardiology => "cardiology",
        }
    }

    pub fn tree(self) -> &'static DecisionTree {
        match self {
            Domain::Student => &student::TREE,
            Domain::Cardiology => &cardiology::TREE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Domain::Student => "Student Performance Analyzer",
            Domain::Cardiology => "Cardiac Health Decision Tree",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Domain::Student => {
                "This decision tree analyzes student performance based on attendance, homework \
                 completion, quiz scores, and other academic metrics to classify students into \
                 performance categories."
            }
            Domain::Cardiology => {
                "This decision tree evaluates cardiac patients based on chest pain severity, ECG \
                 results, blood pressure, and cholesterol levels to determine appropriate medical \
                 interventions."
            }
        }
    }

    /// Attribute names in the order the tree may consult them.
    pub fn attribute_names(self) -> &'static [&'static str] {
        match self {
            Domain::Student => &[
                "attendanceRate",
                "homeworkCompletion",
                "parentInvolvement",
                "quizScore",
                "participation",
                "studyHours",
            ],
            Domain::Cardiology => &["chestPain", "ecg", "bloodPressure", "cholesterol"],
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Domain::Student),
            "cardiology" | "cardiologist" => Ok(Domain::Cardiology),
            _ => Err(DomainError::InvalidDomain(s.to_string())),
        }
    }
}

/// An attribute record tagged with the scenario it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum Attributes {
    Student(StudentRecord),
    #[serde(alias = "cardiologist")]
    Cardiology(PatientRecord),
}

impl Attributes {
    pub fn domain(&self) -> Domain {
        match self {
            Attributes::Student(_) => Domain::Student,
            Attributes::Cardiology(_) => Domain::Cardiology,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Attributes::Student(r) => r.validate(),
            Attributes::Cardiology(r) => r.validate(),
        }
    }

    /// Run the matching traversal. No validation happens here.
    pub fn trace(&self) -> Trace {
        match self {
            Attributes::Student(r) => student::trace(r),
            Attributes::Cardiology(r) => cardiology::trace(r),
        }
    }
}

impl From<StudentRecord> for Attributes {
    fn from(record: StudentRecord) -> Self {
        Attributes::Student(record)
    }
}

impl From<PatientRecord> for Attributes {
    fn from(record: PatientRecord) -> Self {
        Attributes::Cardiology(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("student", Domain::Student)]
    #[case("Cardiology", Domain::Cardiology)]
    #[case("cardiologist", Domain::Cardiology)]
    fn given_key_when_parsing_domain_then_resolves(#[case] key: &str, #[case] expected: Domain) {
        assert_eq!(key.parse::<Domain>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_key_when_parsing_domain_then_invalid_domain() {
        assert_eq!(
            "botany".parse::<Domain>(),
            Err(DomainError::InvalidDomain("botany".into()))
        );
    }

    #[test]
    fn given_tagged_json_when_deserializing_then_picks_variant() {
        let json = r#"{"domain":"cardiologist","chestPain":"Severe/Radiating","ecg":"Abnormal","bloodPressure":160,"cholesterol":280}"#;
        let attrs: Attributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.domain(), Domain::Cardiology);
    }
}
