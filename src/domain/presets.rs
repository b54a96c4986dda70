//! Named example profiles for each scenario.

use serde::Serialize;

use crate::domain::attributes::{ChestPain, EcgResult, Level, PatientRecord, StudentRecord};
use crate::domain::error::DomainError;
use crate::domain::scenario::{Attributes, Domain};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub attributes: Attributes,
}

const fn student(
    name: &'static str,
    description: &'static str,
    record: StudentRecord,
) -> Preset {
    Preset {
        name,
        description,
        attributes: Attributes::Student(record),
    }
}

const fn patient(
    name: &'static str,
    description: &'static str,
    record: PatientRecord,
) -> Preset {
    Preset {
        name,
        description,
        attributes: Attributes::Cardiology(record),
    }
}

static STUDENT_PRESETS: [Preset; 5] = [
    student(
        "Excellent Student",
        "High achiever with great attendance and study habits",
        StudentRecord {
            attendance_rate: 95.0,
            homework_completion: 90.0,
            parent_involvement: Level::High,
            quiz_score: 88.0,
            participation: Level::High,
            study_hours: 6.0,
        },
    ),
    student(
        "Average Performer",
        "Moderate performance across all metrics",
        StudentRecord {
            attendance_rate: 75.0,
            homework_completion: 65.0,
            parent_involvement: Level::Medium,
            quiz_score: 70.0,
            participation: Level::Medium,
            study_hours: 3.0,
        },
    ),
    student(
        "Struggling Student",
        "Low attendance and engagement, needs support",
        StudentRecord {
            attendance_rate: 55.0,
            homework_completion: 40.0,
            parent_involvement: Level::Low,
            quiz_score: 45.0,
            participation: Level::Low,
            study_hours: 1.0,
        },
    ),
    student(
        "Improving Learner",
        "Good attendance but inconsistent homework",
        StudentRecord {
            attendance_rate: 85.0,
            homework_completion: 55.0,
            parent_involvement: Level::Medium,
            quiz_score: 68.0,
            participation: Level::Low,
            study_hours: 2.5,
        },
    ),
    student(
        "High Potential",
        "Strong scores but low study hours",
        StudentRecord {
            attendance_rate: 90.0,
            homework_completion: 80.0,
            parent_involvement: Level::High,
            quiz_score: 82.0,
            participation: Level::High,
            study_hours: 2.0,
        },
    ),
];

static CARDIOLOGY_PRESETS: [Preset; 5] = [
    patient(
        "Critical Emergency",
        "Severe chest pain with abnormal ECG",
        PatientRecord {
            chest_pain: ChestPain::SevereRadiating,
            ecg: EcgResult::Abnormal,
            blood_pressure: 160.0,
            cholesterol: 280.0,
        },
    ),
    patient(
        "High Risk Patient",
        "Severe symptoms with elevated vitals",
        PatientRecord {
            chest_pain: ChestPain::SevereRadiating,
            ecg: EcgResult::Normal,
            blood_pressure: 155.0,
            cholesterol: 260.0,
        },
    ),
    patient(
        "Moderate Risk",
        "Mild symptoms with some abnormalities",
        PatientRecord {
            chest_pain: ChestPain::MildOccasional,
            ecg: EcgResult::Abnormal,
            blood_pressure: 145.0,
            cholesterol: 220.0,
        },
    ),
    patient(
        "Low Risk",
        "Mild symptoms with normal vitals",
        PatientRecord {
            chest_pain: ChestPain::MildOccasional,
            ecg: EcgResult::Normal,
            blood_pressure: 125.0,
            cholesterol: 180.0,
        },
    ),
    patient(
        "Preventive Care",
        "Occasional discomfort, healthy vitals",
        PatientRecord {
            chest_pain: ChestPain::MildOccasional,
            ecg: EcgResult::Normal,
            blood_pressure: 120.0,
            cholesterol: 190.0,
        },
    ),
];

pub fn presets(domain: Domain) -> &'static [Preset] {
    match domain {
        Domain::Student => &STUDENT_PRESETS,
        Domain::Cardiology => &CARDIOLOGY_PRESETS,
    }
}

/// Find a preset by case-insensitive name or by 0-based index.
pub fn find_preset(domain: Domain, key: &str) -> Result<&'static Preset, DomainError> {
    let list = presets(domain);
    let key = key.trim();
    if let Ok(index) = key.parse::<usize>() {
        return list
            .get(index)
            .ok_or_else(|| DomainError::UnknownPreset(key.to_string()));
    }
    list.iter()
        .find(|p| p.name.eq_ignore_ascii_case(key))
        .ok_or_else(|| DomainError::UnknownPreset(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_every_preset_when_validating_then_ok() {
        for domain in Domain::ALL {
            for preset in presets(domain) {
                assert_eq!(preset.attributes.domain(), domain, "{}", preset.name);
                preset.attributes.validate().unwrap();
            }
        }
    }

    #[test]
    fn given_name_or_index_when_finding_then_resolves() {
        let by_name = find_preset(Domain::Student, "improving learner").unwrap();
        let by_index = find_preset(Domain::Student, "3").unwrap();
        assert_eq!(by_name, by_index);
        assert!(matches!(
            find_preset(Domain::Cardiology, "Hypochondriac"),
            Err(DomainError::UnknownPreset(_))
        ));
        assert!(find_preset(Domain::Cardiology, "5").is_err());
    }
}
