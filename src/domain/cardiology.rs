//! Cardiac triage tree and its traversal.

use tracing::{debug, instrument};

use crate::domain::attributes::{ChestPain, EcgResult, PatientRecord};
use crate::domain::entities::{Outcome, TreeNode};
use crate::domain::step::{StepRecorder, Trace};
use crate::domain::tree::DecisionTree;

static NODES: [TreeNode; 13] = [
    TreeNode::root(500, 80, "Chest Pain"),
    // severe / radiating
    TreeNode::decision(1, (300, 180), "ECG", 1, 0, "Severe/Radiating"),
    TreeNode::leaf(2, (180, 280), "Immediate\nHospitalization", 2, 1, "Abnormal", Outcome::Emergency),
    TreeNode::decision(3, (420, 280), "BP", 2, 1, "Normal"),
    TreeNode::decision(4, (350, 400), "Cholesterol", 3, 3, "≥ 140/90"),
    TreeNode::leaf(5, (260, 520), "Prescribe Statins\n+ Monitoring", 4, 4, "≥ 240", Outcome::Treatment),
    TreeNode::leaf(6, (440, 520), "Lifestyle\nModification", 4, 4, "< 240", Outcome::Lifestyle),
    TreeNode::leaf(7, (560, 400), "Lifestyle\nChanges", 3, 3, "< 140/90", Outcome::Lifestyle),
    // mild / occasional
    TreeNode::decision(8, (700, 180), "ECG", 1, 0, "Mild/Occasional"),
    TreeNode::decision(9, (600, 280), "BP", 2, 8, "Abnormal"),
    TreeNode::leaf(10, (540, 400), "Lifestyle\nChanges", 3, 9, "≥ 140/90", Outcome::Lifestyle),
    TreeNode::leaf(11, (660, 400), "Diet + Exercise\nCounseling", 3, 9, "< 140/90", Outcome::Counseling),
    TreeNode::leaf(12, (800, 280), "Diet + Exercise\nCounseling", 2, 8, "Normal", Outcome::Counseling),
];

pub static TREE: DecisionTree = DecisionTree::new(&NODES);

const BP_THRESHOLD: f64 = 140.0;
const CHOLESTEROL_THRESHOLD: f64 = 240.0;

const ECG_RUNNING: &str = "Performing ECG analysis...";
const MEASURING_BP: &str = "Measuring blood pressure...";
const COUNSELING: &str = "Recommendation: Diet + exercise counseling 🥗";

/// Walk the cardiology tree for `patient`.
///
/// Values are not range-checked here; see [`PatientRecord::validate`].
#[instrument(level = "debug", skip(patient))]
pub fn trace(patient: &PatientRecord) -> Trace {
    let mut rec = StepRecorder::begin(TREE, "Analyzing patient: Evaluating chest pain severity...");

    match patient.chest_pain {
        ChestPain::SevereRadiating => {
            rec.descend(
                0,
                1,
                "Chest pain is severe/radiating → Proceeding with immediate ECG",
                ECG_RUNNING,
            );

            if patient.ecg == EcgResult::Abnormal {
                rec.descend(
                    1,
                    2,
                    "ECG shows abnormalities → Emergency protocol",
                    "URGENT: Immediate hospitalization + emergency care required 🚨",
                );
            } else {
                rec.descend(1, 3, "ECG is normal → Checking blood pressure", MEASURING_BP);

                if patient.blood_pressure >= BP_THRESHOLD {
                    rec.descend(
                        3,
                        4,
                        format!(
                            "BP is {}/90 (≥ 140/90) → Checking cholesterol",
                            patient.blood_pressure
                        ),
                        "Analyzing cholesterol levels...",
                    );

                    if patient.cholesterol >= CHOLESTEROL_THRESHOLD {
                        rec.descend(
                            4,
                            5,
                            format!(
                                "Cholesterol is {} mg/dL (≥ 240) → Medical intervention required",
                                patient.cholesterol
                            ),
                            "Treatment: Prescribe statins + cardiac monitoring 💊",
                        );
                    } else {
                        rec.descend(
                            4,
                            6,
                            format!(
                                "Cholesterol is {} mg/dL (< 240) → Lifestyle changes recommended",
                                patient.cholesterol
                            ),
                            "Recommendation: Lifestyle modification + diet plan 🏃",
                        );
                    }
                } else {
                    rec.descend(
                        3,
                        7,
                        format!(
                            "BP is {}/90 (< 140/90) → Lifestyle management",
                            patient.blood_pressure
                        ),
                        "Recommendation: Lifestyle changes for prevention 🏃",
                    );
                }
            }
        }
        ChestPain::MildOccasional => {
            rec.descend(
                0,
                8,
                "Chest pain is mild/occasional → Standard ECG screening",
                ECG_RUNNING,
            );

            if patient.ecg == EcgResult::Abnormal {
                rec.descend(
                    8,
                    9,
                    "ECG shows abnormalities → Checking blood pressure",
                    MEASURING_BP,
                );

                if patient.blood_pressure >= BP_THRESHOLD {
                    rec.descend(
                        9,
                        10,
                        format!(
                            "BP is {}/90 (≥ 140/90) → Lifestyle intervention",
                            patient.blood_pressure
                        ),
                        "Recommendation: Lifestyle changes required 🏃",
                    );
                } else {
                    rec.descend(
                        9,
                        11,
                        format!(
                            "BP is {}/90 (< 140/90) → Preventive care",
                            patient.blood_pressure
                        ),
                        COUNSELING,
                    );
                }
            } else {
                rec.descend(8, 12, "ECG is normal → Preventive counseling", COUNSELING);
            }
        }
    }

    let trace = rec.finish();
    debug!(leaf = trace.leaf, path = ?trace.path, "cardiology traversal complete");
    trace
}
