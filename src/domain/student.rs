//! Student performance tree and its traversal.

use tracing::{debug, instrument};

use crate::domain::attributes::{Level, StudentRecord};
use crate::domain::entities::{Outcome, TreeNode};
use crate::domain::step::{StepRecorder, Trace};
use crate::domain::tree::DecisionTree;

static NODES: [TreeNode; 13] = [
    TreeNode::root(500, 80, "Attendance Rate"),
    // attendance < 70%
    TreeNode::decision(1, (250, 200), "Homework", 1, 0, "< 70%"),
    TreeNode::leaf(2, (120, 320), "Low Performance", 2, 1, "< 50%", Outcome::Error),
    TreeNode::decision(3, (380, 320), "Parent Involvement", 2, 1, "≥ 50%"),
    TreeNode::leaf(4, (300, 450), "Medium Performance", 3, 3, "High", Outcome::Warning),
    TreeNode::leaf(5, (460, 450), "Low Performance", 3, 3, "Low/Medium", Outcome::Error),
    // attendance ≥ 70%
    TreeNode::decision(6, (750, 200), "Quiz Score", 1, 0, "≥ 70%"),
    TreeNode::leaf(7, (880, 320), "High Performance", 2, 6, "> 75", Outcome::Success),
    TreeNode::decision(8, (620, 320), "Participation", 2, 6, "≤ 75"),
    TreeNode::leaf(9, (730, 450), "Medium Performance", 3, 8, "High", Outcome::Warning),
    TreeNode::decision(10, (510, 450), "Study Hours", 3, 8, "Low"),
    TreeNode::leaf(11, (440, 580), "Medium Performance", 4, 10, "< 3", Outcome::Warning),
    TreeNode::leaf(12, (580, 580), "High Performance", 4, 10, "≥ 3", Outcome::Success),
];

pub static TREE: DecisionTree = DecisionTree::new(&NODES);

const LOW: &str = "Student classified as: Low Performance ⚙️";
const MEDIUM: &str = "Student classified as: Medium Performance 👏";
const HIGH: &str = "Student classified as: High Performance! ⭐";

/// Walk the student tree for `record`.
///
/// Values are not range-checked here; see [`StudentRecord::validate`].
#[instrument(level = "debug", skip(record))]
pub fn trace(record: &StudentRecord) -> Trace {
    let mut rec = StepRecorder::begin(TREE, "Analyzing student: Checking attendance rate...");

    if record.attendance_rate < 70.0 {
        rec.descend(
            0,
            1,
            format!(
                "Attendance is {}% (< 70%) → Taking left branch",
                record.attendance_rate
            ),
            "Evaluating homework completion...",
        );

        if record.homework_completion < 50.0 {
            rec.descend(
                1,
                2,
                format!(
                    "Homework completion is {}% (< 50%) → Final assessment",
                    record.homework_completion
                ),
                LOW,
            );
        } else {
            rec.descend(
                1,
                3,
                format!(
                    "Homework completion is {}% (≥ 50%) → Checking parent involvement",
                    record.homework_completion
                ),
                "Analyzing parent involvement level...",
            );

            if record.parent_involvement == Level::High {
                rec.descend(3, 4, "Parent involvement is High → Final assessment", MEDIUM);
            } else {
                rec.descend(
                    3,
                    5,
                    format!(
                        "Parent involvement is {} → Final assessment",
                        record.parent_involvement
                    ),
                    LOW,
                );
            }
        }
    } else {
        rec.descend(
            0,
            6,
            format!(
                "Attendance is {}% (≥ 70%) → Taking right branch",
                record.attendance_rate
            ),
            "Evaluating quiz score...",
        );

        if record.quiz_score > 75.0 {
            rec.descend(
                6,
                7,
                format!("Quiz score is {} (> 75) → Final assessment", record.quiz_score),
                HIGH,
            );
        } else {
            rec.descend(
                6,
                8,
                format!(
                    "Quiz score is {} (≤ 75) → Checking participation",
                    record.quiz_score
                ),
                "Analyzing class participation level...",
            );

            if record.participation == Level::High {
                rec.descend(8, 9, "Participation is High → Final assessment", MEDIUM);
            } else {
                rec.descend(
                    8,
                    10,
                    format!(
                        "Participation is {} → Checking study hours",
                        record.participation
                    ),
                    "Evaluating weekly study hours...",
                );

                if record.study_hours < 3.0 {
                    rec.descend(
                        10,
                        11,
                        format!(
                            "Study hours: {} hours/week (< 3) → Final assessment",
                            record.study_hours
                        ),
                        MEDIUM,
                    );
                } else {
                    rec.descend(
                        10,
                        12,
                        format!(
                            "Study hours: {} hours/week (≥ 3) → Final assessment",
                            record.study_hours
                        ),
                        HIGH,
                    );
                }
            }
        }
    }

    let trace = rec.finish();
    debug!(leaf = trace.leaf, path = ?trace.path, "student traversal complete");
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_student_table_when_validating_then_ok() {
        TREE.validate().unwrap();
        assert_eq!(TREE.len(), 13);
        assert_eq!(TREE.depth(), 4);
    }

    #[test]
    fn given_boundary_values_when_tracing_then_uses_strict_thresholds() {
        let record = StudentRecord {
            attendance_rate: 70.0,
            homework_completion: 50.0,
            parent_involvement: Level::Low,
            quiz_score: 75.0,
            participation: Level::Medium,
            study_hours: 3.0,
        };
        // 70 goes right, 75 is not > 75, 3 is not < 3
        assert_eq!(trace(&record).path, vec![0, 6, 8, 10, 12]);
    }

    #[test]
    fn given_tiny_attendance_when_tracing_then_prints_plain_decimal() {
        let record = StudentRecord {
            attendance_rate: 1e-7,
            homework_completion: 40.0,
            parent_involvement: Level::Low,
            quiz_score: 0.0,
            participation: Level::Low,
            study_hours: 0.0,
        };
        let steps = trace(&record).steps;
        // f64 Display never switches to exponent notation
        assert_eq!(
            steps[1].description,
            "Attendance is 0.0000001% (< 70%) → Taking left branch"
        );
    }
}
