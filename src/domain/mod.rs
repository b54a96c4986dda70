//! Domain layer: fixed trees, attribute records and traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod attributes;
pub mod cardiology;
pub mod entities;
pub mod error;
pub mod presets;
pub mod scenario;
pub mod step;
pub mod student;
pub mod tree;

pub use attributes::{ChestPain, EcgResult, Level, PatientRecord, StudentRecord};
pub use entities::*;
pub use error::DomainError;
pub use presets::{find_preset, presets, Preset};
pub use scenario::{Attributes, Domain};
pub use step::{full_structure_snapshot, AnimationStep, StepRecorder, Trace, FULL_TREE_DESCRIPTION};
pub use tree::{DecisionTree, ROOT};
