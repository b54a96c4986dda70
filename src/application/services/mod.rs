//! Application services
//!
//! Services orchestrate domain logic for a single scenario request.

pub mod scenario;
pub mod session;

pub use scenario::ScenarioService;
pub use session::{Answer, BranchOption, DecisionSession};
