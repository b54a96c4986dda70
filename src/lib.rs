//! dtviz: walks fixed decision trees and narrates the walk as replayable animation steps.
//!
//! Layers:
//! - [`domain`]: node tables, attribute records, traversal and the step contract (no I/O)
//! - [`application`]: the scenario service, manual sessions and playback
//! - [`cli`]: argument parsing, rendering and dispatch
//! - [`config`]: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::services::{DecisionSession, ScenarioService};
pub use application::{ApplicationError, ApplicationResult, Playback};
pub use domain::{AnimationStep, Attributes, Domain, DomainError, Trace, TreeNode};
