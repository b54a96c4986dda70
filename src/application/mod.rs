//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic for callers such as the CLI.

pub mod error;
pub mod error_ext;
pub mod playback;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use playback::{NodeStatus, Phase, PhaseAction, Playback};
