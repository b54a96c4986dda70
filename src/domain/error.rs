//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent rejected requests against the fixed trees.
/// These are independent of configuration and terminal concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown domain: {0} (expected 'student' or 'cardiology')")]
    InvalidDomain(String),

    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("node {0} is an outcome, there is nothing left to decide")]
    NotADecision(NodeId),

    #[error("node {node} has no branch #{index} ({available} available)")]
    NoSuchBranch {
        node: NodeId,
        index: usize,
        available: usize,
    },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("malformed tree at node {node}: {message}")]
    MalformedTree { node: NodeId, message: String },
}

impl DomainError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
