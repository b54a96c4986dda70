//! Domain entities: core data structures

use std::fmt;

use serde::Serialize;

/// Stable node identifier; equal to the node's position in its table.
pub type NodeId = usize;

/// Display coordinates. Owned by the renderer, never consulted by traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// Terminal classification attached to a leaf.
///
/// The first three belong to the student tree, the rest to the cardiology tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Warning,
    Error,
    Emergency,
    Treatment,
    Lifestyle,
    Counseling,
}

impl Outcome {
    /// Emblem shown next to a revealed leaf.
    pub fn emblem(self) -> &'static str {
        match self {
            Outcome::Success => "⭐",
            Outcome::Warning => "👏",
            Outcome::Error => "⚙️",
            Outcome::Emergency => "🚨",
            Outcome::Treatment => "💊",
            Outcome::Lifestyle => "🏃",
            Outcome::Counseling => "🥗",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Warning => "warning",
            Outcome::Error => "error",
            Outcome::Emergency => "emergency",
            Outcome::Treatment => "treatment",
            Outcome::Lifestyle => "lifestyle",
            Outcome::Counseling => "counseling",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question or terminal classification in a fixed decision tree.
///
/// Parents are referenced by id only; the table owns every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub position: Position,
    /// May contain `\n` where the renderer wraps the label.
    pub label: &'static str,
    pub level: usize,
    pub parent: Option<NodeId>,
    /// Condition on the edge from the parent, e.g. `< 70%`. `None` only on the root.
    #[serde(rename = "decision")]
    pub decision_label: Option<&'static str>,
    pub is_leaf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl TreeNode {
    pub(crate) const fn root(x: u16, y: u16, label: &'static str) -> Self {
        Self {
            id: 0,
            position: Position { x, y },
            label,
            level: 0,
            parent: None,
            decision_label: None,
            is_leaf: false,
            outcome: None,
        }
    }

    pub(crate) const fn decision(
        id: NodeId,
        (x, y): (u16, u16),
        label: &'static str,
        level: usize,
        parent: NodeId,
        decision_label: &'static str,
    ) -> Self {
        Self {
            id,
            position: Position { x, y },
            label,
            level,
            parent: Some(parent),
            decision_label: Some(decision_label),
            is_leaf: false,
            outcome: None,
        }
    }

    pub(crate) const fn leaf(
        id: NodeId,
        (x, y): (u16, u16),
        label: &'static str,
        level: usize,
        parent: NodeId,
        decision_label: &'static str,
        outcome: Outcome,
    ) -> Self {
        Self {
            id,
            position: Position { x, y },
            label,
            level,
            parent: Some(parent),
            decision_label: Some(decision_label),
            is_leaf: true,
            outcome: Some(outcome),
        }
    }

    /// Label on a single line.
    pub fn display_label(&self) -> String {
        self.label.replace('\n', " ")
    }
}

/// A revealed parent → child pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}
