//! Playback cursor and screen phases
//!
//! Both are driven by the caller; nothing here owns a timer.

use serde::Serialize;
use tracing::debug;

use crate::domain::{AnimationStep, DecisionTree, Edge, NodeId, Outcome};

/// How a node should be drawn at the current playback position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Not revealed yet.
    Hidden,
    /// Subject of the current step.
    Active,
    /// Was active earlier and is a decision node.
    Completed,
    /// Was active earlier and is a leaf.
    Outcome(Outcome),
    /// Revealed but never active so far.
    Pending,
}

/// Index cursor over an owned step sequence.
#[derive(Debug, Clone)]
pub struct Playback {
    steps: Vec<AnimationStep>,
    index: usize,
    playing: bool,
}

impl Playback {
    pub fn new(steps: Vec<AnimationStep>) -> Self {
        Self {
            steps,
            index: 0,
            playing: false,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&AnimationStep> {
        self.steps.get(self.index)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    /// Advance one step. Returns `false` when already on the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Go back one step. Returns `false` on the first step.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.steps.len().saturating_sub(1));
    }

    /// Back to the first step, paused.
    pub fn reset(&mut self) {
        self.index = 0;
        self.playing = false;
    }

    pub fn play(&mut self) {
        self.playing = !self.is_finished();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// One timer tick: advance if playing, pausing on the last step.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        let moved = self.advance();
        if self.is_finished() {
            self.playing = false;
        }
        debug!(index = self.index, moved, "tick");
        moved
    }

    /// Edges visible at the current step that were not visible at the previous one.
    pub fn newly_revealed_edges(&self) -> Vec<Edge> {
        let Some(current) = self.current() else {
            return Vec::new();
        };
        let Some(previous) = self.index.checked_sub(1).and_then(|i| self.steps.get(i)) else {
            return Vec::new();
        };
        current
            .visible_edges
            .iter()
            .filter(|e| !previous.visible_edges.contains(e))
            .copied()
            .collect()
    }

    pub fn node_status(&self, tree: &DecisionTree, id: NodeId) -> NodeStatus {
        let Some(current) = self.current() else {
            return NodeStatus::Hidden;
        };
        if !current.visible_nodes.contains(&id) {
            return NodeStatus::Hidden;
        }
        if current.active_node_id == id {
            return NodeStatus::Active;
        }
        let was_active = self.steps[..self.index]
            .iter()
            .any(|s| s.active_node_id == id);
        if !was_active {
            return NodeStatus::Pending;
        }
        match tree.get(id).and_then(|n| n.outcome) {
            Some(outcome) => NodeStatus::Outcome(outcome),
            None => NodeStatus::Completed,
        }
    }
}

/// Screens of the visualizer, in the order a user normally moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Intro,
    FullTree,
    Playground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    ShowFullTree,
    StartPlayground,
    BackToIntro,
}

impl Phase {
    /// Apply a user action. Actions that make no sense in the current phase leave it unchanged.
    pub fn apply(self, action: PhaseAction) -> Phase {
        let next = match (self, action) {
            (Phase::Intro | Phase::Playground, PhaseAction::ShowFullTree) => Phase::FullTree,
            (Phase::FullTree, PhaseAction::StartPlayground) => Phase::Playground,
            (_, PhaseAction::BackToIntro) => Phase::Intro,
            (phase, _) => phase,
        };
        debug!(from = ?self, ?action, to = ?next, "phase");
        next
    }
}
