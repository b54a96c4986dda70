//! Animation steps: the contract handed to any renderer.

use serde::Serialize;

use crate::domain::entities::{Edge, NodeId, Outcome};
use crate::domain::tree::{DecisionTree, ROOT};

/// Narration used for the reveal-everything view.
pub const FULL_TREE_DESCRIPTION: &str = "Complete decision tree structure showing all possible paths";

/// One entry of a replayable sequence.
///
/// `visible_nodes` and `visible_edges` are owned snapshots; later steps never alter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationStep {
    pub active_node_id: NodeId,
    pub description: String,
    pub visible_nodes: Vec<NodeId>,
    pub visible_edges: Vec<Edge>,
}

/// A finished traversal: the steps plus the decisions they narrate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub steps: Vec<AnimationStep>,
    /// Root first, reached leaf last.
    pub path: Vec<NodeId>,
    pub leaf: NodeId,
    pub outcome: Option<Outcome>,
}

/// Accumulates the running path and emits snapshot steps.
#[derive(Debug)]
pub struct StepRecorder {
    tree: DecisionTree,
    path: Vec<NodeId>,
    edges: Vec<Edge>,
    steps: Vec<AnimationStep>,
}

impl StepRecorder {
    /// Start at the root with a single step showing only the root.
    pub fn begin(tree: DecisionTree, description: impl Into<String>) -> Self {
        let mut recorder = Self {
            tree,
            path: vec![ROOT],
            edges: Vec::new(),
            steps: Vec::new(),
        };
        recorder.push(ROOT, description.into());
        recorder
    }

    /// Walk the edge `from → to` and narrate it in two steps:
    /// the branch taken (active on `from`), then what happens at `to`.
    ///
    /// Callers pass edges of the recorder's tree; this is checked in debug builds.
    pub fn descend(
        &mut self,
        from: NodeId,
        to: NodeId,
        taken: impl Into<String>,
        entered: impl Into<String>,
    ) -> &mut Self {
        debug_assert!(self.tree.has_edge(Edge::new(from, to)), "{from}→{to} is not an edge");
        debug_assert_eq!(self.path.last(), Some(&from), "descend must continue the path");
        self.path.push(to);
        self.edges.push(Edge::new(from, to));
        self.push(from, taken.into());
        self.push(to, entered.into());
        self
    }

    pub fn current(&self) -> NodeId {
        self.path.last().copied().unwrap_or(ROOT)
    }

    pub fn finish(self) -> Trace {
        let leaf = self.current();
        let outcome = self.tree.get(leaf).and_then(|n| n.outcome);
        Trace {
            steps: self.steps,
            path: self.path,
            leaf,
            outcome,
        }
    }

    fn push(&mut self, active: NodeId, description: String) {
        self.steps.push(AnimationStep {
            active_node_id: active,
            description,
            visible_nodes: self.path.clone(),
            visible_edges: self.edges.clone(),
        });
    }
}

/// Single-step sequence revealing every node and edge; no predicate is evaluated.
pub fn full_structure_snapshot(tree: &DecisionTree) -> Vec<AnimationStep> {
    vec![AnimationStep {
        active_node_id: ROOT,
        description: FULL_TREE_DESCRIPTION.to_string(),
        visible_nodes: tree.nodes().iter().map(|n| n.id).collect(),
        visible_edges: tree.edges(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TreeNode;

    static CHAIN: [TreeNode; 4] = [
        TreeNode::root(0, 0, "Q1"),
        TreeNode::decision(1, (0, 0), "Q2", 1, 0, "a"),
        TreeNode::leaf(2, (0, 0), "Done", 2, 1, "b", Outcome::Success),
        TreeNode::leaf(3, (0, 0), "Other", 1, 0, "c", Outcome::Error),
    ];

    #[test]
    fn given_two_descents_when_finishing_then_steps_are_one_plus_twice_depth() {
        let mut rec = StepRecorder::begin(DecisionTree::new(&CHAIN), "start");
        rec.descend(0, 1, "took a", "at Q2").descend(1, 2, "took b", "done");
        let trace = rec.finish();

        assert_eq!(trace.steps.len(), 5);
        assert_eq!(trace.path, vec![0, 1, 2]);
        assert_eq!(trace.leaf, 2);
        assert_eq!(trace.outcome, Some(Outcome::Success));

        let actives: Vec<_> = trace.steps.iter().map(|s| s.active_node_id).collect();
        assert_eq!(actives, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn given_recorded_steps_when_inspecting_then_snapshots_are_independent() {
        let mut rec = StepRecorder::begin(DecisionTree::new(&CHAIN), "start");
        rec.descend(0, 1, "took a", "at Q2").descend(1, 2, "took b", "done");
        let trace = rec.finish();

        assert_eq!(trace.steps[0].visible_nodes, vec![0]);
        assert!(trace.steps[0].visible_edges.is_empty());
        assert_eq!(trace.steps[1].visible_nodes, vec![0, 1]);
        assert_eq!(trace.steps[2].visible_edges, vec![Edge::new(0, 1)]);
        assert_eq!(
            trace.steps[4].visible_edges,
            vec![Edge::new(0, 1), Edge::new(1, 2)]
        );
    }

    #[test]
    fn given_tree_when_snapshotting_then_reveals_everything() {
        let tree = DecisionTree::new(&CHAIN);
        let snapshot = full_structure_snapshot(&tree);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].visible_nodes, vec![0, 1, 2, 3]);
        assert_eq!(snapshot[0].visible_edges.len(), 3);
        assert_eq!(snapshot[0].description, FULL_TREE_DESCRIPTION);
    }

    #[test]
    fn given_step_when_serializing_then_uses_renderer_keys() {
        let step = AnimationStep {
            active_node_id: 1,
            description: "x".into(),
            visible_nodes: vec![0, 1],
            visible_edges: vec![Edge::new(0, 1)],
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["activeNodeId"], 1);
        assert_eq!(json["visibleEdges"][0]["from"], 0);
        assert_eq!(json["visibleEdges"][0]["to"], 1);
    }
}
