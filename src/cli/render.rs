//! Text rendering of trees, node tables and animation steps

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::application::{NodeStatus, Playback};
use crate::domain::{AnimationStep, DecisionTree, NodeId, TreeNode};

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for DecisionTree {
    fn to_tree_string(&self) -> Tree<String> {
        fn build(tree: &DecisionTree, node: &TreeNode) -> Tree<String> {
            let leaves: Vec<_> = tree.children(node.id).map(|c| build(tree, c)).collect();
            Tree::new(node_caption(node)).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build(self, root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

/// `[3] (≥ 50%) Parent Involvement`, with the outcome emblem on leaves.
pub fn node_caption(node: &TreeNode) -> String {
    let mut caption = format!("[{}]", node.id);
    if let Some(decision) = node.decision_label {
        caption.push_str(&format!(" ({decision})"));
    }
    caption.push(' ');
    caption.push_str(&node.display_label());
    if let Some(outcome) = node.outcome {
        caption.push_str(&format!(" {}", outcome.emblem()));
    }
    caption
}

/// One line per node: id, level, parent, edge condition, label, outcome.
pub fn node_table(tree: &DecisionTree) -> String {
    tree.nodes()
        .iter()
        .map(|n| {
            format!(
                "{:>3}  L{}  {:>6}  {:<20}  {}{}",
                n.id,
                n.level,
                n.parent.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
                n.decision_label.unwrap_or("-"),
                n.display_label(),
                n.outcome
                    .map(|o| format!("  [{o}]"))
                    .unwrap_or_default()
            )
        })
        .join("\n")
}

fn id_list(ids: &[NodeId]) -> String {
    ids.iter().join(",")
}

/// Plain rendering of one step, as used for full dumps.
pub fn step_line(index: usize, step: &AnimationStep) -> String {
    format!(
        "{:>2}. [{}] {}  nodes={{{}}} edges={{{}}}",
        index + 1,
        step.active_node_id,
        step.description,
        id_list(&step.visible_nodes),
        step.visible_edges.iter().join(",")
    )
}

/// Current playback step with node statuses and the edges it just revealed.
pub fn playback_frame(playback: &Playback, tree: &DecisionTree) -> String {
    let Some(step) = playback.current() else {
        return String::new();
    };
    let header = format!(
        "Step {}/{}: {}",
        playback.index() + 1,
        playback.len(),
        step.description
    );
    let nodes = step
        .visible_nodes
        .iter()
        .filter_map(|&id| tree.get(id))
        .map(|node| {
            let label = node.display_label();
            match playback.node_status(tree, node.id) {
                NodeStatus::Active => format!("▶ {}", label.yellow().bold()),
                NodeStatus::Completed => format!("✓ {}", label.green()),
                NodeStatus::Outcome(o) => format!("{} {}", o.emblem(), label.cyan().bold()),
                NodeStatus::Pending | NodeStatus::Hidden => format!("· {label}"),
            }
        })
        .join("  ");
    let fresh = playback.newly_revealed_edges();
    if fresh.is_empty() {
        format!("{header}\n  {nodes}")
    } else {
        format!(
            "{header}\n  {nodes}\n  {} {}",
            "new edge:".dimmed(),
            fresh.iter().join(", ")
        )
    }
}
