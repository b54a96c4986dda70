//! Read-only access to a fixed, table-backed decision tree.

use tracing::instrument;

use crate::domain::entities::{Edge, NodeId, TreeNode};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Id of the root node in every table.
pub const ROOT: NodeId = 0;

/// A frozen node table. Node `i` lives at index `i`; parents are ids, never pointers.
#[derive(Debug, Clone, Copy)]
pub struct DecisionTree {
    nodes: &'static [TreeNode],
}

impl DecisionTree {
    pub const fn new(nodes: &'static [TreeNode]) -> Self {
        Self { nodes }
    }

    /// The full, ordered node list.
    pub fn nodes(&self) -> &'static [TreeNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&'static TreeNode> {
        self.nodes.get(id)
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&'static TreeNode> {
        self.get(id).ok_or(DomainError::UnknownNode(id))
    }

    pub fn root(&self) -> Option<&'static TreeNode> {
        self.get(ROOT)
    }

    /// Children of `id` in ascending id order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &'static TreeNode> {
        let nodes = self.nodes;
        nodes.iter().filter(move |n| n.parent == Some(id))
    }

    /// Every parent → child pair, in node-table order.
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .filter_map(|n| n.parent.map(|p| Edge::new(p, n.id)))
            .collect()
    }

    pub fn has_edge(&self, edge: Edge) -> bool {
        self.get(edge.to)
            .is_some_and(|child| child.parent == Some(edge.from))
    }

    pub fn leaves(&self) -> Vec<&'static TreeNode> {
        self.nodes.iter().filter(|n| n.is_leaf).collect()
    }

    /// Number of edges on the longest root-to-leaf path (root only = 0).
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.calculate_depth(ROOT)
        }
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        self.children(id)
            .map(|child| 1 + self.calculate_depth(child.id))
            .max()
            .unwrap_or(0)
    }

    /// Node ids from the root down to `id`, following parent links.
    pub fn path_to(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut path = vec![self.node(id)?.id];
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            if path.len() > self.len() {
                return Err(DomainError::MalformedTree {
                    node: id,
                    message: "parent links form a cycle".into(),
                });
            }
            current = self.node(parent)?;
            path.push(current.id);
        }
        path.reverse();
        Ok(path)
    }

    /// Depth-first, pre-order walk from the root.
    pub fn iter(&self) -> PreOrder {
        PreOrder::new(*self)
    }

    /// Check the structural invariants every table must hold.
    pub fn validate(&self) -> TreeResult<()> {
        let malformed = |node: NodeId, message: &str| DomainError::MalformedTree {
            node,
            message: message.to_string(),
        };

        let mut roots = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.id != idx {
                return Err(malformed(idx, "id does not match table position"));
            }
            match node.parent {
                None => {
                    roots += 1;
                    if node.level != 0 || node.id != ROOT {
                        return Err(malformed(node.id, "root must be node 0 at level 0"));
                    }
                    if node.decision_label.is_some() {
                        return Err(malformed(node.id, "root carries a decision label"));
                    }
                }
                Some(parent_id) => {
                    let parent = self
                        .get(parent_id)
                        .ok_or_else(|| malformed(node.id, "parent does not exist"))?;
                    if parent_id >= node.id {
                        return Err(malformed(node.id, "parent must precede child"));
                    }
                    if node.level != parent.level + 1 {
                        return Err(malformed(node.id, "level is not parent level + 1"));
                    }
                    if node.decision_label.is_none() {
                        return Err(malformed(node.id, "missing decision label"));
                    }
                }
            }

            let has_children = self.children(node.id).next().is_some();
            if node.is_leaf == has_children {
                return Err(malformed(node.id, "leaf flag disagrees with children"));
            }
            if node.is_leaf != node.outcome.is_some() {
                return Err(malformed(node.id, "outcome present iff leaf"));
            }
        }

        if roots != 1 {
            return Err(malformed(ROOT, "tree must have exactly one root"));
        }
        if self.iter().count() != self.len() {
            return Err(malformed(ROOT, "not every node is reachable from the root"));
        }
        Ok(())
    }
}

/// Pre-order iterator over a [`DecisionTree`].
pub struct PreOrder {
    tree: DecisionTree,
    stack: Vec<NodeId>,
}

impl PreOrder {
    fn new(tree: DecisionTree) -> Self {
        let stack = tree.root().map(|r| vec![r.id]).unwrap_or_default();
        Self { tree, stack }
    }
}

impl Iterator for PreOrder {
    type Item = &'static TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.tree.get(self.stack.pop()?)?;
        // Reverse push keeps children left-to-right
        let mut children: Vec<NodeId> = self.tree.children(current.id).map(|c| c.id).collect();
        children.reverse();
        self.stack.extend(children);
        Some(current)
    }
}
