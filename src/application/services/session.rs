//! Interactive decision session
//!
//! Walks a tree one explicit choice at a time instead of evaluating
//! predicates, recording each answer on the way down.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{
    DecisionTree, Domain, DomainError, NodeId, Outcome, StepRecorder, Trace, TreeNode, ROOT,
};

/// A branch that can be taken from the current node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchOption {
    pub index: usize,
    /// Condition text on the edge, e.g. `≥ 50%`.
    pub label: &'static str,
    pub target: NodeId,
}

/// A recorded choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question: &'static str,
    pub label: &'static str,
    pub from: NodeId,
    pub to: NodeId,
}

/// Manual walk over a fixed tree.
#[derive(Debug, Clone)]
pub struct DecisionSession {
    tree: &'static DecisionTree,
    current: NodeId,
    answers: Vec<Answer>,
}

impl DecisionSession {
    pub fn new(domain: Domain) -> Self {
        Self::with_tree(domain.tree())
    }

    pub fn with_tree(tree: &'static DecisionTree) -> Self {
        Self {
            tree,
            current: ROOT,
            answers: Vec::new(),
        }
    }

    pub fn current(&self) -> Result<&'static TreeNode, DomainError> {
        self.tree.node(self.current)
    }

    pub fn is_decision(&self) -> bool {
        self.tree.get(self.current).is_some_and(|n| !n.is_leaf)
    }

    /// Branches out of the current node; empty once a leaf is reached.
    pub fn options(&self) -> Vec<BranchOption> {
        self.tree
            .children(self.current)
            .enumerate()
            .map(|(index, child)| BranchOption {
                index,
                label: child.decision_label.unwrap_or(""),
                target: child.id,
            })
            .collect()
    }

    /// Take branch `index` of the current node and return the node entered.
    #[instrument(level = "debug", skip(self))]
    pub fn choose(&mut self, index: usize) -> Result<&'static TreeNode, DomainError> {
        let node = self.current()?;
        if node.is_leaf {
            return Err(DomainError::NotADecision(node.id));
        }
        let options = self.options();
        let option = options.get(index).ok_or(DomainError::NoSuchBranch {
            node: node.id,
            index,
            available: options.len(),
        })?;

        self.answers.push(Answer {
            question: node.label,
            label: option.label,
            from: node.id,
            to: option.target,
        });
        self.current = option.target;
        debug!(from = node.id, to = option.target, "choose: moved");
        self.current()
    }

    /// Reset, then apply `indices` in order until a leaf is reached.
    ///
    /// Surplus indices after the leaf are ignored.
    pub fn choose_all(&mut self, indices: &[usize]) -> Result<Option<Outcome>, DomainError> {
        self.reset();
        for &index in indices {
            if !self.is_decision() {
                break;
            }
            self.choose(index)?;
        }
        Ok(self.outcome())
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Human-readable answer log, `Question: label` per step.
    pub fn path(&self) -> Vec<String> {
        self.answers
            .iter()
            .map(|a| format!("{}: {}", a.question, a.label))
            .collect()
    }

    /// Visited node ids, root first.
    pub fn node_path(&self) -> Vec<NodeId> {
        std::iter::once(ROOT)
            .chain(self.answers.iter().map(|a| a.to))
            .collect()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.tree.get(self.current).and_then(|n| n.outcome)
    }

    pub fn reset(&mut self) {
        self.current = ROOT;
        self.answers.clear();
    }

    /// Replay the answers so far as an animation sequence.
    pub fn to_trace(&self) -> Trace {
        let root_label = self.tree.root().map(|n| n.display_label()).unwrap_or_default();
        let mut rec = StepRecorder::begin(*self.tree, format!("Starting at {root_label}..."));
        for answer in &self.answers {
            let entered = match self.tree.get(answer.to) {
                Some(node) => match node.outcome {
                    Some(outcome) => format!("Result: {} {}", node.display_label(), outcome.emblem()),
                    None => format!("Evaluating {}...", node.display_label()),
                },
                None => String::new(),
            };
            rec.descend(
                answer.from,
                answer.to,
                format!("{}: {} → {}", answer.question, answer.label, entered_name(self.tree, answer.to)),
                entered,
            );
        }
        rec.finish()
    }
}

fn entered_name(tree: &DecisionTree, id: NodeId) -> String {
    tree.get(id).map(|n| n.display_label()).unwrap_or_default()
}
