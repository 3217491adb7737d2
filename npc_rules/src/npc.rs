//! NPC definitions: a name, a dialog mapping, and where the conversation starts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dialog::{DialogNode, NodeId};

/// One NPC and its conversation graph.
///
/// Held read-only for the duration of a simulation run. Neither `start_id`
/// nor any node's `next_id` is required to name a node in `dialog`; use
/// [`Npc::validate`] to find such references up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    pub dialog: HashMap<NodeId, DialogNode>,
    pub start_id: NodeId,
}

/// Structural problems found by [`Npc::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    /// `start_id` does not name any node.
    MissingStart { start_id: NodeId },
    /// A node links to an id that is not in the mapping.
    DanglingNext { from: NodeId, to: NodeId },
}

impl std::fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphIssue::MissingStart { start_id } => {
                write!(f, "start_id '{}' does not match any node", start_id)
            }
            GraphIssue::DanglingNext { from, to } => {
                write!(f, "node '{}' links to unknown node '{}'", from, to)
            }
        }
    }
}

impl Npc {
    /// Create an NPC with an empty dialog mapping.
    pub fn new(name: impl Into<String>, start_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dialog: HashMap::new(),
            start_id: NodeId::new(start_id),
        }
    }

    /// Add a node, replacing any node with the same id.
    ///
    /// Returns the replaced node, if any.
    pub fn add_node(&mut self, node: DialogNode) -> Option<DialogNode> {
        self.dialog.insert(node.id.clone(), node)
    }

    /// Builder form of [`Npc::add_node`].
    pub fn with_node(mut self, node: DialogNode) -> Self {
        self.add_node(node);
        self
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&DialogNode> {
        self.dialog.get(id)
    }

    /// The node the conversation starts at, if present.
    pub fn start_node(&self) -> Option<&DialogNode> {
        self.node(&self.start_id)
    }

    /// All node ids, sorted.
    pub fn node_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<_> = self.dialog.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.dialog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialog.is_empty()
    }

    /// Report references that a walk could fail on, without walking.
    ///
    /// A missing start comes first, then dangling links ordered by source id.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        if !self.dialog.contains_key(&self.start_id) {
            issues.push(GraphIssue::MissingStart {
                start_id: self.start_id.clone(),
            });
        }

        for id in self.node_ids() {
            let node = &self.dialog[id];
            if let Some(next) = &node.next_id {
                if !self.dialog.contains_key(next) {
                    issues.push(GraphIssue::DanglingNext {
                        from: id.clone(),
                        to: next.clone(),
                    });
                }
            }
        }

        issues
    }
}
