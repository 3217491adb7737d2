//! Dialog node definitions.

use serde::{Deserialize, Serialize};

/// Identifier of a dialog node, unique within one NPC's dialog mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single utterance with an optional link to the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogNode {
    pub id: NodeId,
    pub text: String,
    /// Not checked against the mapping at load time.
    #[serde(default)]
    pub next_id: Option<NodeId>,
    /// Flag set to `true` when this node is visited.
    #[serde(default)]
    pub set_flag: Option<String>,
}

impl DialogNode {
    /// Create a terminal node with no flag.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            text: text.into(),
            next_id: None,
            set_flag: None,
        }
    }

    /// Link this node to the next one.
    pub fn with_next(mut self, next_id: impl Into<String>) -> Self {
        self.next_id = Some(NodeId::new(next_id));
        self
    }

    /// Set a flag when this node is visited.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.set_flag = Some(flag.into());
        self
    }

    /// Check if the walk ends after this node.
    pub fn is_terminal(&self) -> bool {
        self.next_id.is_none()
    }
}
