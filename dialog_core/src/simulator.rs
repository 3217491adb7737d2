//! The dialog walker.
//!
//! A run follows the single `next_id` chain from the NPC's start node:
//! 1. **Guard**: stop if the current id was already visited
//! 2. **Lookup**: find the node, or apply the [`DanglingPolicy`]
//! 3. **Speak**: log the node's text
//! 4. **Flag**: raise the node's flag, if any, and log it
//! 5. **Advance**: move to `next_id`; a missing link ends the walk
//!
//! The visited set can never grow past the number of nodes, so a run takes
//! at most `npc.len()` steps.

use npc_rules::{DialogNode, NodeId, Npc};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::config::{DanglingPolicy, SimulatorConfig};
use crate::result::SimulationResult;

/// A run that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// `from` is `None` when the NPC's `start_id` itself is missing.
    #[error("dialog node '{id}' not found{}", describe_source(from))]
    DanglingReference { id: NodeId, from: Option<NodeId> },
}

fn describe_source(from: &Option<NodeId>) -> String {
    match from {
        Some(from) => format!(" (linked from '{}')", from),
        None => " (start_id)".to_string(),
    }
}

/// Replays one NPC's dialog once.
///
/// The simulator owns its log and flags exclusively and is consumed by
/// [`Simulator::run`].
pub struct Simulator<'a> {
    npc: &'a Npc,
    seed: i64,
    config: SimulatorConfig,
    log: Vec<String>,
    flags: BTreeMap<String, bool>,
}

impl<'a> Simulator<'a> {
    /// Create a simulator with the default configuration.
    pub fn new(npc: &'a Npc, seed: i64) -> Self {
        Self::with_config(npc, seed, SimulatorConfig::default())
    }

    pub fn with_config(npc: &'a Npc, seed: i64, config: SimulatorConfig) -> Self {
        Self {
            npc,
            seed,
            config,
            log: Vec::new(),
            flags: BTreeMap::new(),
        }
    }

    /// Walk the dialog from `start_id` and package the log and flags.
    ///
    /// Revisiting a node is a normal stop. Reaching an id with no node is
    /// handled according to [`SimulatorConfig::on_dangling`].
    pub fn run(mut self) -> Result<SimulationResult, SimError> {
        let npc = self.npc;
        let mut visited: HashSet<&NodeId> = HashSet::with_capacity(npc.len());
        let mut current = Some(&npc.start_id);
        let mut previous: Option<&NodeId> = None;

        while let Some(id) = current {
            if !visited.insert(id) {
                debug!(npc = %npc.name, node = %id, "loop detected");
                self.log.push(format!("Loop detected at {}; stopping", id));
                break;
            }

            let Some(node) = npc.node(id) else {
                self.on_dangling(id, previous)?;
                break;
            };

            self.visit(node);
            previous = Some(id);
            current = node.next_id.as_ref();
        }

        Ok(SimulationResult {
            seed: self.seed,
            log: self.log,
            flags: self.flags,
        })
    }

    fn visit(&mut self, node: &DialogNode) {
        debug!(npc = %self.npc.name, node = %node.id, "visit");
        self.log.push(format!("NPC: {}", node.text));

        // An empty flag name means no flag.
        if let Some(flag) = node.set_flag.as_ref().filter(|f| !f.is_empty()) {
            self.flags.insert(flag.clone(), true);
            self.log.push(format!("FLAG SET: {}=true", flag));
        }
    }

    fn on_dangling(&mut self, id: &NodeId, from: Option<&NodeId>) -> Result<(), SimError> {
        debug!(npc = %self.npc.name, node = %id, policy = ?self.config.on_dangling, "dangling reference");
        match self.config.on_dangling {
            DanglingPolicy::Abort => Err(SimError::DanglingReference {
                id: id.clone(),
                from: from.cloned(),
            }),
            DanglingPolicy::Stop => {
                self.log.push(format!("Dangling reference to {}; stopping", id));
                Ok(())
            }
        }
    }
}
