//! # Dialog Core
//!
//! Replays an NPC's dialog graph from its start node, producing a textual
//! log and the set of flags raised along the way.
//!
//! ## Core Components
//!
//! - **simulator**: The deterministic walker with its cycle guard
//! - **config**: How the walker treats links to nodes that do not exist
//! - **result**: The record a run produces and its JSON form
//!
//! Runs are single-threaded and do no I/O. The seed given to a run is echoed
//! into its result and does not affect the walk.

pub mod config;
pub mod result;
pub mod simulator;

pub use config::*;
pub use result::*;
pub use simulator::*;
