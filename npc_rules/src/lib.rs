//! # NPC Rules
//!
//! The data crate for NPC conversations: dialog nodes, the per-NPC dialog
//! mapping, and the loader that builds them from JSON descriptions.
//! This crate holds no simulation logic; see `dialog_core` for the walker.

pub mod dialog;
pub mod loader;
pub mod npc;

pub use dialog::*;
pub use loader::*;
pub use npc::*;
