//! Loading NPC descriptions from JSON.
//!
//! The on-disk format lists nodes as an array; the loader keys them by id.
//! Required fields are `name`, `start_id`, `dialog`, and `id`/`text` on each
//! node. Links are not checked here.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::dialog::DialogNode;
use crate::npc::Npc;

/// Failure to produce an [`Npc`] from a description.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read NPC file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON or a missing/mistyped required field.
    #[error("invalid NPC description{}: {source}", describe_path(path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct RawNpc {
    name: String,
    start_id: String,
    dialog: Vec<DialogNode>,
}

impl From<RawNpc> for Npc {
    fn from(raw: RawNpc) -> Self {
        let mut npc = Npc::new(raw.name, raw.start_id);
        for node in raw.dialog {
            let id = node.id.clone();
            if npc.add_node(node).is_some() {
                warn!(npc = %npc.name, node = %id, "duplicate dialog node id; later node wins");
            }
        }
        npc
    }
}

/// Parse an NPC description from a JSON string.
pub fn parse_npc(json: &str) -> Result<Npc, LoadError> {
    let raw: RawNpc =
        serde_json::from_str(json).map_err(|source| LoadError::Parse { path: None, source })?;
    Ok(raw.into())
}

/// Read and parse an NPC description file.
pub fn load_npc(path: impl AsRef<Path>) -> Result<Npc, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let npc = parse_npc(&json).map_err(|err| match err {
        LoadError::Parse { source, .. } => LoadError::Parse {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    })?;

    debug!(npc = %npc.name, nodes = npc.len(), path = %path.display(), "loaded NPC");
    Ok(npc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::NodeId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GUARD: &str = r#"{
        "name": "Guard",
        "start_id": "halt",
        "dialog": [
            {"id": "halt", "text": "Halt!", "next_id": "papers"},
            {"id": "papers", "text": "Papers, please.", "set_flag": "checked", "next_id": null}
        ]
    }"#;

    #[test]
    fn test_parse_npc() {
        let npc = parse_npc(GUARD).unwrap();
        assert_eq!(npc.name, "Guard");
        assert_eq!(npc.start_id, NodeId::from("halt"));
        assert_eq!(npc.len(), 2);

        let papers = npc.node(&NodeId::from("papers")).unwrap();
        assert_eq!(papers.set_flag.as_deref(), Some("checked"));
        assert!(papers.is_terminal());
    }

    #[test]
    fn test_missing_required_fields() {
        let cases = [
            (r#"{"start_id":"a","dialog":[]}"#, "name"),
            (r#"{"name":"X","dialog":[]}"#, "start_id"),
            (r#"{"name":"X","start_id":"a"}"#, "dialog"),
            (r#"{"name":"X","start_id":"a","dialog":[{"text":"hi"}]}"#, "id"),
            (r#"{"name":"X","start_id":"a","dialog":[{"id":"a"}]}"#, "text"),
        ];

        for (json, field) in cases {
            let err = parse_npc(json).unwrap_err();
            assert!(matches!(err, LoadError::Parse { path: None, .. }));
            assert!(
                err.to_string().contains(&format!("missing field `{}`", field)),
                "unexpected message: {}",
                err
            );
        }
    }

    #[test]
    fn test_malformed_field_type() {
        let err = parse_npc(r#"{"name":"X","start_id":"a","dialog":{"id":"a"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_dangling_links_are_not_rejected() {
        let npc = parse_npc(
            r#"{"name":"X","start_id":"missing","dialog":[{"id":"a","text":"A","next_id":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(npc.validate().len(), 2);
    }

    #[test]
    fn test_duplicate_ids_later_wins() {
        let npc = parse_npc(
            r#"{"name":"X","start_id":"a","dialog":[
                {"id":"a","text":"first"},
                {"id":"a","text":"second"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(npc.len(), 1);
        assert_eq!(npc.start_node().unwrap().text, "second");
    }

    #[test]
    fn test_load_npc_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(GUARD.as_bytes()).unwrap();

        let npc = load_npc(file.path()).unwrap();
        assert_eq!(npc.name, "Guard");
    }

    #[test]
    fn test_load_npc_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = load_npc(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_load_npc_parse_error_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_npc(file.path()).unwrap_err();
        match &err {
            LoadError::Parse { path, .. } => assert_eq!(path.as_deref(), Some(file.path())),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
