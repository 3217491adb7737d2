//! The record produced by one simulation run.

use serde::Serialize;
use std::collections::BTreeMap;

/// Output of [`crate::Simulator::run`].
///
/// Flags are kept sorted so two runs over the same input serialize to the
/// same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    pub seed: i64,
    pub log: Vec<String>,
    pub flags: BTreeMap<String, bool>,
}

impl SimulationResult {
    /// Check if a flag was raised during the run.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Render as `{"seed": .., "log": [..], "flags": {..}}`.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SimulationResult {
        SimulationResult {
            seed: 7,
            log: vec!["NPC: Hi".to_string(), "FLAG SET: met=true".to_string()],
            flags: BTreeMap::from([("met".to_string(), true)]),
        }
    }

    #[test]
    fn test_flag_lookup() {
        let result = sample();
        assert!(result.flag("met"));
        assert!(!result.flag("unknown"));
    }

    #[test]
    fn test_compact_json_shape() {
        let json = sample().to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"seed":7,"log":["NPC: Hi","FLAG SET: met=true"],"flags":{"met":true}}"#
        );
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let json = sample().to_json(true).unwrap();
        assert!(json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["flags"]["met"], true);
        assert_eq!(value["log"].as_array().unwrap().len(), 2);
    }
}
