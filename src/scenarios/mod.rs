//! Named turn sequences: the built-in catalog and JSON catalog files.
//!
//! A [`Scenario`] pairs a turn sequence with the variable count it plays
//! over plus a name and description for reports. [`standard_scenarios`]
//! returns the six four-variable sequences the solver ships with; user
//! catalogs load from JSON arrays of the same shape:
//!
//! ```json
//! [
//!   {
//!     "name": "1.1",
//!     "description": "Block claims, falsifier assigns first",
//!     "num_vars": 4,
//!     "turns": "F0 F0 V0 V0 F1 F1 V1 V1"
//!   }
//! ]
//! ```
//!
//! Loaded scenarios are validated against their variable count before use,
//! so a catalog with mismatched claim or assignment counts is rejected as a
//! whole.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{SequenceError, TurnSequence};

/// A named turn-sequence record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Short identifier, used for filtering and report labels.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Number of variables in play.
    pub num_vars: usize,
    /// The turn sequence, serialized in the compact text encoding.
    pub turns: TurnSequence,
}

impl Scenario {
    /// Create a scenario record.
    pub fn new(name: &str, description: &str, num_vars: usize, turns: TurnSequence) -> Self {
        Scenario {
            name: name.to_string(),
            description: description.to_string(),
            num_vars,
            turns,
        }
    }

    /// Check the sequence against the scenario's variable count.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.turns
            .validate(self.num_vars)
            .map_err(|source| ScenarioError::Invalid {
                name: self.name.clone(),
                source,
            })
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.turns)
    }
}

/// The six standard four-variable scenarios.
///
/// Families: the `1.x` sequences claim all variables up front and differ in
/// assignment order; the `2.x` pair interleaves claim and assignment rounds
/// and differs in who goes first.
pub fn standard_scenarios() -> Vec<Scenario> {
    let records = [
        (
            "1.1",
            "Block claims, falsifier assigns first",
            "F0 F0 V0 V0 F1 F1 V1 V1",
        ),
        (
            "1.2",
            "Block claims, verifier assigns first",
            "F0 F0 V0 V0 V1 V1 F1 F1",
        ),
        (
            "1.3",
            "Block claims, alternating assignments led by falsifier",
            "F0 F0 V0 V0 F1 V1 F1 V1",
        ),
        (
            "1.4",
            "Block claims, alternating assignments led by verifier",
            "F0 F0 V0 V0 V1 F1 V1 F1",
        ),
        (
            "2.1",
            "Interleaved rounds, falsifier first",
            "F0 F1 V0 V1 F0 F1 V0 V1",
        ),
        (
            "2.2",
            "Interleaved rounds, verifier first",
            "V0 V1 F0 F1 V0 V1 F0 F1",
        ),
    ];

    records
        .iter()
        .map(|&(name, description, text)| {
            let turns = text.parse().expect("built-in sequence is well-formed");
            Scenario::new(name, description, 4, turns)
        })
        .collect()
}

/// Load and validate a scenario catalog from a JSON file.
pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioError> {
    let content =
        fs::read_to_string(path.as_ref()).map_err(|e| ScenarioError::Io(e.to_string()))?;
    from_json_str(&content)
}

/// Parse and validate a scenario catalog from a JSON string.
pub fn from_json_str(json: &str) -> Result<Vec<Scenario>, ScenarioError> {
    let scenarios: Vec<Scenario> =
        serde_json::from_str(json).map_err(|e| ScenarioError::Parse(e.to_string()))?;
    for scenario in &scenarios {
        scenario.validate()?;
    }
    Ok(scenarios)
}

/// Errors raised while loading a scenario catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// The catalog file could not be read.
    Io(String),
    /// The catalog was not valid JSON of the expected shape.
    Parse(String),
    /// A scenario's sequence does not fit its variable count.
    Invalid {
        /// Name of the offending scenario.
        name: String,
        /// The underlying sequence error.
        source: SequenceError,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(msg) => write!(f, "IO error: {}", msg),
            ScenarioError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ScenarioError::Invalid { name, source } => {
                write!(f, "Scenario '{}' is invalid: {}", name, source)
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let scenarios = standard_scenarios();

        assert_eq!(scenarios.len(), 6);
        let names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["1.1", "1.2", "1.3", "1.4", "2.1", "2.2"]);
        for scenario in &scenarios {
            assert_eq!(scenario.num_vars, 4);
            scenario.validate().unwrap();
        }
        assert_eq!(scenarios[0].turns.to_string(), "F0 F0 V0 V0 F1 F1 V1 V1");
    }

    #[test]
    fn test_display() {
        let scenarios = standard_scenarios();
        assert_eq!(
            scenarios[4].to_string(),
            "2.1 [F0 F1 V0 V1 F0 F1 V0 V1]"
        );
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {
                "name": "tiny",
                "description": "Two variables, strict alternation",
                "num_vars": 2,
                "turns": "F0 V0 F1 V1"
            }
        ]"#;

        let scenarios = from_json_str(json).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "tiny");
        assert_eq!(scenarios[0].num_vars, 2);
        assert_eq!(scenarios[0].turns.turns().len(), 4);
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let json = r#"[{ "name": "bare", "num_vars": 2, "turns": "F0 V0 F1 V1" }]"#;

        let scenarios = from_json_str(json).unwrap();
        assert_eq!(scenarios[0].description, "");
    }

    #[test]
    fn test_rejects_count_mismatch() {
        // Sequence is well-formed for two variables, not four
        let json = r#"[{ "name": "short", "num_vars": 4, "turns": "F0 V0 F1 V1" }]"#;

        let err = from_json_str(json).unwrap_err();
        match err {
            ScenarioError::Invalid { name, .. } => assert_eq!(name, "short"),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_token() {
        // The bad token fails at deserialization, before validation
        let json = r#"[{ "name": "typo", "num_vars": 2, "turns": "F0 V0 X1 V1" }]"#;

        let err = from_json_str(json).unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = from_json_str("not json").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = from_json_file("/nonexistent/scenarios.json").unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let scenarios = standard_scenarios();
        let json = serde_json::to_string_pretty(&scenarios).unwrap();
        let parsed = from_json_str(&json).unwrap();

        assert_eq!(parsed, scenarios);
    }
}
