//! Turn sequences: ordering, text encoding, and validation.
//!
//! A turn sequence is the fixed, externally supplied ordering of
//! (player, move kind) pairs that governs a game. Sequences carry a compact
//! text encoding, one two-character token per turn: the player letter
//! (`F`/`V`) followed by the move digit (`0` Select, `1` Set), separated by
//! whitespace. `F0 F0 V0 V0 F1 F1 V1 V1` reads "falsifier claims twice,
//! verifier claims twice, falsifier assigns twice, verifier assigns twice".
//!
//! Scenario files store sequences in this encoding, so [`TurnSequence`]
//! serializes as a plain string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::state::{MoveKind, Player, Turn};

/// A fixed ordering of turns governing one game.
///
/// Well-formedness for `n` variables: non-empty, `n` even and non-zero,
/// exactly `n` Select turns and exactly `n` Set turns (hence length `2n`).
/// [`TurnSequence::validate`] checks these preconditions; tree construction
/// refuses malformed sequences up front rather than building partial trees.
///
/// # Example
/// ```
/// use claim_solver::engine::TurnSequence;
///
/// let seq: TurnSequence = "F0 F0 V0 V0 F1 F1 V1 V1".parse().unwrap();
/// assert_eq!(seq.len(), 8);
/// assert!(seq.validate(4).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TurnSequence {
    turns: Vec<Turn>,
}

impl TurnSequence {
    /// Wrap an explicit list of turns.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// The turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when the sequence has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The first turn, if any.
    pub fn first(&self) -> Option<Turn> {
        self.turns.first().copied()
    }

    /// Number of Select turns.
    pub fn select_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.kind == MoveKind::Select)
            .count()
    }

    /// Number of Set turns.
    pub fn set_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.kind == MoveKind::Set)
            .count()
    }

    /// Check the sequence against a variable count.
    ///
    /// Rejects empty sequences, odd or zero `num_vars`, and Select/Set
    /// counts that differ from `num_vars` (every variable must be claimed
    /// exactly once and assigned exactly once).
    pub fn validate(&self, num_vars: usize) -> Result<(), SequenceError> {
        if self.turns.is_empty() {
            return Err(SequenceError::Empty);
        }
        if num_vars == 0 || num_vars % 2 != 0 {
            return Err(SequenceError::OddVariableCount(num_vars));
        }

        let selects = self.select_count();
        if selects != num_vars {
            return Err(SequenceError::SelectCount {
                expected: num_vars,
                actual: selects,
            });
        }

        let sets = self.set_count();
        if sets != num_vars {
            return Err(SequenceError::SetCount {
                expected: num_vars,
                actual: sets,
            });
        }

        Ok(())
    }
}

impl From<Vec<Turn>> for TurnSequence {
    fn from(turns: Vec<Turn>) -> Self {
        Self::new(turns)
    }
}

impl fmt::Display for TurnSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, turn) in self.turns.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", turn)?;
        }
        Ok(())
    }
}

impl FromStr for TurnSequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut turns = Vec::new();
        for token in s.split_whitespace() {
            let mut chars = token.chars();
            let player = match chars.next() {
                Some('F') => Player::Falsifier,
                Some('V') => Player::Verifier,
                _ => return Err(SequenceError::BadToken(token.to_string())),
            };
            let kind = match chars.next() {
                Some('0') => MoveKind::Select,
                Some('1') => MoveKind::Set,
                _ => return Err(SequenceError::BadToken(token.to_string())),
            };
            if chars.next().is_some() {
                return Err(SequenceError::BadToken(token.to_string()));
            }
            turns.push(Turn::new(player, kind));
        }

        if turns.is_empty() {
            return Err(SequenceError::Empty);
        }
        Ok(Self { turns })
    }
}

impl TryFrom<String> for TurnSequence {
    type Error = SequenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TurnSequence> for String {
    fn from(seq: TurnSequence) -> Self {
        seq.to_string()
    }
}

/// Errors raised when parsing or validating a turn sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The sequence contains no turns.
    Empty,
    /// The variable count is zero or odd.
    OddVariableCount(usize),
    /// The number of Select turns differs from the variable count.
    SelectCount {
        /// Required Select turns (one per variable).
        expected: usize,
        /// Select turns actually present.
        actual: usize,
    },
    /// The number of Set turns differs from the variable count.
    SetCount {
        /// Required Set turns (one per variable).
        expected: usize,
        /// Set turns actually present.
        actual: usize,
    },
    /// A token in the compact encoding was not recognized.
    BadToken(String),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Empty => write!(f, "Turn sequence is empty"),
            SequenceError::OddVariableCount(n) => {
                write!(f, "Variable count {} must be even and non-zero", n)
            }
            SequenceError::SelectCount { expected, actual } => {
                write!(
                    f,
                    "Sequence has {} Select turns, expected {} (one per variable)",
                    actual, expected
                )
            }
            SequenceError::SetCount { expected, actual } => {
                write!(
                    f,
                    "Sequence has {} Set turns, expected {} (one per variable)",
                    actual, expected
                )
            }
            SequenceError::BadToken(token) => {
                write!(
                    f,
                    "Unrecognized turn token '{}' (expected F0, F1, V0 or V1)",
                    token
                )
            }
        }
    }
}

impl std::error::Error for SequenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let text = "F0 F0 V0 V0 F1 F1 V1 V1";
        let seq: TurnSequence = text.parse().unwrap();

        assert_eq!(seq.len(), 8);
        assert_eq!(seq.first(), Some(Turn::select(Player::Falsifier)));
        assert_eq!(seq.turns()[7], Turn::set(Player::Verifier));
        assert_eq!(seq.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        for bad in ["F2", "X0", "F01", "F", "f0", "0F"] {
            let err = bad.parse::<TurnSequence>().unwrap_err();
            assert!(
                matches!(err, SequenceError::BadToken(_)),
                "token {:?} should be rejected, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!("".parse::<TurnSequence>(), Err(SequenceError::Empty));
        assert_eq!("   ".parse::<TurnSequence>(), Err(SequenceError::Empty));
    }

    #[test]
    fn test_validate_well_formed() {
        let seq: TurnSequence = "F0 F1 V0 V1 F0 F1 V0 V1".parse().unwrap();
        assert!(seq.validate(4).is_ok());
        assert_eq!(seq.select_count(), 4);
        assert_eq!(seq.set_count(), 4);
    }

    #[test]
    fn test_validate_select_count_mismatch() {
        let seq: TurnSequence = "F0 V0 F1 V1".parse().unwrap();
        assert_eq!(
            seq.validate(4),
            Err(SequenceError::SelectCount {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validate_set_count_mismatch() {
        let seq: TurnSequence = "F0 F0 V0 V0 F1 V1".parse().unwrap();
        assert_eq!(
            seq.validate(4),
            Err(SequenceError::SetCount {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_odd_or_zero_vars() {
        let seq: TurnSequence = "F0 V0 F1 V1".parse().unwrap();
        assert_eq!(seq.validate(3), Err(SequenceError::OddVariableCount(3)));
        assert_eq!(seq.validate(0), Err(SequenceError::OddVariableCount(0)));
    }

    #[test]
    fn test_validate_rejects_empty_sequence() {
        let seq = TurnSequence::new(Vec::new());
        assert!(seq.is_empty());
        assert_eq!(seq.validate(2), Err(SequenceError::Empty));
    }

    #[test]
    fn test_serde_as_compact_string() {
        let seq: TurnSequence = "F0 V0 F1 V1".parse().unwrap();

        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "\"F0 V0 F1 V1\"");

        let back: TurnSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);

        // Malformed strings fail at deserialization time
        assert!(serde_json::from_str::<TurnSequence>("\"F9\"").is_err());
    }
}
