//! Bottom-up minimax evaluation of a built tree against one truth table.
//!
//! A position's value is the truth table's output under optimal play from
//! both sides: leaves read the table row selected by their assignment,
//! falsifier nodes AND their children's values (every continuation must
//! still come out true for the verifier to be winning), verifier nodes OR
//! them (one good continuation suffices). The root value is therefore
//! `true` exactly when the verifier can force the function's output to 1.

use std::fmt;

use super::state::Player;
use super::table::TruthTable;
use super::tree::GameTree;

/// Reusable per-node value storage for evaluation passes.
///
/// The tree itself stays immutable and shareable; an evaluator owns the
/// per-node values of the current pass and fully rewrites them on every
/// call, so reusing one across tables is safe and allocation-free. The
/// parallel sweep hands each worker thread its own evaluator.
#[derive(Debug, Clone)]
pub struct TreeEvaluator {
    values: Vec<Option<bool>>,
}

impl TreeEvaluator {
    /// Create an evaluator sized for `tree`.
    pub fn new(tree: &GameTree) -> Self {
        Self {
            values: vec![None; tree.num_nodes()],
        }
    }

    /// Evaluate `tree` under `table`, returning the root value (`true` =
    /// the verifier wins).
    ///
    /// Walks the levels deepest-first so every child's value is written
    /// before its parent reads it. No recursion: the walk is iterative and
    /// bounded by the tree's level count, not the call stack. Cost is
    /// O(tree size) per call.
    pub fn evaluate(&mut self, tree: &GameTree, table: &TruthTable) -> Result<bool, EvalError> {
        let expected = 1usize << tree.num_vars;
        if table.len() != expected {
            return Err(EvalError::TableSize {
                expected,
                actual: table.len(),
            });
        }

        self.values.clear();
        self.values.resize(tree.num_nodes(), None);

        for level in tree.levels.iter().rev() {
            for &id in level {
                let node = tree.node(id);
                let value = match node.state.pending {
                    None => {
                        let row = node
                            .state
                            .table_index()
                            .ok_or(EvalError::UnassignedLeaf { node: id })?;
                        table.value(row)
                    }
                    // Fold from the combinator's identity: all() of nothing
                    // is true (AND), any() of nothing is false (OR)
                    Some(turn) => match turn.player {
                        Player::Falsifier => node
                            .children
                            .iter()
                            .all(|&child| self.values[child as usize] == Some(true)),
                        Player::Verifier => node
                            .children
                            .iter()
                            .any(|&child| self.values[child as usize] == Some(true)),
                    },
                };
                self.values[id as usize] = Some(value);
            }
        }

        Ok(self.value(0) == Some(true))
    }

    /// The value written for `node` by the most recent pass.
    pub fn value(&self, node: u32) -> Option<bool> {
        self.values.get(node as usize).copied().flatten()
    }

    /// All per-node values from the most recent pass, indexed by node id.
    pub fn values(&self) -> &[Option<bool>] {
        &self.values
    }
}

impl GameTree {
    /// One-shot evaluation with a fresh scratch buffer.
    ///
    /// Prefer a reused [`TreeEvaluator`] when evaluating many tables
    /// against the same tree.
    pub fn evaluate(&self, table: &TruthTable) -> Result<bool, EvalError> {
        let mut evaluator = TreeEvaluator::new(self);
        evaluator.evaluate(self, table)
    }
}

/// Errors raised during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The truth table length does not match the tree's variable count.
    TableSize {
        /// Entries required by the tree (`2^num_vars`).
        expected: usize,
        /// Entries actually supplied.
        actual: usize,
    },
    /// A leaf was not fully assigned. Trees from [`GameTree::build`] cannot
    /// contain one; this guards hand-built trees.
    UnassignedLeaf {
        /// Id of the offending leaf.
        node: u32,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::TableSize { expected, actual } => {
                write!(f, "Truth table has {} entries, expected {}", actual, expected)
            }
            EvalError::UnassignedLeaf { node } => {
                write!(f, "Leaf node {} is not fully assigned", node)
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sequence::TurnSequence;
    use crate::engine::state::{GameState, MoveKind, Player, Turn};
    use crate::engine::tree::{GameNode, TreeStats};

    fn build(num_vars: usize, text: &str) -> GameTree {
        GameTree::build(num_vars, &text.parse().unwrap()).unwrap()
    }

    // Game value by direct recursion over the move rules, no tree involved:
    // try every legal claim or assignment for the mover and combine the
    // outcomes with the mover's connective
    fn reference_value(
        turns: &[Turn],
        owners: &mut [Option<Player>],
        values: &mut [Option<bool>],
        table: &TruthTable,
    ) -> bool {
        let (turn, rest) = match turns.split_first() {
            Some((&turn, rest)) => (turn, rest),
            None => {
                let mut row = 0;
                for (var, value) in values.iter().enumerate() {
                    if *value == Some(true) {
                        row |= 1 << var;
                    }
                }
                return table.value(row);
            }
        };

        let mut outcomes = Vec::new();
        for var in 0..owners.len() {
            match turn.kind {
                MoveKind::Select if owners[var].is_none() => {
                    owners[var] = Some(turn.player);
                    outcomes.push(reference_value(rest, owners, values, table));
                    owners[var] = None;
                }
                MoveKind::Set if owners[var] == Some(turn.player) && values[var].is_none() => {
                    for bit in [false, true] {
                        values[var] = Some(bit);
                        outcomes.push(reference_value(rest, owners, values, table));
                    }
                    values[var] = None;
                }
                _ => {}
            }
        }

        match turn.player {
            Player::Falsifier => outcomes.into_iter().all(|won| won),
            Player::Verifier => outcomes.into_iter().any(|won| won),
        }
    }

    #[test]
    fn test_constant_tables_fix_the_root() {
        let tree = build(4, "F0 F0 V0 V0 F1 F1 V1 V1");

        assert!(tree.evaluate(&TruthTable::all_true(4)).unwrap());
        assert!(!tree.evaluate(&TruthTable::all_false(4)).unwrap());
    }

    #[test]
    fn test_two_variable_game_matches_formula() {
        // For F0 V0 F1 V1 over g[0..4], unrolling the minimax by hand:
        // F claims var 0: value (g0|g2) & (g1|g3)
        // F claims var 1: value (g0|g1) & (g2|g3)
        // Root ANDs both claim choices.
        let tree = build(2, "F0 V0 F1 V1");
        let mut evaluator = TreeEvaluator::new(&tree);

        for index in 0..16u64 {
            let g = |j: u64| (index >> j) & 1 == 1;
            let expected = (g(0) || g(2)) && (g(1) || g(3)) && (g(0) || g(1)) && (g(2) || g(3));

            let table = TruthTable::from_index(2, index);
            let value = evaluator.evaluate(&tree, &table).unwrap();
            assert_eq!(value, expected, "table {:04b}", index);
        }
    }

    #[test]
    fn test_matches_recursive_minimax() {
        // Every ordering where each player claims one variable and later
        // assigns it, checked against all 16 tables
        let orderings = [
            "F0 F1 V0 V1",
            "F0 V0 F1 V1",
            "F0 V0 V1 F1",
            "V0 F0 F1 V1",
            "V0 F0 V1 F1",
            "V0 V1 F0 F1",
        ];

        for text in orderings {
            let sequence: TurnSequence = text.parse().unwrap();
            let tree = GameTree::build(2, &sequence).unwrap();
            let mut evaluator = TreeEvaluator::new(&tree);

            for index in 0..16u64 {
                let table = TruthTable::from_index(2, index);
                let expected =
                    reference_value(sequence.turns(), &mut [None; 2], &mut [None; 2], &table);
                assert_eq!(
                    evaluator.evaluate(&tree, &table).unwrap(),
                    expected,
                    "sequence [{}] table {:04b}",
                    text,
                    index
                );
            }
        }
    }

    #[test]
    fn test_four_variable_games_match_recursive_minimax() {
        let sequences = ["F0 F0 V0 V0 F1 F1 V1 V1", "F0 F1 V0 V1 F0 F1 V0 V1"];
        // Corner rows plus a few mixed patterns (parity, stripes, arbitrary)
        let indexes = [0, 1, 0x8000, 0xFFFF, 0x6996, 0xAAAA, 0x0F0F, 0x1234];

        for text in sequences {
            let sequence: TurnSequence = text.parse().unwrap();
            let tree = GameTree::build(4, &sequence).unwrap();
            let mut evaluator = TreeEvaluator::new(&tree);

            for index in indexes {
                let table = TruthTable::from_index(4, index);
                let expected =
                    reference_value(sequence.turns(), &mut [None; 4], &mut [None; 4], &table);
                assert_eq!(
                    evaluator.evaluate(&tree, &table).unwrap(),
                    expected,
                    "sequence [{}] table {:#06x}",
                    text,
                    index
                );
            }
        }
    }

    #[test]
    fn test_per_node_annotations() {
        let tree = build(2, "F0 V0 F1 V1");
        let table = TruthTable::from_index(2, 6); // XOR
        let mut evaluator = TreeEvaluator::new(&tree);

        let root_value = evaluator.evaluate(&tree, &table).unwrap();
        assert_eq!(evaluator.value(0), Some(root_value));

        // Every node gets a value, and leaves echo their table row
        assert!(evaluator.values().iter().all(|value| value.is_some()));
        for &leaf_id in tree.leaves() {
            let row = tree.node(leaf_id).state.table_index().unwrap();
            assert_eq!(evaluator.value(leaf_id), Some(table.value(row)));
        }
    }

    #[test]
    fn test_reuse_is_deterministic() {
        let tree = build(2, "F0 V0 F1 V1");
        let xor = TruthTable::from_index(2, 6);
        let other = TruthTable::from_index(2, 11);
        let mut evaluator = TreeEvaluator::new(&tree);

        let first = evaluator.evaluate(&tree, &xor).unwrap();
        let annotations: Vec<Option<bool>> = evaluator.values().to_vec();

        // Interleave a different table, then repeat the first
        evaluator.evaluate(&tree, &other).unwrap();
        let second = evaluator.evaluate(&tree, &xor).unwrap();

        assert_eq!(first, second);
        assert_eq!(evaluator.values(), annotations.as_slice());
    }

    #[test]
    fn test_role_swap_duality() {
        // Swapping F and V everywhere and complementing the table negates
        // the root value (AND and OR are De Morgan duals)
        let tree = build(2, "F0 V0 F1 V1");
        let mirrored = build(2, "V0 F0 V1 F1");

        for index in 0..16u64 {
            let table = TruthTable::from_index(2, index);
            let complement = TruthTable::new(table.entries().iter().map(|&b| !b).collect());

            let original = tree.evaluate(&table).unwrap();
            let swapped = mirrored.evaluate(&complement).unwrap();
            assert_eq!(swapped, !original, "table {:04b}", index);
        }
    }

    #[test]
    fn test_table_size_mismatch() {
        let tree = build(2, "F0 V0 F1 V1");
        let err = tree.evaluate(&TruthTable::all_true(4)).unwrap_err();

        assert_eq!(
            err,
            EvalError::TableSize {
                expected: 4,
                actual: 16
            }
        );
    }

    #[test]
    fn test_unassigned_leaf_detected() {
        // Hand-built single-node tree whose "terminal" root is missing an
        // assignment; build() can never produce this shape
        let tree = GameTree {
            nodes: vec![GameNode {
                parent: GameNode::NO_PARENT,
                children: Vec::new(),
                depth: 0,
                state: GameState {
                    pending: None,
                    owners: vec![Some(Player::Falsifier), Some(Player::Verifier)],
                    values: vec![Some(true), None],
                },
            }],
            levels: vec![vec![0]],
            num_vars: 2,
            stats: TreeStats::default(),
        };

        let err = tree.evaluate(&TruthTable::all_true(2)).unwrap_err();
        assert_eq!(err, EvalError::UnassignedLeaf { node: 0 });
    }

    #[test]
    fn test_one_shot_matches_reused_evaluator() {
        let tree = build(2, "F0 V0 F1 V1");
        let table = TruthTable::from_index(2, 9);

        let mut evaluator = TreeEvaluator::new(&tree);
        assert_eq!(
            tree.evaluate(&table).unwrap(),
            evaluator.evaluate(&tree, &table).unwrap()
        );
    }
}
