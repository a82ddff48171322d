//! The solver engine: states, sequences, trees, evaluation, and the sweep.
//!
//! # Overview
//!
//! A claiming game is defined by a variable count `n` and a fixed turn
//! sequence. The engine solves it in three stages:
//!
//! 1. [`GameTree::build`](tree::GameTree::build) materializes the complete
//!    tree of reachable positions, one level per turn, with no pruning or
//!    sharing of isomorphic states.
//! 2. [`TreeEvaluator::evaluate`](eval::TreeEvaluator::evaluate) resolves the
//!    tree against one truth table: leaves read the table row selected by
//!    their assignment, falsifier nodes AND their children, verifier nodes OR
//!    them. The root value is `true` exactly when the verifier can force the
//!    function's output to 1.
//! 3. [`sweep_all_tables`](sweep::sweep_all_tables) repeats stage 2 for every
//!    one of the `2^(2^n)` truth tables against the same shared tree and
//!    tallies wins per population-count bucket.
//!
//! # Example
//!
//! ```
//! use claim_solver::engine::{sweep_all_tables, GameTree, SweepConfig, TruthTable, TurnSequence};
//!
//! // Two variables, strictly alternating claim and assign turns
//! let sequence: TurnSequence = "F0 V0 F1 V1".parse().unwrap();
//! let tree = GameTree::build(2, &sequence).unwrap();
//!
//! // Single-table evaluation
//! assert!(tree.evaluate(&TruthTable::all_true(2)).unwrap());
//!
//! // Exhaustive sweep over all 16 two-variable functions
//! let config = SweepConfig::default().with_parallel(false);
//! let tally = sweep_all_tables(&tree, &config).unwrap();
//! assert_eq!(tally.total(), 16);
//! ```

pub mod eval;
pub mod sequence;
pub mod state;
pub mod sweep;
pub mod table;
pub mod tree;

// Re-export main types for convenient access
pub use eval::{EvalError, TreeEvaluator};
pub use sequence::{SequenceError, TurnSequence};
pub use state::{GameState, MoveKind, Player, Turn};
pub use sweep::{sweep_all_tables, SweepConfig, SweepError, WinTally};
pub use table::TruthTable;
pub use tree::{BuildError, GameNode, GameTree, TreeStats};
