//! # Claim Solver
//!
//! An exhaustive minimax solver for two-player boolean variable claiming
//! games.
//!
//! Two players contest the output of an n-variable boolean function. Turn by
//! turn, following a fixed sequence given up front, the named player either
//! claims an unclaimed variable or assigns a value to a variable it already
//! owns. Once every variable is assigned, the function decides the winner:
//! the verifier (`V`) wins on output 1, the falsifier (`F`) on output 0.
//! For a given sequence the solver answers: out of all `2^(2^n)` possible
//! functions, how many can each player force a win on, grouped by the
//! function's popcount?
//!
//! ## Features
//!
//! - **Complete Tree Construction**: Every reachable position, one level per
//!   turn, no pruning
//! - **Minimax Evaluation**: AND/OR resolution of one truth table in a
//!   single pass over the tree
//! - **Exhaustive Sweeps**: Classify all `2^(2^n)` tables, serial or across
//!   rayon workers
//! - **Scenario Catalogs**: Six built-in sequences plus JSON catalog files
//! - **Reports**: Fixed-width win tables and JSON export
//!
//! ## Quick Start
//!
//! ```
//! use claim_solver::engine::{sweep_all_tables, GameTree, SweepConfig, TurnSequence};
//!
//! // 1. Parse a turn sequence (F/V = player, 0 = claim, 1 = assign)
//! let sequence: TurnSequence = "F0 V0 F1 V1".parse().unwrap();
//!
//! // 2. Build the complete game tree over two variables
//! let tree = GameTree::build(2, &sequence).unwrap();
//!
//! // 3. Classify all 2^(2^2) = 16 truth tables
//! let tally = sweep_all_tables(&tree, &SweepConfig::default()).unwrap();
//!
//! // 4. Read off wins per popcount bucket
//! assert_eq!(tally.verifier(), &[0, 0, 2, 4, 1]);
//! assert_eq!(tally.falsifier(), &[1, 4, 4, 0, 0]);
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: states, sequences, tree construction, evaluation, sweep
//! - [`scenarios`]: built-in scenario catalog and JSON catalog loading
//! - [`report`]: win tables and JSON report export
//! - [`dot`]: Graphviz rendering of built trees
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 Scenario catalog / CLI                 │
//! │  - Built-in sequences      - JSON catalog files        │
//! └────────────────────────────────────────────────────────┘
//!                             │
//!                             │ turn sequence + variable count
//!                             ▼
//! ┌────────────────────────────────────────────────────────┐
//! │                 Game tree construction                 │
//! │  - One level per turn      - Dense index-linked nodes  │
//! └────────────────────────────────────────────────────────┘
//!                             │
//!                             │ shared read-only tree
//!                             ▼
//! ┌────────────────────────────────────────────────────────┐
//! │                 Exhaustive table sweep                 │
//! │  - AND/OR minimax          - Rayon worker evaluators   │
//! └────────────────────────────────────────────────────────┘
//!                             │
//!                             │ per-bucket win tally
//!                             ▼
//! ┌────────────────────────────────────────────────────────┐
//! │                Win tables / JSON reports               │
//! └────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

/// Graphviz (DOT) rendering of built game trees.
pub mod dot;

/// The solver engine: states, sequences, trees, evaluation, and the sweep.
pub mod engine;

/// Win tables for solved scenarios and JSON report export.
pub mod report;

/// Named turn sequences: the built-in catalog and JSON catalog files.
pub mod scenarios;

// Re-export commonly used types at crate root for convenience
pub use engine::{
    sweep_all_tables, BuildError, EvalError, GameState, GameTree, MoveKind, Player, SequenceError,
    SweepConfig, SweepError, TreeEvaluator, TruthTable, Turn, TurnSequence, WinTally,
};
