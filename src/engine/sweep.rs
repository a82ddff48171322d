//! Exhaustive classification of every truth table against one game tree.
//!
//! For `n` variables there are `2^(2^n)` boolean functions. The sweep
//! evaluates the shared read-only tree once per function and tallies which
//! player wins, bucketed by the function's population count (number of 1
//! rows in its table). The tree is built once; each worker carries its own
//! [`TreeEvaluator`] scratch buffer, so the parallel path needs no locking.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::eval::{EvalError, TreeEvaluator};
use super::table::TruthTable;
use super::tree::GameTree;

/// Largest variable count the sweep will enumerate.
///
/// At `n = 6` a table already has 64 rows and the table space outgrows a
/// `u64` counter; the sweep refuses rather than truncate.
pub const MAX_SWEEP_VARS: usize = 5;

/// Configuration for an exhaustive table sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Spread tables across rayon workers.
    pub parallel: bool,
    /// Draw a progress bar on stderr while sweeping.
    pub progress: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            parallel: true,
            progress: false,
        }
    }
}

impl SweepConfig {
    /// Set whether tables are evaluated in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether a progress bar is drawn.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Win counters for an exhaustive sweep, bucketed by table popcount.
///
/// Bucket `k` counts the tables with exactly `k` ones among the `2^n` rows,
/// split by which player wins them under optimal play. Every table lands in
/// exactly one player's column, so the grand total of a finished sweep is
/// `2^(2^n)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    num_vars: usize,
    verifier: Vec<u64>,
    falsifier: Vec<u64>,
}

impl WinTally {
    /// Empty tally for `num_vars` variables (buckets `0..=2^num_vars`).
    pub fn new(num_vars: usize) -> Self {
        let buckets = (1usize << num_vars) + 1;
        WinTally {
            num_vars,
            verifier: vec![0; buckets],
            falsifier: vec![0; buckets],
        }
    }

    /// Number of variables the tallied tables range over.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of popcount buckets (`2^num_vars + 1`).
    pub fn buckets(&self) -> usize {
        self.verifier.len()
    }

    /// Count one table's outcome under its popcount bucket.
    pub fn record(&mut self, ones: u32, verifier_won: bool) {
        if verifier_won {
            self.verifier[ones as usize] += 1;
        } else {
            self.falsifier[ones as usize] += 1;
        }
    }

    /// Verifier wins in one bucket.
    pub fn verifier_wins(&self, bucket: usize) -> u64 {
        self.verifier[bucket]
    }

    /// Falsifier wins in one bucket.
    pub fn falsifier_wins(&self, bucket: usize) -> u64 {
        self.falsifier[bucket]
    }

    /// Per-bucket verifier win counts.
    pub fn verifier(&self) -> &[u64] {
        &self.verifier
    }

    /// Per-bucket falsifier win counts.
    pub fn falsifier(&self) -> &[u64] {
        &self.falsifier
    }

    /// Total verifier wins across all buckets.
    pub fn verifier_total(&self) -> u64 {
        self.verifier.iter().sum()
    }

    /// Total falsifier wins across all buckets.
    pub fn falsifier_total(&self) -> u64 {
        self.falsifier.iter().sum()
    }

    /// Tables classified so far.
    pub fn total(&self) -> u64 {
        self.verifier_total() + self.falsifier_total()
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &WinTally) {
        debug_assert_eq!(self.buckets(), other.buckets());
        for (mine, theirs) in self.verifier.iter_mut().zip(&other.verifier) {
            *mine += theirs;
        }
        for (mine, theirs) in self.falsifier.iter_mut().zip(&other.falsifier) {
            *mine += theirs;
        }
    }
}

/// Evaluate `tree` against every truth table and tally the winners.
///
/// Tables are enumerated by index `0..2^(2^n)`; index bit `j` is the table's
/// output for variable assignment `j`. Refuses trees with more than
/// [`MAX_SWEEP_VARS`] variables, where the table space stops fitting in a
/// `u64`.
pub fn sweep_all_tables(tree: &GameTree, config: &SweepConfig) -> Result<WinTally, SweepError> {
    if tree.num_vars > MAX_SWEEP_VARS {
        return Err(SweepError::TableSpace {
            num_vars: tree.num_vars,
        });
    }
    let entries = 1usize << tree.num_vars;
    let num_tables = 1u64 << entries;

    let bar = if config.progress {
        Some(table_progress_bar(num_tables))
    } else {
        None
    };

    let tally = if config.parallel {
        (0..num_tables)
            .into_par_iter()
            .map_init(
                || TreeEvaluator::new(tree),
                |evaluator, index| {
                    let table = TruthTable::from_index(tree.num_vars, index);
                    let verifier_won = evaluator.evaluate(tree, &table)?;
                    if let Some(bar) = &bar {
                        bar.inc(1);
                    }
                    Ok((table.ones(), verifier_won))
                },
            )
            .try_fold(
                || WinTally::new(tree.num_vars),
                |mut tally, outcome: Result<(u32, bool), EvalError>| {
                    let (ones, verifier_won) = outcome?;
                    tally.record(ones, verifier_won);
                    // Both EvalError and SweepError satisfy the ? bounds
                    // on this fold; the turbofish picks one
                    Ok::<_, EvalError>(tally)
                },
            )
            .try_reduce(
                || WinTally::new(tree.num_vars),
                |mut merged, part| {
                    merged.merge(&part);
                    Ok(merged)
                },
            )?
    } else {
        let mut evaluator = TreeEvaluator::new(tree);
        let mut tally = WinTally::new(tree.num_vars);
        for index in 0..num_tables {
            let table = TruthTable::from_index(tree.num_vars, index);
            let verifier_won = evaluator.evaluate(tree, &table)?;
            tally.record(table.ones(), verifier_won);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }
        tally
    };

    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    debug!(
        "swept {} tables over {} nodes: verifier {}, falsifier {}",
        tally.total(),
        tree.num_nodes(),
        tally.verifier_total(),
        tally.falsifier_total()
    );

    Ok(tally)
}

fn table_progress_bar(num_tables: u64) -> ProgressBar {
    let bar = ProgressBar::new(num_tables);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tables ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style.progress_chars("=>-"));
    bar
}

/// Errors raised by an exhaustive sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepError {
    /// The table space `2^(2^n)` is too large to enumerate.
    TableSpace {
        /// The offending variable count.
        num_vars: usize,
    },
    /// A table failed to evaluate against the tree.
    Eval(EvalError),
}

impl From<EvalError> for SweepError {
    fn from(err: EvalError) -> Self {
        SweepError::Eval(err)
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::TableSpace { num_vars } => {
                write!(
                    f,
                    "Cannot enumerate all truth tables for {} variables (limit is {})",
                    num_vars, MAX_SWEEP_VARS
                )
            }
            SweepError::Eval(err) => write!(f, "Table evaluation failed: {}", err),
        }
    }
}

impl std::error::Error for SweepError {}
