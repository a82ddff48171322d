//! Truth tables over the game's variables.
//!
//! A truth table fixes the n-variable boolean function being contested:
//! entry `j` is the function's output for the assignment whose little-endian
//! integer is `j` (bit `i` = value of variable `i`). The exhaustive sweep
//! enumerates tables by index, where table `k` has entry `j` equal to bit
//! `j` of `k`, covering all `2^(2^n)` functions exactly once.

use std::fmt;

use rand::Rng;

/// An ordered table of `2^n` booleans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    entries: Vec<bool>,
}

impl TruthTable {
    /// Wrap explicit entries. The evaluator checks the length against the
    /// tree's variable count, so any length is accepted here.
    pub fn new(entries: Vec<bool>) -> Self {
        Self { entries }
    }

    /// The `index`-th table of the exhaustive enumeration over `num_vars`
    /// variables: entry `j` is bit `j` of `index`.
    pub fn from_index(num_vars: usize, index: u64) -> Self {
        let len = 1usize << num_vars;
        debug_assert!(len <= 64, "index enumeration only covers up to 64 entries");
        let entries = (0..len).map(|j| (index >> j) & 1 == 1).collect();
        Self { entries }
    }

    /// The constant-false function.
    pub fn all_false(num_vars: usize) -> Self {
        Self {
            entries: vec![false; 1 << num_vars],
        }
    }

    /// The constant-true function.
    pub fn all_true(num_vars: usize) -> Self {
        Self {
            entries: vec![true; 1 << num_vars],
        }
    }

    /// A uniformly random table, for spot checks and benchmarks.
    pub fn random<R: Rng>(num_vars: usize, rng: &mut R) -> Self {
        let entries = (0..1usize << num_vars).map(|_| rng.gen_bool(0.5)).collect();
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries in row order.
    pub fn entries(&self) -> &[bool] {
        &self.entries
    }

    /// Output for one row, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.entries.get(index).copied()
    }

    /// Output for one row.
    pub fn value(&self, index: usize) -> bool {
        self.entries[index]
    }

    /// Population count: how many rows output true.
    pub fn ones(&self) -> u32 {
        self.entries.iter().filter(|&&bit| bit).count() as u32
    }
}

impl From<Vec<bool>> for TruthTable {
    fn from(entries: Vec<bool>) -> Self {
        Self::new(entries)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.entries {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
