//! Breadth-first construction of the complete game tree.
//!
//! The tree for a turn sequence of length L has exactly L+1 levels: level i
//! holds every position reachable after i turns, and level L holds the
//! terminal states. Construction materializes all of it into a dense
//! `Vec<GameNode>` with index links, grouped by depth for level-order
//! traversal. Nothing is pruned, memoized, or shared between isomorphic
//! states, so tree size is the full branching product of the sequence.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::sequence::{SequenceError, TurnSequence};
use super::state::{GameState, Player, Turn};

/// A node in the materialized game tree.
#[derive(Debug, Clone)]
pub struct GameNode {
    /// Index of the parent node (`u32::MAX` for the root).
    pub parent: u32,
    /// Indices of child nodes, in expansion order.
    pub children: Vec<u32>,
    /// Tree depth (root = 0).
    pub depth: u16,
    /// The game state at this node.
    pub state: GameState,
}

impl GameNode {
    /// Parent sentinel for the root node.
    pub const NO_PARENT: u32 = u32::MAX;
}

/// Statistics about a built game tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total node count.
    pub total_nodes: u32,
    /// Terminal (leaf) node count.
    pub leaf_nodes: u32,
    /// Decision nodes where the falsifier moves.
    pub falsifier_nodes: u32,
    /// Decision nodes where the verifier moves.
    pub verifier_nodes: u32,
    /// Depth of the deepest level (= sequence length).
    pub max_depth: u16,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tree statistics:")?;
        writeln!(f, "  Total nodes:    {}", self.total_nodes)?;
        writeln!(
            f,
            "  Decision nodes: {} (F: {}, V: {})",
            self.falsifier_nodes + self.verifier_nodes,
            self.falsifier_nodes,
            self.verifier_nodes
        )?;
        writeln!(f, "  Leaf nodes:     {}", self.leaf_nodes)?;
        writeln!(f, "  Max depth:      {}", self.max_depth)
    }
}

/// The complete game tree for one turn sequence, in dense storage.
///
/// The root is node 0; children always have larger indices than their
/// parent, so a deepest-level-first walk over `levels` visits every child
/// before its parent. The tree is immutable after build and safe to share
/// across threads; per-table evaluation values live in
/// [`TreeEvaluator`](super::eval::TreeEvaluator) scratch buffers, never in
/// the nodes themselves.
#[derive(Debug, Clone)]
pub struct GameTree {
    /// All nodes in creation (breadth-first) order.
    pub nodes: Vec<GameNode>,
    /// Node ids grouped by depth.
    pub levels: Vec<Vec<u32>>,
    /// Number of variables in play.
    pub num_vars: usize,
    /// Size and shape statistics.
    pub stats: TreeStats,
}

impl GameTree {
    /// Build the complete tree for `sequence` over `num_vars` variables.
    ///
    /// The sequence is validated first; malformed input fails fast rather
    /// than producing a partial tree. Expansion then proceeds one level per
    /// turn: nodes at level i carry `sequence[i]` as their pending turn, and
    /// the final level is tagged terminal. A sequence that leaves some mover
    /// without a legal move partway through (for example a Set turn for a
    /// player owning nothing unassigned) is a [`BuildError::DeadEnd`].
    pub fn build(num_vars: usize, sequence: &TurnSequence) -> Result<GameTree, BuildError> {
        sequence.validate(num_vars)?;

        let turns = sequence.turns();
        let root = GameNode {
            parent: GameNode::NO_PARENT,
            children: Vec::new(),
            depth: 0,
            state: GameState::initial(num_vars, turns[0]),
        };

        let mut nodes = vec![root];
        let mut levels = vec![vec![0u32]];

        for depth in 1..=turns.len() {
            // Successors at this level face sequence[depth] next;
            // None past the end tags them terminal.
            let next = turns.get(depth).copied();
            let mut level = Vec::new();

            for &parent_id in &levels[depth - 1] {
                let successors = nodes[parent_id as usize].state.expand(next);
                if successors.is_empty() {
                    return Err(BuildError::DeadEnd {
                        depth,
                        turn: turns[depth - 1],
                    });
                }
                for state in successors {
                    let id = nodes.len() as u32;
                    nodes.push(GameNode {
                        parent: parent_id,
                        children: Vec::new(),
                        depth: depth as u16,
                        state,
                    });
                    nodes[parent_id as usize].children.push(id);
                    level.push(id);
                }
            }
            levels.push(level);
        }

        debug_assert!(
            levels[turns.len()].iter().all(|&id| {
                let state = &nodes[id as usize].state;
                state.is_terminal() && state.is_fully_claimed() && state.is_fully_assigned()
            }),
            "leaves of a validated sequence must be terminal, fully claimed and assigned"
        );

        let mut stats = TreeStats {
            total_nodes: nodes.len() as u32,
            leaf_nodes: levels[turns.len()].len() as u32,
            max_depth: turns.len() as u16,
            ..Default::default()
        };
        for node in &nodes {
            if let Some(turn) = node.state.pending {
                match turn.player {
                    Player::Falsifier => stats.falsifier_nodes += 1,
                    Player::Verifier => stats.verifier_nodes += 1,
                }
            }
        }

        debug!(
            "built game tree for [{}]: {} nodes, {} leaves, depth {}",
            sequence, stats.total_nodes, stats.leaf_nodes, stats.max_depth
        );

        Ok(GameTree {
            nodes,
            levels,
            num_vars,
            stats,
        })
    }

    /// The root node.
    pub fn root(&self) -> &GameNode {
        &self.nodes[0]
    }

    /// Look up a node by id.
    pub fn node(&self, id: u32) -> &GameNode {
        &self.nodes[id as usize]
    }

    /// Total node count.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of the terminal nodes (the deepest level).
    pub fn leaves(&self) -> &[u32] {
        self.levels
            .last()
            .map(|level| level.as_slice())
            .unwrap_or(&[])
    }
}

/// Errors raised while building a game tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The turn sequence failed validation.
    Sequence(SequenceError),
    /// A mover had no legal move partway through the sequence.
    DeadEnd {
        /// Depth at which expansion came up empty.
        depth: usize,
        /// The turn that could not be taken.
        turn: Turn,
    },
}

impl From<SequenceError> for BuildError {
    fn from(err: SequenceError) -> Self {
        BuildError::Sequence(err)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Sequence(err) => write!(f, "Invalid turn sequence: {}", err),
            BuildError::DeadEnd { depth, turn } => {
                write!(
                    f,
                    "Turn {} at depth {} has no legal moves (sequence strands the mover)",
                    turn, depth
                )
            }
        }
    }
}

impl std::error::Error for BuildError {}
