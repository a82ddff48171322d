//! Players, turns, and per-node game states.
//!
//! A claiming game is played over `n` boolean variables. On each turn one
//! player either claims an unclaimed variable (a Select move) or assigns a
//! value to a variable it already owns (a Set move), following a fixed
//! externally supplied turn order. A [`GameState`] captures one tree node's
//! view of the game: the pending turn plus the ownership and value mappings
//! accumulated so far.
//!
//! States are plain values. [`GameState::expand`] enumerates successors by
//! cloning, so sibling branches never share mappings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two roles in a claiming game.
///
/// The falsifier wants the truth table's output forced to `false` and
/// combines child outcomes by AND; the verifier wants `true` and combines
/// by OR. These are roles, not identities: a turn sequence may give either
/// role any share of the moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The AND player (letter `F`).
    Falsifier,
    /// The OR player (letter `V`).
    Verifier,
}

impl Player {
    /// Single-letter form used in the compact turn encoding.
    pub fn letter(&self) -> char {
        match self {
            Player::Falsifier => 'F',
            Player::Verifier => 'V',
        }
    }

    /// The other role.
    pub fn opponent(&self) -> Player {
        match self {
            Player::Falsifier => Player::Verifier,
            Player::Verifier => Player::Falsifier,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What kind of move a turn demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Claim ownership of one unclaimed variable.
    Select,
    /// Assign a boolean value to one owned, unassigned variable.
    Set,
}

impl MoveKind {
    /// Digit form used in the compact turn encoding (`0` Select, `1` Set).
    pub fn digit(&self) -> char {
        match self {
            MoveKind::Select => '0',
            MoveKind::Set => '1',
        }
    }
}

/// One entry of a turn sequence: which player moves and how.
///
/// Displays in the compact encoding, e.g. `F0` (falsifier selects) or
/// `V1` (verifier sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Turn {
    /// The player to move.
    pub player: Player,
    /// The kind of move they must make.
    pub kind: MoveKind,
}

impl Turn {
    /// Create a turn.
    pub fn new(player: Player, kind: MoveKind) -> Self {
        Self { player, kind }
    }

    /// Shorthand for a Select turn.
    pub fn select(player: Player) -> Self {
        Self::new(player, MoveKind::Select)
    }

    /// Shorthand for a Set turn.
    pub fn set(player: Player) -> Self {
        Self::new(player, MoveKind::Set)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.player.letter(), self.kind.digit())
    }
}

/// One node's local view of the game.
///
/// `pending == None` marks a terminal state: the turn sequence is exhausted
/// and the node is valued directly from the truth table. For trees built
/// from a well-formed sequence, terminal states are also fully claimed and
/// fully assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// The turn to be taken at this node (`None` = terminal).
    pub pending: Option<Turn>,
    /// Per-variable ownership (`None` = unclaimed).
    pub owners: Vec<Option<Player>>,
    /// Per-variable assignment (`None` = unassigned).
    pub values: Vec<Option<bool>>,
}

impl GameState {
    /// The starting state: every variable unclaimed and unassigned, with
    /// `first` as the pending turn.
    pub fn initial(num_vars: usize, first: Turn) -> Self {
        Self {
            pending: Some(first),
            owners: vec![None; num_vars],
            values: vec![None; num_vars],
        }
    }

    /// Number of variables in play.
    pub fn num_vars(&self) -> usize {
        self.owners.len()
    }

    /// True when the turn sequence is exhausted at this node.
    pub fn is_terminal(&self) -> bool {
        self.pending.is_none()
    }

    /// True when every variable has an owner.
    ///
    /// Diagnostic query only: tree construction terminates by sequence
    /// length, never by this predicate.
    pub fn is_fully_claimed(&self) -> bool {
        self.owners.iter().all(|owner| owner.is_some())
    }

    /// True when every variable has a value.
    pub fn is_fully_assigned(&self) -> bool {
        self.values.iter().all(|value| value.is_some())
    }

    /// Truth table row selected by the assignment: the little-endian integer
    /// with bit `i` = value of variable `i`. `None` until fully assigned.
    pub fn table_index(&self) -> Option<usize> {
        let mut index = 0usize;
        for (var, value) in self.values.iter().enumerate() {
            match value {
                Some(true) => index |= 1 << var,
                Some(false) => {}
                None => return None,
            }
        }
        Some(index)
    }

    /// Enumerate every legal successor of the pending turn, stamping `next`
    /// onto each successor as its own pending turn (`None` tags successors
    /// terminal).
    ///
    /// A Select turn branches once per unclaimed variable; a Set turn
    /// branches twice (false, then true) per unassigned variable the mover
    /// owns. Terminal states have no successors. Every successor carries
    /// freshly cloned mappings.
    pub fn expand(&self, next: Option<Turn>) -> Vec<GameState> {
        let turn = match self.pending {
            Some(turn) => turn,
            None => return Vec::new(),
        };

        let mut successors = Vec::new();
        match turn.kind {
            MoveKind::Select => {
                for var in 0..self.owners.len() {
                    if self.owners[var].is_some() {
                        continue;
                    }
                    let mut owners = self.owners.clone();
                    owners[var] = Some(turn.player);
                    successors.push(GameState {
                        pending: next,
                        owners,
                        values: self.values.clone(),
                    });
                }
            }
            MoveKind::Set => {
                for var in 0..self.values.len() {
                    // Only the owner may assign, and only once per variable
                    if self.values[var].is_some() || self.owners[var] != Some(turn.player) {
                        continue;
                    }
                    for bit in [false, true] {
                        let mut values = self.values.clone();
                        values[var] = Some(bit);
                        successors.push(GameState {
                            pending: next,
                            owners: self.owners.clone(),
                            values,
                        });
                    }
                }
            }
        }
        successors
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact owners|values|pending form, e.g. "FV--|01--|V1"
        for owner in &self.owners {
            match owner {
                Some(player) => write!(f, "{}", player.letter())?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "|")?;
        for value in &self.values {
            match value {
                Some(true) => write!(f, "1")?,
                Some(false) => write!(f, "0")?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "|")?;
        match &self.pending {
            Some(turn) => write!(f, "{}", turn),
            None => write!(f, "--"),
        }
    }
}
