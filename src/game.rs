//! Shared game-model capability implemented by both board games.

use std::{fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};

use crate::{error::Result, types::StateKey};

/// A player in a two-player game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// Terminal status of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    InProgress,
}

impl Outcome {
    /// Whether the game has ended
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning player, if any
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }

    /// Swap the winner perspective (X ↔ O). Useful when scoring the same game
    /// from the opponent's side.
    pub fn swap_players(self) -> Self {
        match self {
            Outcome::Win(player) => Outcome::Win(player.opponent()),
            other => other,
        }
    }
}

/// Game-model capability: rules of one deterministic, perfect-information,
/// zero-sum board game.
///
/// Search and learning policies are generic over this trait so game type is
/// never special-cased in algorithm code. Implementations must be pure:
/// identical (position, move) pairs always yield identical successors.
pub trait Game: Clone + Send + 'static {
    /// Move identifier: a cell index for Tic-Tac-Toe, a column index for
    /// Connect 4. `Ord` defines the canonical enumeration order used for
    /// deterministic tie-breaking.
    type Move: Copy + Eq + Ord + Hash + Debug + Send + Serialize + for<'de> Deserialize<'de>;

    /// Human-readable game name, also used to tag saved agents.
    const NAME: &'static str;

    /// The starting position (empty board, X to move).
    fn initial() -> Self;

    /// The player to move in this position.
    fn to_move(&self) -> Player;

    /// All moves available to the player to move, in canonical ascending
    /// order. Empty iff the position is terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move and return the successor position.
    ///
    /// # Errors
    ///
    /// Fails if the move is not legal for this position or the position is
    /// already terminal.
    fn apply(&self, mv: Self::Move) -> Result<Self>;

    /// Terminal status: a win once a k-in-a-row line exists, a draw once the
    /// board is full without one, otherwise in progress.
    fn outcome(&self) -> Outcome;

    /// Moves that would complete a winning line for `player` if that player
    /// placed a piece now, regardless of whose turn it is. In canonical
    /// ascending order. Used by scripted opponents for win and block checks.
    fn winning_moves(&self, player: Player) -> Vec<Self::Move>;

    /// Check if the game is over (win or draw)
    fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Exact, lossless position encoding (debugging, memoization, tests).
    fn encode(&self) -> String;

    /// The key under which Q-learning indexes this position. May be a lossy
    /// abstraction of the full position where the raw state space is
    /// intractable for a dense table (Connect 4).
    fn state_key(&self) -> StateKey;
}
