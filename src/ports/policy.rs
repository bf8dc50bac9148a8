//! Policy abstraction
//!
//! A policy maps a game state to a move. Search policies, learning agents,
//! and the scripted opponents all implement this trait, which is what lets
//! the match runner pit any of them against any other.

use crate::{
    error::Result,
    game::{Game, Outcome, Player},
};

/// A move-selection strategy for a game.
///
/// `select_move` takes `&mut self` because stochastic policies advance
/// their random source and learning agents may explore.
pub trait Policy<G: Game>: Send {
    /// Choose a move in the given state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when the state is terminal.
    fn select_move(&mut self, state: &G) -> Result<G::Move>;

    /// Incorporate a finished episode. `moves` is the full move sequence
    /// from the initial position and `role` is the side this policy played.
    ///
    /// The default is a no-op for policies that do not learn.
    fn learn(&mut self, _moves: &[G::Move], _outcome: Outcome, _role: Player) -> Result<()> {
        Ok(())
    }

    /// Human-readable policy name for reports and logs
    fn name(&self) -> &str;

    /// Discard any accumulated state, returning the policy to how it was
    /// constructed. The default is a no-op.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Reseed the policy's random source, if it has one. The default is a
    /// no-op for deterministic policies.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
