//! Scripted baseline opponents
//!
//! Two fixed policies used as benchmarks: a uniform random player and a
//! one-ply heuristic that wins when it can, blocks when it must, and plays
//! randomly otherwise.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::{Error, Result},
    game::Game,
    ports::Policy,
    rng::build_rng,
};

/// Plays a uniformly random legal move
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl RandomPolicy {
    pub fn new() -> Self {
        RandomPolicy {
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Seed the random source for reproducible move sequences
    pub fn with_seed(seed: u64) -> Self {
        RandomPolicy {
            rng: StdRng::seed_from_u64(seed),
            rng_seed: Some(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn select_move(&mut self, state: &G) -> Result<G::Move> {
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn reset(&mut self) -> Result<()> {
        self.rng = build_rng(self.rng_seed);
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}

/// One-ply lookahead: take an immediate win, block the opponent's immediate
/// win, otherwise play randomly. Ties within each rule break toward the
/// lowest move in canonical order.
#[derive(Debug)]
pub struct HeuristicPolicy {
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        HeuristicPolicy {
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Seed the random source used by the fallback rule
    pub fn with_seed(seed: u64) -> Self {
        HeuristicPolicy {
            rng: StdRng::seed_from_u64(seed),
            rng_seed: Some(seed),
        }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Policy<G> for HeuristicPolicy {
    fn select_move(&mut self, state: &G) -> Result<G::Move> {
        let me = state.to_move();

        // Rule 1: complete a win
        if let Some(&mv) = state.winning_moves(me).first() {
            return Ok(mv);
        }

        // Rule 2: block the opponent's win
        if let Some(&mv) = state.winning_moves(me.opponent()).first() {
            return Ok(mv);
        }

        // Rule 3: random legal move
        state
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }

    fn reset(&mut self) -> Result<()> {
        self.rng = build_rng(self.rng_seed);
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}
