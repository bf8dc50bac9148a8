//! Minimax search with optional alpha-beta pruning and depth limiting

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::evaluator::Evaluator;
use crate::{
    error::{Error, Result},
    game::{Game, Outcome},
    ports::Policy,
};

/// Terminal value magnitude. Far above any achievable heuristic sum, so a
/// found win or loss always outranks an evaluator score at any finite depth.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Node counters scoped to a single search invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of nodes expanded during the search
    pub nodes_visited: u64,
    /// Number of sibling subtrees skipped by alpha-beta cutoffs
    pub nodes_pruned: u64,
}

/// Minimax search policy.
///
/// Maximizes for the player to move at the root and minimizes for the
/// opponent at alternating levels. Terminal positions are valued exactly
/// (`±(WIN_SCORE - depth)`, preferring faster wins); at the configured depth
/// limit the evaluator scores the position from the root mover's perspective.
///
/// Ties are broken toward the earliest move in the game's canonical
/// enumeration order. With alpha-beta enabled the chosen move is identical
/// for every position; pruning changes only the node counts. This holds
/// because the root updates alpha after each child: a later child whose true
/// value merely equals the best so far comes back as a bound at or below
/// alpha and never displaces the earlier choice.
pub struct MinimaxPolicy<G: Game, E: Evaluator<G>> {
    name: String,
    evaluator: E,
    depth_limit: Option<u32>,
    alpha_beta: bool,
    last_stats: SearchStats,
    _game: PhantomData<G>,
}

impl<G: Game, E: Evaluator<G>> MinimaxPolicy<G, E> {
    /// Create a new search policy.
    ///
    /// `depth_limit` of `None` searches the full tree (Tic-Tac-Toe); Connect 4
    /// callers supply a finite depth. `alpha_beta` toggles pruning.
    pub fn new(evaluator: E, depth_limit: Option<u32>, alpha_beta: bool) -> Self {
        let name = if alpha_beta {
            "Minimax+AlphaBeta"
        } else {
            "Minimax"
        };
        Self {
            name: name.to_string(),
            evaluator,
            depth_limit,
            alpha_beta,
            last_stats: SearchStats::default(),
            _game: PhantomData,
        }
    }

    /// Whether alpha-beta pruning is enabled
    pub fn alpha_beta(&self) -> bool {
        self.alpha_beta
    }

    /// The configured depth limit, if any
    pub fn depth_limit(&self) -> Option<u32> {
        self.depth_limit
    }

    /// Node counters from the most recent `choose_move` call
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    /// Choose the best move for the player to move in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the position is terminal.
    pub fn choose_move(&mut self, state: &G) -> Result<(G::Move, SearchStats)> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let root = state.to_move();
        let mut stats = SearchStats::default();
        let mut alpha = f64::NEG_INFINITY;
        let mut best_move = moves[0];
        let mut best_score = f64::NEG_INFINITY;

        for &mv in &moves {
            let child = state.apply(mv)?;
            let score = self.search(&child, root, 1, alpha, f64::INFINITY, &mut stats)?;
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            if self.alpha_beta && best_score > alpha {
                alpha = best_score;
            }
        }

        self.last_stats = stats;
        Ok((best_move, stats))
    }

    fn search(
        &self,
        state: &G,
        root: crate::game::Player,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        stats: &mut SearchStats,
    ) -> Result<f64> {
        stats.nodes_visited += 1;

        match state.outcome() {
            Outcome::Win(winner) if winner == root => return Ok(WIN_SCORE - depth as f64),
            Outcome::Win(_) => return Ok(depth as f64 - WIN_SCORE),
            Outcome::Draw => return Ok(0.0),
            Outcome::InProgress => {}
        }

        if let Some(limit) = self.depth_limit
            && depth >= limit
        {
            return Ok(self.evaluator.score(state, root));
        }

        let moves = state.legal_moves();
        let maximizing = state.to_move() == root;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for (index, &mv) in moves.iter().enumerate() {
            let child = state.apply(mv)?;
            let score = self.search(&child, root, depth + 1, alpha, beta, stats)?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if self.alpha_beta && beta <= alpha {
                stats.nodes_pruned += (moves.len() - index - 1) as u64;
                break;
            }
        }

        Ok(best)
    }
}

impl<G: Game, E: Evaluator<G>> Policy<G> for MinimaxPolicy<G, E> {
    fn select_move(&mut self, state: &G) -> Result<G::Move> {
        let (mv, _) = self.choose_move(state)?;
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
