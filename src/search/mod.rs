//! Game-tree search policies

pub mod evaluator;
pub mod minimax;

pub use evaluator::{Evaluator, NeutralEvaluator};
pub use minimax::{MinimaxPolicy, SearchStats, WIN_SCORE};
