//! Connect 4 game implementation

pub mod board;
pub mod eval;

pub use board::{COLS, Connect4, ROWS};
pub use eval::ThreatEvaluator;
