//! Tic-Tac-Toe game implementation

pub mod board;
pub mod lines;

pub use board::{BoardState, Cell};
pub use lines::{LineAnalyzer, WINNING_LINES};
