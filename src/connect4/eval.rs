//! Heuristic evaluation of Connect 4 positions

use super::board::{COLS, Connect4, DIRECTIONS, ROWS};
use crate::{
    game::Player,
    search::Evaluator,
    tictactoe::Cell,
};

/// Weight for three own pieces in a window with an open end
const THREE_IN_WINDOW: f64 = 50.0;
/// Weight for two own pieces in a window with two open cells
const TWO_IN_WINDOW: f64 = 5.0;
/// Weight per own piece in the center column
const CENTER_PIECE: f64 = 3.0;

/// Window-counting evaluator for depth-limited Connect 4 search.
///
/// Every 4-cell window (horizontal, vertical, both diagonals) that contains
/// only one player's pieces contributes weight by threat strength; own pieces
/// in the center column add a positional bonus. The final score is the
/// player's tally minus the opponent's, so it is zero-sum consistent by
/// construction: `score(s, X) == -score(s, O)` exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatEvaluator;

impl ThreatEvaluator {
    fn side_score(state: &Connect4, player: Player) -> f64 {
        let own = Cell::from(player);
        let mut score = 0.0;

        for row in 0..ROWS {
            for col in 0..COLS {
                for (dr, dc) in DIRECTIONS {
                    // Skip windows extending outside the board
                    let end_row = row as isize + 3 * dr;
                    let end_col = col as isize + 3 * dc;
                    if end_row < 0
                        || end_row >= ROWS as isize
                        || end_col < 0
                        || end_col >= COLS as isize
                    {
                        continue;
                    }

                    let mut own_count = 0;
                    let mut empty_count = 0;
                    for step in 0..4 {
                        let r = (row as isize + dr * step) as usize;
                        let c = (col as isize + dc * step) as usize;
                        match state.get(r, c) {
                            cell if cell == own => own_count += 1,
                            Cell::Empty => empty_count += 1,
                            _ => break,
                        }
                    }
                    if own_count + empty_count < 4 {
                        continue; // Window blocked by an opponent piece
                    }

                    if own_count == 3 && empty_count == 1 {
                        score += THREE_IN_WINDOW;
                    } else if own_count == 2 && empty_count == 2 {
                        score += TWO_IN_WINDOW;
                    }
                }
            }
        }

        let center = COLS / 2;
        for row in 0..ROWS {
            if state.get(row, center) == own {
                score += CENTER_PIECE;
            }
        }

        score
    }
}

impl Evaluator<Connect4> for ThreatEvaluator {
    fn score(&self, state: &Connect4, perspective: Player) -> f64 {
        Self::side_score(state, perspective) - Self::side_score(state, perspective.opponent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_neutral() {
        let board = Connect4::new();
        assert_eq!(ThreatEvaluator.score(&board, Player::X), 0.0);
    }

    #[test]
    fn test_zero_sum_consistency() {
        let board = Connect4::new()
            .make_move(3)
            .unwrap()
            .make_move(0)
            .unwrap()
            .make_move(3)
            .unwrap()
            .make_move(1)
            .unwrap()
            .make_move(2)
            .unwrap();

        let x = ThreatEvaluator.score(&board, Player::X);
        let o = ThreatEvaluator.score(&board, Player::O);
        assert_eq!(x, -o);
    }

    #[test]
    fn test_open_three_outweighs_two() {
        // X has three in a row with open ends on the bottom row
        let three = Connect4::from_string(
            ".......\
             .......\
             .......\
             .......\
             ..OO...\
             .XXXO..",
        )
        .unwrap();
        let two = Connect4::from_string(
            ".......\
             .......\
             .......\
             .......\
             ..O....\
             .XX.O..",
        )
        .unwrap();

        assert!(
            ThreatEvaluator.score(&three, Player::X) > ThreatEvaluator.score(&two, Player::X)
        );
    }

    #[test]
    fn test_center_preference() {
        let center = Connect4::new().make_move(3).unwrap();
        let edge = Connect4::new().make_move(0).unwrap();
        assert!(
            ThreatEvaluator.score(&center, Player::X) > ThreatEvaluator.score(&edge, Player::X)
        );
    }
}
