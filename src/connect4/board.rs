//! Connect 4 board with gravity-based moves

use std::fmt;

use crate::{
    game::{Game, Outcome, Player},
    tictactoe::Cell,
    types::StateKey,
};

/// Number of rows on the board
pub const ROWS: usize = 6;
/// Number of columns on the board
pub const COLS: usize = 7;

/// Scan directions for line detection: horizontal, vertical, both diagonals.
/// Each (row delta, column delta) pair is walked in both directions.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Connect 4 board state. Row 0 is the top of the board; a move names a
/// column and the piece falls to the lowest empty cell. Positions are not
/// serialized directly; persistence goes through `encode` and `state_key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connect4 {
    cells: [Cell; ROWS * COLS],
    to_move: Player,
}

impl Connect4 {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Connect4 {
            cells: [Cell::Empty; ROWS * COLS],
            to_move: Player::X,
        }
    }

    /// Get cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * COLS + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * COLS + col] = cell;
    }

    /// Number of pieces already dropped into a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS).filter(|&row| self.get(row, col) != Cell::Empty).count()
    }

    /// Check if a column can still accept a piece
    pub fn column_open(&self, col: usize) -> bool {
        col < COLS && self.get(0, col) == Cell::Empty
    }

    /// Drop a piece into a column and return the new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, col: usize) -> Result<Connect4, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if col >= COLS {
            return Err(crate::Error::InvalidColumn { column: col });
        }
        if !self.column_open(col) {
            return Err(crate::Error::ColumnFull { column: col });
        }

        // Lowest empty row in the column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
            .expect("open column has an empty cell");

        let mut new_state = self.clone();
        new_state.set(row, col, Cell::from(self.to_move));
        new_state.to_move = self.to_move.opponent();
        Ok(new_state)
    }

    /// Check if a player has four in a row in any orientation
    pub fn has_won(&self, player: Player) -> bool {
        let target = Cell::from(player);
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.get(row, col) != target {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    if self.line_from(row, col, dr, dc, target) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn line_from(&self, row: usize, col: usize, dr: isize, dc: isize, target: Cell) -> bool {
        for step in 1..4 {
            let r = row as isize + dr * step;
            let c = col as isize + dc * step;
            if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
                return false;
            }
            if self.get(r as usize, c as usize) != target {
                return false;
            }
        }
        true
    }

    /// Columns where dropping a piece would complete four in a row for the
    /// player, at the current fill levels
    pub fn immediate_wins(&self, player: Player) -> Vec<usize> {
        (0..COLS)
            .filter(|&col| self.column_open(col))
            .filter(|&col| {
                let row = ROWS - 1 - self.column_height(col);
                let mut probe = self.clone();
                probe.set(row, col, Cell::from(player));
                probe.has_won(player)
            })
            .collect()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if every column is full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| !self.column_open(col))
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 42 cell characters (whitespace is filtered
    /// out), row by row from the top of the board, optionally followed by a
    /// `_X`/`_O` suffix for the player to move.
    ///
    /// # Errors
    ///
    /// Returns error if the layout is malformed, the piece counts are
    /// impossible (X and O differ by more than 1, or contradict the suffix),
    /// or a piece floats above an empty cell.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, specified_turn) = match cleaned.find('_') {
            Some(idx) => {
                let suffix = &cleaned[idx + 1..];
                let player = match suffix {
                    "X" => Player::X,
                    "O" => Player::O,
                    _ => {
                        return Err(crate::Error::InvalidPlayerString {
                            player: suffix.to_string(),
                            label: cleaned.clone(),
                        });
                    }
                };
                (&cleaned[..idx], Some(player))
            }
            None => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        if chars.len() < ROWS * COLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: ROWS * COLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = Connect4::new();
        let mut x_count = 0;
        let mut o_count = 0;
        for (i, &c) in chars.iter().take(ROWS * COLS).enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
            match cell {
                Cell::X => x_count += 1,
                Cell::O => o_count += 1,
                Cell::Empty => {}
            }
            board.cells[i] = cell;
        }

        // Gravity: no piece may sit above an empty cell
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.get(row, col) != Cell::Empty && board.get(row + 1, col) == Cell::Empty {
                    return Err(crate::Error::FloatingPiece {
                        row,
                        column: col,
                        context: s.to_string(),
                    });
                }
            }
        }

        let inferred = if x_count == o_count {
            Player::X
        } else if x_count == o_count + 1 {
            Player::O
        } else {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        };

        board.to_move = match specified_turn {
            Some(turn) if turn != inferred => {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!(
                        "piece counts (X={x_count}, O={o_count}) are inconsistent with {} to move in '{s}'",
                        turn.to_char()
                    ),
                });
            }
            Some(turn) => turn,
            None => inferred,
        };

        Ok(board)
    }
}

impl Game for Connect4 {
    type Move = usize;

    const NAME: &'static str = "connect4";

    fn initial() -> Self {
        Self::new()
    }

    fn to_move(&self) -> Player {
        self.to_move
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..COLS).filter(|&col| self.column_open(col)).collect()
    }

    fn apply(&self, mv: usize) -> Result<Self, crate::Error> {
        self.make_move(mv)
    }

    fn outcome(&self) -> Outcome {
        if let Some(winner) = self.winner() {
            Outcome::Win(winner)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    fn winning_moves(&self, player: Player) -> Vec<usize> {
        self.immediate_wins(player)
    }

    fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move.to_char()
        )
    }

    /// Reduced learning key: per column, the height digit followed by the
    /// owners of the top two pieces, then the side to move.
    ///
    /// The raw state space (~4^42) is intractable for a dense table, so the
    /// key keeps what the mover can act on next (fill levels and the local
    /// vertical structure at each column top) and collapses buried cells,
    /// bounding the key space at roughly (7 * 9)^7.
    fn state_key(&self) -> StateKey {
        let mut key = String::with_capacity(COLS * 3 + 2);
        for col in 0..COLS {
            let height = self.column_height(col);
            key.push(char::from_digit(height as u32, 10).expect("height fits a digit"));
            for depth in 0..2 {
                if depth < height {
                    let row = ROWS - height + depth;
                    key.push(self.get(row, col).to_char());
                } else {
                    key.push('.');
                }
            }
        }
        key.push('_');
        key.push(self.to_move.to_char());
        StateKey::new(key)
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Connect4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            for col in 0..COLS {
                write!(f, "{}", self.get(row, col).to_char())?;
            }
            if row < ROWS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Connect4::new();
        assert_eq!(board.to_move(), Player::X);
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_gravity() {
        let board = Connect4::new().make_move(3).unwrap();
        // Piece lands on the bottom row
        assert_eq!(board.get(ROWS - 1, 3), Cell::X);
        assert_eq!(board.to_move(), Player::O);

        let board = board.make_move(3).unwrap();
        // Second piece stacks on top
        assert_eq!(board.get(ROWS - 2, 3), Cell::O);
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_column_fills_up() {
        let mut board = Connect4::new();
        for _ in 0..ROWS {
            board = board.make_move(0).unwrap();
        }
        assert!(!board.column_open(0));
        assert!(!board.legal_moves().contains(&0));
        assert!(matches!(
            board.make_move(0),
            Err(crate::Error::ColumnFull { column: 0 })
        ));
    }

    #[test]
    fn test_invalid_column() {
        let board = Connect4::new();
        assert!(matches!(
            board.make_move(7),
            Err(crate::Error::InvalidColumn { column: 7 })
        ));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Connect4::new();
        // X stacks column 0, O stacks column 1
        for _ in 0..3 {
            board = board.make_move(0).unwrap();
            board = board.make_move(1).unwrap();
        }
        board = board.make_move(0).unwrap();

        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.is_terminal());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Connect4::new();
        // X plays columns 0-3 along the bottom, O stacks column 6
        for col in 0..3 {
            board = board.make_move(col).unwrap();
            board = board.make_move(6).unwrap();
        }
        board = board.make_move(3).unwrap();

        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_no_move_after_win() {
        let mut board = Connect4::new();
        for _ in 0..3 {
            board = board.make_move(0).unwrap();
            board = board.make_move(1).unwrap();
        }
        board = board.make_move(0).unwrap();

        assert!(matches!(board.make_move(2), Err(crate::Error::GameOver)));
    }

    #[test]
    fn test_from_string_diagonal_win() {
        // X on the rising diagonal from the bottom-left
        let board = Connect4::from_string(
            ".......\
             .......\
             ...X...\
             ..XO...\
             .XOO...\
             XOXO...",
        )
        .unwrap();
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_from_string_rejects_floating_piece() {
        let result = Connect4::from_string(
            ".......\
             .......\
             .......\
             ...X...\
             .......\
             ...O...",
        );
        assert!(matches!(result, Err(crate::Error::FloatingPiece { .. })));
    }

    #[test]
    fn test_from_string_rejects_bad_counts() {
        let result = Connect4::from_string(
            ".......\
             .......\
             .......\
             .......\
             .......\
             XX.....",
        );
        assert!(matches!(
            result,
            Err(crate::Error::InvalidPieceCounts { .. })
        ));
    }

    #[test]
    fn test_state_key_reduced() {
        let board = Connect4::new();
        assert_eq!(board.state_key().as_str(), "0..0..0..0..0..0..0.._X");

        let board = board.make_move(3).unwrap().make_move(3).unwrap();
        // Column 3 has height 2, O on top of X
        assert_eq!(board.state_key().as_str(), "0..0..0..2OX0..0..0.._X");
    }

    #[test]
    fn test_immediate_wins() {
        let mut board = Connect4::new();
        // Three X in column 0, three O in column 1
        for _ in 0..3 {
            board = board.make_move(0).unwrap();
            board = board.make_move(1).unwrap();
        }
        assert_eq!(board.immediate_wins(Player::X), vec![0]);
        assert_eq!(board.immediate_wins(Player::O), vec![1]);
        assert!(Connect4::new().immediate_wins(Player::X).is_empty());
    }

    #[test]
    fn test_encode_roundtrip() {
        let board = Connect4::new()
            .make_move(2)
            .unwrap()
            .make_move(4)
            .unwrap()
            .make_move(2)
            .unwrap();
        let parsed = Connect4::from_string(&board.encode()).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_determinism() {
        let a = Connect4::new().make_move(5).unwrap();
        let b = Connect4::new().make_move(5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.encode(), b.encode());
    }
}
