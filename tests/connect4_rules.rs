//! Connect 4 rule coverage: all four win orientations, gravity, and the
//! full-board draw.

use gambit::{
    Error, Game, Outcome, Player,
    connect4::{COLS, Connect4, ROWS},
};

fn play(moves: &[usize]) -> Connect4 {
    let mut state = Connect4::new();
    for &col in moves {
        state = state.make_move(col).unwrap();
    }
    state
}

#[test]
fn horizontal_win() {
    // X fills columns 0-3 on the bottom row while O stacks column 6
    let state = play(&[0, 6, 1, 6, 2, 6, 3]);
    assert_eq!(state.outcome(), Outcome::Win(Player::X));
}

#[test]
fn vertical_win() {
    let state = play(&[4, 0, 4, 1, 4, 2, 4]);
    assert_eq!(state.outcome(), Outcome::Win(Player::X));
}

#[test]
fn rising_diagonal_win() {
    // X builds the diagonal (bottom-left to top-right) from column 0
    let state = play(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 5, 3]);
    assert_eq!(state.outcome(), Outcome::Win(Player::X));
}

#[test]
fn falling_diagonal_win() {
    // Mirror image: X builds the diagonal from column 6 down to column 3
    let state = play(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 1, 3]);
    assert_eq!(state.outcome(), Outcome::Win(Player::X));
}

#[test]
fn full_board_without_line_is_a_draw() {
    let state = Connect4::from_string(
        "XOXOXOO\
         XOXOXOX\
         OXOXOXO\
         OXOXOXO\
         XOXOXOX\
         XOXOXOX",
    )
    .unwrap();

    assert_eq!(state.outcome(), Outcome::Draw);
    assert!(state.legal_moves().is_empty());
    assert!(matches!(state.make_move(0), Err(Error::GameOver)));
}

#[test]
fn gravity_stacks_pieces_bottom_up() {
    let mut state = Connect4::new();
    for height in 1..=ROWS {
        state = state.make_move(3).unwrap();
        assert_eq!(state.column_height(3), height);
    }
    assert!(!state.column_open(3));
    assert!(matches!(
        state.make_move(3),
        Err(Error::ColumnFull { column: 3 })
    ));
}

#[test]
fn legal_moves_exclude_full_columns_only() {
    let mut state = Connect4::new();
    for _ in 0..ROWS {
        state = state.make_move(0).unwrap();
    }
    let expected: Vec<usize> = (1..COLS).collect();
    assert_eq!(state.legal_moves(), expected);
}

#[test]
fn win_ends_the_game_immediately() {
    let state = play(&[4, 0, 4, 1, 4, 2, 4]);
    assert!(state.is_terminal());
    assert!(state.legal_moves().is_empty());
    assert!(matches!(state.make_move(5), Err(Error::GameOver)));
}

#[test]
fn out_of_range_column_is_rejected() {
    assert!(matches!(
        Connect4::new().make_move(COLS),
        Err(Error::InvalidColumn { column }) if column == COLS
    ));
}
