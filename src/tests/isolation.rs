use super::*;

#[test]
fn blank_board_has_every_cell_open() {
    let gs = Isolation::new();
    assert_eq!((WIDTH as u32) * (HEIGHT as u32), gs.open_cell_count());
    assert_eq!(99, gs.actions().len());
    assert!(gs.actions().iter().all(|a| matches!(a, Action::Place(..))));
    assert_eq!(PlayerId::PlayerFirst, gs.to_move());
    assert!(!gs.is_terminal());
}

#[test]
fn padding_columns_are_closed() {
    let gs = Isolation::new();
    for row in 0..HEIGHT - 1 {
        assert!(!gs.is_open(Cell(row * ROW_STRIDE + WIDTH)));
        assert!(!gs.is_open(Cell(row * ROW_STRIDE + WIDTH + 1)));
    }
    assert!(!gs.is_open(Cell(SIZE)));
    assert!(!gs.is_open(Cell(127)));
}

#[test]
fn placement_closes_cell_and_passes_turn() {
    let gs = Isolation::new();
    let next = gs.result(Action::Place(cell(5, 4))).unwrap();
    assert_eq!(Isolation::new(), gs, "result must not modify the receiver");
    assert_eq!(1, next.ply_count());
    assert_eq!(PlayerId::PlayerSecond, next.to_move());
    assert_eq!(Some(cell(5, 4)), next.location(PlayerId::PlayerFirst));
    assert!(!next.is_open(cell(5, 4)));
    assert_eq!(98, next.actions().len());
    assert!(!next.actions().contains(&Action::Place(cell(5, 4))));
}

#[test]
fn placing_on_closed_cell_is_rejected() {
    let gs = Isolation::new().advance_multiple([Action::Place(cell(5, 4))]);
    assert_eq!(
        Err(IsolationError::InvalidMove {
            player: PlayerId::PlayerSecond,
            action: Action::Place(cell(5, 4))
        }),
        gs.result(Action::Place(cell(5, 4)))
    );
}

#[test]
fn jump_before_placement_is_rejected() {
    let gs = Isolation::new();
    assert_eq!(
        Err(IsolationError::NotPlaced {
            player: PlayerId::PlayerFirst
        }),
        gs.result(Action::Jump(Direction::NNE))
    );
}

#[test]
fn center_piece_has_eight_knight_moves() {
    let gs = Isolation::new().advance_multiple([Action::Place(cell(5, 4)), Action::Place(cell(0, 0))]);
    let actions = gs.actions();
    assert_eq!(8, actions.len());
    assert!(actions.iter().all(|a| matches!(a, Action::Jump(..))));
    let next = gs.result(Action::Jump(Direction::NNE)).unwrap();
    assert_eq!(Some(cell(6, 6)), next.location(PlayerId::PlayerFirst));
    let next = gs.result(Action::Jump(Direction::WSW)).unwrap();
    assert_eq!(Some(cell(3, 3)), next.location(PlayerId::PlayerFirst));
}

#[test]
fn corner_piece_does_not_wrap_around_edges() {
    let gs = Isolation::new().advance_multiple([Action::Place(cell(0, 0)), Action::Place(cell(10, 8))]);
    let libs = gs.liberties(gs.location(PlayerId::PlayerFirst));
    assert_eq!(2, libs.len());
    assert!(libs.contains(&cell(1, 2)));
    assert!(libs.contains(&cell(2, 1)));

    let libs = gs.liberties(gs.location(PlayerId::PlayerSecond));
    assert_eq!(2, libs.len());
    assert!(libs.contains(&cell(9, 6)));
    assert!(libs.contains(&cell(8, 7)));
}

#[test]
fn right_edge_piece_does_not_wrap_to_next_row() {
    let gs = Isolation::new().advance_multiple([Action::Place(cell(10, 4)), Action::Place(cell(0, 0))]);
    let libs = gs.liberties(gs.location(PlayerId::PlayerFirst));
    assert_eq!(4, libs.len());
    assert!(libs.iter().all(|c| c.col() >= 8));
}

#[test]
fn player_without_liberties_loses() {
    // Close every cell except the two placements, leaving P1 (to move) stuck.
    let mut gs = Isolation::new().advance_multiple([Action::Place(cell(0, 0)), Action::Place(cell(5, 4))]);
    gs.board = 0;
    assert!(gs.is_terminal());
    assert!(gs.actions().is_empty());
    assert_eq!(-WIN, gs.utility(PlayerId::PlayerFirst));
    assert_eq!(WIN, gs.utility(PlayerId::PlayerSecond));
}

#[test]
fn utility_is_zero_before_the_end() {
    let gs = Isolation::new().advance_multiple([Action::Place(cell(5, 4)), Action::Place(cell(0, 0))]);
    assert_eq!(0, gs.utility(PlayerId::PlayerFirst));
    assert_eq!(0, gs.utility(PlayerId::PlayerSecond));
}

#[test]
fn display_marks_pieces_and_closed_cells() {
    let gs = Isolation::new().advance_multiple([
        Action::Place(cell(5, 4)),
        Action::Place(cell(0, 0)),
        Action::Jump(Direction::NNE),
    ]);
    let s = gs.to_string();
    let rows: Vec<&str> = s.lines().collect();
    assert_eq!(HEIGHT as usize, rows.len());
    // Rows are printed top-down.
    assert_eq!(Some('2'), rows[8].chars().next());
    assert_eq!(Some('1'), rows[2].chars().nth(12));
    assert_eq!(Some('#'), rows[4].chars().nth(10));
}
