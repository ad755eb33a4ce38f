use broadside::{
    validate_fleet, Board, Orientation, PlacementError, ShipPlacement, NUM_SHIPS,
    TOTAL_SHIP_CELLS,
};

fn legal_fleet() -> Vec<ShipPlacement> {
    // One ship per row, anchored at column 0.
    (0..NUM_SHIPS)
        .map(|i| ShipPlacement {
            ship_index: i,
            row: i,
            col: 0,
            orientation: Orientation::Horizontal,
        })
        .collect()
}

#[test]
fn test_validate_fleet_commits_all_ships() {
    let mut board = Board::new();
    validate_fleet(&mut board, &legal_fleet()).unwrap();
    assert!(board.all_placed());
    assert_eq!(board.ship_map().count(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_validate_fleet_rejects_wrong_count() {
    let mut board = Board::new();
    let mut fleet = legal_fleet();
    fleet.pop();
    assert_eq!(
        validate_fleet(&mut board, &fleet).unwrap_err(),
        PlacementError::WrongShipCount { expected: NUM_SHIPS, got: NUM_SHIPS - 1 }
    );
    assert!(board.ship_map().is_empty());
}

#[test]
fn test_validate_fleet_rejects_duplicate_index() {
    let mut board = Board::new();
    let mut fleet = legal_fleet();
    fleet[1].ship_index = 0;
    assert_eq!(
        validate_fleet(&mut board, &fleet).unwrap_err(),
        PlacementError::InvalidShipIndex { index: 0 }
    );
    assert!(board.ship_map().is_empty());
}

#[test]
fn test_validate_fleet_rejects_overlap_atomically() {
    let mut board = Board::new();
    // Pre-fill with a valid fleet, then resubmit a bad one: the board
    // must come out empty, never partially filled.
    validate_fleet(&mut board, &legal_fleet()).unwrap();
    let mut fleet = legal_fleet();
    fleet[3].row = 2; // Submarine collides with the Cruiser row
    assert_eq!(
        validate_fleet(&mut board, &fleet).unwrap_err(),
        PlacementError::Overlap { index: 3 }
    );
    assert!(board.ship_map().is_empty());
    assert!(!board.all_placed());
}

#[test]
fn test_validate_fleet_rejects_out_of_bounds() {
    let mut board = Board::new();
    let mut fleet = legal_fleet();
    fleet[0].col = 6; // Carrier (5) cannot start at column 6
    assert_eq!(
        validate_fleet(&mut board, &fleet).unwrap_err(),
        PlacementError::OutOfBounds { index: 0 }
    );
    assert!(board.ship_map().is_empty());
}

#[test]
fn test_resubmission_after_failure_succeeds() {
    let mut board = Board::new();
    let mut bad = legal_fleet();
    bad[0].col = 9;
    assert!(validate_fleet(&mut board, &bad).is_err());
    validate_fleet(&mut board, &legal_fleet()).unwrap();
    assert!(board.all_placed());
}
