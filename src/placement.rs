//! Fleet placement: random generation and atomic validation.

use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::errors::{PlacementError, SessionError};
use crate::ship::{Orientation, ShipPlacement};

/// Attempts per ship before giving up. With 17 of 100 cells occupied
/// the cap is effectively unreachable; exhausting it means a logic bug.
const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Place every manifest entry at a uniformly random legal position, in
/// manifest order, with no backtracking across ships.
pub fn place_fleet_random<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
) -> Result<(), SessionError> {
    for (ship_index, class) in FLEET.iter().enumerate() {
        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE, BOARD_SIZE - class.length() + 1),
                Orientation::Vertical => (BOARD_SIZE - class.length() + 1, BOARD_SIZE),
            };
            let row = rng.random_range(0..max_row);
            let col = rng.random_range(0..max_col);
            match board.place(ship_index, row, col, orientation) {
                Ok(()) => {
                    placed = true;
                    break;
                }
                Err(PlacementError::Overlap { .. }) => continue,
                // Anchor sampling keeps spans in bounds; anything else
                // here is a bug.
                Err(_) => {
                    return Err(SessionError::Invariant(
                        "random placement produced an illegal span",
                    ))
                }
            }
        }
        if !placed {
            return Err(SessionError::Invariant("placement retries exhausted"));
        }
    }
    debug!("random fleet placed: {} ships", NUM_SHIPS);
    Ok(())
}

/// Validate and commit a submitted fleet atomically: one placement per
/// manifest entry, all in bounds, no overlap. On any violation the
/// board is cleared and the error returned; partial commits are never
/// observable.
pub fn validate_fleet(
    board: &mut Board,
    placements: &[ShipPlacement],
) -> Result<(), PlacementError> {
    if placements.len() != NUM_SHIPS {
        board.clear();
        return Err(PlacementError::WrongShipCount {
            expected: NUM_SHIPS,
            got: placements.len(),
        });
    }

    // Build the fleet on a scratch board so failure leaves the caller's
    // board empty rather than half-filled.
    let mut scratch = Board::new();
    let mut seen = [false; NUM_SHIPS];
    for p in placements {
        if p.ship_index >= NUM_SHIPS || seen[p.ship_index] {
            board.clear();
            return Err(PlacementError::InvalidShipIndex { index: p.ship_index });
        }
        seen[p.ship_index] = true;
        if let Err(err) = scratch.place(p.ship_index, p.row, p.col, p.orientation) {
            board.clear();
            return Err(err);
        }
    }

    *board = scratch;
    Ok(())
}
