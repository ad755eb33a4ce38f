use crate::errors::SessionError;
use crate::ship::ShipClass;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

pub const FLEET: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Carrier", 'A', 5),
    ShipClass::new("Battleship", 'B', 4),
    ShipClass::new("Cruiser", 'C', 3),
    ShipClass::new("Submarine", 'S', 3),
    ShipClass::new("Destroyer", 'D', 2),
];

/// Total number of ship cells in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Ship tags double as board markers, so no two manifest entries may
/// share one. A violation is a configuration bug, not user input.
pub fn verify_manifest() -> Result<(), SessionError> {
    for i in 0..NUM_SHIPS {
        for j in (i + 1)..NUM_SHIPS {
            if FLEET[i].tag() == FLEET[j].tag() {
                return Err(SessionError::Invariant(
                    "fleet manifest contains duplicate ship tags",
                ));
            }
        }
    }
    Ok(())
}
