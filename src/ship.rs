//! Ship classes and placement geometry.

use serde::{Deserialize, Serialize};

use crate::bitgrid::BitGrid;
use crate::config::BOARD_SIZE;
use crate::errors::PlacementError;

type Mask = BitGrid<u128, BOARD_SIZE>;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A manifest entry: ship name, single-character board marker, and
/// length. Tags are assigned explicitly so that names sharing a first
/// letter (Carrier, Cruiser) still get distinct markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    tag: char,
    length: usize,
}

impl ShipClass {
    pub const fn new(name: &'static str, tag: char, length: usize) -> Self {
        Self { name, tag, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Single-character marker; unique per manifest entry, verified at
    /// session start.
    pub fn tag(&self) -> char {
        self.tag
    }
}

/// A requested placement for one manifest entry: anchor cell plus
/// orientation, as submitted by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipPlacement {
    pub ship_index: usize,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// Enumerate the cells a ship of `length` would occupy from an anchor,
/// without bounds checking. Pair with [`placement_mask`] when validity
/// matters.
pub fn span_cells(
    row: usize,
    col: usize,
    orientation: Orientation,
    length: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (0..length).map(move |i| match orientation {
        Orientation::Horizontal => (row, col + i),
        Orientation::Vertical => (row + i, col),
    })
}

/// Build the occupancy mask for a placement, rejecting spans that leave
/// the board.
pub fn placement_mask(
    ship_index: usize,
    row: usize,
    col: usize,
    orientation: Orientation,
    length: usize,
) -> Result<Mask, PlacementError> {
    let fits = match orientation {
        Orientation::Horizontal => col + length <= BOARD_SIZE && row < BOARD_SIZE,
        Orientation::Vertical => row + length <= BOARD_SIZE && col < BOARD_SIZE,
    };
    if !fits {
        return Err(PlacementError::OutOfBounds { index: ship_index });
    }
    let mut mask = Mask::new();
    for (r, c) in span_cells(row, col, orientation, length) {
        // In bounds by the check above.
        mask.set(r, c)
            .map_err(|_| PlacementError::OutOfBounds { index: ship_index })?;
    }
    Ok(mask)
}
