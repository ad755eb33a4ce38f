//! One side's board: ship occupancy and per-cell shot outcomes.

use crate::bitgrid::BitGrid;
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::errors::{PlacementError, ShotError};
use crate::ship::{placement_mask, Orientation, ShipClass};

type Mask = BitGrid<u128, BOARD_SIZE>;

/// Per-cell shot outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlacedShip {
    class: ShipClass,
    row: usize,
    col: usize,
    orientation: Orientation,
    mask: Mask,
}

/// Ship occupancy plus hit/miss grids for one side. Occupancy is set
/// only during placement; once the attack phase starts the only
/// mutation path is `record_shot`, and each cell transitions at most
/// once from unknown to hit or miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    ships: [Option<PlacedShip>; NUM_SHIPS],
    ship_map: Mask,
    hits: Mask,
    misses: Mask,
}

impl Board {
    pub fn new() -> Self {
        Board {
            ships: [None; NUM_SHIPS],
            ship_map: Mask::new(),
            hits: Mask::new(),
            misses: Mask::new(),
        }
    }

    /// Place the manifest entry `ship_index` at (row, col). Fails on a
    /// bad index, double placement, out-of-bounds span, or overlap;
    /// nothing is committed on failure.
    pub fn place(
        &mut self,
        ship_index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if ship_index >= NUM_SHIPS {
            return Err(PlacementError::InvalidShipIndex { index: ship_index });
        }
        if self.ships[ship_index].is_some() {
            return Err(PlacementError::AlreadyPlaced { index: ship_index });
        }
        let class = FLEET[ship_index];
        let mask = placement_mask(ship_index, row, col, orientation, class.length())?;
        if self.ship_map.intersects(&mask) {
            return Err(PlacementError::Overlap { index: ship_index });
        }
        self.ship_map |= mask;
        self.ships[ship_index] = Some(PlacedShip { class, row, col, orientation, mask });
        Ok(())
    }

    /// Drop all ships and shots, returning the board to its empty
    /// state. Used by the placement validator to guarantee that a
    /// rejected fleet leaves nothing behind.
    pub fn clear(&mut self) {
        *self = Board::new();
    }

    /// Tag of the ship occupying a cell, if any.
    pub fn occupied_at(&self, row: usize, col: usize) -> Option<char> {
        self.ships
            .iter()
            .flatten()
            .find(|ship| ship.mask.contains(row, col))
            .map(|ship| ship.class.tag())
    }

    /// Manifest index of the ship occupying a cell, if any.
    pub fn ship_index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.map_or(false, |s| s.mask.contains(row, col)))
            .map(|(i, _)| i)
    }

    /// Record a hit or miss at a cell. Fails without mutating if the
    /// cell was already shot.
    pub fn record_shot(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), ShotError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(ShotError::AlreadyShot { row, col });
        }
        match outcome {
            ShotOutcome::Hit => self.hits.set(row, col)?,
            ShotOutcome::Miss => self.misses.set(row, col)?,
        }
        Ok(())
    }

    /// Whether a cell has been shot (hit or miss).
    pub fn is_shot(&self, row: usize, col: usize) -> bool {
        self.hits.contains(row, col) || self.misses.contains(row, col)
    }

    /// Lazily enumerate the cells of the ship at `ship_index`.
    pub fn ship_cells(&self, ship_index: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ships[ship_index]
            .iter()
            .flat_map(|ship| ship.mask.cells())
    }

    /// A ship is sunk iff every cell of its mask has been hit.
    pub fn is_sunk(&self, ship_index: usize) -> bool {
        match &self.ships[ship_index] {
            Some(ship) => self.hits.covers(&ship.mask),
            None => false,
        }
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(|slot| slot.is_some())
    }

    pub fn all_sunk(&self) -> bool {
        self.all_placed() && (0..NUM_SHIPS).all(|i| self.is_sunk(i))
    }

    pub fn hit_count(&self) -> usize {
        self.hits.count()
    }

    pub fn ship_map(&self) -> Mask {
        self.ship_map
    }

    pub fn hits(&self) -> Mask {
        self.hits
    }

    pub fn misses(&self) -> Mask {
        self.misses
    }

    /// Placement of the ship at `ship_index`, if placed.
    pub fn placement(&self, ship_index: usize) -> Option<(usize, usize, Orientation)> {
        self.ships[ship_index].map(|s| (s.row, s.col, s.orientation))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
