//! Shot resolution: single cells and whole-line area attacks.

use log::debug;
use serde::Serialize;

use crate::board::{Board, ShotOutcome};
use crate::config::{BOARD_SIZE, FLEET, TOTAL_SHIP_CELLS};
use crate::errors::ShotError;

/// Axis selector for an area attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAxis {
    Row,
    Column,
}

/// A ship confirmed sunk by a shot, with its full cell set so callers
/// can reveal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunkShip {
    pub name: &'static str,
    pub tag: char,
    pub length: usize,
    pub cells: Vec<(usize, usize)>,
}

/// Outcome of resolving one shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotReport {
    pub row: usize,
    pub col: usize,
    pub hit: bool,
    pub sunk: Option<SunkShip>,
    pub game_over: bool,
}

/// Aggregated outcome of an area attack along a row or column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaAttackReport {
    pub axis: LineAxis,
    pub index: usize,
    pub shots: Vec<ShotReport>,
    pub hit_count: usize,
    pub sunk: Vec<SunkShip>,
    pub game_over: bool,
}

/// Resolve a shot against `board`. Fails with `AlreadyShot` on a
/// repeated cell, leaving the board untouched. On a hit, reports
/// whether the owning ship sank (with its cell set) and whether the
/// cumulative hit count reached the whole fleet.
pub fn resolve(board: &mut Board, row: usize, col: usize) -> Result<ShotReport, ShotError> {
    let ship_index = board.ship_index_at(row, col);
    let hit = ship_index.is_some();
    board.record_shot(row, col, if hit { ShotOutcome::Hit } else { ShotOutcome::Miss })?;

    let sunk = ship_index.filter(|&i| board.is_sunk(i)).map(|i| {
        let class = FLEET[i];
        debug!("sunk {} at ({}, {})", class.name(), row, col);
        SunkShip {
            name: class.name(),
            tag: class.tag(),
            length: class.length(),
            cells: board.ship_cells(i).collect(),
        }
    });

    Ok(ShotReport {
        row,
        col,
        hit,
        sunk,
        game_over: board.hit_count() == TOTAL_SHIP_CELLS,
    })
}

/// Resolve an area attack covering every still-unshot cell along a row
/// or column. Already-shot cells are skipped silently; overlapping a
/// previously shot line is not an error.
pub fn resolve_line(
    board: &mut Board,
    axis: LineAxis,
    index: usize,
) -> Result<AreaAttackReport, ShotError> {
    if index >= BOARD_SIZE {
        let (row, col) = match axis {
            LineAxis::Row => (index, 0),
            LineAxis::Column => (0, index),
        };
        return Err(ShotError::OutOfBounds { row, col });
    }

    let mut shots = Vec::new();
    let mut sunk = Vec::new();
    let mut hit_count = 0;
    let mut game_over = false;

    for i in 0..BOARD_SIZE {
        let (row, col) = match axis {
            LineAxis::Row => (index, i),
            LineAxis::Column => (i, index),
        };
        if board.is_shot(row, col) {
            continue;
        }
        let report = resolve(board, row, col)?;
        if report.hit {
            hit_count += 1;
        }
        if let Some(ship) = report.sunk.clone() {
            sunk.push(ship);
        }
        game_over |= report.game_over;
        shots.push(report);
    }

    debug!(
        "area attack {:?} {} resolved {} cells, {} hits",
        axis,
        index,
        shots.len(),
        hit_count
    );

    Ok(AreaAttackReport { axis, index, shots, hit_count, sunk, game_over })
}
