//! The AI decision engine: hunt/target state machine, probability
//! density over remaining ship placements, and difficulty-tiered
//! heuristics layered on top.
//!
//! The density grid is recomputed from scratch on every call as a pure
//! function of the observed shot state, so no weight ever drifts
//! across turns. Target selection is deterministic given the shot
//! state, the remaining-ship multiset, the move histories, and the
//! injected RNG.

use std::collections::VecDeque;

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bitgrid::BitGrid;
use crate::config::{BOARD_SIZE, FLEET};
use crate::errors::SessionError;
use crate::ship::Orientation;
use crate::shot::ShotReport;

type Mask = BitGrid<u128, BOARD_SIZE>;
type WeightGrid = [[f64; BOARD_SIZE]; BOARD_SIZE];

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Multiplier applied to unshot neighbors of unresolved hits: an
/// undetermined continuation of a partially-hit ship is
/// disproportionately likely nearby.
const HIT_ADJACENCY_BOOST: f64 = 3.0;
/// Chance the easy tier consults the density grid instead of shooting
/// at random.
const EASY_SMART_CHANCE: f64 = 0.3;
/// Chance the medium tier discards the optimal pick for a random one.
const MEDIUM_SLIP_CHANCE: f64 = 0.3;
/// Additive bonus on even-parity cells (hard tier). Every ship of
/// length >= 2 crosses both parities, so one parity class suffices.
const PARITY_BONUS: f64 = 0.5;
/// Multiplicative parity factor (top tier).
const PARITY_FACTOR: f64 = 1.2;
/// Edge damping while a ship of length >= LONG_SHIP remains: long
/// ships terminate flush against an edge less often.
const EDGE_PENALTY: f64 = 0.8;
const LONG_SHIP: usize = 4;
/// Per-neighbor boost from the opponent's own hit clusters (top tier,
/// heuristic only).
const CLUSTER_BOOST: f64 = 1.1;
/// Opening book for the top tier: inset corners, then the central
/// sub-square.
const OPENING_CORNERS: [(usize, usize); 4] = [(1, 1), (1, 8), (8, 1), (8, 8)];
const CENTER: std::ops::Range<usize> = 3..7;

/// AI skill tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Hunt,
    Target,
}

/// What the engine can see when choosing a target: its own shot record
/// on the opponent board, its move count, and the opponent's hits on
/// its board (cluster heuristic input).
#[derive(Debug, Clone, Copy)]
pub struct TargetView<'a> {
    pub hits: &'a Mask,
    pub misses: &'a Mask,
    pub own_moves: usize,
    pub opponent_hits: &'a Mask,
}

impl TargetView<'_> {
    fn unshot(&self, row: usize, col: usize) -> bool {
        !self.hits.contains(row, col) && !self.misses.contains(row, col)
    }
}

/// Mutable AI state for one session.
#[derive(Debug, Clone)]
pub struct TargetingState {
    difficulty: Difficulty,
    mode: Mode,
    last_hit: Option<(usize, usize)>,
    pursued: VecDeque<(usize, usize)>,
    axis: Option<Orientation>,
    sunk_cells: Mask,
    remaining: Vec<usize>,
}

impl TargetingState {
    pub fn new(difficulty: Difficulty) -> Self {
        TargetingState {
            difficulty,
            mode: Mode::Hunt,
            last_hit: None,
            pursued: VecDeque::new(),
            axis: None,
            sunk_cells: Mask::new(),
            remaining: FLEET.iter().map(|class| class.length()).collect(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True while no partially-hit ship is being pursued.
    pub fn is_hunting(&self) -> bool {
        self.mode == Mode::Hunt
    }

    /// Orientation locked from two same-row or same-column hits on the
    /// pursued ship, if any.
    pub fn locked_axis(&self) -> Option<Orientation> {
        self.axis
    }

    /// Lengths of opponent ships not yet confirmed sunk.
    pub fn remaining_lengths(&self) -> &[usize] {
        &self.remaining
    }

    /// Fold the outcome of the engine's own shot into the state
    /// machine. Sinking the pursued ship resets to hunt with an empty
    /// queue and unlocked axis; the sunk signal comes from the
    /// resolver, never from recomputation.
    pub fn observe(&mut self, report: &ShotReport) {
        if !report.hit {
            return;
        }
        self.mode = Mode::Target;
        self.last_hit = Some((report.row, report.col));
        self.pursued.push_back((report.row, report.col));

        if self.axis.is_none() && self.pursued.len() >= 2 {
            let hits: Vec<_> = self.pursued.iter().copied().collect();
            let (r1, c1) = hits[hits.len() - 2];
            let (r2, c2) = hits[hits.len() - 1];
            if r1 == r2 {
                self.axis = Some(Orientation::Horizontal);
            } else if c1 == c2 {
                self.axis = Some(Orientation::Vertical);
            }
        }

        if let Some(ship) = &report.sunk {
            for &(r, c) in &ship.cells {
                let _ = self.sunk_cells.set(r, c);
            }
            if let Some(pos) = self.remaining.iter().position(|&l| l == ship.length) {
                self.remaining.remove(pos);
            }
            trace!("pursued ship sunk ({}), back to hunt", ship.name);
            self.mode = Mode::Hunt;
            self.last_hit = None;
            self.pursued.clear();
            self.axis = None;
        }
    }

    /// Pick the next cell to shoot. Errors only if no unshot cell
    /// exists, which a correctly driven session never allows.
    pub fn select_target<R: Rng + ?Sized>(
        &self,
        view: TargetView<'_>,
        rng: &mut R,
    ) -> Result<(usize, usize), SessionError> {
        if self.mode == Mode::Target {
            let candidates = self.target_candidates(&view);
            if !candidates.is_empty() {
                let pick = candidates[rng.random_range(0..candidates.len())];
                trace!("target mode candidate {:?} (axis {:?})", pick, self.axis);
                return Ok(pick);
            }
            // Every adjacency is exhausted; fall through to hunting.
        }
        self.hunt(&view, rng)
    }

    /// Target-mode candidates, in priority order: along the locked
    /// axis from the most recent hit, then along the axis from any
    /// queued hit, then plain adjacency of the most recent hit, then
    /// adjacency of any queued hit.
    fn target_candidates(&self, view: &TargetView<'_>) -> Vec<(usize, usize)> {
        let last = match self.last_hit {
            Some(cell) => cell,
            None => return Vec::new(),
        };
        if let Some(axis) = self.axis {
            let along = axis_neighbors(last, axis, view);
            if !along.is_empty() {
                return along;
            }
            let mut from_queue: Vec<_> = self
                .pursued
                .iter()
                .flat_map(|&cell| axis_neighbors(cell, axis, view))
                .collect();
            from_queue.sort_unstable();
            from_queue.dedup();
            if !from_queue.is_empty() {
                return from_queue;
            }
        }
        let adjacent = orthogonal_neighbors(last, view);
        if !adjacent.is_empty() {
            return adjacent;
        }
        let mut from_queue: Vec<_> = self
            .pursued
            .iter()
            .flat_map(|&cell| orthogonal_neighbors(cell, view))
            .collect();
        from_queue.sort_unstable();
        from_queue.dedup();
        from_queue
    }

    fn hunt<R: Rng + ?Sized>(
        &self,
        view: &TargetView<'_>,
        rng: &mut R,
    ) -> Result<(usize, usize), SessionError> {
        match self.difficulty {
            Difficulty::Easy => {
                if rng.random::<f64>() < EASY_SMART_CHANCE {
                    let grid = self.density_grid(view);
                    pick_max_weight(&grid, view, rng)
                } else {
                    random_unshot(view, rng)
                }
            }
            Difficulty::Medium => {
                if rng.random::<f64>() < MEDIUM_SLIP_CHANCE {
                    return random_unshot(view, rng);
                }
                let grid = self.density_grid(view);
                pick_max_weight(&grid, view, rng)
            }
            Difficulty::Hard => {
                let mut grid = self.density_grid(view);
                let long_ship_left = self.remaining.iter().any(|&l| l >= LONG_SHIP);
                for (r, row) in grid.iter_mut().enumerate() {
                    for (c, weight) in row.iter_mut().enumerate() {
                        if !view.unshot(r, c) {
                            continue;
                        }
                        if (r + c) % 2 == 0 {
                            *weight += PARITY_BONUS;
                        }
                        if long_ship_left && is_edge(r, c) {
                            *weight *= EDGE_PENALTY;
                        }
                    }
                }
                pick_max_weight(&grid, view, rng)
            }
            Difficulty::Top => self.hunt_top(view, rng),
        }
    }

    fn hunt_top<R: Rng + ?Sized>(
        &self,
        view: &TargetView<'_>,
        rng: &mut R,
    ) -> Result<(usize, usize), SessionError> {
        // Opening book: inset corners first, then the best density
        // cell of the central sub-square.
        if view.own_moves < 3 {
            let corners: Vec<_> = OPENING_CORNERS
                .iter()
                .copied()
                .filter(|&(r, c)| view.unshot(r, c))
                .collect();
            if !corners.is_empty() {
                return Ok(corners[rng.random_range(0..corners.len())]);
            }
        }
        let grid = self.density_grid(view);
        if view.own_moves < 6 {
            let mut best: Option<((usize, usize), f64)> = None;
            for r in CENTER {
                for c in CENTER {
                    if !view.unshot(r, c) {
                        continue;
                    }
                    if best.map_or(true, |(_, w)| grid[r][c] > w) {
                        best = Some(((r, c), grid[r][c]));
                    }
                }
            }
            if let Some((cell, _)) = best {
                return Ok(cell);
            }
        }

        let mut grid = grid;
        let (heat, max_heat) = self.heat_grid(view);
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, weight) in row.iter_mut().enumerate() {
                if !view.unshot(r, c) {
                    continue;
                }
                if (r + c) % 2 == 0 {
                    *weight *= PARITY_FACTOR;
                }
                if max_heat > 0.0 {
                    *weight *= 1.0 + heat[r][c] / max_heat;
                }
            }
        }

        // Heuristic only: humans tend to cluster their shots near
        // suspected ships, so echo the opponent's hit clusters back
        // onto our own search.
        for (r, c) in view.opponent_hits.cells() {
            for (dr, dc) in ORTHOGONAL {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                if let Some((nr, nc)) = in_bounds(nr, nc) {
                    if view.unshot(nr, nc) {
                        grid[nr][nc] *= CLUSTER_BOOST;
                    }
                }
            }
        }

        pick_max_weight(&grid, view, rng)
    }

    /// Base probability density: for every remaining ship length,
    /// count feasible placements (no recorded miss in the span) and
    /// accumulate weight on each unshot covered cell, then boost
    /// unshot neighbors of unresolved hits.
    fn density_grid(&self, view: &TargetView<'_>) -> WeightGrid {
        let mut grid = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];

        for &len in &self.remaining {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                for_each_feasible_span(view.misses, len, orientation, |cells| {
                    for &(r, c) in cells {
                        if view.unshot(r, c) {
                            grid[r][c] += 1.0;
                        }
                    }
                });
            }
        }

        // Hits whose ship has not been confirmed sunk still have an
        // undetermined continuation nearby.
        for (r, c) in view.hits.cells() {
            if self.sunk_cells.contains(r, c) {
                continue;
            }
            for (dr, dc) in ORTHOGONAL {
                let (nr, nc) = (r as isize + dr, c as isize + dc);
                if let Some((nr, nc)) = in_bounds(nr, nc) {
                    if view.unshot(nr, nc) {
                        grid[nr][nc] *= HIT_ADJACENCY_BOOST;
                    }
                }
            }
        }

        grid
    }

    /// Secondary heat map weighing each feasible span by ship length,
    /// so cells able to host the longest remaining ships stand out.
    fn heat_grid(&self, view: &TargetView<'_>) -> (WeightGrid, f64) {
        let mut heat = [[0.0f64; BOARD_SIZE]; BOARD_SIZE];
        let mut max_heat = 0.0f64;

        for &len in &self.remaining {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                for_each_feasible_span(view.misses, len, orientation, |cells| {
                    for &(r, c) in cells {
                        if view.unshot(r, c) {
                            heat[r][c] += len as f64;
                            max_heat = max_heat.max(heat[r][c]);
                        }
                    }
                });
            }
        }

        (heat, max_heat)
    }
}

/// Visit every placement span of `len` cells that contains no recorded
/// miss.
fn for_each_feasible_span<F>(misses: &Mask, len: usize, orientation: Orientation, mut f: F)
where
    F: FnMut(&[(usize, usize)]),
{
    if len == 0 || len > BOARD_SIZE {
        return;
    }
    let (max_row, max_col) = match orientation {
        Orientation::Horizontal => (BOARD_SIZE, BOARD_SIZE - len + 1),
        Orientation::Vertical => (BOARD_SIZE - len + 1, BOARD_SIZE),
    };
    let mut cells = vec![(0usize, 0usize); len];
    for r in 0..max_row {
        for c in 0..max_col {
            let mut feasible = true;
            for (i, cell) in cells.iter_mut().enumerate() {
                let (rr, cc) = match orientation {
                    Orientation::Horizontal => (r, c + i),
                    Orientation::Vertical => (r + i, c),
                };
                if misses.contains(rr, cc) {
                    feasible = false;
                    break;
                }
                *cell = (rr, cc);
            }
            if feasible {
                f(&cells);
            }
        }
    }
}

fn in_bounds(row: isize, col: isize) -> Option<(usize, usize)> {
    if row >= 0 && col >= 0 && (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
        Some((row as usize, col as usize))
    } else {
        None
    }
}

fn is_edge(row: usize, col: usize) -> bool {
    row == 0 || row == BOARD_SIZE - 1 || col == 0 || col == BOARD_SIZE - 1
}

fn orthogonal_neighbors(cell: (usize, usize), view: &TargetView<'_>) -> Vec<(usize, usize)> {
    let (r, c) = cell;
    ORTHOGONAL
        .iter()
        .filter_map(|&(dr, dc)| in_bounds(r as isize + dr, c as isize + dc))
        .filter(|&(nr, nc)| view.unshot(nr, nc))
        .collect()
}

fn axis_neighbors(
    cell: (usize, usize),
    axis: Orientation,
    view: &TargetView<'_>,
) -> Vec<(usize, usize)> {
    let (r, c) = cell;
    let deltas: [(isize, isize); 2] = match axis {
        Orientation::Horizontal => [(0, -1), (0, 1)],
        Orientation::Vertical => [(-1, 0), (1, 0)],
    };
    deltas
        .iter()
        .filter_map(|&(dr, dc)| in_bounds(r as isize + dr, c as isize + dc))
        .filter(|&(nr, nc)| view.unshot(nr, nc))
        .collect()
}

/// Maximum-weight unshot cell, ties broken uniformly at random. Falls
/// back to a uniform unshot pick when no cell carries positive weight.
fn pick_max_weight<R: Rng + ?Sized>(
    grid: &WeightGrid,
    view: &TargetView<'_>,
    rng: &mut R,
) -> Result<(usize, usize), SessionError> {
    let mut best = f64::NEG_INFINITY;
    let mut ties: Vec<(usize, usize)> = Vec::new();
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if !view.unshot(r, c) {
                continue;
            }
            let w = grid[r][c];
            if w > best {
                best = w;
                ties.clear();
                ties.push((r, c));
            } else if w == best {
                ties.push((r, c));
            }
        }
    }
    if best <= 0.0 {
        return random_unshot(view, rng);
    }
    Ok(ties[rng.random_range(0..ties.len())])
}

fn random_unshot<R: Rng + ?Sized>(
    view: &TargetView<'_>,
    rng: &mut R,
) -> Result<(usize, usize), SessionError> {
    let open: Vec<(usize, usize)> = (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| view.unshot(r, c))
        .collect();
    if open.is_empty() {
        return Err(SessionError::Invariant("no unshot cells remain to target"));
    }
    Ok(open[rng.random_range(0..open.len())])
}
