//! One match: two boards, strict turn alternation, the area-attack
//! power-up, move history, and the AI's targeting state.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Board;
use crate::config::{verify_manifest, BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::errors::SessionError;
use crate::placement::{place_fleet_random, validate_fleet};
use crate::shot::{resolve, resolve_line, AreaAttackReport, LineAxis, ShotReport};
use crate::targeting::{Difficulty, TargetView, TargetingState};
use crate::ship::ShipPlacement;

/// Which side owns the current turn (or won the match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnOwner {
    Player,
    Opponent,
}

/// Read-only view of a match for display. The opponent's occupancy is
/// withheld until game over, except cells the player already hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStateSnapshot {
    pub player_occupancy: Vec<Vec<Option<char>>>,
    pub opponent_occupancy: Vec<Vec<Option<char>>>,
    /// Player's shots at the opponent board: `None` unknown,
    /// `Some(true)` hit, `Some(false)` miss.
    pub player_shots: Vec<Vec<Option<bool>>>,
    pub opponent_shots: Vec<Vec<Option<bool>>>,
    pub player_hits: usize,
    pub opponent_hits: usize,
    pub turn: TurnOwner,
    pub game_over: bool,
    pub winner: Option<TurnOwner>,
    pub remaining_player_ships: Vec<usize>,
    pub remaining_opponent_ships: Vec<usize>,
    pub player_area_attack_available: bool,
    pub opponent_area_attack_available: bool,
    pub difficulty: Difficulty,
}

/// A single human-vs-AI match. Mutated only through the shoot and
/// area-attack operations; immutable once a winner is decided. Callers
/// serialize access (no internal locking).
pub struct GameSession {
    player_board: Board,
    opponent_board: Board,
    turn: TurnOwner,
    winner: Option<TurnOwner>,
    fleet_placed: bool,
    player_area_attack: bool,
    opponent_area_attack: bool,
    player_moves: Vec<(usize, usize)>,
    opponent_moves: Vec<(usize, usize)>,
    targeting: TargetingState,
    rng: SmallRng,
}

impl GameSession {
    /// Create a session with the opponent fleet already randomized.
    /// The RNG is injected so matches are reproducible under test.
    pub fn new(difficulty: Difficulty, mut rng: SmallRng) -> Result<Self, SessionError> {
        verify_manifest()?;
        let mut opponent_board = Board::new();
        place_fleet_random(&mut opponent_board, &mut rng)?;
        info!("session created, difficulty {:?}", difficulty);
        Ok(GameSession {
            player_board: Board::new(),
            opponent_board,
            turn: TurnOwner::Player,
            winner: None,
            fleet_placed: false,
            player_area_attack: true,
            opponent_area_attack: true,
            player_moves: Vec::new(),
            opponent_moves: Vec::new(),
            targeting: TargetingState::new(difficulty),
            rng,
        })
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Result<Self, SessionError> {
        Self::new(difficulty, SmallRng::seed_from_u64(seed))
    }

    pub fn difficulty(&self) -> Difficulty {
        self.targeting.difficulty()
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<TurnOwner> {
        self.winner
    }

    pub fn turn(&self) -> TurnOwner {
        self.turn
    }

    /// Submit the player fleet. Must succeed exactly once before any
    /// shot is accepted; a rejected fleet leaves the board empty for a
    /// full resubmission.
    pub fn submit_fleet(
        &mut self,
        placements: &[ShipPlacement],
    ) -> Result<GameStateSnapshot, SessionError> {
        if self.fleet_placed {
            return Err(SessionError::FleetAlreadyPlaced);
        }
        validate_fleet(&mut self.player_board, placements)?;
        self.fleet_placed = true;
        debug!("player fleet placed");
        Ok(self.snapshot())
    }

    fn ensure_player_turn(&self) -> Result<(), SessionError> {
        if !self.fleet_placed {
            return Err(SessionError::FleetNotPlaced);
        }
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.turn != TurnOwner::Player {
            return Err(SessionError::NotYourTurn);
        }
        Ok(())
    }

    /// Player shoots a cell on the opponent board.
    pub fn player_shoot(&mut self, row: usize, col: usize) -> Result<ShotReport, SessionError> {
        self.ensure_player_turn()?;
        let report = resolve(&mut self.opponent_board, row, col)?;
        self.player_moves.push((row, col));
        debug!("player shot ({}, {}): hit={}", row, col, report.hit);
        if report.game_over {
            self.finish(TurnOwner::Player);
        } else {
            self.turn = TurnOwner::Opponent;
        }
        Ok(report)
    }

    /// Player spends the one-shot area attack on a whole row or
    /// column. Already-shot cells along the line are skipped.
    pub fn player_area_attack(
        &mut self,
        axis: LineAxis,
        index: usize,
    ) -> Result<AreaAttackReport, SessionError> {
        self.ensure_player_turn()?;
        if !self.player_area_attack {
            return Err(SessionError::PowerUpUnavailable);
        }
        if index >= BOARD_SIZE {
            return Err(SessionError::InvalidLine { index });
        }
        self.player_area_attack = false;
        let report = resolve_line(&mut self.opponent_board, axis, index)?;
        for shot in &report.shots {
            self.player_moves.push((shot.row, shot.col));
        }
        debug!(
            "player area attack {:?} {}: {} hits",
            axis, index, report.hit_count
        );
        if report.game_over {
            self.finish(TurnOwner::Player);
        } else {
            self.turn = TurnOwner::Opponent;
        }
        Ok(report)
    }

    /// Ask the targeting engine for a cell and resolve it against the
    /// player board.
    pub fn opponent_shoot(&mut self) -> Result<ShotReport, SessionError> {
        if !self.fleet_placed {
            return Err(SessionError::FleetNotPlaced);
        }
        if self.is_over() {
            return Err(SessionError::GameOver);
        }
        if self.turn != TurnOwner::Opponent {
            return Err(SessionError::NotYourTurn);
        }

        let hits = self.player_board.hits();
        let misses = self.player_board.misses();
        let opponent_hits = self.opponent_board.hits();
        let view = TargetView {
            hits: &hits,
            misses: &misses,
            own_moves: self.opponent_moves.len(),
            opponent_hits: &opponent_hits,
        };
        let (row, col) = self.targeting.select_target(view, &mut self.rng)?;

        let report = resolve(&mut self.player_board, row, col)?;
        self.targeting.observe(&report);
        self.opponent_moves.push((row, col));
        debug!("opponent shot ({}, {}): hit={}", row, col, report.hit);
        if report.game_over {
            self.finish(TurnOwner::Opponent);
        } else {
            self.turn = TurnOwner::Player;
        }
        Ok(report)
    }

    fn finish(&mut self, winner: TurnOwner) {
        self.winner = Some(winner);
        info!("game over, winner {:?}", winner);
    }

    /// Side-effect-free snapshot of the match for display.
    pub fn snapshot(&self) -> GameStateSnapshot {
        let game_over = self.is_over();
        let player_occupancy = occupancy_grid(&self.player_board, true);
        let opponent_occupancy = if game_over {
            occupancy_grid(&self.opponent_board, true)
        } else {
            // Reveal only cells the player has already hit.
            occupancy_grid(&self.opponent_board, false)
        };
        GameStateSnapshot {
            player_occupancy,
            opponent_occupancy,
            player_shots: shot_grid(&self.opponent_board),
            opponent_shots: shot_grid(&self.player_board),
            player_hits: self.opponent_board.hit_count(),
            opponent_hits: self.player_board.hit_count(),
            turn: self.turn,
            game_over,
            winner: self.winner,
            remaining_player_ships: remaining_lengths(&self.player_board),
            remaining_opponent_ships: remaining_lengths(&self.opponent_board),
            player_area_attack_available: self.player_area_attack,
            opponent_area_attack_available: self.opponent_area_attack,
            difficulty: self.targeting.difficulty(),
        }
    }
}

fn occupancy_grid(board: &Board, reveal_all: bool) -> Vec<Vec<Option<char>>> {
    (0..BOARD_SIZE)
        .map(|r| {
            (0..BOARD_SIZE)
                .map(|c| {
                    let tag = board.occupied_at(r, c);
                    if reveal_all || board.hits().contains(r, c) {
                        tag
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

fn shot_grid(board: &Board) -> Vec<Vec<Option<bool>>> {
    (0..BOARD_SIZE)
        .map(|r| {
            (0..BOARD_SIZE)
                .map(|c| {
                    if board.hits().contains(r, c) {
                        Some(true)
                    } else if board.misses().contains(r, c) {
                        Some(false)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

fn remaining_lengths(board: &Board) -> Vec<usize> {
    (0..NUM_SHIPS)
        .filter(|&i| !board.is_sunk(i))
        .map(|i| FLEET[i].length())
        .collect()
}
