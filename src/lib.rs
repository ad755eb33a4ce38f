mod bitgrid;
mod board;
mod config;
mod errors;
mod logging;
mod placement;
mod session;
mod ship;
mod shot;
mod store;
mod targeting;

pub use bitgrid::{BitGrid, BitGridError};
pub use board::{Board, ShotOutcome};
pub use config::{verify_manifest, BOARD_SIZE, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS};
pub use errors::{PlacementError, SessionError, ShotError};
pub use logging::init_logging;
pub use placement::{place_fleet_random, validate_fleet};
pub use session::{GameSession, GameStateSnapshot, TurnOwner};
pub use ship::{placement_mask, span_cells, Orientation, ShipClass, ShipPlacement};
pub use shot::{resolve, resolve_line, AreaAttackReport, LineAxis, ShotReport, SunkShip};
pub use store::{SessionId, SessionStore};
pub use targeting::{Difficulty, TargetView, TargetingState};
