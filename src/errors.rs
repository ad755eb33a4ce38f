//! Error taxonomy: recoverable placement and shot errors, session
//! protocol misuse, and fatal invariant violations.

use core::fmt;

use crate::bitgrid::BitGridError;

/// Errors from fleet placement. Always recoverable: nothing is
/// committed, the caller resubmits the whole fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Submitted fleet does not have one placement per manifest entry.
    WrongShipCount { expected: usize, got: usize },
    /// Ship index outside the manifest, or listed twice.
    InvalidShipIndex { index: usize },
    /// Ship span extends beyond the board.
    OutOfBounds { index: usize },
    /// Ship span crosses another ship.
    Overlap { index: usize },
    /// The ship at this index is already on the board.
    AlreadyPlaced { index: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::WrongShipCount { expected, got } => {
                write!(f, "fleet needs {} placements, got {}", expected, got)
            }
            PlacementError::InvalidShipIndex { index } => {
                write!(f, "ship index {} is invalid or repeated", index)
            }
            PlacementError::OutOfBounds { index } => {
                write!(f, "ship {} extends beyond the board", index)
            }
            PlacementError::Overlap { index } => {
                write!(f, "ship {} overlaps another ship", index)
            }
            PlacementError::AlreadyPlaced { index } => {
                write!(f, "ship {} is already placed", index)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Errors from resolving a shot. State is untouched on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotError {
    /// The cell was already shot; shot state never transitions twice.
    AlreadyShot { row: usize, col: usize },
    /// Coordinates outside the board.
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::AlreadyShot { row, col } => {
                write!(f, "cell ({}, {}) was already shot", row, col)
            }
            ShotError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is out of bounds", row, col)
            }
        }
    }
}

impl std::error::Error for ShotError {}

impl From<BitGridError> for ShotError {
    fn from(err: BitGridError) -> Self {
        let BitGridError::IndexOutOfBounds { row, col } = err;
        ShotError::OutOfBounds { row, col }
    }
}

/// Errors from session-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The acting side does not own the current turn.
    NotYourTurn,
    /// The match already has a winner.
    GameOver,
    /// The player fleet has not been submitted yet.
    FleetNotPlaced,
    /// The player fleet was already submitted.
    FleetAlreadyPlaced,
    /// The one-shot area attack was already spent.
    PowerUpUnavailable,
    /// Invalid row/column index for an area attack.
    InvalidLine { index: usize },
    Placement(PlacementError),
    Shot(ShotError),
    /// A logic-bug condition (e.g. placement retry exhaustion). Not
    /// recoverable by resubmitting input.
    Invariant(&'static str),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotYourTurn => write!(f, "not this side's turn"),
            SessionError::GameOver => write!(f, "the game is already over"),
            SessionError::FleetNotPlaced => write!(f, "player fleet has not been placed"),
            SessionError::FleetAlreadyPlaced => write!(f, "player fleet was already placed"),
            SessionError::PowerUpUnavailable => write!(f, "area attack already used"),
            SessionError::InvalidLine { index } => {
                write!(f, "line index {} is out of bounds", index)
            }
            SessionError::Placement(e) => write!(f, "placement rejected: {}", e),
            SessionError::Shot(e) => write!(f, "shot rejected: {}", e),
            SessionError::Invariant(msg) => write!(f, "invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<PlacementError> for SessionError {
    fn from(err: PlacementError) -> Self {
        SessionError::Placement(err)
    }
}

impl From<ShotError> for SessionError {
    fn from(err: ShotError) -> Self {
        SessionError::Shot(err)
    }
}
