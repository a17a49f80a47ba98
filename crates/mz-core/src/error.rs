//! Error types for generation, grid access and movement

use thiserror::Error;

use crate::position::Position;

/// Errors surfaced by the maze core.
///
/// All of these are deterministic functions of their input; retrying the
/// same call without changing the input yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Generation was requested below the minimum maze size.
    #[error("Invalid maze size requested: {width}x{height} (minimum is {min}x{min})", min = crate::maze::MIN_DIMENSION)]
    InvalidSize { width: usize, height: usize },

    /// A strict accessor was given a position outside the grid.
    #[error("invalid position access {position}: out of bounds")]
    OutOfBounds { position: Position },

    /// The requested move target is outside the grid.
    #[error("{position} is not on the map")]
    InvalidMove { position: Position },

    /// A door crossing was requested on a cell that holds no door.
    #[error("This isn't a door: {position}")]
    NotADoor { position: Position },

    /// Every neighbor of the door has the same tile type as the player's cell.
    #[error("The door at {door} leads nowhere new")]
    NoTraversableExit { door: Position },

    /// Raw rows handed to the grid builder are not rectangular.
    #[error("column {column} has {len} cells, expected {expected}")]
    RaggedColumns {
        column: usize,
        len: usize,
        expected: usize,
    },

    /// A raw cell value outside {0, 1, 2}.
    #[error("invalid cell value {0}")]
    InvalidCellValue(u8),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MazeError>;
