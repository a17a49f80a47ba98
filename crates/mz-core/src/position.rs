//! Grid coordinates

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Orthogonal step offsets, in the order every traversal visits them.
///
/// Diagonals are never considered.
pub const DIRECTIONS: [Position; 4] = [
    Position::new(0, 1),
    Position::new(0, -1),
    Position::new(1, 0),
    Position::new(-1, 0),
];

/// An (x, y) cell coordinate. Serializes as `{"x": .., "y": ..}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this position lies in `[0, width) x [0, height)`
    pub const fn is_in_bounds(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }

    /// The four orthogonal neighbors, in [`DIRECTIONS`] order.
    ///
    /// Neighbors may fall outside any grid; callers filter with the
    /// silent accessors.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        DIRECTIONS.into_iter().map(move |dir| self + dir)
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: Position) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
