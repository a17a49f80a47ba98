//! Maze cells and rectangular cell storage
//!
//! Storage is x-major (`cells[x][y]`) everywhere. Two access disciplines
//! coexist:
//!
//! - `try_get` / `try_set` never fail; out-of-range positions read as `None`
//!   and writes are dropped. Traversals use these, since neighbor positions
//!   routinely fall off the edge.
//! - `get` / `set` return [`MazeError::OutOfBounds`] and are used for
//!   coordinates that come from outside the crate.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::{MazeError, Result};
use crate::position::Position;

/// Cell type of a finished maze
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Cell {
    /// Open room floor
    #[default]
    Floor = 0,
    /// Region boundary. Once generation completes the player may stand on
    /// these, and the movement and reveal rules treat them as corridor.
    Wall = 1,
    /// Breach between two regions
    Door = 2,
}

impl Cell {
    /// Raw value as used on the wire
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Check if this cell is part of a corridor run (the wall value)
    pub const fn is_corridor(self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub const fn is_door(self) -> bool {
        matches!(self, Cell::Door)
    }
}

impl TryFrom<u8> for Cell {
    type Error = MazeError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Cell::Floor),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Door),
            other => Err(MazeError::InvalidCellValue(other)),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.value()
    }
}

/// A `width x height` array of values.
///
/// Used for the maze itself and for scratch masks (visited flags,
/// region tags) that traversals allocate per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    cells: Vec<Vec<T>>,
}

/// The finished maze
pub type Grid = Plane<Cell>;

impl<T: Copy> Plane<T> {
    /// Create a plane with every cell set to `fill`
    pub fn filled(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![fill; height]; width],
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn contains(&self, p: Position) -> bool {
        p.is_in_bounds(self.width, self.height)
    }

    /// Read a cell, or `None` if `p` is outside the plane
    pub fn try_get(&self, p: Position) -> Option<T> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[p.x as usize][p.y as usize])
    }

    /// Write a cell. Out-of-range writes are ignored.
    pub fn try_set(&mut self, p: Position, value: T) {
        if self.contains(p) {
            self.cells[p.x as usize][p.y as usize] = value;
        }
    }

    /// Read a cell, failing with `OutOfBounds` outside the plane
    pub fn get(&self, p: Position) -> Result<T> {
        self.try_get(p)
            .ok_or(MazeError::OutOfBounds { position: p })
    }

    /// Write a cell, failing with `OutOfBounds` outside the plane
    pub fn set(&mut self, p: Position, value: T) -> Result<()> {
        if !self.contains(p) {
            return Err(MazeError::OutOfBounds { position: p });
        }
        self.cells[p.x as usize][p.y as usize] = value;
        Ok(())
    }

    /// Overwrite every cell with `value`
    pub fn fill(&mut self, value: T) {
        for col in &mut self.cells {
            col.fill(value);
        }
    }

    /// All positions, column by column
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let height = self.height;
        (0..self.width).flat_map(move |x| {
            (0..height).map(move |y| Position::new(x as i32, y as i32))
        })
    }
}

impl Plane<bool> {
    /// An all-false mask matching another plane's dimensions
    pub fn mask_like<U>(other: &Plane<U>) -> Self {
        Self::filled(other.width, other.height, false)
    }

    /// Set the flag at `p`, returning whether it was previously clear.
    /// Out-of-range positions return false.
    pub fn mark(&mut self, p: Position) -> bool {
        match self.try_get(p) {
            Some(false) => {
                self.try_set(p, true);
                true
            }
            _ => false,
        }
    }
}

impl Grid {
    /// Build a grid from raw x-major values (`rows[x][y]`).
    ///
    /// All columns must have the same length and every value must be a
    /// valid cell value.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let width = rows.len();
        let height = rows.first().map_or(0, Vec::len);
        let mut grid = Self::filled(width, height, Cell::Floor);
        for (x, col) in rows.into_iter().enumerate() {
            if col.len() != height {
                return Err(MazeError::RaggedColumns {
                    column: x,
                    len: col.len(),
                    expected: height,
                });
            }
            for (y, value) in col.into_iter().enumerate() {
                grid.cells[x][y] = Cell::try_from(value)?;
            }
        }
        Ok(grid)
    }

    /// Raw x-major values, the inverse of [`Grid::from_rows`]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|col| col.iter().map(|c| c.value()).collect())
            .collect()
    }

    /// Count cells of the given type
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == kind).count()
    }
}
