//! Player movement and door crossing
//!
//! Where the player is (room, corridor, doorway) is implied by the cell
//! under them. Moving onto a door steps through it into whichever neighbor
//! differs from the tile the player came from, and the door opens up into
//! floor.

use tracing::debug;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Grid};
use crate::position::Position;

/// Outcome of a successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Player moved straight to the target
    Walked { to: Position },
    /// Player went through `door` and came out at `to`
    CrossedDoor { door: Position, to: Position },
}

impl Step {
    /// Where the player ended up
    pub const fn destination(&self) -> Position {
        match self {
            Step::Walked { to } | Step::CrossedDoor { to, .. } => *to,
        }
    }
}

/// Move the player to `to`.
///
/// The target only has to be on the map: walls are corridor tiles and can be
/// stood on, and reachability is left to the caller. A door target is
/// crossed with [`open_door`]. On error nothing changes.
pub fn move_player(grid: &mut Grid, player: &mut Position, to: Position) -> Result<Step> {
    let Some(target) = grid.try_get(to) else {
        return Err(MazeError::InvalidMove { position: to });
    };
    if target.is_door() {
        return open_door(grid, player, to);
    }
    *player = to;
    Ok(Step::Walked { to })
}

/// Step through the door at `door`.
///
/// The player lands on the first neighbor of the door (in the usual
/// direction order) whose tile type differs from the one they stand on, and
/// the door becomes floor. On error nothing changes.
pub fn open_door(grid: &mut Grid, player: &mut Position, door: Position) -> Result<Step> {
    if grid.get(door)? != Cell::Door {
        return Err(MazeError::NotADoor { position: door });
    }
    let tile = grid.get(*player)?;

    let exit = door
        .neighbors()
        .find(|&n| grid.try_get(n).is_some_and(|cell| cell != tile))
        .ok_or(MazeError::NoTraversableExit { door })?;

    grid.set(door, Cell::Floor)?;
    debug!(from = %player, %door, to = %exit, "crossed door");
    *player = exit;
    Ok(Step::CrossedDoor { door, to: exit })
}
