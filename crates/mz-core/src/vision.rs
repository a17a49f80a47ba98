//! Fog-of-war reveal
//!
//! Two reveal policies, picked by what the player is standing on:
//!
//! - In a room (floor), everything reachable over floor is seen. Doors are
//!   seen but not looked through, and walls are never seen from inside.
//! - In a corridor (wall cells), the whole connected corridor run is seen,
//!   plus any adjacent floor cell that passes [`check_view`].

use std::collections::VecDeque;

use hashbrown::HashMap;
use strum::Display;
use tracing::trace;

use crate::error::Result;
use crate::grid::{Cell, Grid, Plane};
use crate::position::Position;

/// Cells revealed by one [`describe`] call
pub type Reveal = HashMap<Position, Cell>;

/// Which reveal policy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RevealMode {
    Room,
    Corridor,
}

impl RevealMode {
    /// Policy for a player standing on `cell`. Doors count as room.
    pub const fn for_cell(cell: Cell) -> Self {
        match cell {
            Cell::Wall => RevealMode::Corridor,
            Cell::Floor | Cell::Door => RevealMode::Room,
        }
    }
}

/// Compute the cells newly seen from `player`.
///
/// `revealed` is the caller's fog-of-war memory: only cells not yet marked
/// there are returned, and every returned cell is marked. Calling this twice
/// without moving returns an empty map the second time.
pub fn describe(grid: &Grid, player: Position, revealed: &mut Plane<bool>) -> Result<Reveal> {
    let mode = RevealMode::for_cell(grid.get(player)?);
    let mut sweep = Sweep {
        grid,
        revealed,
        seen: Plane::mask_like(grid),
        queue: VecDeque::new(),
        found: Reveal::new(),
    };
    sweep.start(player);

    match mode {
        RevealMode::Room => sweep.room(),
        RevealMode::Corridor => sweep.corridor(player),
    }

    trace!(%player, %mode, revealed = sweep.found.len(), "describe");
    Ok(sweep.found)
}

/// Line-of-sight test from a corridor: can `candidate` be seen from `player`?
///
/// Walks a digital line from `candidate` back to `player`, one axis step at a
/// time, keeping the ratio of steps taken close to the slope. Any floor cell
/// stepped onto before reaching the player blocks the view. The candidate's
/// own cell is not checked.
///
/// Not symmetric: swapping the arguments can walk a different set of cells.
pub fn check_view(grid: &Grid, candidate: Position, player: Position) -> bool {
    let diff = candidate - player;
    if diff == Position::ORIGIN {
        return true;
    }

    let run_len = diff.x.abs();
    let rise_len = diff.y.abs();
    let back = Position::new(diff.x.signum(), diff.y.signum());
    let mut run = 0;
    let mut rise = 0;
    let mut cursor = candidate;

    loop {
        // rise / run < |slope|, cross-multiplied so vertical lines need no
        // special division
        let step_rise = if run == run_len {
            true
        } else if rise == rise_len {
            false
        } else {
            rise * run_len < run * rise_len
        };
        if step_rise {
            cursor.y -= back.y;
            rise += 1;
        } else {
            cursor.x -= back.x;
            run += 1;
        }

        if cursor == player {
            return true;
        }
        match grid.try_get(cursor) {
            Some(Cell::Wall | Cell::Door) => {}
            Some(Cell::Floor) | None => return false,
        }
    }
}

/// Scratch state for one reveal traversal
struct Sweep<'a> {
    grid: &'a Grid,
    revealed: &'a mut Plane<bool>,
    seen: Plane<bool>,
    queue: VecDeque<Position>,
    found: Reveal,
}

impl Sweep<'_> {
    fn start(&mut self, player: Position) {
        self.seen.mark(player);
        if let Some(cell) = self.grid.try_get(player) {
            self.record(player, cell);
        }
        self.queue.push_back(player);
    }

    fn record(&mut self, p: Position, cell: Cell) {
        if self.revealed.mark(p) {
            self.found.insert(p, cell);
        }
    }

    /// Flood over floor; doors are leaves, walls are invisible
    fn room(&mut self) {
        while let Some(current) = self.queue.pop_front() {
            for check in current.neighbors() {
                if self.seen.try_get(check) != Some(false) {
                    continue;
                }
                let Some(cell) = self.grid.try_get(check) else {
                    continue;
                };
                if cell.is_corridor() {
                    continue;
                }
                self.seen.mark(check);
                self.record(check, cell);
                if cell == Cell::Floor {
                    self.queue.push_back(check);
                }
            }
        }
    }

    /// Flood along corridor cells; floor needs line of sight, doors are leaves
    fn corridor(&mut self, player: Position) {
        while let Some(current) = self.queue.pop_front() {
            for check in current.neighbors() {
                if !self.seen.mark(check) {
                    continue;
                }
                let Some(cell) = self.grid.try_get(check) else {
                    continue;
                };
                match cell {
                    Cell::Wall => {
                        self.record(check, cell);
                        self.queue.push_back(check);
                    }
                    Cell::Floor => {
                        if check_view(self.grid, check, player) {
                            self.record(check, cell);
                        }
                    }
                    Cell::Door => self.record(check, cell),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    /// The hand-built 7x7 test maze, x-major
    fn sample_grid() -> Grid {
        Grid::from_rows(vec![
            vec![0, 0, 2, 0, 0, 0, 0],
            vec![0, 0, 1, 1, 1, 1, 0],
            vec![1, 1, 1, 1, 1, 1, 0],
            vec![0, 0, 0, 1, 1, 1, 0],
            vec![0, 0, 0, 2, 0, 0, 0],
            vec![0, 0, 0, 1, 1, 1, 1],
            vec![0, 0, 0, 2, 0, 0, 0],
        ])
        .unwrap()
    }

    fn keys(reveal: &Reveal) -> Vec<Position> {
        let mut keys: Vec<_> = reveal.keys().copied().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_mode_dispatch() {
        assert_eq!(RevealMode::for_cell(Cell::Floor), RevealMode::Room);
        assert_eq!(RevealMode::for_cell(Cell::Door), RevealMode::Room);
        assert_eq!(RevealMode::for_cell(Cell::Wall), RevealMode::Corridor);
    }

    #[test]
    fn test_room_reveal_stops_at_walls_and_doors() {
        let grid = sample_grid();
        let mut revealed = Plane::mask_like(&grid);
        let reveal = describe(&grid, Position::new(0, 0), &mut revealed).unwrap();

        assert_eq!(
            keys(&reveal),
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
        assert_eq!(reveal[&Position::new(0, 2)], Cell::Door);
        assert!(reveal.values().all(|c| !c.is_corridor()));
    }

    #[test]
    fn test_describe_twice_reveals_nothing_new() {
        let grid = sample_grid();
        let mut revealed = Plane::mask_like(&grid);
        let first = describe(&grid, Position::new(4, 5), &mut revealed).unwrap();
        assert!(!first.is_empty());
        let second = describe(&grid, Position::new(4, 5), &mut revealed).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_describe_out_of_bounds_player() {
        let grid = sample_grid();
        let mut revealed = Plane::mask_like(&grid);
        let outside = Position::new(7, 0);
        assert_eq!(
            describe(&grid, outside, &mut revealed),
            Err(MazeError::OutOfBounds { position: outside })
        );
    }

    #[test]
    fn test_corridor_reveals_run_and_adjacent_floor() {
        let grid = Grid::from_rows(vec![
            vec![1, 1, 1, 1, 1],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let mut revealed = Plane::mask_like(&grid);
        let reveal = describe(&grid, Position::new(0, 0), &mut revealed).unwrap();

        assert_eq!(reveal.len(), 10);
        for y in 0..5 {
            assert_eq!(reveal.get(&Position::new(0, y)), Some(&Cell::Wall));
            assert_eq!(reveal.get(&Position::new(1, y)), Some(&Cell::Floor));
            assert!(!reveal.contains_key(&Position::new(2, y)));
        }
    }

    #[test]
    fn test_corridor_floor_needs_line_of_sight() {
        // An L-shaped corridor wrapping a room
        let grid = Grid::from_rows(vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 1, 0]]).unwrap();
        let mut revealed = Plane::mask_like(&grid);
        let reveal = describe(&grid, Position::new(0, 0), &mut revealed).unwrap();

        assert_eq!(
            keys(&reveal),
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
            ]
        );
        assert_eq!(revealed.try_get(Position::new(1, 1)), Some(false));
        assert_eq!(revealed.try_get(Position::new(2, 2)), Some(false));
    }

    #[test]
    fn test_check_view_reflexive() {
        let grid = sample_grid();
        for p in grid.positions() {
            assert!(check_view(&grid, p, p));
        }
    }

    #[test]
    fn test_check_view_adjacent_always_visible() {
        let grid = Grid::filled(3, 3, Cell::Floor);
        let player = Position::new(1, 1);
        for n in player.neighbors() {
            assert!(check_view(&grid, n, player));
        }
    }

    #[test]
    fn test_check_view_straight_lines() {
        let mut grid = Grid::filled(5, 5, Cell::Wall);
        // vertical, zero run
        assert!(check_view(&grid, Position::new(2, 4), Position::new(2, 0)));
        // horizontal, zero rise
        assert!(check_view(&grid, Position::new(0, 3), Position::new(4, 3)));

        grid.try_set(Position::new(2, 2), Cell::Floor);
        assert!(!check_view(&grid, Position::new(2, 4), Position::new(2, 0)));
        grid.try_set(Position::new(2, 2), Cell::Door);
        assert!(check_view(&grid, Position::new(2, 4), Position::new(2, 0)));
    }

    #[test]
    fn test_check_view_diagonal_blocked_by_floor() {
        let mut grid = Grid::filled(3, 3, Cell::Wall);
        assert!(check_view(&grid, Position::new(2, 2), Position::new(0, 0)));

        // the walk from (2,2) goes through (1,2), (1,1), (0,1)
        grid.try_set(Position::new(1, 1), Cell::Floor);
        assert!(!check_view(&grid, Position::new(2, 2), Position::new(0, 0)));
    }
}
