//! Maze generation
//!
//! Partitions a rectangle into regions by growing every seed at once
//! (multi-source flood fill). Cells where two regions meet become walls,
//! overly thick walls are trimmed back to floor, and each seed then knocks
//! one door into the nearest wall it can reach.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::MazeConfig;
use crate::error::Result;
use crate::grid::{Cell, Grid, Plane};
use crate::position::Position;
use crate::rng::MazeRng;

/// Smallest width or height the generator accepts
pub const MIN_DIMENSION: usize = 20;

/// Region tag written into frontier cells during the flood fill
const WALL_TAG: u32 = 1;

/// Region ids of the two fixed corner seeds
const FIRST_CORNER_REGION: u32 = 2;
const LAST_CORNER_REGION: u32 = 3;

/// Region id offset for random seeds (id = attempt index + offset)
const RANDOM_REGION_BASE: u32 = 4;

/// A flood-fill source: a region id growing out of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Seed {
    region: u32,
    pos: Position,
}

/// A generated maze together with the seed positions it was grown from
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    /// Corner seeds first, then accepted random seeds in acceptance order
    pub seeds: Vec<Position>,
}

/// Builds grids from a [`MazeConfig`]
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    config: MazeConfig,
}

impl MazeGenerator {
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Generate a maze. Every cell of the result is floor, wall or door.
    pub fn generate(&self, rng: &mut MazeRng) -> Result<Grid> {
        self.generate_layout(rng).map(|layout| layout.grid)
    }

    /// Generate a maze and report the seeds it grew from
    pub fn generate_layout(&self, rng: &mut MazeRng) -> Result<Layout> {
        self.config.validate()?;
        let width = self.config.width;
        let height = self.config.height;

        let seeds = self.place_seeds(rng);
        debug!(
            width,
            height,
            attempted = self.config.seed_count(),
            accepted = seeds.len() - 2,
            "placed region seeds"
        );

        let tags = flood_regions(width, height, &seeds);
        let mut grid = normalize(&tags);

        let trimmed = bound_wall_runs(&mut grid, self.config.wall_thickness);
        let doors = place_doors(&mut grid, &seeds);
        debug!(
            trimmed,
            doors,
            walls = grid.count(Cell::Wall),
            "maze generated"
        );

        Ok(Layout {
            grid,
            seeds: seeds.iter().map(|s| s.pos).collect(),
        })
    }

    /// Two fixed corner seeds, then up to `seed_count` random ones.
    ///
    /// A candidate is checked only against the seeds accepted before it,
    /// in order; rejected attempts still consume their region id.
    fn place_seeds(&self, rng: &mut MazeRng) -> Vec<Seed> {
        let width = self.config.width;
        let height = self.config.height;
        let mut seeds = vec![
            Seed {
                region: FIRST_CORNER_REGION,
                pos: Position::ORIGIN,
            },
            Seed {
                region: LAST_CORNER_REGION,
                pos: Position::new(width as i32 - 1, height as i32 - 1),
            },
        ];

        for attempt in 0..self.config.seed_count() {
            let point = Position::new(
                rng.rn2(width as u32) as i32,
                rng.rn2(height as u32) as i32,
            );
            let far_enough = seeds
                .iter()
                .all(|s| s.pos.distance(point) >= self.config.min_seed_distance);
            if far_enough {
                seeds.push(Seed {
                    region: RANDOM_REGION_BASE + attempt as u32,
                    pos: point,
                });
            }
        }
        seeds
    }
}

/// Generate a `width x height` maze from `seed_count` random seed attempts
pub fn generate_maze(
    width: usize,
    height: usize,
    seed_count: usize,
    rng: &mut MazeRng,
) -> Result<Grid> {
    let config = MazeConfig {
        width,
        height,
        seed_count: Some(seed_count),
        ..MazeConfig::default()
    };
    MazeGenerator::new(config).generate(rng)
}

/// Grow all seeds breadth-first from one shared queue.
///
/// Returns region tags: `WALL_TAG` on frontier cells, a region id elsewhere.
/// A cell that finds a visited neighbor of another region becomes a wall and
/// stops looking at its remaining neighbors.
fn flood_regions(width: usize, height: usize, seeds: &[Seed]) -> Plane<u32> {
    let mut tags = Plane::filled(width, height, 0u32);
    let mut visited = Plane::mask_like(&tags);
    let mut queue: VecDeque<Seed> = seeds.iter().copied().collect();

    while let Some(current) = queue.pop_front() {
        for check in current.pos.neighbors() {
            let Some(seen) = visited.try_get(check) else {
                continue;
            };
            if !seen {
                tags.try_set(check, current.region);
                visited.try_set(check, true);
                queue.push_back(Seed {
                    region: current.region,
                    pos: check,
                });
                continue;
            }
            if tags.try_get(check) == Some(current.region) {
                continue;
            }
            tags.try_set(current.pos, WALL_TAG);
            break;
        }
    }
    tags
}

/// Collapse region tags to floor, keeping frontier cells as walls
fn normalize(tags: &Plane<u32>) -> Grid {
    let mut grid = Grid::filled(tags.width(), tags.height(), Cell::Floor);
    for p in tags.positions() {
        if tags.try_get(p) == Some(WALL_TAG) {
            grid.try_set(p, Cell::Wall);
        }
    }
    grid
}

/// Cap every run of wall cells, along rows and then along columns, at
/// `thickness` cells. Returns how many wall cells were turned into floor.
fn bound_wall_runs(grid: &mut Grid, thickness: usize) -> usize {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut trimmed = 0;
    for y in 0..height {
        trimmed += trim_line(grid, (0..width).map(|x| Position::new(x, y)), thickness);
    }
    for x in 0..width {
        trimmed += trim_line(grid, (0..height).map(|y| Position::new(x, y)), thickness);
    }
    trimmed
}

fn trim_line(grid: &mut Grid, line: impl Iterator<Item = Position>, thickness: usize) -> usize {
    let mut run = 0;
    let mut trimmed = 0;
    for p in line {
        match grid.try_get(p) {
            Some(Cell::Wall) if run >= thickness => {
                grid.try_set(p, Cell::Floor);
                trimmed += 1;
            }
            Some(Cell::Wall) => run += 1,
            _ => run = 0,
        }
    }
    trimmed
}

/// From each seed, search outward for the first wall and turn it into a door.
///
/// The visited mask is shared across seeds, so later searches skip cells an
/// earlier one already swept. Returns the number of doors placed (at most one
/// per seed).
fn place_doors(grid: &mut Grid, seeds: &[Seed]) -> usize {
    let mut visited = Plane::mask_like(&*grid);
    let mut doors = 0;

    for seed in seeds {
        let mut queue = VecDeque::from([seed.pos]);
        'search: while let Some(current) = queue.pop_front() {
            for check in current.neighbors() {
                if visited.try_get(check) != Some(false) {
                    continue;
                }
                if grid.try_get(check) == Some(Cell::Wall) {
                    grid.try_set(check, Cell::Door);
                    doors += 1;
                    break 'search;
                }
                visited.try_set(check, true);
                queue.push_back(check);
            }
        }
    }
    doors
}
