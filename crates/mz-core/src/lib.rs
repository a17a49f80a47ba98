//! mz-core: Maze generation and fog-of-war exploration
//!
//! This crate contains the maze generator, the reveal engine and the
//! door-crossing movement rules. It performs no I/O; callers drive a
//! [`GameSession`] and serialize the [`wire`] shapes however they like.

pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod navigator;
pub mod position;
pub mod session;
pub mod vision;
pub mod wire;

mod rng;

pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use grid::{Cell, Grid, Plane};
pub use maze::{Layout, MazeGenerator, generate_maze};
pub use navigator::Step;
pub use position::Position;
pub use rng::MazeRng;
pub use session::GameSession;
pub use vision::{Reveal, RevealMode, check_view};
