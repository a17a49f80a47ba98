//! A single game: one maze, one player, and what the player has seen

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MazeConfig;
use crate::error::{MazeError, Result};
use crate::grid::{Grid, Plane};
use crate::maze::MazeGenerator;
use crate::navigator::{self, Step};
use crate::position::Position;
use crate::rng::MazeRng;
use crate::vision::{self, Reveal};

/// Game session state.
///
/// Owns the maze exclusively. Operations are synchronous and take `&mut self`,
/// so callers sharing a session across threads wrap it in their own lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    grid: Grid,
    player: Position,
    /// Cells already reported to the player
    revealed: Plane<bool>,
    /// Item names carried by the player
    pub inventory: HashSet<String>,
}

impl GameSession {
    /// Generate a maze from `config` and start the player at the origin.
    ///
    /// Uses `config.rng_seed` when set, otherwise a seed from entropy.
    pub fn new(config: &MazeConfig) -> Result<Self> {
        let mut rng = config.rng_seed.map_or_else(MazeRng::from_entropy, MazeRng::new);
        Self::with_rng(config, &mut rng)
    }

    /// Like [`GameSession::new`] with a caller-supplied RNG
    pub fn with_rng(config: &MazeConfig, rng: &mut MazeRng) -> Result<Self> {
        let grid = MazeGenerator::new(config.clone()).generate(rng)?;
        info!(
            width = grid.width(),
            height = grid.height(),
            rng_seed = rng.seed(),
            "new game"
        );
        Self::from_grid(grid, Position::ORIGIN)
    }

    /// Start a session on an existing grid
    pub fn from_grid(grid: Grid, player: Position) -> Result<Self> {
        if !grid.contains(player) {
            return Err(MazeError::OutOfBounds { position: player });
        }
        let revealed = Plane::mask_like(&grid);
        Ok(Self {
            grid,
            player,
            revealed,
            inventory: HashSet::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    /// Whether the cell at `p` has been reported already
    pub fn is_revealed(&self, p: Position) -> bool {
        self.revealed.try_get(p).unwrap_or(false)
    }

    /// Cells newly visible from the player's position
    pub fn describe(&mut self) -> Result<Reveal> {
        vision::describe(&self.grid, self.player, &mut self.revealed)
    }

    /// Move the player. A rejected move leaves the session unchanged.
    ///
    /// After crossing a door the doorway is forgotten so the next
    /// [`describe`](Self::describe) reports it again as floor.
    pub fn move_to(&mut self, to: Position) -> Result<Step> {
        let step = navigator::move_player(&mut self.grid, &mut self.player, to)?;
        if let Step::CrossedDoor { door, .. } = step {
            self.revealed.try_set(door, false);
        }
        debug!(player = %self.player, "moved");
        Ok(step)
    }
}
