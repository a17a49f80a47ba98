//! Maze generation settings

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::maze::MIN_DIMENSION;

/// Settings for generating a maze and starting a session.
///
/// Every field has a default, so a partial TOML table deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Random seeds to attempt on top of the two corners.
    /// `None` means `min(width, height) / 2`.
    pub seed_count: Option<usize>,
    /// Minimum Euclidean distance between a random seed and the seeds
    /// accepted before it
    pub min_seed_distance: f64,
    /// Longest allowed run of wall cells along a row or column
    pub wall_thickness: usize,
    /// RNG seed; `None` draws one from entropy
    pub rng_seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            seed_count: None,
            min_seed_distance: 6.0,
            wall_thickness: 4,
            rng_seed: None,
        }
    }
}

impl MazeConfig {
    /// Config for the given size with every other setting at its default
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Effective number of random seeds to attempt
    pub fn seed_count(&self) -> usize {
        self.seed_count
            .unwrap_or_else(|| self.width.min(self.height) / 2)
    }

    /// Reject sizes below the generator's minimum
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(MazeError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_count() {
        let config = MazeConfig::with_size(30, 24);
        assert_eq!(config.seed_count(), 12);

        let config = MazeConfig {
            seed_count: Some(3),
            ..MazeConfig::default()
        };
        assert_eq!(config.seed_count(), 3);
    }

    #[test]
    fn test_validate() {
        assert!(MazeConfig::with_size(20, 20).validate().is_ok());
        assert_eq!(
            MazeConfig::with_size(19, 40).validate(),
            Err(MazeError::InvalidSize {
                width: 19,
                height: 40
            })
        );
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: MazeConfig = serde_json::from_str(r#"{"width": 25, "rng_seed": 5}"#).unwrap();
        assert_eq!(config.width, 25);
        assert_eq!(config.height, 40);
        assert_eq!(config.wall_thickness, 4);
        assert_eq!(config.rng_seed, Some(5));
    }
}
