//! Search engine configuration.

use tilenav_core::DEFAULT_CELL_SIZE;

use crate::error::PathError;

/// Upper bound on closed nodes per search. A search stops once this many
/// cells have been settled, whether or not the goal was reached.
pub const MAX_WAY_CALC: usize = 2048;

/// Initial open-list capacity as a multiple of [`MAX_WAY_CALC`]. Each
/// settled cell opens at most four neighbours.
pub const HEAP_CAPACITY_FACTOR: usize = 4;

/// Configuration for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// World units per cell.
    pub cell_size: i32,
    /// Closed-node cap per search.
    pub max_way_calc: usize,
    /// Open-list capacity multiplier over `max_way_calc`.
    pub heap_capacity_factor: usize,
    /// Seed for the finder's waypoint sampler. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            max_way_calc: MAX_WAY_CALC,
            heap_capacity_factor: HEAP_CAPACITY_FACTOR,
            seed: None,
        }
    }
}

impl PathConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.cell_size <= 0 {
            return Err(PathError::InvalidCellSize(self.cell_size));
        }
        if self.max_way_calc == 0 {
            return Err(PathError::InvalidConfig("max_way_calc must be at least 1"));
        }
        if self.heap_capacity_factor == 0 {
            return Err(PathError::InvalidConfig(
                "heap_capacity_factor must be at least 1",
            ));
        }
        Ok(())
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initial open-list capacity.
    #[inline]
    pub fn heap_capacity(&self) -> usize {
        self.max_way_calc.saturating_mul(self.heap_capacity_factor)
    }
}
