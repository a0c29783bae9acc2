//! Conversion between world units and grid cells.

use glam::Vec2;

use crate::geom::{Point, Range};

/// World units per cell on the maps this engine was built for.
pub const DEFAULT_CELL_SIZE: i32 = 32;

/// Size and extent of a cell grid laid over world space.
///
/// Cell `(x, y)` covers world `[x * cell_size, (x + 1) * cell_size)` on each
/// axis. Waypoints handed back to the world sit on cell centres.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellGeometry {
    cell_size: i32,
    bounds: Range,
}

impl CellGeometry {
    /// Geometry for a `width × height` grid anchored at the world origin.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            cell_size,
            bounds: Range::new(0, 0, width, height),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// The cell rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Cell containing a world position, without clamping.
    #[inline]
    pub fn world_to_cell_unclamped(&self, pos: Vec2) -> Point {
        let cs = self.cell_size as f32;
        Point::new((pos.x / cs).floor() as i32, (pos.y / cs).floor() as i32)
    }

    /// Cell containing a world position, clamped onto the grid.
    #[inline]
    pub fn world_to_cell(&self, pos: Vec2) -> Point {
        self.bounds.clamp(self.world_to_cell_unclamped(pos))
    }

    /// World position of the centre of a cell.
    #[inline]
    pub fn cell_center(&self, cell: Point) -> Vec2 {
        let half = self.cell_size / 2;
        Vec2::new(
            (cell.x * self.cell_size + half) as f32,
            (cell.y * self.cell_size + half) as f32,
        )
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_CELL_SIZE)
    }
}
