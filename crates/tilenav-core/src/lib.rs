//! **tilenav-core**: geometry shared across the *tilenav* crates.
//!
//! Grid searches work in integer cell coordinates ([`Point`], [`Range`]);
//! the game world they serve works in floating-point world units. A
//! [`CellGeometry`] converts between the two.

pub mod geom;
pub mod world;

pub use geom::{Point, Range, RangeIter};
pub use glam::Vec2;
pub use world::{CellGeometry, DEFAULT_CELL_SIZE};
