//! Pathfinding over a static tile grid.
//!
//! - **A\*** over a 4-connected walkability grid ([`PathFinder`]), backed by
//!   a binary min-heap with decrease-key ([`OpenList`])
//! - **Random waypoints** among walkable cells, global or windowed
//!   ([`GridModel::random_waypoint`], [`GridModel::random_waypoint_in_radius`])
//! - **BFS** shortest path on a free-standing vertex graph ([`VertexGraph`])
//!
//! A [`PathFinder`] owns its [`GridModel`] and reuses all search buffers, so
//! repeated searches do not allocate once the path buffer has warmed up.
//! It is single-threaded; `tilenav-jobs` serialises access from worker
//! threads.

mod astar;
mod config;
mod distance;
mod error;
mod grid;
mod node;
mod openlist;
mod sampler;
mod vertex;

pub use astar::{PathFinder, SearchOutcome};
pub use config::{HEAP_CAPACITY_FACTOR, MAX_WAY_CALC, PathConfig};
pub use distance::manhattan;
pub use error::PathError;
pub use grid::GridModel;
pub use node::{Node, Parent};
pub use openlist::{HeapEntry, OpenList};
pub use vertex::VertexGraph;
