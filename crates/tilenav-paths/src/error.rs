//! Construction errors.
//!
//! Only invalid construction parameters are errors. A search that finds no
//! route returns an empty or partial path instead.

use std::fmt;

/// Errors raised when building grids, graphs or configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Grid dimensions must both be positive.
    EmptyGrid { width: i32, height: i32 },
    /// Cell size must be positive.
    InvalidCellSize(i32),
    /// A vertex id outside `0..count` was passed to a [`VertexGraph`](crate::VertexGraph).
    VertexOutOfRange { vertex: usize, count: usize },
    /// A configuration field holds an unusable value.
    InvalidConfig(&'static str),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have positive dimensions, got {width}x{height}")
            }
            Self::InvalidCellSize(size) => write!(f, "cell size must be positive, got {size}"),
            Self::VertexOutOfRange { vertex, count } => {
                write!(f, "vertex {vertex} out of range for graph of {count} vertices")
            }
            Self::InvalidConfig(what) => write!(f, "invalid path config: {what}"),
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let e = PathError::EmptyGrid {
            width: 0,
            height: 3,
        };
        assert_eq!(e.to_string(), "grid must have positive dimensions, got 0x3");
        let e = PathError::VertexOutOfRange {
            vertex: 9,
            count: 4,
        };
        assert!(e.to_string().contains("vertex 9"));
    }
}
