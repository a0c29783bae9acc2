//! The static walkability grid searched by [`PathFinder`](crate::PathFinder).
//!
//! A [`GridModel`] keeps two parallel node arrays. The template is built
//! once from the walkability oracle and never changes; the working copy is
//! overwritten from the template at the start of every search so that no
//! cost or open/closed state leaks from one search into the next.

use glam::Vec2;
use tilenav_core::{CellGeometry, Point, Range};

use crate::error::PathError;
use crate::node::Node;

/// Flattened `width × height` node grid with a template and a working copy.
#[derive(Debug, Clone)]
pub struct GridModel {
    geometry: CellGeometry,
    width: usize,
    template: Vec<Node>,
    pub(crate) working: Vec<Node>,
}

impl GridModel {
    /// Build a grid by querying `is_walkable` once per cell, at the cell's
    /// world-space centre.
    pub fn build(
        width: i32,
        height: i32,
        cell_size: i32,
        mut is_walkable: impl FnMut(Vec2) -> bool,
    ) -> Result<Self, PathError> {
        let geometry = CellGeometry::new(width, height, cell_size);
        Self::from_cells(width, height, cell_size, |p| {
            is_walkable(geometry.cell_center(p))
        })
    }

    /// Build a grid from cell-space walkability.
    pub fn from_cells(
        width: i32,
        height: i32,
        cell_size: i32,
        mut walkable: impl FnMut(Point) -> bool,
    ) -> Result<Self, PathError> {
        if width <= 0 || height <= 0 {
            return Err(PathError::EmptyGrid { width, height });
        }
        if cell_size <= 0 {
            return Err(PathError::InvalidCellSize(cell_size));
        }

        let geometry = CellGeometry::new(width, height, cell_size);
        let template: Vec<Node> = geometry
            .bounds()
            .iter()
            .enumerate()
            .map(|(id, p)| Node::new(id, p, walkable(p)))
            .collect();

        log::debug!(
            "built {}x{} grid, {} walkable cells",
            width,
            height,
            template.iter().filter(|n| !n.closed).count()
        );

        Ok(Self {
            geometry,
            width: width as usize,
            working: template.clone(),
            template,
        })
    }

    /// Overwrite the working copy with the template.
    pub fn reset_working_copy(&mut self) {
        self.working.clone_from(&self.template);
    }

    #[inline]
    pub fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.geometry.bounds().width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.geometry.bounds().height()
    }

    /// The cell rectangle covered by the grid.
    #[inline]
    pub fn range(&self) -> Range {
        self.geometry.bounds()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.template.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat index of a cell. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.range().contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// Cell of a flat index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Indices of the cells at offsets `+1, -1, +width, -width`.
    ///
    /// Offsets that would leave the grid, including `±1` wrapping onto the
    /// neighbouring row, are `None`.
    #[inline]
    pub(crate) fn neighbor_indices(&self, idx: usize) -> [Option<usize>; 4] {
        self.point(idx).neighbors_4().map(|p| self.idx(p))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether a cell is on the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| !self.template[i].closed)
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.template.iter().filter(|n| !n.closed).count()
    }

    /// Template node (walkability only, no search state).
    #[inline]
    pub fn template_node(&self, id: usize) -> Option<&Node> {
        self.template.get(id)
    }

    /// Working node as left by the last search.
    #[inline]
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.working.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Parent;

    fn checker(p: Point) -> bool {
        (p.x + p.y) % 3 != 0
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            GridModel::from_cells(0, 4, 32, |_| true).unwrap_err(),
            PathError::EmptyGrid {
                width: 0,
                height: 4
            }
        );
        assert!(GridModel::from_cells(3, -1, 32, |_| true).is_err());
        assert_eq!(
            GridModel::from_cells(3, 3, 0, |_| true).unwrap_err(),
            PathError::InvalidCellSize(0)
        );
    }

    #[test]
    fn ids_are_row_major() {
        let g = GridModel::from_cells(4, 3, 32, |_| true).unwrap();
        assert_eq!(g.len(), 12);
        for id in 0..g.len() {
            let n = g.template_node(id).unwrap();
            assert_eq!(n.id, id);
            assert_eq!(n.id, (n.pos.y * 4 + n.pos.x) as usize);
            assert_eq!(g.idx(n.pos), Some(id));
            assert_eq!(g.point(id), n.pos);
        }
        assert_eq!(g.idx(Point::new(4, 0)), None);
    }

    #[test]
    fn construction_is_deterministic() {
        let a = GridModel::from_cells(9, 7, 32, checker).unwrap();
        let b = GridModel::from_cells(9, 7, 32, checker).unwrap();
        let pa: Vec<bool> = (0..a.len()).map(|i| a.template_node(i).unwrap().closed).collect();
        let pb: Vec<bool> = (0..b.len()).map(|i| b.template_node(i).unwrap().closed).collect();
        assert_eq!(pa, pb);
        for p in a.range() {
            assert_eq!(a.is_walkable(p), checker(p));
        }
    }

    #[test]
    fn oracle_sees_cell_centres_once_each() {
        let mut seen = Vec::new();
        let g = GridModel::build(3, 2, 32, |w| {
            seen.push(w);
            w.x < 64.0
        })
        .unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], Vec2::new(16.0, 16.0));
        assert_eq!(seen[5], Vec2::new(80.0, 48.0));
        assert!(g.is_walkable(Point::new(1, 1)));
        assert!(!g.is_walkable(Point::new(2, 0)));
        assert_eq!(g.walkable_count(), 4);
    }

    #[test]
    fn neighbor_offsets_do_not_wrap_rows() {
        let g = GridModel::from_cells(3, 3, 32, |_| true).unwrap();
        // (2, 0) is the last cell of row 0: +1 would wrap to (0, 1).
        assert_eq!(g.neighbor_indices(2), [None, Some(1), Some(5), None]);
        // (0, 1): -1 would wrap to (2, 0).
        assert_eq!(g.neighbor_indices(3), [Some(4), None, Some(6), Some(0)]);
        assert_eq!(g.neighbor_indices(8), [None, Some(7), None, Some(5)]);
        // Interior cells follow `Point::neighbors_4` order.
        let expected = Point::new(1, 1).neighbors_4().map(|p| g.idx(p));
        assert_eq!(g.neighbor_indices(4), expected);
        assert_eq!(expected, [Some(5), Some(3), Some(7), Some(1)]);
    }

    #[test]
    fn reset_restores_template_state() {
        let mut g = GridModel::from_cells(3, 3, 32, |p| p != Point::new(1, 1)).unwrap();
        g.working[0].g = 7;
        g.working[0].open = true;
        g.working[2].closed = true;
        g.working[2].parent = Parent::Start;
        g.reset_working_copy();
        assert_eq!(g.node(0), g.template_node(0));
        assert_eq!(g.node(2).unwrap().parent, Parent::None);
        assert!(!g.node(2).unwrap().closed);
        assert!(g.node(4).unwrap().closed);
    }
}
