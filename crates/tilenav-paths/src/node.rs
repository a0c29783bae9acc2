use tilenav_core::Point;

/// Predecessor marker of a node on the current search tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Parent {
    /// Not reached by the current search.
    #[default]
    None,
    /// The search origin.
    Start,
    /// The goal marker written by [`PathFinder::set_end`](crate::PathFinder::set_end).
    End,
    /// Reached from the node with this id.
    Node(usize),
}

impl Parent {
    /// The predecessor id, if this node was reached from another node.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Node(i) => Some(i),
            _ => None,
        }
    }
}

/// One grid cell's search state.
///
/// `closed` doubles as the walkability flag: unwalkable cells are closed
/// in the template and stay closed in every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Row-major index, `y * width + x`.
    pub id: usize,
    /// Cell coordinates.
    pub pos: Point,
    pub parent: Parent,
    pub g: i32,
    pub h: i32,
    pub f: i32,
    pub open: bool,
    pub closed: bool,
}

impl Node {
    pub(crate) fn new(id: usize, pos: Point, walkable: bool) -> Self {
        Self {
            id,
            pos,
            parent: Parent::None,
            g: 0,
            h: 0,
            f: 0,
            open: false,
            closed: !walkable,
        }
    }
}
