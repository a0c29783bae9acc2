use glam::Vec2;

/// Payload produced by a path job.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathData {
    /// Nothing usable: rejected request, or no candidate.
    #[default]
    Empty,
    /// World-space waypoints from the start cell to where the search ended.
    Path(Vec<Vec2>),
    /// A sampled waypoint.
    RandomPoint(Vec2),
}

impl PathData {
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Path(points) => points.is_empty(),
            Self::RandomPoint(_) => false,
        }
    }

    /// All waypoints carried by this payload.
    pub fn waypoints(&self) -> &[Vec2] {
        match self {
            Self::Empty => &[],
            Self::Path(points) => points,
            Self::RandomPoint(p) => std::slice::from_ref(p),
        }
    }

    /// The position a consumer should head for next.
    ///
    /// For a path that is the first step after the start cell (or the start
    /// cell itself when the path has no further steps); for a sampled point
    /// it is the point.
    pub fn target(&self) -> Option<Vec2> {
        match self {
            Self::Empty => None,
            Self::Path(points) => points.get(1).or_else(|| points.first()).copied(),
            Self::RandomPoint(p) => Some(*p),
        }
    }

    /// The last waypoint. Compare it against the wanted goal to discard a
    /// stale or partial result.
    pub fn destination(&self) -> Option<Vec2> {
        self.waypoints().last().copied()
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_target_skips_start_cell() {
        let data = PathData::Path(vec![
            Vec2::new(16.0, 16.0),
            Vec2::new(48.0, 16.0),
            Vec2::new(80.0, 16.0),
        ]);
        assert_eq!(data.target(), Some(Vec2::new(48.0, 16.0)));
        assert_eq!(data.destination(), Some(Vec2::new(80.0, 16.0)));
        assert_eq!(data.waypoints().len(), 3);
    }

    #[test]
    fn single_waypoint_path_targets_itself() {
        let data = PathData::Path(vec![Vec2::new(16.0, 16.0)]);
        assert_eq!(data.target(), Some(Vec2::new(16.0, 16.0)));
    }

    #[test]
    fn empty_variants() {
        assert!(PathData::Empty.is_empty());
        assert!(PathData::Path(Vec::new()).is_empty());
        assert_eq!(PathData::Path(Vec::new()).target(), None);
        let mut p = PathData::RandomPoint(Vec2::new(1.0, 2.0));
        assert!(!p.is_empty());
        assert_eq!(p.waypoints(), &[Vec2::new(1.0, 2.0)]);
        p.clear();
        assert_eq!(p, PathData::Empty);
    }
}
