//! A* search over a [`GridModel`].
//!
//! One [`PathFinder`] owns one grid and one open list and reuses both for
//! every search. A search runs as `init → set_start → set_end → find_path`;
//! the finder is not reentrant, so concurrent callers must serialise whole
//! searches (see `tilenav-jobs`).

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tilenav_core::{CellGeometry, Point};

use crate::config::PathConfig;
use crate::distance::manhattan;
use crate::error::PathError;
use crate::grid::GridModel;
use crate::node::Parent;
use crate::openlist::OpenList;

/// How the last search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search has run since the last [`PathFinder::init`].
    #[default]
    Idle,
    /// Start or end was never set; no work was done.
    Unset,
    /// The goal cell was settled.
    Reached,
    /// The open list ran dry before reaching the goal.
    Exhausted,
    /// The closed-node cap was hit before reaching the goal.
    CapReached,
}

/// Reusable A* engine for one static grid.
pub struct PathFinder {
    pub(crate) grid: GridModel,
    open: OpenList,
    config: PathConfig,
    pub(crate) rng: StdRng,
    closed_count: usize,
    start_index: Option<usize>,
    end_index: Option<usize>,
    final_cells: Vec<Point>,
    final_path: Vec<Vec2>,
    outcome: SearchOutcome,
}

impl PathFinder {
    /// Wrap an existing grid. The grid's cell size must match the config.
    pub fn new(grid: GridModel, config: PathConfig) -> Result<Self, PathError> {
        config.validate()?;
        if grid.geometry().cell_size() != config.cell_size {
            return Err(PathError::InvalidConfig(
                "cell_size differs from the grid's cell size",
            ));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            open: OpenList::new(grid.len(), config.heap_capacity()),
            grid,
            rng,
            closed_count: 0,
            start_index: None,
            end_index: None,
            final_cells: Vec::with_capacity(config.max_way_calc),
            final_path: Vec::with_capacity(config.max_way_calc),
            outcome: SearchOutcome::Idle,
            config,
        })
    }

    /// Build the grid from a world-space walkability oracle, then wrap it.
    pub fn build(
        width: i32,
        height: i32,
        config: PathConfig,
        is_walkable: impl FnMut(Vec2) -> bool,
    ) -> Result<Self, PathError> {
        let grid = GridModel::build(width, height, config.cell_size, is_walkable)?;
        Self::new(grid, config)
    }

    // -----------------------------------------------------------------------
    // Search steps
    // -----------------------------------------------------------------------

    /// Clear all transient search state.
    pub fn init(&mut self) {
        self.grid.reset_working_copy();
        self.open.clear();
        self.closed_count = 0;
        self.start_index = None;
        self.end_index = None;
        self.final_cells.clear();
        self.final_path.clear();
        self.outcome = SearchOutcome::Idle;
    }

    /// Mark the cell under `pos` as the search origin.
    pub fn set_start(&mut self, pos: Vec2) {
        let Some(idx) = self.world_index(pos) else {
            return;
        };
        let node = &mut self.grid.working[idx];
        node.parent = Parent::Start;
        node.closed = true;
        self.closed_count += 1;
        self.start_index = Some(idx);
    }

    /// Mark the cell under `pos` as the goal.
    ///
    /// The `End` marker lives on the goal node itself; reconstruction walks
    /// from the node the loop stopped on and never reads it.
    pub fn set_end(&mut self, pos: Vec2) {
        let Some(idx) = self.world_index(pos) else {
            return;
        };
        self.grid.working[idx].parent = Parent::End;
        self.end_index = Some(idx);
    }

    /// Run the search and reconstruct the path from start to wherever the
    /// search stopped.
    ///
    /// If the goal was not reached the result is a partial path (possibly
    /// just the start cell); check [`outcome`](Self::outcome) or
    /// [`is_route`](Self::is_route) before following it.
    pub fn find_path(&mut self) -> &[Vec2] {
        self.final_cells.clear();
        self.final_path.clear();

        let (Some(start), Some(end)) = (self.start_index, self.end_index) else {
            self.outcome = SearchOutcome::Unset;
            return &self.final_path;
        };

        let goal = self.grid.point(end);
        let mut current = start;
        let mut exhausted = false;

        while self.closed_count < self.config.max_way_calc && current != end {
            let current_g = self.grid.working[current].g;

            for neighbor in self.grid.neighbor_indices(current).into_iter().flatten() {
                let node = &mut self.grid.working[neighbor];
                if node.closed {
                    continue;
                }
                let g = current_g + 1;
                if !node.open {
                    node.parent = Parent::Node(current);
                    node.g = g;
                    node.h = manhattan(node.pos, goal);
                    node.f = g + node.h;
                    node.open = true;
                    self.open.insert(neighbor, node.f);
                } else if node.g > g {
                    node.parent = Parent::Node(current);
                    node.g = g;
                    node.f = g + node.h;
                    self.open.replace(neighbor, node.f);
                }
            }

            let Some(min) = self.open.pop_min() else {
                exhausted = true;
                break;
            };
            current = min.id;
            let node = &mut self.grid.working[current];
            node.open = false;
            node.closed = true;
            self.closed_count += 1;
        }

        self.outcome = if current == end {
            SearchOutcome::Reached
        } else if exhausted {
            SearchOutcome::Exhausted
        } else {
            SearchOutcome::CapReached
        };

        self.reconstruct(start, current);

        log::debug!(
            "search {} -> {}: {:?} after {} closed nodes, {} waypoints",
            self.grid.point(start),
            goal,
            self.outcome,
            self.closed_count,
            self.final_path.len()
        );

        &self.final_path
    }

    /// Convenience wrapper running the full `init → set_start → set_end →
    /// find_path` sequence.
    pub fn search(&mut self, from: Vec2, to: Vec2) -> Vec<Vec2> {
        self.init();
        self.set_start(from);
        self.set_end(to);
        self.find_path().to_vec()
    }

    fn reconstruct(&mut self, start: usize, last: usize) {
        let mut ci = last;
        loop {
            self.final_cells.push(self.grid.point(ci));
            if ci == start {
                break;
            }
            match self.grid.working[ci].parent.index() {
                Some(parent) => ci = parent,
                None => {
                    log::warn!("parent chain broken at {}", self.grid.point(ci));
                    break;
                }
            }
        }
        self.final_cells.reverse();

        let geometry = *self.grid.geometry();
        self.final_path
            .extend(self.final_cells.iter().map(|&c| geometry.cell_center(c)));
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    fn world_index(&self, pos: Vec2) -> Option<usize> {
        self.grid.idx(self.grid.geometry().world_to_cell(pos))
    }

    /// Waypoints (world cell centres) of the last search.
    #[inline]
    pub fn final_path(&self) -> &[Vec2] {
        &self.final_path
    }

    /// Cells of the last search, start first.
    #[inline]
    pub fn final_cells(&self) -> &[Point] {
        &self.final_cells
    }

    #[inline]
    pub fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// Cells settled by the last search, the start cell included.
    #[inline]
    pub fn closed_count(&self) -> usize {
        self.closed_count
    }

    #[inline]
    pub fn start_cell(&self) -> Option<Point> {
        self.start_index.map(|i| self.grid.point(i))
    }

    #[inline]
    pub fn end_cell(&self) -> Option<Point> {
        self.end_index.map(|i| self.grid.point(i))
    }

    #[inline]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[inline]
    pub fn geometry(&self) -> &CellGeometry {
        self.grid.geometry()
    }

    #[inline]
    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    /// Whether `path` is a usable route to `goal`: non-empty and ending in
    /// the goal's cell.
    pub fn is_route(&self, path: &[Vec2], goal: Vec2) -> bool {
        let geometry = self.grid.geometry();
        path.last()
            .is_some_and(|&last| geometry.world_to_cell(last) == geometry.world_to_cell(goal))
    }
}

impl std::fmt::Debug for PathFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathFinder")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("outcome", &self.outcome)
            .field("closed_count", &self.closed_count)
            .finish_non_exhaustive()
    }
}
