//! Uniform random picks among walkable cells.
//!
//! Both samplers return the world-space centre of the chosen cell, or
//! [`Vec2::ZERO`] when no walkable cell is in scope. Callers must treat
//! `Vec2::ZERO` as "no candidate".

use glam::Vec2;
use rand::Rng;
use tilenav_core::{Point, Range};

use crate::astar::PathFinder;
use crate::grid::GridModel;

impl GridModel {
    /// A random walkable cell anywhere on the grid.
    pub fn random_waypoint<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        self.pick_in(self.range(), rng)
    }

    /// A random walkable cell inside a window around `center`.
    ///
    /// The window spans `center ± radius / 2` in world units, converted to
    /// cells and clamped to the grid. The lower cell bound is inclusive and
    /// the upper one exclusive, so a window that clamps to a single row or
    /// column yields no candidates.
    pub fn random_waypoint_in_radius<R: Rng + ?Sized>(
        &self,
        center: Vec2,
        radius: f32,
        rng: &mut R,
    ) -> Vec2 {
        self.pick_in(self.radius_window(center, radius), rng)
    }

    /// The cell window scanned by [`random_waypoint_in_radius`](Self::random_waypoint_in_radius).
    pub fn radius_window(&self, center: Vec2, radius: f32) -> Range {
        let geometry = self.geometry();
        let reach = Vec2::splat(radius / 2.0);
        let min = geometry.world_to_cell(center - reach);
        let max = geometry.world_to_cell(center + reach);
        Range {
            min,
            max: Point::new(max.x.max(min.x), max.y.max(min.y)),
        }
    }

    fn pick_in<R: Rng + ?Sized>(&self, window: Range, rng: &mut R) -> Vec2 {
        let candidates: Vec<Point> = window
            .intersect(self.range())
            .iter()
            .filter(|&p| self.is_walkable(p))
            .collect();

        if candidates.is_empty() {
            return Vec2::ZERO;
        }
        let cell = candidates[rng.random_range(0..candidates.len())];
        self.geometry().cell_center(cell)
    }
}

impl PathFinder {
    /// [`GridModel::random_waypoint`] with the finder's own RNG.
    pub fn random_waypoint(&mut self) -> Vec2 {
        self.grid.random_waypoint(&mut self.rng)
    }

    /// [`GridModel::random_waypoint_in_radius`] with the finder's own RNG.
    pub fn random_waypoint_in_radius(&mut self, center: Vec2, radius: f32) -> Vec2 {
        self.grid.random_waypoint_in_radius(center, radius, &mut self.rng)
    }
}
