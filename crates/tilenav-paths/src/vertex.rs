//! Unweighted undirected graph over integer vertices with BFS shortest path.
//!
//! Independent from the cell grid: vertices are plain ids `0..n`, e.g.
//! waypoint hubs or map regions wired together by hand.

use std::collections::VecDeque;

use crate::error::PathError;

/// Adjacency-list graph over vertices `0..vertex_count`.
#[derive(Debug, Clone, Default)]
pub struct VertexGraph {
    adjacency: Vec<Vec<usize>>,
    initialized: bool,
}

impl VertexGraph {
    /// An uninitialised graph with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with `count` vertices and no edges.
    pub fn with_vertices(count: usize) -> Self {
        let mut graph = Self::new();
        graph.init(count);
        graph
    }

    /// Reset to `count` vertices with empty adjacency lists.
    pub fn init(&mut self, count: usize) {
        self.adjacency = vec![Vec::new(); count];
        self.initialized = true;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbours of `v` in insertion order.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Connect `a` and `b` in both directions.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), PathError> {
        let count = self.vertex_count();
        for vertex in [a, b] {
            if vertex >= count {
                return Err(PathError::VertexOutOfRange { vertex, count });
            }
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        Ok(())
    }

    /// Fewest-edges path from `start` to `goal`, both endpoints included.
    ///
    /// Returns an empty vector when `goal` is unreachable or either vertex
    /// is out of range.
    pub fn find_path(&self, start: usize, goal: usize) -> Vec<usize> {
        let n = self.vertex_count();
        if start >= n || goal >= n {
            return Vec::new();
        }

        let mut visited = vec![false; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                let mut path = Vec::new();
                let mut node = Some(current);
                while let Some(v) = node {
                    path.push(v);
                    node = parent[v];
                }
                path.reverse();
                return path;
            }

            for &next in &self.adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    parent[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> VertexGraph {
        let mut g = VertexGraph::with_vertices(5);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g
    }

    #[test]
    fn chain_path() {
        let g = chain();
        assert_eq!(g.find_path(0, 3), vec![0, 1, 2, 3]);
        assert_eq!(g.find_path(3, 0), vec![3, 2, 1, 0]);
    }

    #[test]
    fn start_is_goal() {
        assert_eq!(chain().find_path(0, 0), vec![0]);
    }

    #[test]
    fn isolated_vertex_is_unreachable() {
        assert!(chain().find_path(0, 4).is_empty());
    }

    #[test]
    fn prefers_fewest_edges() {
        let mut g = VertexGraph::with_vertices(6);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 5), (0, 4), (4, 5)] {
            g.add_edge(a, b).unwrap();
        }
        assert_eq!(g.find_path(0, 5), vec![0, 4, 5]);
    }

    #[test]
    fn edges_are_undirected() {
        let g = chain();
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(3), &[2]);
        assert!(g.neighbors(99).is_empty());
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut g = VertexGraph::new();
        assert!(!g.is_initialized());
        assert_eq!(
            g.add_edge(0, 1),
            Err(PathError::VertexOutOfRange {
                vertex: 0,
                count: 0
            })
        );
        g.init(2);
        assert!(g.is_initialized());
        assert_eq!(
            g.add_edge(1, 2),
            Err(PathError::VertexOutOfRange {
                vertex: 2,
                count: 2
            })
        );
        assert!(g.find_path(0, 7).is_empty());
    }
}
