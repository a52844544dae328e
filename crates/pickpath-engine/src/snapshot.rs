//! Immutable results of a grid build and of a precomputation.
//!
//! Snapshots are never edited. A rebuild produces a new one and an
//! invalidation drops it, so readers holding an `Arc` always see a grid,
//! its frame and the trees computed over it that belong together.

use std::collections::HashMap;
use std::sync::Arc;

use pickpath_core::{Grid, Point, Vec2};
use pickpath_paths::ShortestPathTree;

use crate::frame::GridFrame;
use crate::precompute::PointFailure;

/// A built cost grid together with its placement over the floor plan.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    frame: GridFrame,
    grid: Arc<Grid<f32>>,
}

impl GridSnapshot {
    pub fn new(frame: GridFrame, grid: Grid<f32>) -> Self {
        Self {
            frame,
            grid: Arc::new(grid),
        }
    }

    #[inline]
    pub fn frame(&self) -> &GridFrame {
        &self.frame
    }

    #[inline]
    pub fn grid(&self) -> &Arc<Grid<f32>> {
        &self.grid
    }

    /// Cost of entering the cell containing `p` (clamped into the grid).
    pub fn cost_at(&self, p: Vec2) -> f32 {
        self.grid
            .at(self.frame.cell_of(p))
            .unwrap_or(f32::INFINITY)
    }

    /// Number of obstacle cells.
    pub fn blocked_count(&self) -> usize {
        self.grid.count_fn(|_, c| !c.is_finite())
    }
}

/// Shortest-path trees from every pick aisle that could be precomputed,
/// over one grid snapshot.
#[derive(Debug, Clone)]
pub struct PathfindingSnapshot {
    grid: GridSnapshot,
    trees: HashMap<String, ShortestPathTree>,
    failures: Vec<PointFailure>,
}

impl PathfindingSnapshot {
    pub fn new(
        grid: GridSnapshot,
        trees: HashMap<String, ShortestPathTree>,
        failures: Vec<PointFailure>,
    ) -> Self {
        Self {
            grid,
            trees,
            failures,
        }
    }

    #[inline]
    pub fn grid(&self) -> &GridSnapshot {
        &self.grid
    }

    #[inline]
    pub fn frame(&self) -> &GridFrame {
        self.grid.frame()
    }

    /// Tree rooted at the pick aisle `name`, if it was computed.
    pub fn tree(&self, name: &str) -> Option<&ShortestPathTree> {
        self.trees.get(name)
    }

    pub fn has_tree(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    /// Names with a tree, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Pick aisles that have no tree, and why.
    pub fn failures(&self) -> &[PointFailure] {
        &self.failures
    }

    /// Whether every requested pick aisle got a tree.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Start cell of the tree for `name`.
    pub fn start_cell(&self, name: &str) -> Option<Point> {
        self.tree(name).map(ShortestPathTree::start)
    }
}
