use pickpath_core::{Extent, Grid, Point};

/// Minimal pathfinding interface: the searchable area and
/// neighbour enumeration.
pub trait Pather {
    /// The cells a search may visit. Must start at the origin.
    fn extent(&self) -> Extent;

    /// Append neighbours of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` into adjacent `to`. Must be >= 0; a
    /// non-finite cost means the move is forbidden.
    fn cost(&self, from: Point, to: Point) -> f32;

    /// Whether a search may stand on `p`.
    fn passable(&self, p: Point) -> bool;
}

// ---------------------------------------------------------------------------
// Cost grids
// ---------------------------------------------------------------------------

impl Pather for Grid<f32> {
    #[inline]
    fn extent(&self) -> Extent {
        self.bounds()
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.at(n).is_some_and(f32::is_finite) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for Grid<f32> {
    /// Cost is charged on entering a cell, not on leaving one.
    #[inline]
    fn cost(&self, _from: Point, to: Point) -> f32 {
        self.at(to).unwrap_or(f32::INFINITY)
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(f32::is_finite)
    }
}
