use pickpath_core::{Grid, Point};

/// Distance value meaning "unreachable" in distance maps.
pub const UNREACHABLE: f32 = f32::INFINITY;

/// Result of a single-source search: the distance map and the predecessor
/// map, always produced (and replaced) together.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    start: Point,
    distance: Grid<f32>,
    predecessor: Grid<Option<Point>>,
}

impl ShortestPathTree {
    /// A tree in which nothing is reachable, not even `start`.
    pub fn unreachable(width: i32, height: i32, start: Point) -> Self {
        Self {
            start,
            distance: Grid::new(width, height, UNREACHABLE),
            predecessor: Grid::new(width, height, None),
        }
    }

    pub(crate) fn from_parts(
        start: Point,
        distance: Grid<f32>,
        predecessor: Grid<Option<Point>>,
    ) -> Self {
        Self {
            start,
            distance,
            predecessor,
        }
    }

    /// The cell the search started from.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Minimum cumulative cost from the start to every cell.
    #[inline]
    pub fn distances(&self) -> &Grid<f32> {
        &self.distance
    }

    /// Parent of every reached cell on the shortest-path tree.
    #[inline]
    pub fn predecessors(&self) -> &Grid<Option<Point>> {
        &self.predecessor
    }

    /// Cost to reach `p`, or [`UNREACHABLE`].
    #[inline]
    pub fn distance_at(&self, p: Point) -> f32 {
        self.distance.at(p).unwrap_or(UNREACHABLE)
    }

    /// Parent of `p`; `None` for the start, unreached cells and points
    /// outside the grid.
    #[inline]
    pub fn parent(&self, p: Point) -> Option<Point> {
        self.predecessor.at(p).flatten()
    }

    #[inline]
    pub fn is_reachable(&self, p: Point) -> bool {
        self.distance_at(p).is_finite()
    }

    /// Number of cells with a finite distance.
    pub fn reached_count(&self) -> usize {
        self.distance.as_slice().iter().filter(|d| d.is_finite()).count()
    }

    /// Cells from the start to `end` (both included), or `None` if `end` was
    /// not reached.
    pub fn path_to(&self, end: Point) -> Option<Vec<Point>> {
        if !self.is_reachable(end) {
            return None;
        }
        reconstruct_path(&self.predecessor, self.start, end)
    }
}

/// Walk `predecessor` back from `end` to `start` and return the cells in
/// start-to-end order.
///
/// Gives up (returns `None`) on a missing parent, or when the walk has not
/// reached `start` after as many steps as the grid has cells, which means
/// the predecessor data contains a cycle.
pub fn reconstruct_path(
    predecessor: &Grid<Option<Point>>,
    start: Point,
    end: Point,
) -> Option<Vec<Point>> {
    if !predecessor.contains(start) || !predecessor.contains(end) {
        return None;
    }
    let max_steps = predecessor.len();
    let mut path = vec![end];
    let mut cur = end;
    let mut steps = 0;
    while cur != start {
        if steps >= max_steps {
            return None;
        }
        cur = predecessor.at(cur).flatten()?;
        path.push(cur);
        steps += 1;
    }
    path.reverse();
    Some(path)
}
