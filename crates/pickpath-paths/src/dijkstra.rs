use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pickpath_core::{Grid, Point};

use crate::traits::WeightedPather;
use crate::tree::{ShortestPathTree, UNREACHABLE};

/// Priority-queue entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// smallest cost first and, among equal costs, the earliest pushed.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    pos: Point,
    cost: f32,
    seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys for min-heap behaviour.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute single-source shortest paths from `start` over `pather`.
///
/// Moves follow [`Pather::neighbors`](crate::Pather::neighbors); the weight
/// of a move is [`WeightedPather::cost`]. If `start` is outside the pather's
/// extent or not passable, the returned tree reaches nothing.
///
/// The result depends only on the pather and `start`: ties are popped in
/// insertion order.
pub fn dijkstra<P: WeightedPather>(pather: &P, start: Point) -> ShortestPathTree {
    let extent = pather.extent();
    let (width, height) = (extent.width(), extent.height());
    if !extent.contains(start) || !pather.passable(start) {
        return ShortestPathTree::unreachable(width, height, start);
    }

    let mut distance = Grid::new(width, height, UNREACHABLE);
    let mut predecessor: Grid<Option<Point>> = Grid::new(width, height, None);
    distance.set(start, 0.0);

    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    open.push(QueueEntry {
        pos: start,
        cost: 0.0,
        seq,
    });

    let mut nbuf = Vec::with_capacity(4);

    while let Some(QueueEntry { pos, cost, .. }) = open.pop() {
        // Skip stale entries.
        if cost > distance.at(pos).unwrap_or(UNREACHABLE) {
            continue;
        }

        nbuf.clear();
        pather.neighbors(pos, &mut nbuf);

        for &np in nbuf.iter() {
            let step = pather.cost(pos, np);
            if !step.is_finite() {
                continue;
            }
            let tentative = cost + step;
            let Some(best) = distance.at(np) else {
                continue;
            };
            if tentative >= best {
                continue;
            }
            distance.set(np, tentative);
            predecessor.set(np, Some(pos));
            seq += 1;
            open.push(QueueEntry {
                pos: np,
                cost: tentative,
                seq,
            });
        }
    }

    ShortestPathTree::from_parts(start, distance, predecessor)
}
