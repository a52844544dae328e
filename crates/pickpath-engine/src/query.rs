//! Answering shortest-path queries from precomputed trees.

use std::fmt;

use log::{debug, warn};
use pickpath_core::{Point, Vec2};

use crate::snapshot::PathfindingSnapshot;
use crate::units::Measure;

/// A route found between a pick aisle and a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    /// Cells from the start cell to the end cell.
    pub cells: Vec<Point>,
    /// Plan-space centres of `cells`.
    pub points: Vec<Vec2>,
    /// Plan-space length of the polyline through `points`.
    pub plan_length: f64,
    /// Length in the display unit; `None` without a usable scale or when
    /// the units cannot be converted.
    pub distance: Option<f64>,
}

/// Result of a path query.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    Found(FoundPath),
    /// The destination cell cannot be reached from the start.
    Unreachable,
    /// Nothing has been precomputed for this start.
    NotReady,
    /// A named point does not exist.
    UnknownPoint(String),
}

impl PathOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(&self) -> Option<&FoundPath> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Display distance of a found path.
    pub fn distance(&self) -> Option<f64> {
        self.found().and_then(|p| p.distance)
    }

    /// The `(polyline, distance)` pair: both `None` unless a path exists,
    /// and the distance may still be `None` for a found path.
    pub fn into_parts(self) -> (Option<Vec<Vec2>>, Option<f64>) {
        match self {
            Self::Found(path) => (Some(path.points), path.distance),
            _ => (None, None),
        }
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(path) => match path.distance {
                Some(d) => write!(f, "path of {} cells, distance {d:.2}", path.cells.len()),
                None => write!(f, "path of {} cells, distance unknown", path.cells.len()),
            },
            Self::Unreachable => f.write_str("no path"),
            Self::NotReady => f.write_str("paths not precomputed"),
            Self::UnknownPoint(name) => write!(f, "unknown point '{name}'"),
        }
    }
}

/// Shortest path from the pick aisle `start_name` to `end_point`.
///
/// The end point maps to its cell, clamped into the grid. The polyline runs
/// through cell centres from the tree's start cell to that cell.
pub fn shortest_path(
    snapshot: &PathfindingSnapshot,
    start_name: &str,
    end_point: Vec2,
    measure: &Measure<'_>,
) -> PathOutcome {
    let Some(tree) = snapshot.tree(start_name) else {
        debug!("no tree for '{start_name}'");
        return PathOutcome::NotReady;
    };
    let frame = snapshot.frame();
    let end = frame.cell_of_logged(end_point, "destination");
    if !tree.is_reachable(end) {
        debug!("cell {end} is unreachable from '{start_name}'");
        return PathOutcome::Unreachable;
    }
    let Some(cells) = tree.path_to(end) else {
        warn!("broken predecessor chain from '{start_name}' to {end}");
        return PathOutcome::Unreachable;
    };

    let points: Vec<Vec2> = cells.iter().map(|&c| frame.cell_center(c)).collect();
    let plan_length = polyline_length(&points);
    let distance = measure.to_display(plan_length);
    PathOutcome::Found(FoundPath {
        cells,
        points,
        plan_length,
        distance,
    })
}

/// Sum of Euclidean segment lengths along `points`.
pub fn polyline_length(points: &[Vec2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// One vertex of a [`PathProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileVertex {
    pub point: Vec2,
    /// Distance from the previous vertex (0 for the first).
    pub segment: f64,
    /// Distance from the first vertex.
    pub cumulative: f64,
}

/// Per-vertex distances along a found path, in display units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathProfile {
    pub vertices: Vec<ProfileVertex>,
}

impl PathProfile {
    /// Profile of `path`; `None` without a usable scale or unit pair.
    pub fn new(path: &FoundPath, measure: &Measure<'_>) -> Option<Self> {
        // Validate the unit pair once on a unit length.
        measure.to_display(1.0)?;
        let mut vertices = Vec::with_capacity(path.points.len());
        let mut cumulative = 0.0;
        let mut prev: Option<Vec2> = None;
        for &point in &path.points {
            let segment = match prev {
                Some(p) => measure.to_display(p.distance(point))?,
                None => 0.0,
            };
            cumulative += segment;
            vertices.push(ProfileVertex {
                point,
                segment,
                cumulative,
            });
            prev = Some(point);
        }
        Some(Self { vertices })
    }

    /// Total distance.
    pub fn total(&self) -> f64 {
        self.vertices.last().map_or(0.0, |v| v.cumulative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::GridFrame;
    use crate::snapshot::GridSnapshot;
    use pickpath_core::Grid;
    use pickpath_paths::dijkstra;
    use std::collections::HashMap;

    /// 10x10 open grid at resolution 2 with one tree from cell (0, 0).
    fn snapshot() -> PathfindingSnapshot {
        let frame = GridFrame::new(Vec2::ZERO, 2.0, 10, 10);
        let mut grid = Grid::new(10, 10, 1.0f32);
        for row in 0..10 {
            grid.set(Point::from_row_col(row, 7), f32::INFINITY);
        }
        let tree = dijkstra(&grid, Point::ZERO);
        let grid = GridSnapshot::new(frame, grid);
        let trees = HashMap::from([("A1".to_string(), tree)]);
        PathfindingSnapshot::new(grid, trees, Vec::new())
    }

    #[test]
    fn found_path_runs_through_cell_centres() {
        let snap = snapshot();
        let measure = Measure::new(2.0, "meters", "meters");
        let out = shortest_path(&snap, "A1", Vec2::new(9.0, 7.0), &measure);
        let path = out.found().unwrap();
        assert_eq!(path.cells.first(), Some(&Point::ZERO));
        assert_eq!(path.cells.last(), Some(&Point::new(4, 3)));
        assert_eq!(path.points[0], Vec2::new(1.0, 1.0));
        assert_eq!(*path.points.last().unwrap(), Vec2::new(9.0, 7.0));
        // 7 unit steps of 2.0 plan units, 2 plan units per meter.
        assert_eq!(path.plan_length, 14.0);
        assert_eq!(path.distance, Some(7.0));
    }

    #[test]
    fn missing_tree_is_not_ready() {
        let snap = snapshot();
        let out = shortest_path(&snap, "B9", Vec2::new(3.0, 3.0), &Measure::default());
        assert_eq!(out, PathOutcome::NotReady);
        assert_eq!(out.into_parts(), (None, None));
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let snap = snapshot();
        let out = shortest_path(&snap, "A1", Vec2::new(19.0, 1.0), &Measure::default());
        assert_eq!(out, PathOutcome::Unreachable);
        assert_eq!(out.to_string(), "no path");
    }

    #[test]
    fn end_outside_grid_is_clamped() {
        let snap = snapshot();
        let out = shortest_path(&snap, "A1", Vec2::new(-40.0, 500.0), &Measure::default());
        let path = out.found().unwrap();
        assert_eq!(path.cells.last(), Some(&Point::from_row_col(9, 0)));
        assert_eq!(path.distance, None);
    }

    #[test]
    fn same_cell_gives_single_point() {
        let snap = snapshot();
        let measure = Measure::new(1.0, "feet", "meters");
        let (points, distance) =
            shortest_path(&snap, "A1", Vec2::new(0.2, 1.9), &measure).into_parts();
        assert_eq!(points.unwrap().len(), 1);
        assert_eq!(distance, Some(0.0));
    }

    #[test]
    fn profile_accumulates_segments() {
        let snap = snapshot();
        let measure = Measure::new(2.0, "meters", "feet");
        let out = shortest_path(&snap, "A1", Vec2::new(1.0, 9.0), &measure);
        let profile = PathProfile::new(out.found().unwrap(), &measure).unwrap();
        assert_eq!(profile.vertices.len(), 5);
        assert_eq!(profile.vertices[0].segment, 0.0);
        assert!((profile.vertices[1].segment - 3.28084).abs() < 1e-9);
        assert!((profile.total() - out.distance().unwrap()).abs() < 1e-9);

        let no_scale = Measure::default();
        assert!(PathProfile::new(out.found().unwrap(), &no_scale).is_none());
    }

    #[test]
    fn polyline_length_sums_segments() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(3.0, 10.0)];
        assert_eq!(polyline_length(&pts), 11.0);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }
}
