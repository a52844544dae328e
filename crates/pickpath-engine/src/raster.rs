//! Turning floor-plan polygons into a cost grid.
//!
//! Polygons are rasterized by scan-line fill at cell-centre rows: a cell is
//! inside exactly when its centre is inside under the even-odd rule, the
//! same rule [`Polygon::contains`] applies. Obstacles are then grown by
//! 8-connected dilation so paths keep a clearance from walls and racking.

use log::{debug, info, warn};
use pickpath_core::{Grid, Point, Polygon, crossing_x};

use crate::error::{Error, Result};
use crate::frame::GridFrame;

/// Cost of entering an ordinary floor cell.
pub const FREE: f32 = 1.0;
/// Cost of an obstacle cell. Never entered.
pub const OBSTACLE: f32 = f32::INFINITY;

/// Build the cost grid for `frame`.
///
/// Staging cells cost `FREE + staging_penalty`. Obstacle cells, after
/// `dilation_iterations` passes of 8-connected dilation, are [`OBSTACLE`]
/// and override staging cells. Everything else is [`FREE`].
pub fn build_cost_grid(
    frame: &GridFrame,
    obstacles: &[Polygon],
    staging_areas: &[Polygon],
    staging_penalty: f64,
    dilation_iterations: u32,
) -> Result<Grid<f32>> {
    frame.validate()?;
    if !(staging_penalty.is_finite() && staging_penalty >= 0.0) {
        return Err(Error::InvalidPenalty(staging_penalty));
    }
    info!(
        "building {}x{} cost grid (resolution {}, {} obstacles, {} staging areas)",
        frame.width,
        frame.height,
        frame.resolution,
        obstacles.len(),
        staging_areas.len()
    );

    let mut grid = Grid::new(frame.width, frame.height, FREE);

    if !staging_areas.is_empty() {
        let staging = rasterize_polygons(frame, staging_areas);
        let cost = FREE + staging_penalty as f32;
        grid.map_cells(|p, &c| if staging.at(p) == Some(true) { cost } else { c });
        debug!("{} staging cells", staging.count_fn(|_, &b| b));
    }

    if !obstacles.is_empty() {
        let blocked = dilate(&rasterize_polygons(frame, obstacles), dilation_iterations);
        grid.map_cells(|p, &c| if blocked.at(p) == Some(true) { OBSTACLE } else { c });
        debug!("{} obstacle cells after dilation", blocked.count_fn(|_, &b| b));
    }

    Ok(grid)
}

/// Mark every cell of `frame` whose centre lies inside any of `polygons`.
///
/// Polygons with fewer than three vertices or non-finite coordinates are
/// skipped. Overlapping polygons simply union.
pub fn rasterize_polygons(frame: &GridFrame, polygons: &[Polygon]) -> Grid<bool> {
    let mut mask = Grid::new(frame.width, frame.height, false);
    let mut xs = Vec::new();
    for poly in polygons {
        if poly.is_empty() {
            continue;
        }
        if !poly.vertices.iter().all(|v| v.is_finite()) {
            warn!("skipping polygon with non-finite vertices");
            continue;
        }
        let local = Polygon::new(
            poly.vertices
                .iter()
                .map(|&v| frame.to_grid_space(v))
                .collect(),
        );
        fill_polygon(&mut mask, &local, &mut xs);
    }
    mask
}

/// Scan-line fill of a polygon already in grid space.
fn fill_polygon(mask: &mut Grid<bool>, poly: &Polygon, xs: &mut Vec<f64>) {
    let (width, height) = (mask.width(), mask.height());
    let bb = poly.bounding_rect();
    // Rows whose centre y = row + 0.5 can meet the polygon.
    let row0 = (bb.top() - 0.5).floor().max(0.0) as i32;
    let row1 = (bb.bottom().ceil() as i32).min(height);

    for row in row0..row1 {
        let y = row as f64 + 0.5;
        xs.clear();
        xs.extend(poly.edges().filter_map(|(a, b)| crossing_x(a, b, y)));
        xs.sort_by(f64::total_cmp);
        for span in xs.chunks_exact(2) {
            // Centres x = col + 0.5 with span[0] <= x < span[1].
            let col0 = (span[0] - 0.5).ceil().clamp(0.0, width as f64) as i32;
            let col1 = (span[1] - 0.5).ceil().clamp(0.0, width as f64) as i32;
            for col in col0..col1 {
                mask.set(Point::from_row_col(row, col), true);
            }
        }
    }
}

/// Grow `mask` by `iterations` passes of the 8-connected 3x3 structuring
/// element. Cells outside the grid count as unset.
pub fn dilate(mask: &Grid<bool>, iterations: u32) -> Grid<bool> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        if !current.as_slice().contains(&true) {
            break;
        }
        let prev = current;
        current = Grid::from_fn(prev.width(), prev.height(), |p| {
            prev.at(p) == Some(true)
                || p.neighbors_8().iter().any(|&n| prev.at(n) == Some(true))
        });
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickpath_core::{Rect, Vec2};

    fn unit_frame(width: i32, height: i32) -> GridFrame {
        GridFrame::new(Vec2::ZERO, 1.0, width, height)
    }

    fn filled(mask: &Grid<bool>) -> Vec<Point> {
        mask.iter().filter(|(_, b)| **b).map(|(p, _)| p).collect()
    }

    #[test]
    fn rect_covers_cells_by_centre() {
        let frame = unit_frame(8, 8);
        let poly = Polygon::from_rect(Rect::new(2.0, 1.0, 3.0, 2.0));
        let mask = rasterize_polygons(&frame, &[poly]);
        let cells = filled(&mask);
        assert_eq!(cells.len(), 6);
        for p in cells {
            assert!((2..5).contains(&p.col()) && (1..3).contains(&p.row()));
        }
    }

    #[test]
    fn sliver_missing_every_centre_fills_nothing() {
        let frame = unit_frame(6, 6);
        let poly = Polygon::from_rect(Rect::new(2.6, 0.0, 0.3, 6.0));
        assert!(filled(&rasterize_polygons(&frame, &[poly])).is_empty());
    }

    #[test]
    fn resolution_scales_polygons() {
        let frame = GridFrame::new(Vec2::new(100.0, 100.0), 2.0, 10, 10);
        let poly = Polygon::from_rect(Rect::new(104.0, 110.0, 4.0, 2.0));
        let cells = filled(&rasterize_polygons(&frame, &[poly]));
        assert_eq!(cells, vec![Point::from_row_col(5, 2), Point::from_row_col(5, 3)]);
    }

    #[test]
    fn concave_polygon_follows_even_odd() {
        // U shape open at the top: the notch stays empty.
        let frame = unit_frame(6, 6);
        let poly = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 4.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (6.0, 0.0),
            (6.0, 6.0),
            (0.0, 6.0),
        ]);
        let mask = rasterize_polygons(&frame, &[poly.clone()]);
        assert_eq!(mask.at(Point::from_row_col(1, 3)), Some(false));
        assert_eq!(mask.at(Point::from_row_col(1, 1)), Some(true));
        assert_eq!(mask.at(Point::from_row_col(5, 3)), Some(true));
        for (p, &inside) in &mask {
            let centre = frame.cell_center(p);
            assert_eq!(inside, poly.contains(centre), "cell {p}");
        }
    }

    #[test]
    fn polygons_outside_frame_are_clipped() {
        let frame = unit_frame(4, 4);
        let poly = Polygon::from_rect(Rect::new(-10.0, -10.0, 12.0, 100.0));
        let mask = rasterize_polygons(&frame, &[poly]);
        assert_eq!(filled(&mask).len(), 8);
    }

    #[test]
    fn dilation_grows_by_one_ring_per_pass() {
        let mut mask = Grid::new(9, 9, false);
        mask.set(Point::new(4, 4), true);
        assert_eq!(dilate(&mask, 0), mask);
        assert_eq!(filled(&dilate(&mask, 1)).len(), 9);
        assert_eq!(filled(&dilate(&mask, 2)).len(), 25);
        let corner = {
            let mut m = Grid::new(5, 5, false);
            m.set(Point::ZERO, true);
            m
        };
        assert_eq!(filled(&dilate(&corner, 1)).len(), 4);
    }

    #[test]
    fn dilating_empty_mask_is_noop() {
        let mask = Grid::new(5, 3, false);
        assert_eq!(dilate(&mask, 4), mask);
    }

    #[test]
    fn no_polygons_gives_free_grid() {
        let g = build_cost_grid(&unit_frame(7, 3), &[], &[], 10.0, 2).unwrap();
        assert!(g.as_slice().iter().all(|&c| c == FREE));
        assert_eq!((g.width(), g.height()), (7, 3));
    }

    #[test]
    fn obstacles_override_staging() {
        let frame = unit_frame(10, 10);
        let staging = Polygon::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let wall = Polygon::from_rect(Rect::new(4.0, 4.0, 1.0, 1.0));
        let g = build_cost_grid(&frame, &[wall], &[staging], 10.0, 1).unwrap();
        assert_eq!(g.at(Point::new(4, 4)), Some(OBSTACLE));
        assert_eq!(g.at(Point::new(5, 5)), Some(OBSTACLE));
        assert_eq!(g.at(Point::new(6, 6)), Some(11.0));
        assert_eq!(g.count_fn(|_, c| c.is_infinite()), 9);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert_eq!(
            build_cost_grid(&unit_frame(0, 3), &[], &[], 1.0, 2),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        let frame = GridFrame::new(Vec2::ZERO, 0.0, 3, 3);
        assert_eq!(
            build_cost_grid(&frame, &[], &[], 1.0, 2),
            Err(Error::InvalidResolution(0.0))
        );
        assert!(matches!(
            build_cost_grid(&unit_frame(3, 3), &[], &[], f64::NAN, 2),
            Err(Error::InvalidPenalty(v)) if v.is_nan()
        ));
        assert_eq!(
            build_cost_grid(&unit_frame(3, 3), &[], &[], -1.0, 2),
            Err(Error::InvalidPenalty(-1.0))
        );
    }
}
