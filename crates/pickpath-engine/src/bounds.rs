//! Choosing the plan-space rectangle a cost grid covers.

use log::{debug, warn};
use pickpath_core::{Polygon, Rect, Vec2};

use crate::error::{Error, Result};

/// Largest grid, in cells, that will be built. Each precomputed tree keeps
/// a distance and a predecessor per cell, so this bounds memory per aisle.
pub const MAX_GRID_CELLS: f64 = 50_000_000.0;

/// Reject cell counts no grid can hold.
pub(crate) fn check_cell_count(width: f64, height: f64) -> Result<()> {
    if width > i32::MAX as f64 || height > i32::MAX as f64 || width * height > MAX_GRID_CELLS {
        return Err(Error::GridTooLarge { width, height });
    }
    Ok(())
}

/// Pick the rectangle to discretize.
///
/// With non-empty `user_bounds`, its bounding rect padded by `padding` on
/// every side and clipped to `floor_plan`; otherwise (or when clipping
/// leaves nothing) the whole floor plan. Every point of `points` not inside
/// the result then pulls it out to include a square of half-side `margin`
/// around the point, so named points always land on the grid.
pub fn select_bounds<I>(
    floor_plan: &Rect,
    user_bounds: Option<&Polygon>,
    points: I,
    padding: f64,
    margin: f64,
) -> Rect
where
    I: IntoIterator<Item = Vec2>,
{
    let mut rect = *floor_plan;
    if let Some(poly) = user_bounds.filter(|p| !p.is_empty()) {
        let clipped = poly
            .bounding_rect()
            .adjusted(-padding, -padding, padding, padding)
            .intersected(floor_plan);
        if clipped.is_valid() {
            debug!("grid bounds from user polygon: {clipped}");
            rect = clipped;
        } else {
            warn!("pathfinding bounds do not overlap the floor plan; using {floor_plan}");
        }
    }

    for p in points {
        if !p.is_finite() || covers_cell_of(&rect, p) {
            continue;
        }
        debug!("extending grid bounds to include point at {p}");
        rect = rect.united(&Rect::around(p, margin));
    }
    rect
}

/// Whether `p` maps to a cell of a grid over `rect`. The far edges belong to
/// the next cell, so they do not count.
fn covers_cell_of(rect: &Rect, p: Vec2) -> bool {
    p.x >= rect.left() && p.x < rect.right() && p.y >= rect.top() && p.y < rect.bottom()
}

/// Cell counts needed to cover `rect` at `resolution`: `ceil(extent /
/// resolution)` on each axis.
///
/// Counts above [`MAX_GRID_CELLS`] in total give [`Error::GridTooLarge`].
pub fn grid_dimensions(rect: &Rect, resolution: f64) -> Result<(i32, i32)> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(Error::InvalidResolution(resolution));
    }
    let cells = |extent: f64| {
        if extent.is_finite() {
            (extent / resolution).ceil().max(0.0)
        } else {
            0.0
        }
    };
    let (w, h) = (cells(rect.width), cells(rect.height));
    if w <= 0.0 || h <= 0.0 {
        return Err(Error::InvalidDimensions {
            width: w.min(i32::MAX as f64) as i32,
            height: h.min(i32::MAX as f64) as i32,
        });
    }
    check_cell_count(w, h)?;
    Ok((w as i32, h as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::GridFrame;

    fn plan() -> Rect {
        Rect::new(0.0, 0.0, 1000.0, 800.0)
    }

    #[test]
    fn no_user_bounds_uses_floor_plan() {
        let r = select_bounds(&plan(), None, [Vec2::new(10.0, 10.0)], 50.0, 10.0);
        assert_eq!(r, plan());
    }

    #[test]
    fn user_bounds_are_padded_and_clipped() {
        let poly = Polygon::from_coords(&[(20.0, 100.0), (300.0, 100.0), (300.0, 400.0)]);
        let r = select_bounds(&plan(), Some(&poly), [], 50.0, 10.0);
        assert_eq!(r, Rect::new(0.0, 50.0, 350.0, 400.0));
    }

    #[test]
    fn degenerate_user_bounds_fall_back() {
        let outside = Polygon::from_coords(&[(2000.0, 2000.0), (2100.0, 2000.0), (2100.0, 2100.0)]);
        assert_eq!(select_bounds(&plan(), Some(&outside), [], 50.0, 10.0), plan());

        let too_few = Polygon::from_coords(&[(10.0, 10.0), (20.0, 20.0)]);
        assert_eq!(select_bounds(&plan(), Some(&too_few), [], 50.0, 10.0), plan());
    }

    #[test]
    fn outlying_points_extend_bounds() {
        let poly = Polygon::from_rect(Rect::new(400.0, 400.0, 100.0, 100.0));
        let r = select_bounds(
            &plan(),
            Some(&poly),
            [Vec2::new(420.0, 420.0), Vec2::new(100.0, 700.0)],
            50.0,
            10.0,
        );
        assert_eq!(r, Rect::new(90.0, 350.0, 460.0, 360.0));
        assert!(r.contains(Vec2::new(100.0, 700.0)));
    }

    #[test]
    fn far_edge_points_get_their_own_cell() {
        let plan = Rect::new(0.0, 0.0, 10.0, 10.0);
        let corner = Vec2::new(10.0, 10.0);
        let r = select_bounds(&plan, None, [corner, Vec2::new(0.0, 0.0)], 50.0, 1.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 11.0, 11.0));

        let frame = GridFrame::covering(&r, 1.0).unwrap();
        assert!(frame.bounds().contains(frame.raw_cell(corner)));
    }

    #[test]
    fn dimensions_round_up() {
        assert_eq!(grid_dimensions(&Rect::new(0.0, 0.0, 10.0, 5.0), 2.0), Ok((5, 3)));
        assert_eq!(grid_dimensions(&Rect::new(0.0, 0.0, 10.0, 5.0), 1.0), Ok((10, 5)));
        assert_eq!(
            grid_dimensions(&Rect::new(0.0, 0.0, 0.0, 5.0), 1.0),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert_eq!(
            grid_dimensions(&Rect::new(0.0, 0.0, 4.0, 4.0), 0.0),
            Err(Error::InvalidResolution(0.0))
        );
    }

    #[test]
    fn tiny_resolution_is_too_large() {
        let plan = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        assert!(matches!(
            grid_dimensions(&plan, 1e-9),
            Err(Error::GridTooLarge { .. })
        ));
        // Each axis fits in an i32 but the product does not fit the cap.
        assert_eq!(
            grid_dimensions(&plan, 0.125),
            Err(Error::GridTooLarge {
                width: 8000.0,
                height: 8000.0
            })
        );
        assert_eq!(grid_dimensions(&plan, 0.25), Ok((4000, 4000)));
    }
}
