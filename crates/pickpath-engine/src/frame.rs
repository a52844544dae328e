//! Mapping between plan space and cell space.

use log::warn;
use pickpath_core::{Extent, Point, Rect, Vec2};

use crate::error::{Error, Result};

/// Placement of a cost grid over the floor plan.
///
/// Cell `(row, col)` covers the plan-space square starting at
/// `origin + (col, row) * resolution` with side `resolution`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridFrame {
    /// Plan-space position of the top-left corner of cell (0, 0).
    pub origin: Vec2,
    /// Plan units per cell edge.
    pub resolution: f64,
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl GridFrame {
    pub fn new(origin: Vec2, resolution: f64, width: i32, height: i32) -> Self {
        Self {
            origin,
            resolution,
            width,
            height,
        }
    }

    /// Smallest frame at `resolution` whose cells cover `rect`.
    pub fn covering(rect: &Rect, resolution: f64) -> Result<Self> {
        let (width, height) = crate::bounds::grid_dimensions(rect, resolution)?;
        let frame = Self::new(rect.top_left(), resolution, width, height);
        frame.validate()?;
        Ok(frame)
    }

    /// Reject frames no grid can be built for.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::InvalidResolution(self.resolution));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        crate::bounds::check_cell_count(self.width as f64, self.height as f64)
    }

    /// Cell-space range covered by the frame.
    #[inline]
    pub fn bounds(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    /// Continuous cell coordinates of `p`: one unit per cell, cell centres
    /// at half-integers.
    #[inline]
    pub fn to_grid_space(&self, p: Vec2) -> Vec2 {
        (p - self.origin) / self.resolution
    }

    /// Inverse of [`to_grid_space`](Self::to_grid_space).
    #[inline]
    pub fn to_plan_space(&self, g: Vec2) -> Vec2 {
        self.origin + g * self.resolution
    }

    /// Cell containing `p`, possibly outside the frame.
    pub fn raw_cell(&self, p: Vec2) -> Point {
        let g = self.to_grid_space(p);
        Point::new(g.x.floor() as i32, g.y.floor() as i32)
    }

    /// Cell containing `p`, clamped into the frame.
    pub fn cell_of(&self, p: Vec2) -> Point {
        self.raw_cell(p).clamp(self.bounds())
    }

    /// Like [`cell_of`](Self::cell_of), logging a warning when `p` falls
    /// outside the frame. `what` names the point in the message.
    pub fn cell_of_logged(&self, p: Vec2, what: &str) -> Point {
        let raw = self.raw_cell(p);
        let cell = raw.clamp(self.bounds());
        if raw != cell {
            warn!("{what} at {p} lies outside the grid; cell {raw} clamped to {cell}");
        }
        cell
    }

    /// Plan-space centre of `cell`.
    #[inline]
    pub fn cell_center(&self, cell: Point) -> Vec2 {
        self.to_plan_space(Vec2::new(cell.x as f64 + 0.5, cell.y as f64 + 0.5))
    }
}
