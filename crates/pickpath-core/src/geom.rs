//! Cell-space primitives: [`Point`] and [`Extent`].
//!
//! A `Point` addresses one grid cell; `x` is the column and `y` the row,
//! with rows growing downwards like the floor-plan coordinates they are
//! derived from. Every grid starts at cell (0, 0), so an [`Extent`] is just
//! a width and a height.

use std::fmt;

/// Offsets of the eight cells around a cell, row by row.
const RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// One grid cell. `x` is the column, `y` the row.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell at `row`, `col`.
    #[inline]
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// Cells sharing an edge with this one: up, down, left, right.
    ///
    /// Searches expand neighbours in this order, which fixes how ties
    /// between equal-cost routes are broken.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        let Point { x, y } = self;
        [
            Point::new(x, y - 1),
            Point::new(x, y + 1),
            Point::new(x - 1, y),
            Point::new(x + 1, y),
        ]
    }

    /// Cells sharing an edge or a corner with this one.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        RING.map(|(dx, dy)| Point::new(self.x + dx, self.y + dy))
    }

    /// Nearest cell inside `extent`. An empty extent leaves the point as is.
    #[inline]
    pub fn clamp(self, extent: Extent) -> Self {
        if extent.is_empty() {
            return self;
        }
        Point::new(
            self.x.clamp(0, extent.width() - 1),
            self.y.clamp(0, extent.height() - 1),
        )
    }
}

impl fmt::Display for Point {
    /// `(row, col)`, the order cells are reported in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// The cells `[0, width) x [0, height)` of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    width: i32,
    height: i32,
}

impl Extent {
    /// Negative sizes are treated as zero.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// `(width, height)` as a point.
    #[inline]
    pub fn size(self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Every cell, row by row.
    #[inline]
    pub fn iter(self) -> Cells {
        Cells {
            extent: self,
            next: 0,
        }
    }
}

impl IntoIterator for Extent {
    type Item = Point;
    type IntoIter = Cells;
    #[inline]
    fn into_iter(self) -> Cells {
        self.iter()
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major iterator over the cells of an [`Extent`].
#[derive(Clone, Debug)]
pub struct Cells {
    extent: Extent,
    next: usize,
}

impl Iterator for Cells {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.extent.len() {
            return None;
        }
        let w = self.extent.width as usize;
        let p = Point::new((self.next % w) as i32, (self.next / w) as i32);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.extent.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cells {}
