//! The [`Grid`] type: a dense, row-major 2D array indexed by [`Point`].
//!
//! Unlike a shared view, a `Grid` owns its storage outright: cost grids and
//! per-start distance maps are built once and then only read, often from
//! several threads at once behind an `Arc`.

use crate::geom::{Cells, Extent, Point};

/// A dense 2D grid of `T` covering `[0, width) x [0, height)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    cells: Vec<T>,
    bounds: Extent,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid with every cell set to `value`.
    ///
    /// Non-positive dimensions produce an empty grid.
    pub fn new(width: i32, height: i32, value: T) -> Self {
        let bounds = Extent::new(width, height);
        Self {
            cells: vec![value; bounds.len()],
            bounds,
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for c in self.cells.iter_mut() {
            *c = value.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Wrap row-major `cells`. Returns `None` if the length does not match.
    pub fn from_vec(width: i32, height: i32, cells: Vec<T>) -> Option<Self> {
        let bounds = Extent::new(width, height);
        if cells.len() != bounds.len() {
            return None;
        }
        Some(Self { cells, bounds })
    }

    /// Build a grid by evaluating `f` at every point, row by row.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> T) -> Self {
        let bounds = Extent::new(width, height);
        let cells = bounds.iter().map(&mut f).collect();
        Self { cells, bounds }
    }

    /// The cells `[0, width) x [0, height)` this grid covers.
    #[inline]
    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    /// Size as a `Point` (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.bounds.width() as usize + p.x as usize)
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Borrow the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Set the cell at `p`. Does nothing if out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, value: T) {
        if let Some(i) = self.index(p) {
            self.cells[i] = value;
        }
    }

    /// Replace every cell with `f(point, &cell)`.
    pub fn map_cells(&mut self, mut f: impl FnMut(Point, &T) -> T) {
        for (i, p) in self.bounds.iter().enumerate() {
            self.cells[i] = f(p, &self.cells[i]);
        }
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, &T) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }

    /// Row-major cell storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over `(Point, &T)` pairs in row-major order.
    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter {
            points: self.bounds.iter(),
            cells: self.cells.iter(),
        }
    }
}

impl<T: Copy> Grid<T> {
    /// Copy of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.get(p).copied()
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, &T)` pairs of a [`Grid`].
pub struct GridIter<'a, T> {
    points: Cells,
    cells: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = (Point, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.points.next()?, self.cells.next()?))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl<T> ExactSizeIterator for GridIter<'_, T> {}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (Point, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> GridIter<'a, T> {
        self.iter()
    }
}
