//! Plan-space (continuous) geometry: [`Vec2`], [`Rect`], [`Polygon`] and the
//! segment predicates used to validate drawn shapes.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Tolerance for floating point comparisons in the segment predicates.
pub const EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A continuous 2D position in floor-plan units. Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle given by its top-left corner and size.
///
/// A rect with non-positive width or height is *invalid*; invalid rects act
/// as the identity for [`united`](Rect::united).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect spanning two opposite corners, in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, a.x.max(b.x) - x, a.y.max(b.y) - y)
    }

    /// Square of half-side `margin` centred on `p`.
    pub fn around(p: Vec2, margin: f64) -> Self {
        Self::new(p.x - margin, p.y - margin, 2.0 * margin, 2.0 * margin)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whether the rect has strictly positive, finite extent.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Whether `p` lies inside the rect (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Move each edge outwards: left by `dx0`, top by `dy0`, right by `dx1`,
    /// bottom by `dy1` (negative values move inwards for `dx0`/`dy0`, as in
    /// `rect.adjusted(-pad, -pad, pad, pad)`).
    pub fn adjusted(&self, dx0: f64, dy0: f64, dx1: f64, dy1: f64) -> Self {
        Self::new(
            self.x + dx0,
            self.y + dy0,
            self.width - dx0 + dx1,
            self.height - dy0 + dy1,
        )
    }

    /// Intersection of two rects; the default (invalid) rect when disjoint.
    pub fn intersected(&self, other: &Rect) -> Self {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Self::default();
        }
        Self::new(left, top, right - left, bottom - top)
    }

    /// Smallest rect containing both rects. Invalid operands are ignored.
    pub fn united(&self, other: &Rect) -> Self {
        if !other.is_valid() {
            return *self;
        }
        if !self.is_valid() {
            return *other;
        }
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2} {:.2}x{:.2}]",
            self.x, self.y, self.width, self.height
        )
    }
}

// ---------------------------------------------------------------------------
// Polygon
// ---------------------------------------------------------------------------

/// A closed polygon given by its vertices; the last vertex connects back to
/// the first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Build from `(x, y)` tuples.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().copied().map(Vec2::from).collect())
    }

    /// The four corners of `r`, clockwise from the top-left.
    pub fn from_rect(r: Rect) -> Self {
        Self::new(vec![
            Vec2::new(r.left(), r.top()),
            Vec2::new(r.right(), r.top()),
            Vec2::new(r.right(), r.bottom()),
            Vec2::new(r.left(), r.bottom()),
        ])
    }

    /// Fewer than three vertices encloses no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Axis-aligned bounding rect; the default rect for a vertex-less polygon.
    pub fn bounding_rect(&self) -> Rect {
        let Some(first) = self.vertices.first() else {
            return Rect::default();
        };
        let (mut min, mut max) = (*first, *first);
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Rect::from_corners(min, max)
    }

    /// Even-odd containment test by ray casting towards +x.
    ///
    /// Uses the same crossing rule as the scan-line rasterizer, so a cell is
    /// filled exactly when this returns `true` for its centre.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if let Some(x) = crossing_x(a, b, p.y) {
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Enclosed area (shoelace formula, absolute value).
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let twice: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice.abs() / 2.0
    }

    /// Whether no two non-adjacent edges touch.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return n == 3 && orientation(self.vertices[0], self.vertices[1], self.vertices[2])
                != Orientation::Collinear;
        }
        let edges: Vec<_> = self.edges().collect();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (p1, q1) = edges[i];
                let (p2, q2) = edges[j];
                if segments_intersect(p1, q1, p2, q2) {
                    return false;
                }
            }
        }
        true
    }

    /// Return the polygon shifted by `d`.
    pub fn translated(&self, d: Vec2) -> Self {
        Self::new(self.vertices.iter().map(|&v| v + d).collect())
    }
}

/// X coordinate where edge `a`–`b` crosses the horizontal line at `y`.
///
/// Edges are treated as half-open in `y` (the lower endpoint is included,
/// the upper excluded) so that a vertex shared by two edges is counted once
/// and horizontal edges never cross.
#[inline]
pub fn crossing_x(a: Vec2, b: Vec2, y: f64) -> Option<f64> {
    if (a.y > y) == (b.y > y) {
        return None;
    }
    Some(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
}

// ---------------------------------------------------------------------------
// Segment predicates
// ---------------------------------------------------------------------------

/// Turn direction of an ordered point triplet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triplet `(p, q, r)`.
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` lies on segment `p`–`r`.
pub fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    if q.x < p.x.min(r.x) - EPSILON
        || q.x > p.x.max(r.x) + EPSILON
        || q.y < p.y.min(r.y) - EPSILON
        || q.y > p.y.max(r.y) + EPSILON
    {
        return false;
    }
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    val.abs() < EPSILON
}

/// Whether segments `p1`–`q1` and `p2`–`q2` intersect (touching counts).
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    #[test]
    fn vec2_distance() {
        assert_eq!(Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(Vec2::new(1.0, 2.0) * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(Vec2::new(4.0, 2.0) / 2.0, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn rect_adjust_intersect_unite() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(r.adjusted(-5.0, -5.0, 5.0, 5.0), Rect::new(5.0, 5.0, 30.0, 30.0));

        let clip = Rect::new(0.0, 0.0, 15.0, 100.0);
        assert_eq!(r.intersected(&clip), Rect::new(10.0, 10.0, 5.0, 20.0));
        assert!(!r.intersected(&Rect::new(100.0, 100.0, 1.0, 1.0)).is_valid());

        let u = r.united(&Rect::new(40.0, 0.0, 5.0, 5.0));
        assert_eq!(u, Rect::new(10.0, 0.0, 35.0, 30.0));
        assert_eq!(Rect::default().united(&r), r);
        assert_eq!(r.united(&Rect::default()), r);
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(10.1, 5.0)));
        assert_eq!(Rect::around(Vec2::new(5.0, 5.0), 1.0), Rect::new(4.0, 4.0, 2.0, 2.0));
    }

    #[test]
    fn polygon_contains_square() {
        let sq = square();
        assert!(sq.contains(Vec2::new(5.0, 5.0)));
        assert!(!sq.contains(Vec2::new(15.0, 5.0)));
        assert!(!sq.contains(Vec2::new(5.0, -1.0)));
    }

    #[test]
    fn polygon_contains_concave() {
        // A "U" shape open at the top between x = 3 and x = 7.
        let u = Polygon::from_coords(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 7.0),
            (7.0, 7.0),
            (7.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        assert!(u.contains(Vec2::new(1.5, 1.5)));
        assert!(u.contains(Vec2::new(8.5, 1.5)));
        assert!(!u.contains(Vec2::new(5.0, 3.0)));
        assert!(u.contains(Vec2::new(5.0, 8.5)));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = Polygon::from_coords(&[(0.0, 0.0), (10.0, 10.0)]);
        assert!(line.is_empty());
        assert!(!line.contains(Vec2::new(5.0, 5.0)));
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn polygon_bounds_and_area() {
        let tri = Polygon::from_coords(&[(2.0, 1.0), (6.0, 1.0), (2.0, 4.0)]);
        assert_eq!(tri.bounding_rect(), Rect::new(2.0, 1.0, 4.0, 3.0));
        assert!((tri.area() - 6.0).abs() < 1e-12);
        assert_eq!(Polygon::default().bounding_rect(), Rect::default());
        assert_eq!(
            tri.translated(Vec2::new(1.0, 1.0)).bounding_rect(),
            Rect::new(3.0, 2.0, 4.0, 3.0)
        );
    }

    #[test]
    fn segment_intersection_cases() {
        let v = Vec2::new;
        // Crossing.
        assert!(segments_intersect(v(0.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(4.0, 0.0)));
        // Parallel, disjoint.
        assert!(!segments_intersect(v(0.0, 0.0), v(4.0, 0.0), v(0.0, 1.0), v(4.0, 1.0)));
        // Collinear, overlapping.
        assert!(segments_intersect(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 0.0), v(6.0, 0.0)));
        // Collinear, disjoint.
        assert!(!segments_intersect(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)));
        // Touching at an endpoint.
        assert!(segments_intersect(v(0.0, 0.0), v(2.0, 2.0), v(2.0, 2.0), v(4.0, 0.0)));
    }

    #[test]
    fn orientation_turns() {
        let v = Vec2::new;
        assert_eq!(orientation(v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)), Orientation::Collinear);
        assert_ne!(
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)),
            orientation(v(0.0, 0.0), v(1.0, 0.0), v(1.0, -1.0))
        );
    }

    #[test]
    fn simple_polygon_detection() {
        assert!(square().is_simple());
        let bowtie = Polygon::from_coords(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        assert!(!bowtie.is_simple());
        let flat = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(!flat.is_simple());
    }
}
