//! **pickpath-core**: geometry and grid types for floor-plan pathfinding.
//!
//! Two coordinate systems live side by side:
//!
//! - **cell space**: integer [`Point`]s and origin-anchored [`Extent`]s indexing a
//!   discretized [`Grid`] (`x` = column, `y` = row);
//! - **plan space**: continuous [`Vec2`], [`Rect`] and [`Polygon`] values in
//!   the units of the floor plan the host application works in.

pub mod geom;
pub mod grid;
pub mod plane;

pub use geom::{Cells, Extent, Point};
pub use grid::Grid;
pub use plane::{
    EPSILON, Orientation, Polygon, Rect, Vec2, crossing_x, on_segment, orientation,
    segments_intersect,
};
