//! **pickpath-engine**: walking routes across a warehouse floor plan.
//!
//! A [`Layout`] (floor-plan extent, obstacle and staging polygons, named
//! pick aisles and staging locations) is discretized into a cost grid, then
//! a shortest-path tree is precomputed from every pick aisle in parallel.
//! Route queries afterwards are a predecessor walk.
//!
//! # Pipeline
//!
//! | Step | Entry point |
//! |---|---|
//! | choose the area to cover | [`select_bounds`] |
//! | rasterize polygons into costs | [`build_cost_grid`] |
//! | one tree per pick aisle | [`precompute()`] |
//! | route and distance | [`shortest_path()`] |
//!
//! [`Project`] ties the steps together and drops derived data whenever the
//! layout changes. Progress is reported as [`Event`]s on an optional
//! channel; diagnostics go through the `log` facade.

pub mod analysis;
pub mod bounds;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod layout;
pub mod precompute;
pub mod project;
pub mod query;
pub mod raster;
pub mod snapshot;
pub mod units;

pub use analysis::{
    AnalysisReport, LengthFilter, RouteRecord, RouteResult, RouteStatus, RouteSummary,
    analyze_routes, filter_paths,
};
pub use bounds::{MAX_GRID_CELLS, grid_dimensions, select_bounds};
pub use config::{GridParams, PrecomputeOptions};
pub use error::{Error, Result};
pub use events::{Context, Event};
pub use frame::GridFrame;
pub use layout::{Layout, NamedPoints, Scale};
pub use precompute::{FailureReason, PointFailure, PointState, PrecomputeReport, precompute};
pub use project::Project;
pub use query::{
    FoundPath, PathOutcome, PathProfile, ProfileVertex, polyline_length, shortest_path,
};
pub use raster::{FREE, OBSTACLE, build_cost_grid, dilate, rasterize_polygons};
pub use snapshot::{GridSnapshot, PathfindingSnapshot};
pub use units::{FEET_PER_METER, LengthUnit, Measure, convert_distance};
