//! Error types for pickpath-engine.
//!
//! Only configuration and prerequisite problems are errors. Start points
//! inside obstacles, unreachable destinations and unsupported unit pairs
//! are ordinary results.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// pickpath-engine error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Grid width or height is not positive
    #[error("Invalid grid dimensions: {width}x{height} cells")]
    InvalidDimensions {
        /// Requested width in cells
        width: i32,
        /// Requested height in cells
        height: i32,
    },

    /// The grid would need more cells than [`MAX_GRID_CELLS`](crate::bounds::MAX_GRID_CELLS)
    #[error("Grid of {width}x{height} cells is too large")]
    GridTooLarge {
        /// Columns needed
        width: f64,
        /// Rows needed
        height: f64,
    },

    /// Resolution factor is not a positive finite number
    #[error("Invalid resolution factor: {0}")]
    InvalidResolution(f64),

    /// Staging penalty is negative or not finite
    #[error("Invalid staging penalty: {0}")]
    InvalidPenalty(f64),

    /// No floor-plan rectangle has been provided
    #[error("Floor plan bounds not set")]
    MissingFloorPlan,

    /// No calibration scale has been provided
    #[error("Calibration scale not set")]
    MissingScale,

    /// There are no pick aisles to precompute from
    #[error("No pick aisles defined")]
    NoStartPoints,

    /// Paths have not been precomputed for the current layout
    #[error("Pathfinding data not ready; precompute first")]
    PathDataNotReady,

    /// The precomputation was abandoned through its context
    #[error("Precomputation cancelled")]
    Cancelled,
}
