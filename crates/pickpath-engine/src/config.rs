//! Tunable parameters for grid construction and precomputation.

use crate::error::{Error, Result};

/// Default continuous units per grid cell edge.
pub const DEFAULT_RESOLUTION_FACTOR: f64 = 2.0;
/// Default extra cost for entering a staging-area cell.
pub const DEFAULT_STAGING_PENALTY: f64 = 10.0;
/// Default number of obstacle dilation passes.
pub const DEFAULT_DILATION_ITERATIONS: u32 = 2;
/// Default padding around user-drawn pathfinding bounds.
pub const DEFAULT_BOUNDS_PADDING: f64 = 50.0;
/// Default half-size of the square kept around each named point.
pub const DEFAULT_POINT_MARGIN: f64 = 10.0;

/// Parameters controlling how the cost grid is built.
///
/// Changing any of these invalidates a previously built grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridParams {
    /// Continuous units per cell edge. Must be > 0.
    pub resolution_factor: f64,
    /// Added to the free cost inside staging polygons. Must be >= 0.
    pub staging_penalty: f64,
    /// 8-connected dilation passes applied to the obstacle mask.
    pub dilation_iterations: u32,
    /// Padding applied on every side of user-drawn bounds.
    pub bounds_padding: f64,
    /// Half-size of the square united into the bounds for outlying points.
    pub point_margin: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            resolution_factor: DEFAULT_RESOLUTION_FACTOR,
            staging_penalty: DEFAULT_STAGING_PENALTY,
            dilation_iterations: DEFAULT_DILATION_ITERATIONS,
            bounds_padding: DEFAULT_BOUNDS_PADDING,
            point_margin: DEFAULT_POINT_MARGIN,
        }
    }
}

impl GridParams {
    /// Check the numeric preconditions of a grid build.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution_factor.is_finite() && self.resolution_factor > 0.0) {
            return Err(Error::InvalidResolution(self.resolution_factor));
        }
        if !(self.staging_penalty.is_finite() && self.staging_penalty >= 0.0) {
            return Err(Error::InvalidPenalty(self.staging_penalty));
        }
        Ok(())
    }
}

/// Options for the precomputation worker pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecomputeOptions {
    /// Worker thread count; `None` sizes the pool from the hardware.
    pub workers: Option<usize>,
}

impl PrecomputeOptions {
    /// Number of worker threads to use for `tasks` independent searches.
    ///
    /// Without an explicit count, one core is left free for the caller.
    /// Never more threads than tasks, never fewer than one.
    pub fn worker_count(&self, tasks: usize) -> usize {
        let wanted = self.workers.unwrap_or_else(|| {
            let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
            cores.saturating_sub(1).max(1)
        });
        wanted.min(tasks).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let p = GridParams::default();
        assert_eq!(p.resolution_factor, 2.0);
        assert_eq!(p.dilation_iterations, 2);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn bad_resolution_is_rejected() {
        for r in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let p = GridParams {
                resolution_factor: r,
                ..GridParams::default()
            };
            assert!(matches!(p.validate(), Err(Error::InvalidResolution(_))));
        }
    }

    #[test]
    fn bad_penalty_is_rejected() {
        let p = GridParams {
            staging_penalty: -0.5,
            ..GridParams::default()
        };
        assert_eq!(p.validate(), Err(Error::InvalidPenalty(-0.5)));
    }

    #[test]
    fn worker_count_bounds() {
        let fixed = PrecomputeOptions { workers: Some(8) };
        assert_eq!(fixed.worker_count(3), 3);
        assert_eq!(fixed.worker_count(20), 8);
        assert_eq!(fixed.worker_count(0), 1);
        let zero = PrecomputeOptions { workers: Some(0) };
        assert_eq!(zero.worker_count(5), 1);
        let auto = PrecomputeOptions::default();
        assert!(auto.worker_count(100) >= 1);
    }
}
