//! A layout plus everything derived from it.
//!
//! [`Project`] keeps the cost grid and the precomputed trees in step with
//! the layout: any edit that could change a route drops both, and they are
//! rebuilt on demand.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{debug, error, info, warn};
use pickpath_core::{Polygon, Rect, Vec2};

use crate::bounds::select_bounds;
use crate::config::{GridParams, PrecomputeOptions};
use crate::error::{Error, Result};
use crate::events::{Context, Event, emit};
use crate::frame::GridFrame;
use crate::layout::{Layout, Scale};
use crate::query::{self, PathOutcome, PathProfile};
use crate::raster::build_cost_grid;
use crate::snapshot::{GridSnapshot, PathfindingSnapshot};

#[derive(Debug, Default)]
pub struct Project {
    layout: Layout,
    params: GridParams,
    options: PrecomputeOptions,
    grid: Option<GridSnapshot>,
    paths: Option<Arc<PathfindingSnapshot>>,
    events: Option<Sender<Event>>,
}

impl Project {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: GridParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_options(mut self, options: PrecomputeOptions) -> Self {
        self.options = options;
        self
    }

    /// Send [`Event`]s to `events` from now on.
    pub fn set_event_sender(&mut self, events: Option<Sender<Event>>) {
        self.events = events;
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    pub fn options(&self) -> &PrecomputeOptions {
        &self.options
    }

    /// The current grid, if one is built.
    pub fn grid(&self) -> Option<&GridSnapshot> {
        self.grid.as_ref()
    }

    /// The current trees, if precomputed.
    pub fn paths(&self) -> Option<Arc<PathfindingSnapshot>> {
        self.paths.clone()
    }

    pub fn is_grid_valid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn is_path_data_valid(&self) -> bool {
        self.paths.is_some()
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    /// Drop the grid and every tree.
    pub fn invalidate(&mut self) {
        let dropped = self.grid.take().is_some() | self.paths.take().is_some();
        if dropped {
            debug!("grid and path data invalidated");
            emit(self.events.as_ref(), Event::GridInvalidated);
        }
    }

    fn touched(&mut self, changed: bool) -> bool {
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Apply an arbitrary edit to the layout, invalidating derived data if
    /// anything other than the display unit changed.
    pub fn edit_layout<R>(&mut self, edit: impl FnOnce(&mut Layout) -> R) -> R {
        let before = self.layout.clone();
        let out = edit(&mut self.layout);
        let unit_only = Layout {
            display_unit: self.layout.display_unit.clone(),
            ..before
        };
        self.touched(unit_only != self.layout);
        out
    }

    // -----------------------------------------------------------------------
    // Layout edits
    // -----------------------------------------------------------------------

    pub fn set_floor_plan(&mut self, floor_plan: Option<Rect>) -> bool {
        let changed = self.layout.floor_plan != floor_plan;
        self.layout.floor_plan = floor_plan;
        self.touched(changed)
    }

    pub fn set_scale(&mut self, scale: Option<Scale>) -> bool {
        if let Some(s) = &scale {
            if !s.is_valid() {
                warn!(
                    "calibration of {} plan units per {} is not usable",
                    s.pixels_per_unit, s.unit
                );
            }
        }
        let changed = self.layout.scale != scale;
        self.layout.scale = scale;
        self.touched(changed)
    }

    /// Distances are converted at query time, so this keeps derived data.
    pub fn set_display_unit(&mut self, unit: impl Into<String>) {
        self.layout.display_unit = unit.into();
    }

    pub fn set_pathfinding_bounds(&mut self, bounds: Option<Polygon>) -> bool {
        let changed = self.layout.pathfinding_bounds != bounds;
        self.layout.pathfinding_bounds = bounds;
        self.touched(changed)
    }

    /// Add an obstacle. Polygons with fewer than three vertices are refused.
    pub fn add_obstacle(&mut self, polygon: Polygon) -> bool {
        if !accept_polygon(&polygon, "obstacle") {
            return false;
        }
        self.layout.obstacles.push(polygon);
        self.touched(true)
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Option<Polygon> {
        if index >= self.layout.obstacles.len() {
            return None;
        }
        let removed = self.layout.obstacles.remove(index);
        self.touched(true);
        Some(removed)
    }

    pub fn clear_obstacles(&mut self) -> bool {
        let changed = !self.layout.obstacles.is_empty();
        self.layout.obstacles.clear();
        self.touched(changed)
    }

    /// Add a staging area. Polygons with fewer than three vertices are
    /// refused.
    pub fn add_staging_area(&mut self, polygon: Polygon) -> bool {
        if !accept_polygon(&polygon, "staging area") {
            return false;
        }
        self.layout.staging_areas.push(polygon);
        self.touched(true)
    }

    pub fn remove_staging_area(&mut self, index: usize) -> Option<Polygon> {
        if index >= self.layout.staging_areas.len() {
            return None;
        }
        let removed = self.layout.staging_areas.remove(index);
        self.touched(true);
        Some(removed)
    }

    pub fn clear_staging_areas(&mut self) -> bool {
        let changed = !self.layout.staging_areas.is_empty();
        self.layout.staging_areas.clear();
        self.touched(changed)
    }

    pub fn add_pick_aisle(&mut self, name: impl Into<String>, pos: Vec2) -> bool {
        let added = self.layout.pick_aisles.insert(name, pos);
        self.touched(added)
    }

    pub fn move_pick_aisle(&mut self, name: &str, pos: Vec2) -> bool {
        let moved = self.layout.pick_aisles.set(name, pos);
        self.touched(moved)
    }

    pub fn remove_pick_aisle(&mut self, name: &str) -> Option<Vec2> {
        let removed = self.layout.pick_aisles.remove(name);
        self.touched(removed.is_some());
        removed
    }

    pub fn add_staging_location(&mut self, name: impl Into<String>, pos: Vec2) -> bool {
        let added = self.layout.staging_locations.insert(name, pos);
        self.touched(added)
    }

    pub fn move_staging_location(&mut self, name: &str, pos: Vec2) -> bool {
        let moved = self.layout.staging_locations.set(name, pos);
        self.touched(moved)
    }

    pub fn remove_staging_location(&mut self, name: &str) -> Option<Vec2> {
        let removed = self.layout.staging_locations.remove(name);
        self.touched(removed.is_some());
        removed
    }

    // -----------------------------------------------------------------------
    // Parameters
    // -----------------------------------------------------------------------

    pub fn set_params(&mut self, params: GridParams) -> bool {
        let changed = self.params != params;
        self.params = params;
        self.touched(changed)
    }

    pub fn set_resolution_factor(&mut self, resolution_factor: f64) -> bool {
        self.set_params(GridParams {
            resolution_factor,
            ..self.params
        })
    }

    pub fn set_staging_penalty(&mut self, staging_penalty: f64) -> bool {
        self.set_params(GridParams {
            staging_penalty,
            ..self.params
        })
    }

    pub fn set_dilation_iterations(&mut self, dilation_iterations: u32) -> bool {
        self.set_params(GridParams {
            dilation_iterations,
            ..self.params
        })
    }

    /// Worker settings only affect how trees are computed, not what they
    /// contain, so this keeps derived data.
    pub fn set_options(&mut self, options: PrecomputeOptions) {
        self.options = options;
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// The current grid, building it first if needed.
    pub fn ensure_grid_built(&mut self) -> Result<GridSnapshot> {
        if let Some(grid) = &self.grid {
            return Ok(grid.clone());
        }
        self.rebuild_grid()
    }

    /// Build a fresh grid, dropping the old one and any trees.
    pub fn rebuild_grid(&mut self) -> Result<GridSnapshot> {
        self.invalidate();
        emit(self.events.as_ref(), Event::GridBuildStarted);
        match self.build_grid() {
            Ok(snapshot) => {
                info!(
                    "grid ready: {}x{} cells, {} blocked",
                    snapshot.frame().width,
                    snapshot.frame().height,
                    snapshot.blocked_count()
                );
                self.grid = Some(snapshot.clone());
                emit(self.events.as_ref(), Event::GridBuildFinished { success: true });
                Ok(snapshot)
            }
            Err(e) => {
                error!("grid build failed: {e}");
                emit(self.events.as_ref(), Event::GridBuildFinished { success: false });
                Err(e)
            }
        }
    }

    fn build_grid(&self) -> Result<GridSnapshot> {
        let floor_plan = self.layout.floor_plan.ok_or(Error::MissingFloorPlan)?;
        if !self.layout.scale.as_ref().is_some_and(Scale::is_valid) {
            return Err(Error::MissingScale);
        }
        self.params.validate()?;

        let rect = select_bounds(
            &floor_plan,
            self.layout.pathfinding_bounds.as_ref(),
            self.layout.all_points(),
            self.params.bounds_padding,
            self.params.point_margin,
        );
        let frame = GridFrame::covering(&rect, self.params.resolution_factor)?;
        let named = self
            .layout
            .pick_aisles
            .iter()
            .chain(self.layout.staging_locations.iter());
        for (name, pos) in named {
            let raw = frame.raw_cell(pos);
            if !frame.bounds().contains(raw) {
                warn!(
                    "'{name}' at {pos} maps to cell {raw} outside the {}x{} grid",
                    frame.width, frame.height
                );
            }
        }

        let grid = build_cost_grid(
            &frame,
            &self.layout.obstacles,
            &self.layout.staging_areas,
            self.params.staging_penalty,
            self.params.dilation_iterations,
        )?;
        Ok(GridSnapshot::new(frame, grid))
    }

    /// Compute trees from every pick aisle, building the grid if needed.
    ///
    /// Pick aisles that cannot be computed are listed in the snapshot's
    /// failures; the others are usable regardless.
    pub fn precompute(&mut self, ctx: &Context) -> Result<Arc<PathfindingSnapshot>> {
        if self.layout.pick_aisles.is_empty() {
            warn!("nothing to precompute: no pick aisles");
            self.abandon_precompute();
            return Err(Error::NoStartPoints);
        }
        let grid = match self.ensure_grid_built() {
            Ok(grid) => grid,
            Err(e) => {
                self.abandon_precompute();
                return Err(e);
            }
        };
        self.paths = None;

        let report = crate::precompute::precompute(
            &grid,
            self.layout.pick_aisles.iter(),
            &self.options,
            ctx,
            self.events.as_ref(),
        )?;
        let snapshot = Arc::new(PathfindingSnapshot::new(grid, report.trees, report.failures));
        self.paths = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Close a precomputation that never dispatched anything.
    fn abandon_precompute(&self) {
        emit(
            self.events.as_ref(),
            Event::PrecomputeFinished {
                success: false,
                failed: Vec::new(),
            },
        );
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Route from the pick aisle `start` to the staging location `end`.
    pub fn shortest_path(&self, start: &str, end: &str) -> PathOutcome {
        if !self.layout.pick_aisles.contains(start) {
            return PathOutcome::UnknownPoint(start.to_string());
        }
        let Some(end_pos) = self.layout.staging_locations.get(end) else {
            return PathOutcome::UnknownPoint(end.to_string());
        };
        let Some(paths) = &self.paths else {
            return PathOutcome::NotReady;
        };
        query::shortest_path(paths, start, end_pos, &self.layout.measure())
    }

    /// Per-vertex distances along the route from `start` to `end`.
    pub fn path_profile(&self, start: &str, end: &str) -> Option<PathProfile> {
        let outcome = self.shortest_path(start, end);
        PathProfile::new(outcome.found()?, &self.layout.measure())
    }
}

fn accept_polygon(polygon: &Polygon, what: &str) -> bool {
    if polygon.is_empty() {
        warn!("ignoring {what} with {} vertices", polygon.len());
        return false;
    }
    if !polygon.is_simple() {
        warn!("{what} polygon is self-intersecting; filling by the even-odd rule");
    }
    true
}
