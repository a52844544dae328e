//! Parallel shortest-path precomputation from every pick aisle.
//!
//! Each pick aisle is mapped to a grid cell. Aisles that land on an obstacle
//! fail straight away; the rest each get one Dijkstra run on a rayon pool.
//! Workers own everything they touch (an `Arc` of the grid, the start cell
//! and the name) and report through a single channel, which the caller
//! drains as results arrive. One failing run never affects the others.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};

use log::{debug, error, info, warn};
use pickpath_core::{Grid, Point, Vec2};
use pickpath_paths::{ShortestPathTree, WeightedPather, dijkstra};

use crate::config::PrecomputeOptions;
use crate::error::{Error, Result};
use crate::events::{Context, Event, emit};
use crate::snapshot::GridSnapshot;

/// Why a pick aisle has no tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The aisle's cell is an obstacle (possibly through dilation).
    InsideObstacle { cell: Point },
    /// The search for this aisle panicked.
    ComputationFailed(String),
    /// No worker pool could be started; the whole batch failed.
    PoolUnavailable(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsideObstacle { cell } => write!(f, "inside obstacle at grid cell {cell}"),
            Self::ComputationFailed(msg) => write!(f, "computation failed: {msg}"),
            Self::PoolUnavailable(msg) => write!(f, "worker pool unavailable: {msg}"),
        }
    }
}

/// A pick aisle without a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointFailure {
    pub name: String,
    pub reason: FailureReason,
}

impl fmt::Display for PointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.reason)
    }
}

/// Where a pick aisle is in the precomputation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointState {
    Unbuilt,
    Dispatched,
    Succeeded,
    FailedInObstacle,
    FailedInWorker,
}

/// Everything one precomputation produced.
#[derive(Debug, Clone, Default)]
pub struct PrecomputeReport {
    pub trees: HashMap<String, ShortestPathTree>,
    /// Failures in the order they were observed.
    pub failures: Vec<PointFailure>,
    pub statuses: HashMap<String, PointState>,
}

impl PrecomputeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// State of `name`; [`PointState::Unbuilt`] for names never requested.
    pub fn state(&self, name: &str) -> PointState {
        self.statuses
            .get(name)
            .copied()
            .unwrap_or(PointState::Unbuilt)
    }

    pub fn failed_names(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.name.clone()).collect()
    }

    fn fail(&mut self, name: String, reason: FailureReason) {
        let state = match reason {
            FailureReason::InsideObstacle { .. } => PointState::FailedInObstacle,
            _ => PointState::FailedInWorker,
        };
        self.statuses.insert(name.clone(), state);
        self.failures.push(PointFailure { name, reason });
    }
}

/// One search run by a worker.
type Solver = fn(&Grid<f32>, Point) -> ShortestPathTree;

enum Outcome {
    Done(ShortestPathTree),
    Failed(String),
    Skipped,
}

struct TaskResult {
    name: String,
    outcome: Outcome,
}

/// Compute a shortest-path tree from every named start over `grid`.
///
/// Emits [`Event::PrecomputeStarted`], one [`Event::PrecomputeProgress`]
/// per start (obstacle failures first, then each finished search) and
/// [`Event::PrecomputeFinished`]. Per-start failures are part of the report.
/// If `ctx` is cancelled the call returns [`Error::Cancelled`] once running
/// searches have drained, and any trees they produced are dropped.
pub fn precompute<I, N>(
    grid: &GridSnapshot,
    starts: I,
    options: &PrecomputeOptions,
    ctx: &Context,
    events: Option<&Sender<Event>>,
) -> Result<PrecomputeReport>
where
    I: IntoIterator<Item = (N, Vec2)>,
    N: Into<String>,
{
    let starts: Vec<(String, Vec2)> = starts.into_iter().map(|(n, p)| (n.into(), p)).collect();
    run(grid, starts, options, ctx, events, |g, start| dijkstra(g, start))
}

fn run(
    grid: &GridSnapshot,
    starts: Vec<(String, Vec2)>,
    options: &PrecomputeOptions,
    ctx: &Context,
    events: Option<&Sender<Event>>,
    solver: Solver,
) -> Result<PrecomputeReport> {
    let total = starts.len();
    info!("precomputing paths from {total} pick aisles");
    emit(events, Event::PrecomputeStarted { total });
    if ctx.is_done() {
        return cancelled(events);
    }

    let requested: Vec<String> = starts.iter().map(|(name, _)| name.clone()).collect();
    let mut report = PrecomputeReport::default();
    let mut completed = 0;
    let mut tasks = Vec::with_capacity(total);
    for (name, pos) in starts {
        let cell = grid.frame().cell_of_logged(pos, &format!("pick aisle '{name}'"));
        if grid.grid().passable(cell) {
            report.statuses.insert(name.clone(), PointState::Unbuilt);
            tasks.push((name, cell));
        } else {
            warn!("pick aisle '{name}' is inside an obstacle at grid cell {cell}");
            report.fail(name.clone(), FailureReason::InsideObstacle { cell });
            completed += 1;
            emit(events, Event::PrecomputeProgress { completed, name });
        }
    }

    if !tasks.is_empty() {
        let workers = options.worker_count(tasks.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pickpath-worker-{i}"))
            .build();
        let pool = match pool {
            Ok(pool) => pool,
            Err(e) => {
                error!("cannot start precompute worker pool: {e}");
                let mut failed = PrecomputeReport::default();
                for name in requested {
                    failed.fail(name, FailureReason::PoolUnavailable(e.to_string()));
                }
                return Ok(finish(failed, events));
            }
        };
        debug!("dispatching {} searches on {workers} workers", tasks.len());

        let (tx, rx) = mpsc::channel();
        for (name, cell) in tasks {
            report.statuses.insert(name.clone(), PointState::Dispatched);
            let tx = tx.clone();
            let grid = Arc::clone(grid.grid());
            let ctx = ctx.clone();
            pool.spawn(move || {
                let outcome = if ctx.is_done() {
                    Outcome::Skipped
                } else {
                    match panic::catch_unwind(AssertUnwindSafe(|| solver(&grid, cell))) {
                        Ok(tree) => Outcome::Done(tree),
                        Err(payload) => Outcome::Failed(panic_message(payload.as_ref())),
                    }
                };
                let _ = tx.send(TaskResult { name, outcome });
            });
        }
        drop(tx);

        for TaskResult { name, outcome } in rx {
            match outcome {
                Outcome::Done(tree) => {
                    debug!("'{name}' reaches {} cells", tree.reached_count());
                    report.statuses.insert(name.clone(), PointState::Succeeded);
                    report.trees.insert(name.clone(), tree);
                }
                Outcome::Failed(msg) => {
                    warn!("search from '{name}' failed: {msg}");
                    report.fail(name.clone(), FailureReason::ComputationFailed(msg));
                }
                Outcome::Skipped => continue,
            }
            completed += 1;
            emit(events, Event::PrecomputeProgress { completed, name });
        }
    }

    if ctx.is_done() {
        return cancelled(events);
    }
    Ok(finish(report, events))
}

fn finish(report: PrecomputeReport, events: Option<&Sender<Event>>) -> PrecomputeReport {
    let success = report.is_success();
    if success {
        info!("precomputed {} trees", report.trees.len());
    } else {
        let failed: Vec<String> = report.failures.iter().map(ToString::to_string).collect();
        warn!(
            "precomputed {} trees; failed: {}",
            report.trees.len(),
            failed.join(", ")
        );
    }
    emit(
        events,
        Event::PrecomputeFinished {
            success,
            failed: report.failed_names(),
        },
    );
    report
}

fn cancelled<T>(events: Option<&Sender<Event>>) -> Result<T> {
    info!("precomputation cancelled");
    emit(events, Event::PrecomputeCancelled);
    Err(Error::Cancelled)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
