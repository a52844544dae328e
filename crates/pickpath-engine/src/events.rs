//! Notifications sent to the host, and the cancellation token for long
//! running work.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Something the host may want to reflect in its UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The cost grid and every precomputed tree were dropped.
    GridInvalidated,
    /// A grid build is starting.
    GridBuildStarted,
    /// A grid build ended.
    GridBuildFinished { success: bool },
    /// Precomputation is starting for `total` pick aisles.
    PrecomputeStarted { total: usize },
    /// `completed` pick aisles are done; `name` is the latest one.
    PrecomputeProgress { completed: usize, name: String },
    /// Precomputation ended; `failed` lists the pick aisles without a tree.
    PrecomputeFinished { success: bool, failed: Vec<String> },
    /// Precomputation was abandoned through its [`Context`].
    PrecomputeCancelled,
}

/// Send `event` if anyone is listening. A hung-up receiver is not an error.
pub(crate) fn emit(events: Option<&Sender<Event>>, event: Event) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// Cooperative cancellation shared between a caller and worker tasks.
///
/// Clones observe the same flag. Once cancelled a context stays cancelled.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Request cancellation. Tasks not yet started will be skipped.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Release);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
