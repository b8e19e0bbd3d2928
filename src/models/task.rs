//! Task record model.
//!
//! A task is one schedulable unit of work: a fixed base priority, a
//! processing duration in work units, and an execution window stamped
//! once by the scheduler.
//!
//! # Time Representation
//! All times are integer simulation ticks relative to the simulation
//! epoch (t=0). Durations are strictly positive tick counts.

use serde::{Deserialize, Serialize};

/// Unique task identifier.
pub type TaskId = u32;

/// A schedulable task.
///
/// Created once by the generator and owned by the simulation's task pool
/// for its whole lifetime; the index and the per-processor queues refer
/// to it by pool slot, never by copy.
///
/// The *effective* priority is not stored: it is a function of the
/// simulation clock and is re-derived by [`Task::effective_priority`]
/// whenever a queue needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Base scheduling priority, fixed at creation (higher = more important).
    pub base_priority: f64,
    /// Processing duration in work units (> 0).
    pub duration: i64,
    /// Simulation tick at which the task was created.
    pub created_at: i64,
    /// Tick at which execution began. `None` until scheduled.
    pub started_at: Option<i64>,
    /// Tick at which execution finished. `None` until scheduled.
    pub finished_at: Option<i64>,
}

impl Task {
    /// Creates a new, not-yet-executed task created at tick 0.
    pub fn new(id: TaskId, base_priority: f64, duration: i64) -> Self {
        Self {
            id,
            base_priority,
            duration,
            created_at: 0,
            started_at: None,
            finished_at: None,
        }
    }

    /// Sets the creation tick.
    pub fn with_created_at(mut self, tick: i64) -> Self {
        self.created_at = tick;
        self
    }

    /// Effective priority at simulation time `now`.
    ///
    /// `base_priority + (now - created_at) * aging_factor` — waiting
    /// tasks gain priority linearly with elapsed time.
    pub fn effective_priority(&self, now: i64, aging_factor: f64) -> f64 {
        self.base_priority + (now - self.created_at) as f64 * aging_factor
    }

    /// Stamps the execution window starting at `start`.
    ///
    /// Maintains the invariant `finished_at == started_at + duration`.
    pub fn record_execution(&mut self, start: i64) {
        self.started_at = Some(start);
        self.finished_at = Some(start + self.duration);
    }

    /// Whether the scheduler has executed this task.
    pub fn is_executed(&self) -> bool {
        self.started_at.is_some()
    }

    /// The `[start, end]` execution window, once assigned.
    pub fn execution_window(&self) -> Option<(i64, i64)> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Time spent waiting between creation and execution start.
    pub fn waiting_time(&self) -> Option<i64> {
        self.started_at.map(|start| start - self.created_at)
    }
}
