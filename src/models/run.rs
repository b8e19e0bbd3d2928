//! Completed-run model.
//!
//! A `ProcessorRun` is the result of draining one processor's queue: the
//! executed tasks in dispatch order, each with its stamped time window,
//! plus the processor's final clock value.

use serde::{Deserialize, Serialize};

use super::TaskId;

/// One executed task within a processor run.
///
/// Denormalizes the task's execution window for query convenience, so a
/// run can be rendered or inspected without the task pool at hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Executed task identifier.
    pub task_id: TaskId,
    /// Tick at which execution began.
    pub started_at: i64,
    /// Tick at which execution finished.
    pub finished_at: i64,
}

impl Execution {
    /// Creates a new execution record.
    pub fn new(task_id: TaskId, started_at: i64, finished_at: i64) -> Self {
        Self {
            task_id,
            started_at,
            finished_at,
        }
    }

    /// Duration (end - start) in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.finished_at - self.started_at
    }
}

/// The completed schedule of a single processor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessorRun {
    /// Processor index (0-based).
    pub processor: usize,
    /// Executions in dispatch order.
    pub executions: Vec<Execution>,
    /// Final clock value: latest finish time, 0 when idle.
    pub makespan: i64,
}

impl ProcessorRun {
    /// Creates an empty run for the given processor.
    pub fn new(processor: usize) -> Self {
        Self {
            processor,
            executions: Vec::new(),
            makespan: 0,
        }
    }

    /// Appends an execution and advances the makespan.
    pub fn record(&mut self, execution: Execution) {
        self.makespan = self.makespan.max(execution.finished_at);
        self.executions.push(execution);
    }

    /// Whether this processor executed nothing.
    pub fn is_idle(&self) -> bool {
        self.executions.is_empty()
    }

    /// Number of executed tasks.
    pub fn execution_count(&self) -> usize {
        self.executions.len()
    }

    /// Finds the execution record for a given task.
    pub fn execution_for_task(&self, task_id: TaskId) -> Option<&Execution> {
        self.executions.iter().find(|e| e.task_id == task_id)
    }

    /// Busy time as a fraction of the given horizon.
    ///
    /// Returns `None` if `horizon` is zero or negative.
    pub fn utilization(&self, horizon: i64) -> Option<f64> {
        if horizon <= 0 {
            return None;
        }
        let busy: i64 = self.executions.iter().map(|e| e.duration()).sum();
        Some(busy as f64 / horizon as f64)
    }
}
