//! Simulation quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from the
//! per-processor completed runs and the task pool.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest finish time across all processors |
//! | Avg Waiting Time | Mean of (start − creation) over executed tasks |
//! | Avg Flow Time | Mean of (finish − creation) over executed tasks |
//! | Utilization | Per-processor busy time / overall makespan |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{ProcessorRun, Task};

/// Simulation performance indicators.
///
/// All time values are in simulation ticks.
#[derive(Debug, Clone)]
pub struct SimKpi {
    /// Latest finish time across all processors.
    pub makespan: i64,
    /// Mean waiting time (start − creation) of executed tasks.
    pub avg_waiting_time: f64,
    /// Mean flow time (finish − creation) of executed tasks.
    pub avg_flow_time: f64,
    /// Per-processor utilization against the overall makespan, in
    /// processor order (0.0..1.0).
    pub utilization_by_processor: Vec<f64>,
    /// Mean of the per-processor utilizations.
    pub avg_utilization: f64,
    /// Number of executed tasks.
    pub executed_count: usize,
}

impl SimKpi {
    /// Computes KPIs from completed runs and their task pool.
    pub fn calculate(runs: &[ProcessorRun], tasks: &[Task]) -> Self {
        let makespan = runs.iter().map(|run| run.makespan).max().unwrap_or(0);

        let mut total_waiting: i64 = 0;
        let mut total_flow: i64 = 0;
        let mut executed_count: usize = 0;

        for task in tasks {
            if let Some((start, end)) = task.execution_window() {
                executed_count += 1;
                total_waiting += start - task.created_at;
                total_flow += end - task.created_at;
            }
        }

        let utilization_by_processor: Vec<f64> = runs
            .iter()
            .map(|run| run.utilization(makespan).unwrap_or(0.0))
            .collect();
        let avg_utilization = if utilization_by_processor.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_processor.iter().sum();
            sum / utilization_by_processor.len() as f64
        };

        let (avg_waiting_time, avg_flow_time) = if executed_count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_waiting as f64 / executed_count as f64,
                total_flow as f64 / executed_count as f64,
            )
        };

        Self {
            makespan,
            avg_waiting_time,
            avg_flow_time,
            utilization_by_processor,
            avg_utilization,
            executed_count,
        }
    }
}
