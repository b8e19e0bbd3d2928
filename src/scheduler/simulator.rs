//! Per-processor scheduling loop and simulation driver.
//!
//! # Algorithm
//!
//! Each processor owns one aging queue and a local clock starting at 0.
//! Every round the clock is pushed into the queue, the
//! highest-effective-priority task is extracted, its execution window is
//! stamped (`start = clock`, `end = clock + duration`), and the clock
//! advances to `end`. The loop terminates when the queue is empty.
//!
//! Processors are independent sequential timelines: each queue and run
//! list is exclusively owned by its processor, and the shared task index
//! is populated before any scheduling starts and only searched
//! afterwards, so the whole simulation is single-threaded by design.

use crate::index::TaskIndex;
use crate::models::{Execution, ProcessorRun, Task, TaskId};
use crate::queue::AgingQueue;

/// Drains one processor's queue, stamping execution windows.
fn run_processor(processor: usize, queue: &mut AgingQueue, tasks: &mut [Task]) -> ProcessorRun {
    let mut run = ProcessorRun::new(processor);
    let mut clock: i64 = 0;

    loop {
        queue.set_clock(clock);
        let Some(slot) = queue.extract_max(tasks) else {
            break;
        };

        let task = &mut tasks[slot];
        let start = clock;
        task.record_execution(start);
        clock = start + task.duration;
        run.record(Execution::new(task.id, start, clock));
    }

    run
}

/// A complete multi-processor scheduling simulation.
///
/// Owns the task pool; the AVL index and the per-processor queues hold
/// pool slots, never task copies. The index is populated once here and
/// is read-only from then on.
///
/// # Example
/// ```
/// use procsim::models::Task;
/// use procsim::scheduler::Simulation;
///
/// let tasks = vec![Task::new(0, 30.0, 2), Task::new(1, 60.0, 4)];
/// let mut sim = Simulation::new(tasks, &[0, 0], 1);
/// let runs = sim.run();
/// assert_eq!(runs[0].execution_count(), 2);
/// // Higher base priority goes first.
/// assert_eq!(runs[0].executions[0].task_id, 1);
/// ```
#[derive(Debug)]
pub struct Simulation {
    tasks: Vec<Task>,
    index: TaskIndex,
    queues: Vec<AgingQueue>,
}

impl Simulation {
    /// Builds a simulation from a task pool and a per-task processor
    /// assignment (`assignment[slot]` = processor index).
    ///
    /// Tasks assigned to a processor `>= processors` are left pending;
    /// duplicate-id tasks keep the first occurrence in the index, as
    /// index inserts are idempotent.
    pub fn new(tasks: Vec<Task>, assignment: &[usize], processors: usize) -> Self {
        let mut index = TaskIndex::new();
        for (slot, task) in tasks.iter().enumerate() {
            index.insert(task.id, slot);
        }

        let mut queues = vec![AgingQueue::new(); processors];
        for (slot, &processor) in assignment.iter().enumerate().take(tasks.len()) {
            if let Some(queue) = queues.get_mut(processor) {
                queue.push(slot);
            }
        }

        Self {
            tasks,
            index,
            queues,
        }
    }

    /// Sets the aging factor on every processor queue.
    pub fn with_aging_factor(mut self, aging_factor: f64) -> Self {
        for queue in &mut self.queues {
            queue.set_aging_factor(aging_factor);
        }
        self
    }

    /// Runs every processor to completion, one after another, and
    /// returns the per-processor runs in processor order.
    pub fn run(&mut self) -> Vec<ProcessorRun> {
        let mut runs = Vec::with_capacity(self.queues.len());
        for (processor, queue) in self.queues.iter_mut().enumerate() {
            runs.push(run_processor(processor, queue, &mut self.tasks));
        }
        runs
    }

    /// Index-backed point lookup of a task by id.
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.index.get(id).and_then(|slot| self.tasks.get(slot))
    }

    /// The task pool, in slot order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of simulated processors.
    pub fn processor_count(&self) -> usize {
        self.queues.len()
    }
}
