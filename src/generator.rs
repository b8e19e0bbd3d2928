//! Random task generation.
//!
//! Produces the simulated workload: `count` tasks with uniform random
//! base priorities and durations, all created at tick 0, plus a uniform
//! random processor assignment. The RNG is always passed in explicitly
//! so callers control seeding — the binary seeds from wall-clock time,
//! tests from a fixed seed.

use rand::Rng;

use crate::models::{Task, TaskId};

/// Inclusive base-priority range for generated tasks.
pub const BASE_PRIORITY_RANGE: (i64, i64) = (1, 100);

/// Inclusive duration range (work units) for generated tasks.
pub const DURATION_RANGE: (i64, i64) = (1, 10);

/// Generates `count` tasks with ids `0..count`.
///
/// Base priority is uniform in `[1, 100]`, duration uniform in
/// `[1, 10]`, creation time fixed at tick 0.
pub fn generate_tasks<R: Rng>(count: usize, rng: &mut R) -> Vec<Task> {
    (0..count)
        .map(|id| {
            let base_priority = rng.random_range(BASE_PRIORITY_RANGE.0..=BASE_PRIORITY_RANGE.1);
            let duration = rng.random_range(DURATION_RANGE.0..=DURATION_RANGE.1);
            Task::new(id as TaskId, base_priority as f64, duration)
        })
        .collect()
}

/// Draws a uniform random processor index for each of `task_count`
/// tasks. `processors` must be at least 1.
pub fn assign_processors<R: Rng>(
    task_count: usize,
    processors: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..task_count)
        .map(|_| rng.random_range(0..processors))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_values_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let tasks = generate_tasks(200, &mut rng);

        assert_eq!(tasks.len(), 200);
        for (slot, task) in tasks.iter().enumerate() {
            assert_eq!(task.id as usize, slot);
            assert!((1.0..=100.0).contains(&task.base_priority));
            assert!((1..=10).contains(&task.duration));
            assert_eq!(task.created_at, 0);
            assert!(!task.is_executed());
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let left = generate_tasks(50, &mut a);
        let right = generate_tasks(50, &mut b);

        for (l, r) in left.iter().zip(&right) {
            assert_eq!(l.base_priority, r.base_priority);
            assert_eq!(l.duration, r.duration);
        }
    }

    #[test]
    fn test_assignment_within_processor_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        let assignment = assign_processors(500, 3, &mut rng);

        assert_eq!(assignment.len(), 500);
        assert!(assignment.iter().all(|&p| p < 3));
        // With 500 draws, every processor should appear.
        for processor in 0..3 {
            assert!(assignment.contains(&processor));
        }
    }
}
