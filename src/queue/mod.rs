//! Aging priority queue.
//!
//! A max-heap over task-pool slots whose ordering key is the *effective*
//! priority: base priority plus an aging bonus proportional to how long
//! the task has been waiting. Because the key is a function of the
//! simulation clock rather than a static value, the heap cannot be
//! maintained incrementally — every extraction re-derives all keys at
//! the current clock and rebuilds the heap from scratch. That O(n)
//! rebuild per extraction is required for the aging rule to hold; do not
//! replace it with an incrementally maintained structure.
//!
//! # Reference
//! Tanenbaum & Bos (2015), "Modern Operating Systems", §2.4 (aging);
//! Williams (1964), heapsort heap construction.

use crate::models::{Task, TaskId};

/// Aging rate shared by a whole queue instance.
pub const DEFAULT_AGING_FACTOR: f64 = 0.1;

/// One heap entry during a rebuild: slot plus its recomputed key.
#[derive(Debug, Clone, Copy)]
struct Entry {
    slot: usize,
    id: TaskId,
    priority: f64,
}

impl Entry {
    /// Heap ordering: higher effective priority wins; equal priorities
    /// are won by the lower task id (deterministic tie-break).
    fn outranks(&self, other: &Entry) -> bool {
        match self.priority.partial_cmp(&other.priority) {
            Some(std::cmp::Ordering::Greater) => true,
            Some(std::cmp::Ordering::Equal) => self.id < other.id,
            _ => false,
        }
    }
}

fn sift_down(heap: &mut [Entry], index: usize) {
    let left = 2 * index + 1;
    let right = 2 * index + 2;
    let mut largest = index;

    if left < heap.len() && heap[left].outranks(&heap[largest]) {
        largest = left;
    }
    if right < heap.len() && heap[right].outranks(&heap[largest]) {
        largest = right;
    }
    if largest != index {
        heap.swap(index, largest);
        sift_down(heap, largest);
    }
}

/// Bottom-up heapify over the whole collection.
fn build_heap(heap: &mut [Entry]) {
    for index in (0..heap.len() / 2).rev() {
        sift_down(heap, index);
    }
}

/// A max-heap of pending tasks with time-based priority aging.
///
/// Holds task-pool slots; the pool itself is passed to
/// [`AgingQueue::extract_max`] so priorities can be recomputed against
/// the tasks' base priority and creation time.
///
/// # Example
/// ```
/// use procsim::models::Task;
/// use procsim::queue::AgingQueue;
///
/// let tasks = vec![Task::new(1, 10.0, 5), Task::new(2, 20.0, 3)];
/// let mut queue = AgingQueue::new();
/// queue.push(0);
/// queue.push(1);
/// queue.set_clock(0);
/// assert_eq!(queue.extract_max(&tasks), Some(1)); // id 2: 20 > 10
/// assert_eq!(queue.extract_max(&tasks), Some(0));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AgingQueue {
    entries: Vec<usize>,
    clock: i64,
    aging_factor: f64,
}

impl AgingQueue {
    /// Creates an empty queue with [`DEFAULT_AGING_FACTOR`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            clock: 0,
            aging_factor: DEFAULT_AGING_FACTOR,
        }
    }

    /// Sets the aging factor.
    pub fn with_aging_factor(mut self, aging_factor: f64) -> Self {
        self.aging_factor = aging_factor;
        self
    }

    pub(crate) fn set_aging_factor(&mut self, aging_factor: f64) {
        self.aging_factor = aging_factor;
    }

    /// The aging factor applied per tick of waiting.
    pub fn aging_factor(&self) -> f64 {
        self.aging_factor
    }

    /// Sets the simulation clock used by the next extraction.
    ///
    /// The driver must push the clock before each [`AgingQueue::extract_max`]
    /// so elapsed time is reflected in the recomputed priorities.
    pub fn set_clock(&mut self, now: i64) {
        self.clock = now;
    }

    /// Appends a task-pool slot.
    ///
    /// Heap order is deliberately not restored here: it is only
    /// meaningful immediately after the rebuild inside an extraction.
    pub fn push(&mut self, slot: usize) {
        self.entries.push(slot);
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any tasks remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and returns the slot with maximum effective priority.
    ///
    /// Recomputes every entry's effective priority at the stored clock,
    /// rebuilds the heap bottom-up, pops the root, and restores heap
    /// order on the reduced collection. Ties on effective priority go to
    /// the lower task id. Returns `None` on an empty queue.
    pub fn extract_max(&mut self, tasks: &[Task]) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let mut heap: Vec<Entry> = self
            .entries
            .iter()
            .map(|&slot| {
                let task = &tasks[slot];
                Entry {
                    slot,
                    id: task.id,
                    priority: task.effective_priority(self.clock, self.aging_factor),
                }
            })
            .collect();
        build_heap(&mut heap);

        let last = heap.len() - 1;
        heap.swap(0, last);
        let max = heap.pop()?;
        if !heap.is_empty() {
            sift_down(&mut heap, 0);
        }

        self.entries = heap.into_iter().map(|entry| entry.slot).collect();
        Some(max.slot)
    }
}

impl Default for AgingQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn drain(queue: &mut AgingQueue, tasks: &[Task]) -> Vec<TaskId> {
        let mut order = Vec::new();
        while let Some(slot) = queue.extract_max(tasks) {
            order.push(tasks[slot].id);
        }
        order
    }

    #[test]
    fn test_extract_from_empty() {
        let mut queue = AgingQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.extract_max(&[]), None);
    }

    #[test]
    fn test_base_priority_ordering() {
        let tasks = vec![Task::new(1, 10.0, 5), Task::new(2, 20.0, 3)];
        let mut queue = AgingQueue::new();
        queue.push(0);
        queue.push(1);
        queue.set_clock(0);

        assert_eq!(queue.extract_max(&tasks), Some(1));
        assert_eq!(queue.extract_max(&tasks), Some(0));
        assert!(queue.is_empty());
        assert_eq!(queue.extract_max(&tasks), None);
    }

    #[test]
    fn test_older_task_wins_on_equal_base() {
        let tasks = vec![
            Task::new(1, 50.0, 5).with_created_at(20),
            Task::new(2, 50.0, 5).with_created_at(0),
        ];
        let mut queue = AgingQueue::new();
        queue.push(0);
        queue.push(1);
        queue.set_clock(30);

        // id 2 has waited 30 ticks, id 1 only 10 → the older task goes
        // first despite the id tie-break favoring id 1.
        assert_eq!(queue.extract_max(&tasks), Some(1));
        assert_eq!(queue.extract_max(&tasks), Some(0));
    }

    #[test]
    fn test_equal_priority_tie_breaks_by_lower_id() {
        let tasks = vec![Task::new(9, 50.0, 1), Task::new(3, 50.0, 1), Task::new(7, 50.0, 1)];
        let mut queue = AgingQueue::new();
        for slot in 0..tasks.len() {
            queue.push(slot);
        }
        queue.set_clock(0);

        assert_eq!(drain(&mut queue, &tasks), vec![3, 7, 9]);
    }

    #[test]
    fn test_extraction_exhaustiveness_and_order() {
        let tasks: Vec<Task> = (0..16)
            .map(|i| Task::new(i, (i as f64 * 37.0) % 100.0, 1))
            .collect();
        let mut queue = AgingQueue::new();
        for slot in 0..tasks.len() {
            queue.push(slot);
        }
        queue.set_clock(0);

        let order = drain(&mut queue, &tasks);
        assert_eq!(order.len(), tasks.len(), "every task exactly once");
        let mut seen = order.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), tasks.len());

        // Fixed clock → extraction order is non-increasing in priority.
        let priorities: Vec<f64> = order
            .iter()
            .map(|&id| tasks[id as usize].effective_priority(0, DEFAULT_AGING_FACTOR))
            .collect();
        for pair in priorities.windows(2) {
            assert!(pair[0] >= pair[1], "order not non-increasing: {priorities:?}");
        }
    }

    #[test]
    fn test_extracted_is_max_at_extraction_clock() {
        // Drive the queue the way the scheduler does: the clock advances
        // between extractions, and the extracted task must carry the
        // maximum effective priority *as recomputed at that clock*, not
        // as of some earlier sort.
        let tasks: Vec<Task> = (0..12)
            .map(|i| {
                Task::new(i, ((i * 29) % 13) as f64, 1 + (i as i64 % 4))
                    .with_created_at((i as i64 * 7) % 5)
            })
            .collect();
        let mut queue = AgingQueue::new();
        let mut remaining: Vec<usize> = (0..tasks.len()).collect();
        for &slot in &remaining {
            queue.push(slot);
        }

        let mut clock = 0;
        while !queue.is_empty() {
            queue.set_clock(clock);
            let slot = queue.extract_max(&tasks).unwrap();
            remaining.retain(|&s| s != slot);

            let extracted = tasks[slot].effective_priority(clock, DEFAULT_AGING_FACTOR);
            for &other in &remaining {
                let left_behind = tasks[other].effective_priority(clock, DEFAULT_AGING_FACTOR);
                assert!(
                    extracted >= left_behind,
                    "task {} ({extracted}) extracted before task {} ({left_behind}) at t={clock}",
                    tasks[slot].id,
                    tasks[other].id
                );
            }
            clock += tasks[slot].duration;
        }
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_aging_factor_changes_outcome() {
        let tasks = vec![
            Task::new(1, 10.0, 1),
            Task::new(2, 12.0, 1).with_created_at(40),
        ];

        // Without aging the higher base priority wins.
        let mut flat = AgingQueue::new().with_aging_factor(0.0);
        assert!((flat.aging_factor() - 0.0).abs() < 1e-10);
        flat.push(0);
        flat.push(1);
        flat.set_clock(50);
        assert_eq!(flat.extract_max(&tasks), Some(1));

        // At the default rate the 40-tick head start outweighs 2 points:
        // id 1 scores 10 + 5.0, id 2 scores 12 + 1.0.
        let mut aged = AgingQueue::new();
        aged.push(0);
        aged.push(1);
        aged.set_clock(50);
        assert_eq!(aged.extract_max(&tasks), Some(0));
    }

    #[test]
    fn test_deferred_push_keeps_queue_consistent() {
        let tasks = vec![Task::new(1, 1.0, 1), Task::new(2, 99.0, 1), Task::new(3, 50.0, 1)];
        let mut queue = AgingQueue::new();
        queue.push(0);
        queue.set_clock(0);
        assert_eq!(queue.extract_max(&tasks), Some(0));

        // Pushes after an extraction still surface in priority order.
        queue.push(1);
        queue.push(2);
        assert_eq!(drain(&mut queue, &tasks), vec![2, 3]);
    }
}
