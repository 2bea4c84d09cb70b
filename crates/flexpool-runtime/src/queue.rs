//! FIFO task queue
//!
//! Backed by a lock-free MPMC segment queue, so each individual push, pop
//! and length read is atomic on its own. The queue has no capacity of its
//! own: `ScalingPool` checks `len()` against `max_tasks` and performs the
//! push under its coordination lock, which is what makes check-then-push
//! race free.

use crossbeam_queue::SegQueue;
use flexpool_core::Task;

/// Unbounded FIFO of not-yet-started tasks
pub struct TaskQueue {
    tasks: SegQueue<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self { tasks: SegQueue::new() }
    }

    /// Append a task at the tail
    #[inline]
    pub fn enqueue(&self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the task at the head
    #[inline]
    pub fn dequeue(&self) -> Option<Task> {
        self.tasks.pop()
    }

    /// Number of queued tasks
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove every queued task without running it, oldest first.
    ///
    /// The caller decides when the tasks (and whatever they captured) are
    /// dropped.
    pub fn drain(&self) -> Vec<Task> {
        let mut out = Vec::with_capacity(self.tasks.len());
        while let Some(task) = self.tasks.pop() {
            out.push(task);
        }
        out
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = TaskQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let log = log.clone();
            queue.enqueue(Task::new(move || log.lock().unwrap().push(i)));
        }
        assert_eq!(queue.len(), 5);

        while let Some(task) = queue.dequeue() {
            task.run();
        }
        assert!(queue.is_empty());
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dequeue_empty() {
        let queue = TaskQueue::new();
        assert!(queue.dequeue().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_drain_discards_without_running() {
        let queue = TaskQueue::new();
        let ran = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let ran = ran.clone();
            queue.enqueue(Task::new(move || {
                ran.fetch_add(1, Ordering::SeqCst);
            }));
        }
        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(queue.len(), 0);
        drop(drained);
        assert_eq!(ran.load(Ordering::SeqCst), 0);
        // Captured state released
        assert_eq!(Arc::strong_count(&ran), 1);
    }

    #[test]
    fn test_concurrent_producers_consumers() {
        let queue = Arc::new(TaskQueue::new());
        let ran = Arc::new(AtomicUsize::new(0));

        let producers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                let ran = ran.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        let ran = ran.clone();
                        queue.enqueue(Task::new(move || {
                            ran.fetch_add(1, Ordering::SeqCst);
                        }));
                    }
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                thread::spawn(move || {
                    while let Some(task) = queue.dequeue() {
                        task.run();
                    }
                })
            })
            .collect();
        for c in consumers {
            c.join().unwrap();
        }

        assert_eq!(ran.load(Ordering::SeqCst), 1000);
        assert!(queue.is_empty());
    }
}
