//! Unit of work submitted to a pool
//!
//! A `Task` is a boxed one-shot closure. Any argument the work needs is
//! captured by the closure; the pool never looks at it, only moves it.

use core::fmt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

type TaskFn = Box<dyn FnOnce() + Send + 'static>;

/// An opaque unit of work.
///
/// Owned by the queue while waiting, then by the dequeuing worker until
/// it has run. Dropping a `Task` without running it releases whatever the
/// closure captured.
pub struct Task {
    func: TaskFn,
}

impl Task {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self { func: Box::new(f) }
    }

    /// Pair a callable with its single argument.
    ///
    /// The callable's return value is discarded.
    pub fn with_arg<A, R, F>(func: F, arg: A) -> Self
    where
        F: FnOnce(A) -> R + Send + 'static,
        A: Send + 'static,
    {
        Self::new(move || {
            let _ = func(arg);
        })
    }

    /// Run the task to completion on the current thread.
    ///
    /// A panic inside the closure propagates to the caller.
    #[inline]
    pub fn run(self) {
        (self.func)()
    }

    /// Run the task, converting a panic into `Err` with its message.
    ///
    /// Workers use this so a faulting task cannot take the worker thread
    /// down with it.
    pub fn run_supervised(self) -> Result<(), String> {
        panic::catch_unwind(AssertUnwindSafe(self.func)).map_err(|payload| panic_message(&*payload))
    }

    /// Drop the task unrun, converting a panic from a captured value's
    /// `Drop` into `Err` with its message.
    pub fn discard_supervised(self) -> Result<(), String> {
        panic::catch_unwind(AssertUnwindSafe(move || drop(self))).map_err(|payload| panic_message(&*payload))
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").finish_non_exhaustive()
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_run_closure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        Task::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
        .run();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_arg_passes_argument_through() {
        let sink = Arc::new(AtomicUsize::new(0));
        let s = sink.clone();
        let task = Task::with_arg(move |n: usize| s.fetch_add(n, Ordering::SeqCst), 41);
        task.run();
        assert_eq!(sink.load(Ordering::SeqCst), 41);
    }

    #[test]
    fn test_supervised_catches_panic() {
        let result = Task::new(|| panic!("boom")).run_supervised();
        assert_eq!(result, Err("boom".to_string()));

        let result = Task::new(|| panic!("code {}", 7)).run_supervised();
        assert_eq!(result, Err("code 7".to_string()));

        assert_eq!(Task::new(|| {}).run_supervised(), Ok(()));
    }

    #[test]
    fn test_discard_catches_drop_panic() {
        struct Bomb;
        impl Drop for Bomb {
            fn drop(&mut self) {
                panic!("bomb dropped");
            }
        }

        let bomb = Bomb;
        let task = Task::new(move || drop(bomb));
        assert_eq!(task.discard_supervised(), Err("bomb dropped".to_string()));
        assert_eq!(Task::new(|| {}).discard_supervised(), Ok(()));
    }

    #[test]
    fn test_drop_without_run_releases_capture() {
        let marker = Arc::new(());
        let m = marker.clone();
        let task = Task::new(move || drop(m));
        assert_eq!(Arc::strong_count(&marker), 2);
        drop(task);
        assert_eq!(Arc::strong_count(&marker), 1);
    }
}
