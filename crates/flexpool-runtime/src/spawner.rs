//! Default thread spawner

use std::io;
use std::thread::{self, JoinHandle};

use flexpool_core::{ThreadMain, ThreadRole, ThreadSpawner};

/// Spawns plain named OS threads via `std::thread::Builder`.
#[derive(Debug, Clone, Default)]
pub struct OsThreadSpawner {
    /// Stack size for spawned threads (None = system default)
    pub stack_size: Option<usize>,
}

impl OsThreadSpawner {
    pub fn new(stack_size: Option<usize>) -> Self {
        Self { stack_size }
    }
}

impl ThreadSpawner for OsThreadSpawner {
    fn spawn(&self, _role: ThreadRole, name: String, main: ThreadMain) -> io::Result<JoinHandle<()>> {
        let mut builder = thread::Builder::new().name(name);
        if let Some(stack_size) = self.stack_size {
            builder = builder.stack_size(stack_size);
        }
        builder.spawn(main)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_named_thread() {
        let spawner = OsThreadSpawner::new(Some(128 * 1024));
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = spawner
            .spawn(
                ThreadRole::Worker,
                "probe-worker-0".to_string(),
                Box::new(move || {
                    let name = thread::current().name().map(str::to_string);
                    tx.send(name).unwrap();
                }),
            )
            .unwrap();
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap().as_deref(), Some("probe-worker-0"));
    }
}
