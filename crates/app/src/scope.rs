//! Per-mount task ownership.

use std::future::Future;

use tokio::task::JoinHandle;

/// Owns every background task a mounted page spawns and aborts them all when
/// the mount ends (drop), so no in-flight request can update state after its
/// page is no longer displayed.
#[derive(Debug, Default)]
pub struct MountScope {
    tasks: Vec<JoinHandle<()>>,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task tied to this mount.
    pub fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push(tokio::spawn(fut));
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Abort everything still in flight.
    pub fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for MountScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}
