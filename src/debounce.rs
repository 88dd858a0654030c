//! Single-slot deferred task.
//!
//! Only the most recently scheduled task may run: scheduling again aborts the
//! previous one if its delay has not elapsed yet. Once the delay has elapsed
//! the work is spawned on its own, so a later `schedule` never cancels work
//! that is already running.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct Debouncer {
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Deferred tasks are spawned on `runtime`, so `schedule` may be called from any thread
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` after `delay`, replacing any task still waiting
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Drop the waiting task, if any
    pub fn cancel(&self) {
        let mut slot = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        let slot = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
