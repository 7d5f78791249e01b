//! Tokio-backed scheduler.
//!
//! Each scheduled task becomes a spawned future that sleeps for the delay
//! and then runs the task. Cancelling aborts the future.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use crate::ports::{Scheduler, Task, TaskHandle};

/// Scheduler that runs tasks on a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    runtime: Option<Handle>,
}

impl TokioScheduler {
    /// Uses the runtime current at each `schedule` call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the scheduler to a specific runtime.
    pub fn with_runtime(runtime: Handle) -> Self {
        Self {
            runtime: Some(runtime),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TaskHandle> {
        let runtime = match self.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                tracing::warn!(
                    delay_ms = delay.as_millis() as u64,
                    "No tokio runtime available, scheduled task dropped"
                );
                return Box::new(TokioTaskHandle { abort: None });
            }
        };

        let join = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        Box::new(TokioTaskHandle {
            abort: Some(join.abort_handle()),
        })
    }
}

struct TokioTaskHandle {
    abort: Option<AbortHandle>,
}

impl TaskHandle for TokioTaskHandle {
    fn cancel(&self) {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }
}
