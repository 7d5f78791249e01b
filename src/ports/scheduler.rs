//! Time ports: a clock to read and a scheduler to defer work.
//!
//! Both are injected so tests can drive a virtual clock instead of
//! waiting on real timers.

use std::time::Duration;

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Deferred, fire-once work item.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay.
pub trait Scheduler: Send + Sync {
    /// Schedule `task` to run once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TaskHandle>;
}

/// Cancellation handle for a scheduled task.
pub trait TaskHandle: Send + Sync {
    /// Prevent the task from running. No effect once it has run.
    fn cancel(&self);
}
