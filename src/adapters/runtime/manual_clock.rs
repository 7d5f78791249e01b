//! Virtual clock and scheduler for deterministic tests.
//!
//! Time only moves when `advance` is called. Tasks whose due time is
//! reached run in due order (ties in scheduling order), each with the clock
//! set to its due time. Tasks run without the internal lock held, so they
//! may read the clock or schedule more work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::Timestamp;
use crate::ports::{Clock, Scheduler, Task, TaskHandle};

pub struct ManualClock {
    state: Mutex<ManualState>,
}

struct ManualState {
    now: Timestamp,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

struct PendingTask {
    due: Timestamp,
    seq: u64,
    cancelled: Arc<AtomicBool>,
    task: Task,
}

impl ManualClock {
    /// Starts at the current wall-clock time.
    pub fn new() -> Self {
        Self::starting_at(Timestamp::now())
    }

    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            state: Mutex::new(ManualState {
                now,
                next_seq: 0,
                pending: Vec::new(),
            }),
        }
    }

    /// Moves time forward, running every task that comes due on the way.
    pub fn advance(&self, by: Duration) {
        let target = self.now().plus(to_chrono(by));

        loop {
            let next = {
                let mut state = self.lock();
                let due_index = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);

                match due_index {
                    Some(i) => {
                        let pending = state.pending.remove(i);
                        if pending.due > state.now {
                            state.now = pending.due;
                        }
                        Some(pending)
                    }
                    None => {
                        if target > state.now {
                            state.now = target;
                        }
                        None
                    }
                }
            };

            match next {
                Some(pending) if !pending.cancelled.load(Ordering::SeqCst) => (pending.task)(),
                Some(_) => {}
                None => break,
            }
        }
    }

    /// Scheduled tasks that have neither run nor been cancelled.
    pub fn pending_tasks(&self) -> usize {
        self.lock()
            .pending
            .iter()
            .filter(|p| !p.cancelled.load(Ordering::SeqCst))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("now", &self.now())
            .field("pending_tasks", &self.pending_tasks())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.lock().now
    }
}

impl Scheduler for ManualClock {
    fn schedule(&self, delay: Duration, task: Task) -> Box<dyn TaskHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = self.lock();
        let due = state.now.plus(to_chrono(delay));
        let seq = state.next_seq;
        state.next_seq += 1;
        state.pending.push(PendingTask {
            due,
            seq,
            cancelled: cancelled.clone(),
            task,
        });
        Box::new(ManualTaskHandle { cancelled })
    }
}

struct ManualTaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle for ManualTaskHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(duration.as_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> (Arc<StdMutex<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let log_for_tasks = log.clone();
        let make = move |label: &'static str| -> Task {
            let log = log_for_tasks.clone();
            Box::new(move || log.lock().unwrap().push(label))
        };
        (log, make)
    }

    #[test]
    fn advance_moves_time() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_millis(1500));

        assert_eq!(clock.now().duration_since(&start).num_milliseconds(), 1500);
    }

    #[test]
    fn task_runs_only_once_due() {
        let clock = ManualClock::new();
        let (log, task) = recorder();
        let _h = clock.schedule(Duration::from_millis(1000), task("fired"));

        clock.advance(Duration::from_millis(999));
        assert!(log.lock().unwrap().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(*log.lock().unwrap(), vec!["fired"]);
        assert_eq!(clock.pending_tasks(), 0);
    }

    #[test]
    fn tasks_run_in_due_order() {
        let clock = ManualClock::new();
        let (log, task) = recorder();
        let _a = clock.schedule(Duration::from_millis(300), task("late"));
        let _b = clock.schedule(Duration::from_millis(100), task("early"));
        let _c = clock.schedule(Duration::from_millis(100), task("early-second"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(*log.lock().unwrap(), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn cancelled_task_is_skipped() {
        let clock = ManualClock::new();
        let (log, task) = recorder();
        let handle = clock.schedule(Duration::from_millis(10), task("cancelled"));
        handle.cancel();

        assert_eq!(clock.pending_tasks(), 0);
        clock.advance(Duration::from_millis(20));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn task_sees_its_due_time() {
        let clock = Arc::new(ManualClock::new());
        let start = clock.now();
        let seen = Arc::new(StdMutex::new(None));

        let clock_in_task = clock.clone();
        let seen_in_task = seen.clone();
        let _h = clock.schedule(
            Duration::from_millis(250),
            Box::new(move || *seen_in_task.lock().unwrap() = Some(clock_in_task.now())),
        );
        clock.advance(Duration::from_secs(1));

        let seen = seen.lock().unwrap().unwrap();
        assert_eq!(seen.duration_since(&start).num_milliseconds(), 250);
    }

    #[test]
    fn task_may_schedule_follow_up_within_same_advance() {
        let clock = Arc::new(ManualClock::new());
        let (log, task) = recorder();
        let follow_up = task("follow-up");

        let clock_in_task = clock.clone();
        let _h = clock.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                let _ = clock_in_task.schedule(Duration::from_millis(100), follow_up);
            }),
        );
        clock.advance(Duration::from_millis(200));

        assert_eq!(*log.lock().unwrap(), vec!["follow-up"]);
    }
}
