//! Runtime Adapters
//!
//! Time and host-environment implementations.
//!
//! - **SystemClock** / **TokioScheduler** - wall clock and tokio timers
//! - **ManualClock** - virtual clock that is also a scheduler (tests)
//! - **HeadlessHost** / **RecordingHost** - host environments without a page

mod host;
mod manual_clock;
mod system_clock;
mod tokio_scheduler;

pub use host::{AppliedTheme, HeadlessHost, RecordingHost};
pub use manual_clock::ManualClock;
pub use system_clock::SystemClock;
pub use tokio_scheduler::TokioScheduler;
