//! Global reactive state: auth, theme and UI slices with durable mirroring.

mod global_state;
mod notifications;
mod persistence;
mod slices;

pub use global_state::{AuthAttempt, GlobalState, Subscriber, SubscriptionId};
pub use notifications::{Notification, NotificationKind};
pub use persistence::{AUTH_SESSION_KEY, THEME_KEY};
pub use slices::{AuthSlice, GlobalSnapshot, Slice, StateChange, ThemeSlice, UiSlice};
