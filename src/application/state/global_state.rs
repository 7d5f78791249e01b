//! GlobalState - process-wide reactive container for auth, theme and UI.
//!
//! Built once by the composition root and shared as a cheap clone handle.
//! Every action mutates one slice under the state lock, publishes the new
//! snapshot on a `watch` channel, then calls subscribers synchronously
//! before returning, so a read right after an action sees its effect.
//!
//! Side effects live outside the lock: the session and theme are mirrored
//! into the `KeyValueStore`, the theme and scroll lock are pushed to the
//! `HostEnvironment`, and notification expiry goes through the `Scheduler`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::notifications::{Notification, NotificationKind};
use super::persistence;
use super::slices::{AuthSlice, GlobalSnapshot, Slice, StateChange, ThemeSlice, UiSlice};
use crate::domain::auth::AuthSession;
use crate::domain::preferences::Theme;
use crate::ports::{Clock, HostEnvironment, KeyValueStore, Scheduler, TaskHandle};

/// Callback invoked after every mutation.
pub type Subscriber = Arc<dyn Fn(&StateChange) + Send + Sync>;

/// Returned by `subscribe`; pass to `unsubscribe` to stop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ticket for one login or logout. Only the most recently started attempt
/// may write its outcome into the auth slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthAttempt(u64);

struct Inner {
    state: Mutex<GlobalSnapshot>,
    snapshots: watch::Sender<GlobalSnapshot>,
    subscribers: RwLock<Vec<(u64, Subscriber)>>,
    next_subscriber: AtomicU64,
    timers: Mutex<HashMap<String, Box<dyn TaskHandle>>>,
    auth_attempts: AtomicU64,
    storage: Arc<dyn KeyValueStore>,
    host: Arc<dyn HostEnvironment>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in timers.drain() {
            handle.cancel();
        }
    }
}

#[derive(Clone)]
pub struct GlobalState {
    inner: Arc<Inner>,
}

impl GlobalState {
    /// Builds the store and hydrates it from `storage`.
    ///
    /// A stored theme is restored as is; a stored session is restored only
    /// while still valid, otherwise its blob is removed. The resulting theme
    /// is applied to the host once.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        host: Arc<dyn HostEnvironment>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let now = clock.now();
        let theme = persistence::load_theme(storage.as_ref()).unwrap_or_default();
        let session = persistence::load_session(storage.as_ref(), &now);

        let initial = GlobalSnapshot {
            auth: AuthSlice {
                last_login_attempt: session.as_ref().map(|_| now),
                session,
                ..AuthSlice::default()
            },
            theme: ThemeSlice::new(theme, host.prefers_dark()),
            ui: UiSlice::default(),
        };
        host.apply_theme(initial.theme.current_theme, initial.theme.is_dark_mode);

        tracing::debug!(
            theme = %initial.theme.current_theme,
            restored_session = initial.auth.session.is_some(),
            "Global state hydrated"
        );

        let (snapshots, _) = watch::channel(initial.clone());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(initial),
                snapshots,
                subscribers: RwLock::new(Vec::new()),
                next_subscriber: AtomicU64::new(0),
                timers: Mutex::new(HashMap::new()),
                auth_attempts: AtomicU64::new(0),
                storage,
                host,
                clock,
                scheduler,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    /// Registers a callback run synchronously after every mutation.
    ///
    /// Callbacks run outside the state lock and may read the store, but
    /// should not mutate it.
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&StateChange) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::SeqCst);
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(subscriber)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id.0);
        subscribers.len() != before
    }

    /// Receiver that always holds the latest snapshot.
    pub fn watch(&self) -> watch::Receiver<GlobalSnapshot> {
        self.inner.snapshots.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> GlobalSnapshot {
        self.read(Clone::clone)
    }

    pub fn auth(&self) -> AuthSlice {
        self.read(|s| s.auth.clone())
    }

    pub fn theme(&self) -> ThemeSlice {
        self.read(|s| s.theme)
    }

    pub fn ui(&self) -> UiSlice {
        self.read(|s| s.ui.clone())
    }

    pub fn current_session(&self) -> Option<AuthSession> {
        self.read(|s| s.auth.session.clone())
    }

    /// Evaluated against the clock on every call.
    pub fn is_authenticated(&self) -> bool {
        let now = self.inner.clock.now();
        self.read(|s| s.auth.is_authenticated_at(&now))
    }

    pub fn auth_loading(&self) -> bool {
        self.read(|s| s.auth.is_loading)
    }

    pub fn auth_error(&self) -> Option<String> {
        self.read(|s| s.auth.error.clone())
    }

    pub fn current_theme(&self) -> Theme {
        self.read(|s| s.theme.current_theme)
    }

    pub fn is_dark_mode(&self) -> bool {
        self.read(|s| s.theme.is_dark_mode)
    }

    pub fn theme_icon(&self) -> &'static str {
        self.read(|s| s.theme.icon())
    }

    pub fn theme_label(&self) -> &'static str {
        self.read(|s| s.theme.label())
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.read(|s| s.ui.mobile_menu_open)
    }

    pub fn global_loading(&self) -> bool {
        self.read(|s| s.ui.global_loading)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.read(|s| s.ui.notifications.clone())
    }

    pub fn has_notifications(&self) -> bool {
        self.read(|s| s.ui.has_notifications())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the session, clears the error and mirrors the change into
    /// storage. `None` removes the stored blob.
    pub fn set_auth_session(&self, session: Option<AuthSession>) {
        let now = self.inner.clock.now();
        let storage = self.inner.storage.as_ref();
        match &session {
            Some(s) => persistence::save_session(storage, s),
            None => persistence::clear_session(storage),
        }

        self.mutate(Slice::Auth, |state| {
            if session.is_some() {
                state.auth.last_login_attempt = Some(now);
            }
            state.auth.session = session;
            state.auth.error = None;
        });
    }

    pub fn set_auth_loading(&self, loading: bool) {
        self.mutate(Slice::Auth, |state| state.auth.is_loading = loading);
    }

    /// Records an error; always ends loading.
    pub fn set_auth_error(&self, error: Option<String>) {
        self.mutate(Slice::Auth, |state| {
            state.auth.error = error;
            state.auth.is_loading = false;
        });
    }

    pub fn clear_auth_error(&self) {
        self.set_auth_error(None);
    }

    /// Drops the session, resets loading and error, and purges storage.
    pub fn logout(&self) {
        persistence::clear_session(self.inner.storage.as_ref());
        self.mutate(Slice::Auth, |state| {
            state.auth.session = None;
            state.auth.error = None;
            state.auth.is_loading = false;
        });
        tracing::debug!("Auth state cleared");
    }

    /// Re-reads the stored session, adopting it when still valid.
    pub fn check_auth_state(&self) {
        let now = self.inner.clock.now();
        if let Some(session) = persistence::load_session(self.inner.storage.as_ref(), &now) {
            self.set_auth_session(Some(session));
        }
    }

    /// Starts a new auth attempt, superseding every earlier one.
    pub fn begin_auth_attempt(&self) -> AuthAttempt {
        AuthAttempt(self.inner.auth_attempts.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The newest attempt, without superseding it. Lets a caller that only
    /// sometimes writes the slice detect a newer attempt started meanwhile.
    pub fn latest_auth_attempt(&self) -> AuthAttempt {
        AuthAttempt(self.inner.auth_attempts.load(Ordering::SeqCst))
    }

    pub fn is_current_attempt(&self, attempt: AuthAttempt) -> bool {
        self.inner.auth_attempts.load(Ordering::SeqCst) == attempt.0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Selects a theme and persists it immediately.
    pub fn set_theme(&self, theme: Theme) {
        persistence::save_theme(self.inner.storage.as_ref(), theme);
        let slice = self.mutate(Slice::Theme, |state| {
            state.theme = ThemeSlice::new(theme, state.theme.system_prefers_dark);
            state.theme
        });
        self.apply_theme(slice);
    }

    /// Advances light → dark → auto → light.
    pub fn toggle_theme(&self) {
        self.set_theme(self.current_theme().next());
    }

    /// Records the OS color-scheme preference. Only `Auto` follows it.
    pub fn update_system_preference(&self, prefers_dark: bool) {
        let slice = self.mutate(Slice::Theme, |state| {
            state.theme = ThemeSlice::new(state.theme.current_theme, prefers_dark);
            state.theme
        });
        self.apply_theme(slice);
    }

    /// Feeds OS preference changes from `changes` into the store until the
    /// sender or the store goes away.
    pub fn watch_system_preference(&self, mut changes: watch::Receiver<bool>) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let prefers_dark = *changes.borrow_and_update();
                let Some(state) = GlobalState::upgrade(&weak) else {
                    break;
                };
                state.update_system_preference(prefers_dark);
            }
        })
    }

    fn apply_theme(&self, slice: ThemeSlice) {
        self.inner
            .host
            .apply_theme(slice.current_theme, slice.is_dark_mode);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Opens or closes the mobile menu; an open menu locks page scrolling.
    pub fn set_mobile_menu_open(&self, open: bool) {
        self.mutate(Slice::Ui, |state| state.ui.mobile_menu_open = open);
        self.inner.host.set_scroll_locked(open);
    }

    pub fn toggle_mobile_menu(&self) {
        self.set_mobile_menu_open(!self.mobile_menu_open());
    }

    pub fn set_global_loading(&self, loading: bool) {
        self.mutate(Slice::Ui, |state| state.ui.global_loading = loading);
    }

    pub fn show_success(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Success, message)
    }

    pub fn show_error(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Error, message)
    }

    pub fn show_warning(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Warning, message)
    }

    pub fn show_info(&self, message: impl Into<String>) -> String {
        self.show(NotificationKind::Info, message)
    }

    fn show(&self, kind: NotificationKind, message: impl Into<String>) -> String {
        self.notify(kind, message, Some(kind.default_duration()))
    }

    /// Appends a notification and returns its id.
    ///
    /// With a non-zero `duration` the notification removes itself once the
    /// duration elapses; `None` or zero keeps it until removed.
    pub fn notify(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        duration: Option<Duration>,
    ) -> String {
        let notification = Notification::new(kind, message, self.inner.clock.now(), duration);
        let id = notification.id.clone();
        let expires_after = notification.duration();
        self.mutate(Slice::Ui, |state| state.ui.notifications.push(notification));

        if let Some(delay) = expires_after {
            let weak = Arc::downgrade(&self.inner);
            let target = id.clone();
            let mut timers = self
                .inner
                .timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let handle = self.inner.scheduler.schedule(
                delay,
                Box::new(move || {
                    if let Some(state) = GlobalState::upgrade(&weak) {
                        state.remove_notification(&target);
                    }
                }),
            );
            timers.insert(id.clone(), handle);
        }
        id
    }

    /// Removes a notification and cancels its pending expiry.
    pub fn remove_notification(&self, id: &str) {
        if let Some(handle) = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
        {
            handle.cancel();
        }
        self.mutate(Slice::Ui, |state| {
            state.ui.notifications.retain(|n| n.id != id);
        });
    }

    pub fn clear_all_notifications(&self) {
        let pending: Vec<_> = self
            .inner
            .timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        for (_, handle) in pending {
            handle.cancel();
        }
        self.mutate(Slice::Ui, |state| state.ui.notifications.clear());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn read<R>(&self, f: impl FnOnce(&GlobalSnapshot) -> R) -> R {
        let state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Applies `f`, publishes the snapshot, then notifies subscribers.
    fn mutate<R>(&self, slice: Slice, f: impl FnOnce(&mut GlobalSnapshot) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self
                .inner
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let result = f(&mut state);
            let snapshot = state.clone();
            self.inner.snapshots.send_replace(snapshot.clone());
            (result, snapshot)
        };

        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();

        let change = StateChange { slice, snapshot };
        for subscriber in subscribers {
            subscriber(&change);
        }
        result
    }
}

impl std::fmt::Debug for GlobalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalState")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
