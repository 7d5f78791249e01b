//! Scripted repositories for handler tests.
//!
//! Each wraps an in-memory repository, records the calls the handlers make,
//! and can be told to fail reads or writes.

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::adapters::memory::{InMemoryRoleRepository, InMemoryUserRepository};
use crate::domain::auth::AuthSession;
use crate::domain::foundation::{Email, RoleId, Timestamp, UserId};
use crate::domain::role::Role;
use crate::domain::user::User;
use crate::ports::{AuthRepository, RepositoryError, RoleRepository, UserRepository};

fn simulated() -> RepositoryError {
    RepositoryError::unavailable("simulated failure")
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedUserRepository {
    inner: InMemoryUserRepository,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
    deletes: AtomicUsize,
    assignments: Mutex<Vec<(UserId, Vec<RoleId>)>>,
}

impl ScriptedUserRepository {
    pub fn with_fixtures() -> Self {
        Self {
            inner: InMemoryUserRepository::with_fixtures(),
            ..Self::default()
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            inner: InMemoryUserRepository::with_users(users),
            ..Self::default()
        }
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn assignments(&self) -> Vec<(UserId, Vec<RoleId>)> {
        self.assignments.lock().unwrap().clone()
    }

    fn check_read(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for ScriptedUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.check_read()?;
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.check_read()?;
        self.inner.find_by_email(email).await
    }

    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        self.check_read()?;
        self.inner.find_all().await
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.save(user).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.delete(id).await
    }

    async fn assign_roles(
        &self,
        user_id: &UserId,
        role_ids: &[RoleId],
    ) -> Result<(), RepositoryError> {
        self.assignments
            .lock()
            .unwrap()
            .push((user_id.clone(), role_ids.to_vec()));
        self.check_write()?;
        self.inner.assign_roles(user_id, role_ids).await
    }

    async fn user_roles(&self, user_id: &UserId) -> Result<Vec<RoleId>, RepositoryError> {
        self.check_read()?;
        self.inner.user_roles(user_id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedRoleRepository {
    inner: InMemoryRoleRepository,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    lookups: Mutex<Vec<RoleId>>,
    saves: AtomicUsize,
}

impl ScriptedRoleRepository {
    pub fn with_fixtures() -> Self {
        Self {
            inner: InMemoryRoleRepository::with_fixtures(),
            ..Self::default()
        }
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Ids passed to `find_by_id`, in call order.
    pub fn lookups(&self) -> Vec<RoleId> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated());
        }
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for ScriptedRoleRepository {
    async fn find_by_id(&self, id: &RoleId) -> Result<Option<Role>, RepositoryError> {
        self.lookups.lock().unwrap().push(id.clone());
        self.check_read()?;
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        self.check_read()?;
        self.inner.find_by_name(name).await
    }

    async fn find_all(&self) -> Result<Vec<Role>, RepositoryError> {
        self.check_read()?;
        self.inner.find_all().await
    }

    async fn save(&self, role: &Role) -> Result<Role, RepositoryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.save(role).await
    }

    async fn delete(&self, id: &RoleId) -> Result<(), RepositoryError> {
        self.check_write()?;
        self.inner.delete(id).await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Auth repository returning a fixed answer.
#[derive(Default)]
pub struct ScriptedAuthRepository {
    session: Option<AuthSession>,
    fail: bool,
    authenticate_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    logouts: Mutex<Vec<UserId>>,
}

impl ScriptedAuthRepository {
    /// Accepts any credentials and answers with `session`.
    pub fn accepting(session: AuthSession) -> Self {
        Self {
            session: Some(session),
            ..Self::default()
        }
    }

    /// Accepts nothing.
    pub fn rejecting() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn logouts(&self) -> Vec<UserId> {
        self.logouts.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<Option<AuthSession>, RepositoryError> {
        if self.fail {
            return Err(simulated());
        }
        Ok(self.session.clone())
    }
}

#[async_trait]
impl AuthRepository for ScriptedAuthRepository {
    async fn authenticate(
        &self,
        _email: &Email,
        _password: &SecretString,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        self.answer()
    }

    async fn refresh_token(
        &self,
        _refresh_token: &str,
    ) -> Result<Option<AuthSession>, RepositoryError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.answer()
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        self.logouts.lock().unwrap().push(user_id.clone());
        if self.fail {
            return Err(simulated());
        }
        Ok(())
    }

    async fn current_session(&self, _token: &str) -> Result<Option<AuthSession>, RepositoryError> {
        self.answer()
    }
}

/// Session for `admin@example.com` valid for another hour.
pub fn admin_session() -> AuthSession {
    AuthSession::new(
        UserId::new("1").unwrap(),
        Email::new("admin@example.com").unwrap(),
        "token_admin",
        "refresh_admin",
        Timestamp::now().plus_millis(60 * 60 * 1000),
    )
}
