//! AuthService - runs the auth use cases and records their outcome in the
//! global state.
//!
//! Each login and logout takes an `AuthAttempt` ticket before awaiting the
//! repository. When it completes, it writes to the auth slice only if no
//! newer attempt has started since; a superseded completion is logged and
//! returned to its caller without touching the state. A refresh observes
//! the latest ticket without taking one, so a refresh that issues nothing
//! never discards a login in flight.

use secrecy::SecretString;
use std::sync::Arc;

use super::handlers::{
    LoginCommand, LoginHandler, LogoutCommand, LogoutHandler, RefreshSessionCommand,
    RefreshSessionHandler,
};
use super::state::{AuthAttempt, GlobalState};
use super::UseCaseError;
use crate::domain::auth::AuthSession;
use crate::ports::{AuthRepository, Clock};

const NO_ACTIVE_SESSION: &str = "No hay sesión activa";
const SESSION_EXPIRED: &str = "La sesión ha expirado";

pub struct AuthService {
    state: GlobalState,
    clock: Arc<dyn Clock>,
    login: LoginHandler,
    logout: LogoutHandler,
    refresh: RefreshSessionHandler,
}

impl AuthService {
    pub fn new(
        state: GlobalState,
        repository: Arc<dyn AuthRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            clock,
            login: LoginHandler::new(repository.clone()),
            logout: LogoutHandler::new(repository.clone()),
            refresh: RefreshSessionHandler::new(repository),
        }
    }

    /// Logs in and adopts the new session, or records the failure message
    /// as the auth error. Loading is on for the duration of the call.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: SecretString,
    ) -> Result<AuthSession, UseCaseError> {
        let attempt = self.state.begin_auth_attempt();
        // Clearing the error ends loading, so it must come first
        self.state.clear_auth_error();
        self.state.set_auth_loading(true);

        let result = self
            .login
            .handle(LoginCommand {
                email: email.into(),
                password,
            })
            .await
            .map(|r| r.session);

        if self.is_superseded(attempt, "login") {
            return result;
        }
        match &result {
            Ok(session) => self.state.set_auth_session(Some(session.clone())),
            Err(err) => self.state.set_auth_error(Some(err.message().to_string())),
        }
        self.state.set_auth_loading(false);
        result
    }

    /// Revokes the user's sessions and clears the auth slice. On failure
    /// the session is kept and the message recorded as the auth error.
    pub async fn logout(&self, user_id: impl Into<String>) -> Result<(), UseCaseError> {
        let attempt = self.state.begin_auth_attempt();
        self.state.set_auth_loading(true);

        let result = self
            .logout
            .handle(LogoutCommand {
                user_id: user_id.into(),
            })
            .await;

        if self.is_superseded(attempt, "logout") {
            return result;
        }
        match &result {
            Ok(()) => self.state.logout(),
            Err(err) => self.state.set_auth_error(Some(err.message().to_string())),
        }
        self.state.set_auth_loading(false);
        result
    }

    /// Exchanges the current session's refresh token for a new session.
    ///
    /// An expired session is logged out instead. When the backend issues
    /// nothing new the current session stays in place and is returned.
    pub async fn refresh_session(&self) -> Result<AuthSession, UseCaseError> {
        let current = self
            .state
            .current_session()
            .ok_or_else(|| UseCaseError::unauthorized(NO_ACTIVE_SESSION))?;

        if !current.is_valid_at(&self.clock.now()) {
            self.state.logout();
            return Err(UseCaseError::unauthorized(SESSION_EXPIRED));
        }

        let attempt = self.state.latest_auth_attempt();
        let refreshed = self
            .refresh
            .handle(RefreshSessionCommand {
                refresh_token: current.refresh_token().to_string(),
            })
            .await?
            .session;

        let Some(session) = refreshed else {
            return Ok(current);
        };
        if !self.is_superseded(attempt, "refresh") {
            self.state.set_auth_session(Some(session.clone()));
        }
        Ok(session)
    }

    pub fn current_session(&self) -> Option<AuthSession> {
        self.state.current_session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Re-reads the persisted session into the store.
    pub fn check_auth_state(&self) {
        self.state.check_auth_state();
    }

    fn is_superseded(&self, attempt: AuthAttempt, operation: &'static str) -> bool {
        if self.state.is_current_attempt(attempt) {
            return false;
        }
        tracing::debug!(operation, "Discarding result of superseded auth attempt");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::runtime::{ManualClock, RecordingHost};
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::application::handlers::test_support::{admin_session, ScriptedAuthRepository};
    use crate::domain::foundation::{Email, Timestamp, UserId};
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    struct Setup {
        clock: Arc<ManualClock>,
        state: GlobalState,
    }

    fn setup() -> Setup {
        let clock = Arc::new(ManualClock::new());
        let state = GlobalState::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(RecordingHost::new()),
            clock.clone(),
            clock.clone(),
        );
        Setup { clock, state }
    }

    fn service(s: &Setup, repository: Arc<dyn AuthRepository>) -> AuthService {
        AuthService::new(s.state.clone(), repository, s.clock.clone())
    }

    #[tokio::test]
    async fn login_success_sets_session_and_ends_loading() {
        let s = setup();
        let session = admin_session();
        let auth = service(&s, Arc::new(ScriptedAuthRepository::accepting(session.clone())));

        let result = auth.login("admin@example.com", secret("admin123")).await;

        assert_eq!(result.unwrap(), session);
        assert_eq!(s.state.current_session(), Some(session));
        assert!(!s.state.auth_loading());
        assert_eq!(s.state.auth_error(), None);
        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn login_failure_records_error() {
        let s = setup();
        let auth = service(&s, Arc::new(ScriptedAuthRepository::rejecting()));

        let err = auth
            .login("admin@example.com", secret("wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Credenciales inválidas");
        assert_eq!(s.state.auth_error().as_deref(), Some("Credenciales inválidas"));
        assert!(!s.state.auth_loading());
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn new_login_clears_previous_error() {
        let s = setup();
        s.state.set_auth_error(Some("viejo".into()));
        let auth = service(&s, Arc::new(ScriptedAuthRepository::accepting(admin_session())));

        auth.login("admin@example.com", secret("admin123"))
            .await
            .unwrap();

        assert_eq!(s.state.auth_error(), None);
    }

    #[tokio::test]
    async fn logout_clears_state() {
        let s = setup();
        let repo = Arc::new(ScriptedAuthRepository::accepting(admin_session()));
        let auth = service(&s, repo.clone());
        auth.login("admin@example.com", secret("admin123"))
            .await
            .unwrap();

        auth.logout("1").await.unwrap();

        assert_eq!(s.state.current_session(), None);
        assert!(!s.state.auth_loading());
        assert_eq!(repo.logouts(), vec![UserId::new("1").unwrap()]);
    }

    #[tokio::test]
    async fn failed_logout_keeps_session() {
        let s = setup();
        s.state.set_auth_session(Some(admin_session()));
        let auth = service(&s, Arc::new(ScriptedAuthRepository::failing()));

        let err = auth.logout("1").await.unwrap_err();

        assert_eq!(err.message(), "Error al cerrar sesión");
        assert!(s.state.current_session().is_some());
        assert_eq!(s.state.auth_error().as_deref(), Some("Error al cerrar sesión"));
        assert!(!s.state.auth_loading());
    }

    #[tokio::test]
    async fn refresh_without_session_fails() {
        let s = setup();
        let auth = service(&s, Arc::new(ScriptedAuthRepository::accepting(admin_session())));

        let err = auth.refresh_session().await.unwrap_err();

        assert_eq!(err, UseCaseError::Unauthorized("No hay sesión activa".into()));
    }

    #[tokio::test]
    async fn refresh_of_expired_session_logs_out() {
        let s = setup();
        let expiring = AuthSession::new(
            UserId::new("1").unwrap(),
            Email::new("admin@example.com").unwrap(),
            "token_old",
            "refresh_old",
            s.clock.now().plus_millis(1_000),
        );
        s.state.set_auth_session(Some(expiring));
        s.clock.advance(Duration::from_millis(2_000));
        let repo = Arc::new(ScriptedAuthRepository::accepting(admin_session()));
        let auth = service(&s, repo.clone());

        let err = auth.refresh_session().await.unwrap_err();

        assert_eq!(err.message(), "La sesión ha expirado");
        assert_eq!(s.state.current_session(), None);
        assert_eq!(repo.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn refresh_adopts_new_session() {
        let s = setup();
        let current = AuthSession::new(
            UserId::new("1").unwrap(),
            Email::new("admin@example.com").unwrap(),
            "token_old",
            "refresh_old",
            s.clock.now().plus_millis(60_000),
        );
        s.state.set_auth_session(Some(current));
        let fresh = admin_session();
        let auth = service(&s, Arc::new(ScriptedAuthRepository::accepting(fresh.clone())));

        let session = auth.refresh_session().await.unwrap();

        assert_eq!(session, fresh);
        assert_eq!(s.state.current_session(), Some(fresh));
    }

    #[tokio::test]
    async fn refresh_keeps_current_session_when_none_issued() {
        let s = setup();
        let current = admin_session();
        s.state.set_auth_session(Some(current.clone()));
        let auth = service(&s, Arc::new(ScriptedAuthRepository::rejecting()));

        let session = auth.refresh_session().await.unwrap();

        assert_eq!(session, current);
        assert_eq!(s.state.current_session(), Some(current));
    }

    #[test]
    fn check_auth_state_delegates_to_store() {
        let s = setup();
        let auth = service(&s, Arc::new(ScriptedAuthRepository::rejecting()));

        auth.check_auth_state();

        assert_eq!(auth.current_session(), None);
    }

    /// Answers immediately, except for `slow@example.com`, which waits for
    /// `gate` first. Refresh issues nothing unless `refreshed` is set, in
    /// which case it also waits for `gate`.
    struct GatedAuthRepository {
        gate: Notify,
        refreshed: Option<AuthSession>,
    }

    impl GatedAuthRepository {
        fn new() -> Self {
            Self {
                gate: Notify::new(),
                refreshed: None,
            }
        }
    }

    fn session_for(email: &Email) -> AuthSession {
        AuthSession::new(
            UserId::new(email.local_part()).unwrap(),
            email.clone(),
            format!("token_{}", email.local_part()),
            format!("refresh_{}", email.local_part()),
            Timestamp::now().plus_millis(60_000),
        )
    }

    #[async_trait]
    impl AuthRepository for GatedAuthRepository {
        async fn authenticate(
            &self,
            email: &Email,
            _password: &SecretString,
        ) -> Result<Option<AuthSession>, RepositoryError> {
            if email.as_str() == "slow@example.com" {
                self.gate.notified().await;
            }
            Ok(Some(session_for(email)))
        }

        async fn refresh_token(&self, _: &str) -> Result<Option<AuthSession>, RepositoryError> {
            if self.refreshed.is_some() {
                self.gate.notified().await;
            }
            Ok(self.refreshed.clone())
        }

        async fn logout(&self, _: &UserId) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn current_session(&self, _: &str) -> Result<Option<AuthSession>, RepositoryError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn superseded_login_does_not_clobber_newer_session() {
        let s = setup();
        let repo = Arc::new(GatedAuthRepository::new());
        let auth = service(&s, repo.clone());

        let slow = auth.login("slow@example.com", secret("x"));
        let fast = async {
            let result = auth.login("fast@example.com", secret("x")).await;
            repo.gate.notify_one();
            result
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap().email().as_str(), "slow@example.com");
        let fast = fast.unwrap();
        assert_eq!(s.state.current_session(), Some(fast));
        assert!(!s.state.auth_loading());
    }

    #[tokio::test]
    async fn logout_started_after_login_wins() {
        let s = setup();
        let repo = Arc::new(GatedAuthRepository::new());
        let auth = service(&s, repo.clone());

        let login = auth.login("slow@example.com", secret("x"));
        let logout = async {
            let result = auth.logout("slow").await;
            repo.gate.notify_one();
            result
        };
        let (login, logout) = tokio::join!(login, logout);

        assert!(login.is_ok());
        assert!(logout.is_ok());
        assert_eq!(s.state.current_session(), None);
    }

    #[tokio::test]
    async fn loading_is_visible_while_login_is_in_flight() {
        let s = setup();
        s.state.set_auth_error(Some("viejo".into()));
        let repo = Arc::new(GatedAuthRepository::new());
        let auth = service(&s, repo.clone());

        let login = auth.login("slow@example.com", secret("x"));
        let observer = async {
            tokio::task::yield_now().await;
            let seen = (s.state.auth_loading(), s.state.auth_error());
            repo.gate.notify_one();
            seen
        };
        let (login, (loading_during, error_during)) = tokio::join!(login, observer);

        assert!(login.is_ok());
        assert!(loading_during);
        assert_eq!(error_during, None);
        assert!(!s.state.auth_loading());
    }

    #[tokio::test]
    async fn refresh_issuing_nothing_does_not_discard_login_in_flight() {
        let s = setup();
        let stored = admin_session();
        s.state.set_auth_session(Some(stored.clone()));
        let repo = Arc::new(GatedAuthRepository::new());
        let auth = service(&s, repo.clone());

        let login = auth.login("slow@example.com", secret("x"));
        let refresh = async {
            let result = auth.refresh_session().await;
            repo.gate.notify_one();
            result
        };
        let (login, refresh) = tokio::join!(login, refresh);

        assert_eq!(refresh.unwrap(), stored);
        let login = login.unwrap();
        assert_eq!(login.email().as_str(), "slow@example.com");
        assert_eq!(s.state.current_session(), Some(login));
        assert!(!s.state.auth_loading());
    }

    #[tokio::test]
    async fn refresh_result_is_dropped_when_login_started_meanwhile() {
        let s = setup();
        s.state.set_auth_session(Some(admin_session()));
        let fresh_refresh = AuthSession::new(
            UserId::new("1").unwrap(),
            Email::new("admin@example.com").unwrap(),
            "token_refreshed",
            "refresh_refreshed",
            Timestamp::now().plus_millis(60_000),
        );
        let repo = Arc::new(GatedAuthRepository {
            gate: Notify::new(),
            refreshed: Some(fresh_refresh.clone()),
        });
        let auth = service(&s, repo.clone());

        let refresh = auth.refresh_session();
        let login = async {
            let result = auth.login("fast@example.com", secret("x")).await;
            repo.gate.notify_one();
            result
        };
        let (refresh, login) = tokio::join!(refresh, login);

        assert_eq!(refresh.unwrap(), fresh_refresh);
        assert_eq!(s.state.current_session(), Some(login.unwrap()));
    }
}
