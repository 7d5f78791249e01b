//! Composition root.
//!
//! Wires the configured adapters behind the ports and hands out the global
//! state, the auth service and the repositories the handlers run against.

use std::sync::Arc;

use thiserror::Error;

use super::auth_service::AuthService;
use super::state::GlobalState;
use crate::adapters::http::{
    ApiClient, ApiClientConfig, HttpAuthRepository, HttpRoleRepository, HttpUserRepository,
    TransportError,
};
use crate::adapters::memory::InMemoryAuthRepository;
use crate::adapters::runtime::{HeadlessHost, SystemClock, TokioScheduler};
use crate::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore, TokenStore};
use crate::config::AppConfig;
use crate::ports::{
    AuthRepository, Clock, HostEnvironment, KeyValueStore, RoleRepository, Scheduler,
    StorageError, UserRepository,
};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to open client storage: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to build API client: {0}")]
    Api(#[from] TransportError),
}

/// Everything a front end needs, built once per process.
#[derive(Clone)]
pub struct AppContext {
    state: GlobalState,
    auth: Arc<AuthService>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    tokens: Arc<TokenStore>,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Builds the context with the system clock, tokio timers and a
    /// headless host.
    pub fn from_config(config: &AppConfig) -> Result<Self, ContextError> {
        let storage: Arc<dyn KeyValueStore> = match &config.storage.path {
            Some(path) => Arc::new(FileKeyValueStore::open(path)?),
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        Self::assemble(
            config,
            storage,
            Arc::new(HeadlessHost::new(false)),
            Arc::new(SystemClock),
            Arc::new(TokioScheduler::new()),
        )
    }

    /// Builds the context over caller-supplied runtime adapters.
    pub fn assemble(
        config: &AppConfig,
        storage: Arc<dyn KeyValueStore>,
        host: Arc<dyn HostEnvironment>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self, ContextError> {
        let tokens = Arc::new(
            TokenStore::new(storage.clone(), clock.clone())
                .with_refresh_window(config.auth.refresh_window()),
        );
        let api = Arc::new(ApiClient::new(
            ApiClientConfig::new(config.api_base_url(), config.api_timeout()),
            tokens.clone(),
        )?);

        let offline_auth = InMemoryAuthRepository::new(clock.clone())
            .with_session_ttl(config.auth.offline_session_ttl());
        let auth_repository: Arc<dyn AuthRepository> = Arc::new(HttpAuthRepository::new(
            api.clone(),
            tokens.clone(),
            offline_auth,
        ));
        let users: Arc<dyn UserRepository> = Arc::new(HttpUserRepository::new(api.clone()));
        let roles: Arc<dyn RoleRepository> = Arc::new(HttpRoleRepository::new(api));

        let state = GlobalState::new(storage, host, clock.clone(), scheduler);
        let auth = Arc::new(AuthService::new(
            state.clone(),
            auth_repository,
            clock.clone(),
        ));

        tracing::info!(
            environment = %config.environment,
            api_base_url = config.api_base_url(),
            persistent_storage = config.storage.is_persistent(),
            "Application context ready"
        );

        Ok(Self {
            state,
            auth,
            users,
            roles,
            tokens,
            clock,
        })
    }

    pub fn state(&self) -> &GlobalState {
        &self.state
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// User repository for the user handlers.
    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    /// Role repository for the role handlers and role assignment.
    pub fn roles(&self) -> Arc<dyn RoleRepository> {
        self.roles.clone()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("state", &self.state)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
