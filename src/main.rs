//! Admin Console command-line client.
//!
//! Logs in against the configured admin API (or the offline fallback when
//! it is unreachable) and prints the resulting global state as JSON.
//!
//! # Usage
//!
//! ```bash
//! admin-console admin@example.com admin123
//!
//! # Point at another API and keep the session between runs
//! ADMIN_CONSOLE__API__BASE_URL=http://localhost:4000/api \
//! ADMIN_CONSOLE__STORAGE__PATH=/tmp/admin-console.json \
//! admin-console admin@example.com admin123
//! ```

use secrecy::SecretString;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use admin_console::application::{AppContext, ContextError, UseCaseError};
use admin_console::config::{AppConfig, ConfigError, LoggingConfig, ValidationError};

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: admin-console <email> <password>")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("login failed: {0}")]
    Login(#[from] UseCaseError),

    #[error("failed to render state: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Config(ConfigError::ValidationFailed(err))
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let mut args = std::env::args().skip(1);
    let (email, password) = match (args.next(), args.next()) {
        (Some(email), Some(password)) => (email, SecretString::new(password)),
        _ => return Err(CliError::Usage),
    };

    let config = AppConfig::load()?;
    config.validate()?;
    init_logging(&config.logging)?;

    let context = AppContext::from_config(&config)?;
    let session = context.auth().login(email, password).await?;
    tracing::info!(user_id = %session.user_id(), "Logged in");

    let snapshot = context.state().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn init_logging(config: &LoggingConfig) -> Result<(), ValidationError> {
    let env_filter = config.env_filter()?;

    // Logs go to stderr so stdout carries only the snapshot
    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}
