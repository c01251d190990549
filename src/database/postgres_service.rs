// =============================================================================
// DATABASE SERVICE - Scoped Connections
// =============================================================================

use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{ConnectOptions, Connection, PgConnection};
use tracing::{debug, warn};

use crate::config::environment::EnvironmentVariables;

/// Name under which the handler looks up its connection string
pub const POSTGRESQL_CONNECTION_STRING: &str = "PostgreSQLConnectionString";

const APPLICATION_NAME: &str = "postgres-test-api";

/// Opens one PostgreSQL connection per unit of work and always closes it
/// afterwards. No pool: every unit of work gets its own session.
#[derive(Clone, Debug)]
pub struct DatabaseService {
    /// Environment configuration
    config: Arc<EnvironmentVariables>,
}

impl DatabaseService {
    pub fn new(config: Arc<EnvironmentVariables>) -> Self {
        Self { config }
    }

    /// Resolves connection options for the given connection string name.
    /// Falls back to the discrete `DB_*` settings when the name is not configured,
    /// unless `REQUIRE_CONNECTION_STRING` is set, in which case that is an error.
    pub fn connect_options(&self, name: &str) -> Result<PgConnectOptions> {
        let options: PgConnectOptions = match self.config.connection_string(name) {
            Some(connection_string) => PgConnectOptions::from_str(connection_string)
                .with_context(|| format!("Invalid connection string '{}'", name))?,
            None if self.config.require_connection_string => {
                bail!("Connection string '{}' is not configured", name);
            }
            None => {
                warn!(
                    "Connection string '{}' not configured, falling back to {}:{}/{}",
                    name, self.config.db_host, self.config.db_port, self.config.db_name
                );
                self.options_from_parts()
            }
        };

        Ok(options.application_name(APPLICATION_NAME))
    }

    /// Builds connection options from the discrete environment settings
    fn options_from_parts(&self) -> PgConnectOptions {
        let options: PgConnectOptions = PgConnectOptions::new()
            .host(&self.config.db_host)
            .port(self.config.db_port)
            .username(&self.config.db_user)
            .password(&self.config.db_password)
            .database(&self.config.db_name);

        // Configure SSL based on environment
        if self.config.is_development() {
            options.ssl_mode(PgSslMode::Prefer)
        } else {
            options.ssl_mode(PgSslMode::Require)
        }
    }

    /// Runs `block` on a freshly opened connection.
    /// Only the connect step is time-bounded (`DB_CONNECT_TIMEOUT_SECONDS`); once
    /// open, the connection is closed on every exit path, including when `block`
    /// fails. The block's error wins over any error raised while closing.
    pub async fn with_connection<F, T>(&self, name: &str, block: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c mut PgConnection) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>> + Send,
    {
        let options: PgConnectOptions = self.connect_options(name)?;
        let connect_timeout: Duration = Duration::from_secs(self.config.db_connect_timeout_seconds);

        let mut connection: PgConnection = tokio::time::timeout(connect_timeout, options.connect())
            .await
            .with_context(|| format!("Timed out after {:?} opening database connection", connect_timeout))?
            .context("Failed to open database connection")?;
        debug!("Opened database connection '{}'", name);

        let result: Result<T> = block(&mut connection).await;

        match connection.close().await {
            Ok(()) => debug!("Closed database connection '{}'", name),
            Err(e) => {
                warn!("Error while closing database connection '{}': {}", name, e);
                if result.is_ok() {
                    return Err(e).context("Failed to close database connection");
                }
            }
        }

        result
    }
}
