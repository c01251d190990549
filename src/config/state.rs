// Application state shared with every handler through axum's `State`

use std::sync::Arc;
use crate::config::environment::EnvironmentVariables;
use crate::database::DatabaseService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub database: DatabaseService,
}

impl AppState {
    /// Builds the state from an already loaded configuration
    pub fn new(environment: EnvironmentVariables) -> Self {
        let environment_arc: Arc<EnvironmentVariables> = Arc::new(environment);
        let database: DatabaseService = DatabaseService::new(environment_arc.clone());

        Self {
            environment: environment_arc,
            database,
        }
    }

    /// Loads configuration from the process environment and builds the state
    pub fn from_env() -> anyhow::Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;
        Ok(Self::new(environment))
    }
}
