// Library root for the PostgreSQL round-trip test API

pub mod api;
pub mod config;
pub mod core;
pub mod database;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
pub use crate::database::DatabaseService;
