pub mod postgres_service;
pub mod test_table;

pub use postgres_service::{DatabaseService, POSTGRESQL_CONNECTION_STRING};
