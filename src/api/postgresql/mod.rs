/*
* PostgreSQL round-trip endpoint: create table, insert, read back.
*/

pub mod handler;
pub mod routes;

pub use routes::postgresql_routes;
