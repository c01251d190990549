/*
* Liveness check that never touches the database.
*/

pub mod handler;
pub mod routes;

pub use routes::health_routes;
