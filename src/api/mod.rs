// Start of file: /src/api/mod.rs

pub mod health;
pub mod postgresql;

// End of file: /src/api/mod.rs
