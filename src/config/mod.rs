// Start of file: /src/config/mod.rs

/*
* Configuration loaded from the environment and the application state built from it.
*/

pub mod environment;
pub mod state;

// End of file: /src/config/mod.rs
