// Start of file: /src/utils/mod.rs

/*
    * Shared helpers: error mapping for handlers and middleware layers.
*/

pub mod error_handler;

// End of file: /src/utils/mod.rs
