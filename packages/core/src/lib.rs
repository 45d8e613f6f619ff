// Library root — exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod alerts;
pub mod config;
pub mod error;
pub mod listings;
pub mod pipeline;
pub mod scheduler;
pub mod services;

// Only needed by the binary, declared pub so integration tests can reach
// them if needed.
pub mod cli;
pub mod logging;
