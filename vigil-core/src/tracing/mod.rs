//! Logging initialization and conventions.

pub mod setup;

pub use setup::init_tracing;
