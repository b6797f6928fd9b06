//! Startup configuration and logging for the sprint coverage report.

pub mod env;
pub mod tracing_init;

pub use env::AppConfig;
pub use tracing_init::init_tracing;
