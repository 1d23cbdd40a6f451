// Library surface for the binary and the headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod corpus;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;
pub mod util;

/// Redraw interval of the event loop
pub const TICK_RATE_MS: u64 = 100;
