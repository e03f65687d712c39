// Library surface for headless/integration tests and reuse.
// The binary in main.rs is a thin terminal shell over these modules.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod fire;
pub mod runtime;
pub mod samples;
pub mod session;
pub mod stats;
pub mod theme;
pub mod ui;
