// Library root for the Reflected insight API

pub mod api;
pub mod config;
pub mod core;
pub mod prompt;
pub mod providers;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::server::create_app;
