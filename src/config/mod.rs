//! Configuration loading.
//!
//! Settings come from `config.toml` (see [`Config::config_path`]), then the
//! `STOCKDESK_API_URL` environment variable, then CLI flags.

mod loader;
mod types;

pub use loader::{ConfigError, API_URL_ENV};
pub use types::{ApiConfig, Config, LoginDefaults, MovementsConfig, SessionConfig};
