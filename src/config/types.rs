use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub login: LoginDefaults,
    #[serde(default)]
    pub movements: MovementsConfig,
}

/// Remote inventory service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the inventory API (e.g., "http://localhost:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Explicit token file path. Defaults to `<data_dir>/stockdesk/token`.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

/// Values pre-filled into the login form. Both are optional; when unset the
/// fields start empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoginDefaults {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

/// Movement history view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementsConfig {
    /// Limit used on a fresh history view (default: 50). Zero omits the limit.
    #[serde(default = "default_movement_limit")]
    pub default_limit: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_movement_limit() -> u32 {
    50
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for MovementsConfig {
    fn default() -> Self {
        Self {
            default_limit: default_movement_limit(),
        }
    }
}

impl SessionConfig {
    /// Resolve the token file location.
    ///
    /// Uses `token_path` when set, otherwise `dirs::data_dir()/stockdesk/token`,
    /// falling back to the current directory if no data dir is available.
    pub fn resolve_token_path(&self) -> PathBuf {
        if let Some(path) = &self.token_path {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stockdesk")
            .join("token")
    }
}
