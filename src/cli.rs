//! Command-line flags. They override the config file and environment.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, ConfigError};

#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "stockdesk",
    version,
    about = "Terminal admin client for the inventory service"
)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the inventory API base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log filter, e.g. "debug" or "stockdesk=trace". Defaults to RUST_LOG, then "info".
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Keep the session token in memory only.
    #[arg(long)]
    pub ephemeral: bool,

    /// Call the health endpoint, print the result and exit.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Resolve the effective configuration: file, then environment, then flags.
    ///
    /// An explicit `--config` path must exist; the default location may be
    /// absent.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::ReadError {
                        path: path.clone(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "file not found",
                        ),
                    });
                }
                Config::load_from(path)?
            }
            None => Config::load()?,
        };
        self.apply(config.apply_env())
    }

    pub fn apply(&self, mut config: Config) -> Result<Config, ConfigError> {
        if let Some(url) = &self.base_url {
            config.api.base_url = url.trim().to_string();
        }
        config.validate()?;
        Ok(config)
    }
}
