use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file: `<cache_dir>/stockdesk/stockdesk.log`.
pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockdesk")
        .join("stockdesk.log")
}

/// Initialize tracing, appending to `path`.
///
/// The terminal belongs to the TUI, so logs only ever go to the file.
/// `level` wins over `RUST_LOG`; with neither set the filter is `info`.
pub fn init_tracing(path: &Path, level: Option<&str>) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = match level {
        Some(level) => EnvFilter::try_new(level).map_err(io::Error::other)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_is_namespaced() {
        assert!(log_path().ends_with("stockdesk/stockdesk.log"));
    }

    #[test]
    fn invalid_filter_is_rejected_before_install() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("test.log");
        let err = init_tracing(&path, Some("stockdesk=notalevel")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        // The file is still created; only the filter failed.
        assert!(path.exists());
    }
}
