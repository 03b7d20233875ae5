//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use serde_json::{json, Value};
use std::path::PathBuf;
use stockdesk::api::ApiClient;
use stockdesk::config::{ApiConfig, Config};
use stockdesk::coordinator::RefreshCoordinator;
use stockdesk::session::Session;
use stockdesk::ui::app::App;
use stockdesk::worker::{command_channel, execute, UiCommand};
use tempfile::TempDir;
use tokio::sync::mpsc;

pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

/// Create a temporary config file with `content`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    }
}

pub fn client(backend: &MockBackend, session: Session) -> ApiClient {
    ApiClient::new(&api_config(&backend.base_url()), session).expect("Failed to build client")
}

/// Timestamps carry no offset, as the service writes naive UTC values.
pub fn product_json(id: i64, stock_qty: i64) -> Value {
    json!({
        "id": id,
        "sku": format!("SKU-{id}"),
        "ean13": "7501234567890",
        "name": format!("Product {id}"),
        "stock_qty": stock_qty,
        "created_at": "2024-03-01T12:00:00.123456",
        "updated_at": "2024-03-01T12:00:00.123456"
    })
}

pub fn movement_json(id: i64, product_id: i64, delta: i64, before: i64) -> Value {
    let after = before + delta;
    let kind = if delta > 0 {
        "IN"
    } else if delta < 0 {
        "OUT"
    } else {
        "ADJUST"
    };
    json!({
        "id": id,
        "product_id": product_id,
        "delta": delta,
        "qty_before": before,
        "qty_after": after,
        "type": kind,
        "reason": "Movimiento manual",
        "created_at": "2024-03-01T12:30:00.654321"
    })
}

// -- App helpers --------------------------------------------------------------

/// App wired to a mock backend without a background worker. Commands are
/// executed by [`pump`], which keeps request order deterministic.
pub struct Harness {
    pub app: App,
    pub api: ApiClient,
    pub commands: mpsc::Receiver<UiCommand>,
}

impl Harness {
    pub fn new(backend: &MockBackend, session: Session) -> Self {
        Self::with_config(backend, session, Config::default())
    }

    pub fn with_config(backend: &MockBackend, session: Session, mut config: Config) -> Self {
        config.api = api_config(&backend.base_url());
        let api = ApiClient::new(&config.api, session.clone()).expect("Failed to build client");
        let mut app = App::new(&config, session, RefreshCoordinator::new());
        let (tx, rx) = command_channel();
        app.set_command_sender(tx);
        Self {
            app,
            api,
            commands: rx,
        }
    }

    /// Execute queued commands until none are left, feeding results back
    /// into the App. Returns the number of commands executed.
    pub async fn pump(&mut self) -> usize {
        let mut executed = 0;
        while let Ok(command) = self.commands.try_recv() {
            let event = execute(&self.api, command).await;
            self.app.on_api_event(event);
            executed += 1;
        }
        executed
    }

    /// Take queued commands without executing them.
    pub fn take_commands(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            commands.push(command);
        }
        commands
    }
}
