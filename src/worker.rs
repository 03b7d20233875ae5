//! Runs API calls off the UI thread.
//!
//! The App sends [`UiCommand`]s; every command becomes its own task, so loads
//! may overlap. Results come back as [`ApiEvent`]s tagged with the load
//! sequence they answer.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiClient, Movement, MovementQuery, Product};
use crate::shutdown::ShutdownHandle;
use crate::ui::inventory::Mutation;

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Login { identifier: String, secret: String },
    Register { identifier: String, secret: String },
    LoadProducts { seq: u64 },
    LoadMovements { seq: u64, query: MovementQuery },
    Mutate { mutation: Mutation },
}

impl UiCommand {
    fn name(&self) -> &'static str {
        match self {
            UiCommand::Login { .. } => "login",
            UiCommand::Register { .. } => "register",
            UiCommand::LoadProducts { .. } => "load_products",
            UiCommand::LoadMovements { .. } => "load_movements",
            UiCommand::Mutate { .. } => "mutate",
        }
    }
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Failures are flattened to display text; views only ever render them.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    LoginFinished(Result<(), String>),
    RegisterFinished(Result<(), String>),
    ProductsLoaded {
        seq: u64,
        result: Result<Vec<Product>, String>,
    },
    MovementsLoaded {
        seq: u64,
        result: Result<Vec<Movement>, String>,
    },
    MutationFinished {
        mutation: Mutation,
        result: Result<(), String>,
    },
}

/// Where finished requests are delivered (the UI event channel at runtime).
pub type ApiEventSink = Arc<dyn Fn(ApiEvent) + Send + Sync>;

pub fn command_channel() -> (UiCommandSender, mpsc::Receiver<UiCommand>) {
    mpsc::channel(COMMAND_BUFFER)
}

pub struct ApiWorker {
    api: ApiClient,
    receiver: mpsc::Receiver<UiCommand>,
    sink: ApiEventSink,
}

impl ApiWorker {
    pub fn new(api: ApiClient, receiver: mpsc::Receiver<UiCommand>, sink: ApiEventSink) -> Self {
        Self {
            api,
            receiver,
            sink,
        }
    }

    /// Accept commands until the channel closes or shutdown is signaled.
    /// Requests already in flight are left to finish on their own.
    pub async fn run(mut self, shutdown: ShutdownHandle) {
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                command = self.receiver.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    self.spawn(command);
                }
            }
        }
        tracing::debug!("API worker stopped");
    }

    fn spawn(&self, command: UiCommand) {
        let api = self.api.clone();
        let sink = Arc::clone(&self.sink);
        tracing::trace!(command = command.name(), "Dispatching");
        tokio::spawn(async move {
            let event = execute(&api, command).await;
            sink(event);
        });
    }
}

/// Perform one command and describe the outcome.
pub async fn execute(api: &ApiClient, command: UiCommand) -> ApiEvent {
    match command {
        UiCommand::Login { identifier, secret } => ApiEvent::LoginFinished(
            api.login(&identifier, &secret)
                .await
                .map(|_| ())
                .map_err(|e| e.display_message()),
        ),
        UiCommand::Register { identifier, secret } => ApiEvent::RegisterFinished(
            api.register(&identifier, &secret)
                .await
                .map(|_| ())
                .map_err(|e| e.display_message()),
        ),
        UiCommand::LoadProducts { seq } => ApiEvent::ProductsLoaded {
            seq,
            result: api.list_products().await.map_err(|e| e.display_message()),
        },
        UiCommand::LoadMovements { seq, query } => ApiEvent::MovementsLoaded {
            seq,
            result: api
                .list_movements(&query)
                .await
                .map_err(|e| e.display_message()),
        },
        UiCommand::Mutate { mutation } => {
            let result = match &mutation {
                Mutation::SetStock {
                    product_id,
                    adjustment,
                } => api.set_stock(*product_id, adjustment).await.map(|_| ()),
                Mutation::RecordMovement(movement) => {
                    api.create_movement(movement).await.map(|_| ())
                }
            };
            if let Err(err) = &result {
                tracing::warn!(product_id = mutation.product_id(), error = %err, "Mutation failed");
            }
            ApiEvent::MutationFinished {
                mutation,
                result: result.map_err(|e| e.display_message()),
            }
        }
    }
}
