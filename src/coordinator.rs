//! Refresh generation shared by all views.
//!
//! There is no server push, so any mutation observed by one view is
//! published here as a new generation; subscribers re-fetch when the value
//! they last saw is out of date.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Stock set or movement recorded from the inventory view.
    Inventory,
    /// Successful login.
    Login,
    /// Session token cleared.
    Logout,
}

/// Value published on every bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSignal {
    pub generation: u64,
    /// What caused the latest bump; `None` before the first one.
    pub source: Option<ChangeSource>,
}

/// Owner of the refresh generation counter. Never persisted.
#[derive(Clone)]
pub struct RefreshCoordinator {
    sender: Arc<watch::Sender<RefreshSignal>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(RefreshSignal {
            generation: 0,
            source: None,
        });
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn generation(&self) -> u64 {
        self.sender.borrow().generation
    }

    /// Receiver that observes every signal published from now on.
    pub fn subscribe(&self) -> watch::Receiver<RefreshSignal> {
        self.sender.subscribe()
    }

    /// Inventory mutation succeeded.
    pub fn on_changed(&self) -> u64 {
        self.bump(ChangeSource::Inventory)
    }

    /// Login succeeded.
    pub fn on_logged_in(&self) -> u64 {
        self.bump(ChangeSource::Login)
    }

    pub fn on_logged_out(&self) -> u64 {
        self.bump(ChangeSource::Logout)
    }

    fn bump(&self, source: ChangeSource) -> u64 {
        let mut next = 0;
        // send_modify publishes even with no live receivers.
        self.sender.send_modify(|signal| {
            signal.generation += 1;
            signal.source = Some(source);
            next = signal.generation;
        });
        tracing::debug!(generation = next, ?source, "Refresh generation advanced");
        next
    }
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
