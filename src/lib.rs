//! Terminal admin client for a remote inventory service.
//!
//! Three views (login, inventory, movement history) share one
//! [`session::Session`] and stay consistent through the
//! [`coordinator::RefreshCoordinator`].

pub mod api;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod session;
pub mod shutdown;
pub mod ui;
pub mod worker;
