pub mod app;
pub mod auth;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod inventory;
pub mod layout;
pub mod movements;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
