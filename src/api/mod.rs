//! Client for the inventory HTTP service.
//!
//! [`ApiClient`] owns the transport and reads the bearer token from the
//! injected [`Session`](crate::session::Session) on every request.

mod client;
mod error;
mod types;

pub use client::{
    ApiClient, HEALTH_PATH, LOGIN_PATH, MOVEMENTS_PATH, PRODUCTS_PATH, REGISTER_PATH,
};
pub use error::ApiError;
pub use types::{
    AuthResponse, HealthStatus, Movement, MovementQuery, NewMovement, NewProduct, Product,
    Registration, StockAdjustment, ADJUST_REASON, MOVEMENT_REASON,
};
