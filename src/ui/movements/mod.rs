mod intent;
mod reducer;
mod state;

pub use intent::MovementsIntent;
pub use reducer::MovementsReducer;
pub use state::{MovementField, MovementsState, DEFAULT_LIMIT};
