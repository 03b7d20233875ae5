mod form;
mod intent;
mod reducer;
mod state;

pub use form::{parse_delta, parse_quantity, FormKind, InputError, InventoryForm, Mutation};
pub use intent::InventoryIntent;
pub use reducer::InventoryReducer;
pub use state::{InventoryState, Notice};
