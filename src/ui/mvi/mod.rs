//! Model-View-Intent (MVI) primitives shared by the three views.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ render
//!    ↑                              │
//!    └──── App / API worker ←───────┘
//! ```
//!
//! - **State**: everything a view needs to render
//! - **Intent**: key presses and API results, already tagged with the load
//!   sequence they answer
//! - **Reducer**: pure `(State, Intent) -> State`; network calls happen in
//!   the App, never here

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::{LoadSeq, UiState};
