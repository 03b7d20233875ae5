use crate::api::Movement;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum MovementsIntent {
    LoadRequested,
    Loaded { seq: u64, movements: Vec<Movement> },
    LoadFailed { seq: u64, message: String },
    FocusNext,
    /// Digit typed into the focused filter field. Other characters are ignored.
    Input(char),
    Backspace,
    /// Refresh generation changed: start over as a freshly mounted view.
    Reset { generation: u64, default_limit: u32 },
}

impl Intent for MovementsIntent {}
