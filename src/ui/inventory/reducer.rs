use crate::ui::inventory::form::{FormKind, InventoryForm};
use crate::ui::inventory::intent::InventoryIntent;
use crate::ui::inventory::state::{InventoryState, Notice};
use crate::ui::mvi::Reducer;

pub struct InventoryReducer;

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Intent = InventoryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            InventoryIntent::LoadRequested => InventoryState {
                loading: true,
                latest_load: state.latest_load.next(),
                ..state
            },
            InventoryIntent::Loaded { seq, products } => {
                if !state.latest_load.accepts(seq) {
                    return state;
                }
                let selected = state.selected.min(products.len().saturating_sub(1));
                InventoryState {
                    products,
                    loading: false,
                    error: None,
                    selected,
                    ..state
                }
            }
            InventoryIntent::LoadFailed { seq, message } => {
                if !state.latest_load.accepts(seq) {
                    return state;
                }
                // The previous list is kept.
                InventoryState {
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
            InventoryIntent::MoveSelection(direction) => {
                if state.products.is_empty() || state.form.is_some() {
                    return state;
                }
                let len = state.products.len();
                let current = state.selected.min(len - 1);
                let selected = if direction.is_negative() {
                    if current == 0 {
                        len - 1
                    } else {
                        current - 1
                    }
                } else if current + 1 >= len {
                    0
                } else {
                    current + 1
                };
                InventoryState { selected, ..state }
            }
            InventoryIntent::OpenForm(kind) => {
                let Some((id, qty)) = state.selected_product().map(|p| (p.id, p.stock_qty)) else {
                    return state;
                };
                let form = match kind {
                    FormKind::SetStock => InventoryForm::set_stock(id, qty),
                    FormKind::RecordMovement => InventoryForm::record_movement(id, qty),
                };
                InventoryState {
                    form: Some(form),
                    ..state
                }
            }
            InventoryIntent::FormInput(ch) => {
                let mut state = state;
                if let Some(form) = state.form.as_mut() {
                    form.input.push(ch);
                    form.error = None;
                }
                state
            }
            InventoryIntent::FormBackspace => {
                let mut state = state;
                if let Some(form) = state.form.as_mut() {
                    form.input.pop();
                    form.error = None;
                }
                state
            }
            InventoryIntent::CancelForm => InventoryState {
                form: None,
                ..state
            },
            InventoryIntent::FormRejected { message } => {
                let mut state = state;
                if let Some(form) = state.form.as_mut() {
                    form.error = Some(message);
                }
                state
            }
            InventoryIntent::MutationSubmitted { product_id } => InventoryState {
                form: None,
                notice: Some(Notice::Pending(format!("Saving product {}...", product_id))),
                ..state
            },
            InventoryIntent::MutationSucceeded { message } => InventoryState {
                notice: Some(Notice::Success(message)),
                ..state
            },
            InventoryIntent::MutationFailed { message } => InventoryState {
                notice: Some(Notice::Error(format!("Error: {}", message))),
                ..state
            },
        }
    }
}
