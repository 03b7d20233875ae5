use crate::ui::movements::intent::MovementsIntent;
use crate::ui::movements::state::{MovementField, MovementsState};
use crate::ui::mvi::Reducer;

/// Longest product-id filter accepted; keeps the value inside `i64`.
const MAX_FILTER_DIGITS: usize = 18;

pub struct MovementsReducer;

impl Reducer for MovementsReducer {
    type State = MovementsState;
    type Intent = MovementsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            MovementsIntent::LoadRequested => MovementsState {
                loading: true,
                latest_load: state.latest_load.next(),
                ..state
            },
            MovementsIntent::Loaded { seq, movements } => {
                if !state.latest_load.accepts(seq) {
                    return state;
                }
                MovementsState {
                    movements,
                    loading: false,
                    error: None,
                    ..state
                }
            }
            MovementsIntent::LoadFailed { seq, message } => {
                if !state.latest_load.accepts(seq) {
                    return state;
                }
                MovementsState {
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
            MovementsIntent::FocusNext => MovementsState {
                focused: match state.focused {
                    MovementField::ProductId => MovementField::Limit,
                    MovementField::Limit => MovementField::ProductId,
                },
                ..state
            },
            MovementsIntent::Input(ch) => {
                let Some(digit) = ch.to_digit(10) else {
                    return state;
                };
                let mut state = state;
                match state.focused {
                    MovementField::ProductId => {
                        if state.product_filter.len() < MAX_FILTER_DIGITS {
                            state.product_filter.push(ch);
                        }
                    }
                    MovementField::Limit => {
                        if let Some(limit) = state
                            .limit
                            .checked_mul(10)
                            .and_then(|limit| limit.checked_add(digit))
                        {
                            state.limit = limit;
                        }
                    }
                }
                state
            }
            MovementsIntent::Backspace => {
                let mut state = state;
                match state.focused {
                    MovementField::ProductId => {
                        state.product_filter.pop();
                    }
                    MovementField::Limit => state.limit /= 10,
                }
                state
            }
            MovementsIntent::Reset {
                generation,
                default_limit,
            } => MovementsState {
                // The sequence keeps counting so responses to the previous
                // mount are still recognised as stale.
                latest_load: state.latest_load,
                ..MovementsState::mounted(default_limit, generation)
            },
        }
    }
}
