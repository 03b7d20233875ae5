use crate::api::{Movement, MovementQuery};
use crate::ui::mvi::{LoadSeq, UiState};

pub const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementField {
    #[default]
    ProductId,
    Limit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementsState {
    pub movements: Vec<Movement>,
    /// Digits only; empty means unfiltered.
    pub product_filter: String,
    /// Zero means "no limit parameter".
    pub limit: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub focused: MovementField,
    pub latest_load: LoadSeq,
    /// Refresh generation this view was last reset for.
    pub generation: u64,
}

impl Default for MovementsState {
    fn default() -> Self {
        Self::mounted(DEFAULT_LIMIT, 0)
    }
}

impl UiState for MovementsState {}

impl MovementsState {
    pub fn mounted(default_limit: u32, generation: u64) -> Self {
        Self {
            movements: Vec::new(),
            product_filter: String::new(),
            limit: default_limit,
            loading: false,
            error: None,
            focused: MovementField::ProductId,
            latest_load: LoadSeq::default(),
            generation,
        }
    }

    /// Query for the current filter fields.
    pub fn query(&self) -> MovementQuery {
        MovementQuery {
            product_id: self.product_filter.trim().parse().ok(),
            limit: Some(self.limit).filter(|limit| *limit > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_queries_with_limit_only() {
        let state = MovementsState::default();
        assert_eq!(
            state.query(),
            MovementQuery {
                product_id: None,
                limit: Some(50),
            }
        );
    }

    #[test]
    fn zero_limit_is_omitted() {
        let state = MovementsState {
            product_filter: "7".into(),
            limit: 0,
            ..MovementsState::default()
        };
        assert_eq!(
            state.query(),
            MovementQuery {
                product_id: Some(7),
                limit: None,
            }
        );
    }
}
