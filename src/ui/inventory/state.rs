use crate::api::Product;
use crate::ui::inventory::form::InventoryForm;
use crate::ui::mvi::{LoadSeq, UiState};

/// Outcome of the last stock mutation, shown in the inventory status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Pending(String),
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryState {
    /// Products in server order.
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub form: Option<InventoryForm>,
    pub notice: Option<Notice>,
    pub latest_load: LoadSeq,
}

impl UiState for InventoryState {}

impl InventoryState {
    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_some()
    }
}
