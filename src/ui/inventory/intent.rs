use crate::api::Product;
use crate::ui::inventory::form::FormKind;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum InventoryIntent {
    /// A product load was issued; bumps the load sequence.
    LoadRequested,
    Loaded { seq: u64, products: Vec<Product> },
    LoadFailed { seq: u64, message: String },
    MoveSelection(i32),
    /// Open the inline form for the selected product.
    OpenForm(FormKind),
    FormInput(char),
    FormBackspace,
    /// Esc: close the form without sending anything.
    CancelForm,
    /// Validation failed; the form stays open with the message.
    FormRejected { message: String },
    /// Validated mutation handed to the worker; the form closes.
    MutationSubmitted { product_id: i64 },
    MutationSucceeded { message: String },
    MutationFailed { message: String },
}

impl Intent for InventoryIntent {}
