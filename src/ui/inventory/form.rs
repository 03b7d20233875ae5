//! Inline stock-set / movement form and its validation rules.

use thiserror::Error;

use crate::api::{NewMovement, StockAdjustment, ADJUST_REASON, MOVEMENT_REASON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// New absolute quantity, non-negative.
    SetStock,
    /// Signed delta, zero allowed.
    RecordMovement,
}

/// Client-side validation failure. Nothing is sent when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid quantity '{0}': expected a whole number of 0 or more")]
    InvalidQuantity(String),
    #[error("Invalid delta '{0}': expected a whole number such as +10 or -5")]
    InvalidDelta(String),
}

/// A validated write, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetStock {
        product_id: i64,
        adjustment: StockAdjustment,
    },
    RecordMovement(NewMovement),
}

impl Mutation {
    pub fn product_id(&self) -> i64 {
        match self {
            Mutation::SetStock { product_id, .. } => *product_id,
            Mutation::RecordMovement(movement) => movement.product_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryForm {
    pub kind: FormKind,
    pub product_id: i64,
    pub current_qty: i64,
    pub input: String,
    pub error: Option<String>,
}

impl InventoryForm {
    pub fn set_stock(product_id: i64, current_qty: i64) -> Self {
        Self {
            kind: FormKind::SetStock,
            product_id,
            current_qty,
            input: current_qty.to_string(),
            error: None,
        }
    }

    pub fn record_movement(product_id: i64, current_qty: i64) -> Self {
        Self {
            kind: FormKind::RecordMovement,
            product_id,
            current_qty,
            input: "+1".to_string(),
            error: None,
        }
    }

    pub fn prompt(&self) -> String {
        match self.kind {
            FormKind::SetStock => format!(
                "New quantity for ID {} (current {})",
                self.product_id, self.current_qty
            ),
            FormKind::RecordMovement => format!(
                "Delta for ID {} (e.g. +10 in, -5 out)",
                self.product_id
            ),
        }
    }

    pub fn validate(&self) -> Result<Mutation, InputError> {
        match self.kind {
            FormKind::SetStock => {
                let quantity = parse_quantity(&self.input)?;
                Ok(Mutation::SetStock {
                    product_id: self.product_id,
                    adjustment: StockAdjustment {
                        quantity,
                        reason: ADJUST_REASON.to_string(),
                    },
                })
            }
            FormKind::RecordMovement => {
                let delta = parse_delta(&self.input)?;
                Ok(Mutation::RecordMovement(NewMovement {
                    product_id: self.product_id,
                    delta,
                    reason: MOVEMENT_REASON.to_string(),
                }))
            }
        }
    }
}

/// Parse an absolute stock quantity: a non-negative whole number.
///
/// Surrounding whitespace and a leading `+` are accepted; trailing text is
/// not.
pub fn parse_quantity(input: &str) -> Result<u32, InputError> {
    let invalid = || InputError::InvalidQuantity(input.trim().to_string());
    let value: i64 = input.trim().parse().map_err(|_| invalid())?;
    u32::try_from(value).map_err(|_| invalid())
}

/// Parse a signed movement delta. Zero and negative values are valid.
pub fn parse_delta(input: &str) -> Result<i64, InputError> {
    input
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidDelta(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_accepts_non_negative_integers() {
        assert_eq!(parse_quantity("4"), Ok(4));
        assert_eq!(parse_quantity(" 0 "), Ok(0));
        assert_eq!(parse_quantity("+12"), Ok(12));
    }

    #[test]
    fn quantity_rejects_negative_and_garbage() {
        for input in ["-1", "abc", "", "4abc", "1.5", "99999999999"] {
            assert!(
                matches!(parse_quantity(input), Err(InputError::InvalidQuantity(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn delta_accepts_any_sign() {
        assert_eq!(parse_delta("-3"), Ok(-3));
        assert_eq!(parse_delta("+10"), Ok(10));
        assert_eq!(parse_delta("0"), Ok(0));
    }

    #[test]
    fn delta_rejects_non_integers() {
        for input in ["", "+", "x", "--2", "2.0"] {
            assert!(parse_delta(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn set_stock_form_builds_adjustment() {
        let mut form = InventoryForm::set_stock(7, 10);
        assert_eq!(form.input, "10");
        form.input = "4".to_string();
        assert_eq!(
            form.validate(),
            Ok(Mutation::SetStock {
                product_id: 7,
                adjustment: StockAdjustment {
                    quantity: 4,
                    reason: "Ajuste manual".to_string(),
                },
            })
        );
    }

    #[test]
    fn movement_form_builds_new_movement() {
        let mut form = InventoryForm::record_movement(7, 10);
        assert_eq!(form.input, "+1");
        form.input = "-3".to_string();
        let mutation = form.validate().unwrap();
        assert_eq!(mutation.product_id(), 7);
        assert_eq!(
            mutation,
            Mutation::RecordMovement(NewMovement {
                product_id: 7,
                delta: -3,
                reason: "Movimiento manual".to_string(),
            })
        );
    }
}
