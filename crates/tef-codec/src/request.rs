use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// An operator-initiated sale.
///
/// See `spec.md` §3 for the field table this mirrors exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub amount_cents: u64,
    pub tax_cents: u64,
    pub tip_cents: u64,
    pub iac: u64,
    pub terminal_id: String,
    pub transaction_id: String,
    pub cashier_id: String,
    /// Preserved but inert in this profile — see `DESIGN.md` Open Question 3.
    pub send_pan: bool,
}

impl PurchaseRequest {
    /// Validate the invariants `spec.md` §3 requires before encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRequest`] if `amount_cents` is zero, if
    /// `transaction_id` is empty, or if any ASCII field exceeds its wire
    /// width (terminal id ≤10, transaction id ≤10, cashier id ≤12).
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.amount_cents == 0 {
            return Err(CodecError::InvalidRequest("amount_cents must be non-zero".into()));
        }
        if self.transaction_id.is_empty() {
            return Err(CodecError::InvalidRequest("transaction_id must not be empty".into()));
        }
        if self.terminal_id.len() > 10 {
            return Err(CodecError::InvalidRequest("terminal_id exceeds 10 bytes".into()));
        }
        if self.transaction_id.len() > 10 {
            return Err(CodecError::InvalidRequest("transaction_id exceeds 10 bytes".into()));
        }
        if self.cashier_id.len() > 12 {
            return Err(CodecError::InvalidRequest("cashier_id exceeds 12 bytes".into()));
        }
        Ok(())
    }
}

/// A request to void a prior transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalRequest {
    /// Six-character receipt number of the transaction being voided.
    pub receipt_number: String,
    pub terminal_id: String,
    pub transaction_id: String,
    pub cashier_id: String,
}

impl ReversalRequest {
    /// Validate the invariants this operation requires before encoding.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRequest`] if `receipt_number` is not
    /// exactly six characters, or any ASCII field exceeds its wire width.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.receipt_number.len() != 6 {
            return Err(CodecError::InvalidRequest(
                "receipt_number must be exactly 6 characters".into(),
            ));
        }
        if self.terminal_id.len() > 10 {
            return Err(CodecError::InvalidRequest("terminal_id exceeds 10 bytes".into()));
        }
        if self.transaction_id.len() > 10 {
            return Err(CodecError::InvalidRequest("transaction_id exceeds 10 bytes".into()));
        }
        if self.cashier_id.len() > 12 {
            return Err(CodecError::InvalidRequest("cashier_id exceeds 12 bytes".into()));
        }
        Ok(())
    }
}
