//! # Transaction Types
//!
//! Sale requests and gateway results for the checkout flow.

use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use std::fmt;

/// Short-lived credential for the client-side payment form.
///
/// Returned verbatim from the gateway; never stored or inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientToken({} bytes)", self.0.len())
    }
}

/// A sale to be forwarded to the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRequest {
    /// Single-use reference to the tokenized payment method
    pub payment_method_nonce: String,

    /// Decimal amount, passed to the gateway as-is
    pub amount: String,

    /// Capture immediately instead of only authorizing. Always set.
    pub submit_for_settlement: bool,
}

impl SaleRequest {
    /// Create an auto-settling sale.
    ///
    /// Fails with `InvalidRequest` when the amount is empty. The amount is
    /// otherwise forwarded untouched.
    pub fn new(payment_method_nonce: impl Into<String>, amount: impl Into<String>) -> PaymentResult<Self> {
        let amount = amount.into();
        if amount.is_empty() {
            return Err(PaymentError::InvalidRequest("Missing amount".to_string()));
        }

        Ok(Self {
            payment_method_nonce: payment_method_nonce.into(),
            amount,
            submit_for_settlement: true,
        })
    }
}

/// A transaction the gateway accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Gateway transaction ID
    pub id: String,

    /// Gateway status (e.g. `SUBMITTED_FOR_SETTLEMENT`)
    pub status: String,

    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a sale call that reached the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleOutcome {
    /// The gateway accepted the sale
    Approved(Transaction),
    /// Business failure (declined card, invalid nonce, ...)
    Declined { message: String },
}
