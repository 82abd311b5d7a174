//! # pay-core
//!
//! Core types and traits for the braintree-checkout service.
//!
//! This crate provides:
//! - `PaymentGateway` trait for plugging in the payment provider
//! - `SaleRequest`, `SaleOutcome` and `ClientToken` for talking to it
//! - `issue_client_token` and `process_checkout`, the two request flows
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{process_checkout, CheckoutRequest};
//!
//! let request: CheckoutRequest = serde_json::from_str(body)?;
//! let result = process_checkout(gateway.as_ref(), request).await?;
//!
//! if result.success {
//!     println!("Paid: {}", result.transaction_id.unwrap_or_default());
//! }
//! ```

pub mod checkout;
pub mod error;
pub mod gateway;
pub mod transaction;

// Re-exports for convenience
pub use checkout::{issue_client_token, process_checkout, Amount, CheckoutRequest, CheckoutResult};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use transaction::{ClientToken, SaleOutcome, SaleRequest, Transaction};
