//! # Payment Gateway Trait
//!
//! The seam between the HTTP layer and the external payment provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentGateway (trait)                   │
//! │  ├── generate_client_token()                                │
//! │  ├── sale()                                                 │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │   Braintree   │
//!                    │    Gateway    │
//!                    └───────────────┘
//! ```
//!
//! The gateway is constructed once at startup and injected into handlers
//! as a [`BoxedPaymentGateway`].

use crate::error::PaymentResult;
use crate::transaction::{ClientToken, SaleOutcome, SaleRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment gateway implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Ask the gateway for a client authorization token.
    async fn generate_client_token(&self) -> PaymentResult<ClientToken>;

    /// Submit a sale.
    ///
    /// # Returns
    /// `Ok(SaleOutcome::Declined)` for business failures reported by the
    /// gateway, `Err` only when the call itself failed.
    async fn sale(&self, request: &SaleRequest) -> PaymentResult<SaleOutcome>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
