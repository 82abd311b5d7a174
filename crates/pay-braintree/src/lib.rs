//! # pay-braintree
//!
//! Braintree payment gateway for braintree-checkout-rs.
//!
//! [`BraintreeGateway`] implements `pay_core::PaymentGateway` over the
//! Braintree GraphQL API:
//!
//! - **Client tokens** via `createClientToken`, handed to the Drop-in UI
//! - **Sales** via `chargePaymentMethod` (authorize and submit for settlement)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_braintree::BraintreeGateway;
//! use pay_core::{PaymentGateway, SaleRequest};
//!
//! // Create gateway from BRAINTREE_* environment variables
//! let gateway = BraintreeGateway::from_env()?;
//!
//! let token = gateway.generate_client_token().await?;
//!
//! let sale = SaleRequest::new(nonce_from_client, "10.00")?;
//! let outcome = gateway.sale(&sale).await?;
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::{BraintreeConfig, BraintreeEnvironment, BRAINTREE_API_VERSION};
pub use gateway::BraintreeGateway;
