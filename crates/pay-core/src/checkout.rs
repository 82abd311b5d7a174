//! # Checkout Flow
//!
//! The two request-level operations of the service:
//!
//! - [`issue_client_token`]: fetch a token for the client-side payment form
//! - [`process_checkout`]: validate a checkout request, forward an
//!   auto-settling sale to the gateway and map the outcome for the client
//!
//! Both are stateless; the gateway is passed in by the caller.

use crate::error::PaymentResult;
use crate::gateway::PaymentGateway;
use crate::transaction::{ClientToken, SaleOutcome, SaleRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Checkout request body as posted by the payment form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Nonce from the client-side payment form
    #[serde(default)]
    pub payment_method_nonce: Option<String>,
    /// Amount to charge, as a string or a JSON number
    #[serde(default)]
    pub amount: Option<Amount>,
}

/// Amount as sent by the client.
///
/// No currency or range validation happens here; the gateway decides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Amount {
    /// `""`, `0`, `0.0` and `false` count as no amount at all
    pub fn is_missing(&self) -> bool {
        match self {
            Amount::Text(s) => s.is_empty(),
            Amount::Number(n) => n.as_f64() == Some(0.0),
            Amount::Flag(flag) => !flag,
        }
    }

    /// Decimal text forwarded to the gateway
    pub fn into_string(self) -> String {
        match self {
            Amount::Text(s) => s,
            Amount::Number(n) => n.to_string(),
            Amount::Flag(flag) => flag.to_string(),
        }
    }
}

/// Client-facing checkout result.
///
/// `transaction_id` is set iff `success`, `message` iff not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckoutResult {
    pub fn approved(transaction_id: impl Into<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id.into()),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: Some(message.into()),
        }
    }
}

/// Ask the gateway for a fresh client token.
#[instrument(skip(gateway), fields(provider = gateway.provider_name()))]
pub async fn issue_client_token(gateway: &dyn PaymentGateway) -> PaymentResult<ClientToken> {
    let token = gateway.generate_client_token().await?;
    debug!("Issued client token");
    Ok(token)
}

/// Validate a checkout request and run the sale.
///
/// Errors are either `InvalidRequest` (missing amount) or whatever the
/// gateway call failed with. A declined sale is `Ok` with `success: false`.
#[instrument(skip(gateway, request), fields(provider = gateway.provider_name()))]
pub async fn process_checkout(
    gateway: &dyn PaymentGateway,
    request: CheckoutRequest,
) -> PaymentResult<CheckoutResult> {
    let amount = request
        .amount
        .filter(|amount| !amount.is_missing())
        .map(Amount::into_string)
        .unwrap_or_default();
    let nonce = request.payment_method_nonce.unwrap_or_default();

    let sale = SaleRequest::new(nonce, amount)?;

    debug!("Submitting sale: amount={}", sale.amount);

    match gateway.sale(&sale).await? {
        SaleOutcome::Approved(transaction) => {
            info!(
                "Transaction approved: id={}, status={}",
                transaction.id, transaction.status
            );
            Ok(CheckoutResult::approved(transaction.id))
        }
        SaleOutcome::Declined { message } => {
            warn!("Transaction failed: {}", message);
            Ok(CheckoutResult::failure(message))
        }
    }
}
