//! # Braintree Gateway
//!
//! Implementation of the Braintree GraphQL API.
//! Covers client token generation and one-step sales
//! (`chargePaymentMethod`: authorize and submit for settlement).

use crate::config::BraintreeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pay_core::{
    ClientToken, PaymentError, PaymentGateway, PaymentResult, SaleOutcome, SaleRequest,
    Transaction,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

const PROVIDER: &str = "braintree";

const CREATE_CLIENT_TOKEN: &str = "mutation CreateClientToken { createClientToken { clientToken } }";

const CHARGE_PAYMENT_METHOD: &str = "mutation ChargePaymentMethod($input: ChargePaymentMethodInput!) { \
    chargePaymentMethod(input: $input) { transaction { id status createdAt } } }";

/// Transaction statuses that mean the sale did not go through
const FAILED_STATUSES: &[&str] = &[
    "PROCESSOR_DECLINED",
    "GATEWAY_REJECTED",
    "FAILED",
    "VOIDED",
];

/// GraphQL error classes caused by the request contents rather than
/// by the gateway or our credentials
const BUSINESS_ERROR_CLASSES: &[&str] = &["VALIDATION", "NOT_FOUND"];

/// Braintree payment gateway
///
/// Talks to the GraphQL endpoint with the merchant's API key pair.
pub struct BraintreeGateway {
    config: BraintreeConfig,
    client: Client,
}

impl BraintreeGateway {
    /// Create a new Braintree gateway
    pub fn new(config: BraintreeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = BraintreeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &BraintreeConfig {
        &self.config
    }

    /// Run a GraphQL operation and decode the envelope.
    ///
    /// Non-2xx responses become `ProviderError`; GraphQL-level errors in a
    /// 2xx response are left for the caller to classify.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> PaymentResult<GraphQlResponse<T>> {
        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth(&self.config.public_key, Some(&self.config.private_key))
            .header("Braintree-Version", &self.config.api_version)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Braintree API error: status={}, body={}", status, body);

            if let Ok(envelope) = serde_json::from_str::<GraphQlResponse<serde_json::Value>>(&body) {
                if let Some(first) = envelope.errors.first() {
                    return Err(provider_error(first.message.clone()));
                }
            }

            return Err(provider_error(format!("HTTP {}", status)));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Braintree response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentGateway for BraintreeGateway {
    #[instrument(skip(self), fields(merchant_id = %self.config.merchant_id))]
    async fn generate_client_token(&self) -> PaymentResult<ClientToken> {
        let response: GraphQlResponse<CreateClientTokenData> =
            self.execute(CREATE_CLIENT_TOKEN, json!({})).await?;

        if let Some(first) = response.errors.first() {
            error!(
                "Client token generation failed: class={:?}, message={}",
                first.error_class(),
                first.message
            );
            return Err(provider_error(first.message.clone()));
        }

        let token = response
            .data
            .and_then(|d| d.create_client_token)
            .map(|payload| payload.client_token)
            .ok_or_else(|| {
                PaymentError::Serialization("Braintree response missing clientToken".to_string())
            })?;

        debug!("Generated Braintree client token");

        Ok(ClientToken::new(token))
    }

    #[instrument(
        skip(self, request),
        fields(
            merchant_id = %self.config.merchant_id,
            amount = %request.amount,
            settle = request.submit_for_settlement
        )
    )]
    async fn sale(&self, request: &SaleRequest) -> PaymentResult<SaleOutcome> {
        let variables = json!({
            "input": {
                "paymentMethodId": request.payment_method_nonce,
                "transaction": {
                    "amount": request.amount,
                },
            },
        });

        let response: GraphQlResponse<SaleData> = self.execute(CHARGE_PAYMENT_METHOD, variables).await?;

        if let Some(first) = response.errors.first() {
            if let Some(other) = response.errors.iter().find(|e| !e.is_business_error()) {
                error!(
                    "Braintree sale error: class={:?}, message={}",
                    other.error_class(),
                    other.message
                );
                return Err(provider_error(other.message.clone()));
            }

            warn!(
                "Braintree rejected sale: class={:?}, code={:?}, message={}",
                first.error_class(),
                first.legacy_code(),
                first.message
            );
            return Ok(SaleOutcome::Declined {
                message: first.message.clone(),
            });
        }

        let transaction = response
            .data
            .and_then(|d| d.payment)
            .and_then(|p| p.transaction)
            .ok_or_else(|| {
                PaymentError::Serialization("Braintree response missing transaction".to_string())
            })?;

        if FAILED_STATUSES.contains(&transaction.status.as_str()) {
            warn!(
                "Braintree transaction not successful: id={}, status={}",
                transaction.id, transaction.status
            );
            return Ok(SaleOutcome::Declined {
                message: describe_status(&transaction.status),
            });
        }

        info!(
            "Braintree transaction created: id={}, status={}",
            transaction.id, transaction.status
        );

        Ok(SaleOutcome::Approved(Transaction {
            id: transaction.id,
            status: transaction.status,
            created_at: transaction.created_at,
        }))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

fn provider_error(message: impl Into<String>) -> PaymentError {
    PaymentError::ProviderError {
        provider: PROVIDER.to_string(),
        message: message.into(),
    }
}

/// `PROCESSOR_DECLINED` -> `Transaction processor declined`
fn describe_status(status: &str) -> String {
    format!("Transaction {}", status.to_lowercase().replace('_', " "))
}

// =============================================================================
// Braintree GraphQL Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    fn error_class(&self) -> Option<&str> {
        self.extensions.as_ref()?.error_class.as_deref()
    }

    fn legacy_code(&self) -> Option<&str> {
        self.extensions.as_ref()?.legacy_code.as_deref()
    }

    fn is_business_error(&self) -> bool {
        self.error_class()
            .is_some_and(|class| BUSINESS_ERROR_CLASSES.contains(&class))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlErrorExtensions {
    #[serde(default)]
    error_class: Option<String>,
    #[serde(default)]
    legacy_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClientTokenData {
    #[serde(default)]
    create_client_token: Option<ClientTokenPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientTokenPayload {
    client_token: String,
}

#[derive(Debug, Deserialize)]
struct SaleData {
    #[serde(default, rename = "chargePaymentMethod")]
    payment: Option<SalePayload>,
}

#[derive(Debug, Deserialize)]
struct SalePayload {
    #[serde(default)]
    transaction: Option<GraphQlTransaction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlTransaction {
    id: String,
    status: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}
