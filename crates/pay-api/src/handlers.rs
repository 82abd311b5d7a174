//! # Request Handlers
//!
//! Axum request handlers for the checkout API.
//! Gateway detail is logged here and never returned to the client.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{issue_client_token, process_checkout, CheckoutRequest, CheckoutResult, PaymentError};
use tracing::{error, instrument, warn};

/// Body returned when the gateway cannot issue a token
pub const CLIENT_TOKEN_ERROR: &str = "Could not generate client token";

/// Message returned for any infrastructure failure during checkout
pub const SERVER_ERROR: &str = "Server error";

/// Message returned when the checkout body cannot be decoded
pub const INVALID_BODY: &str = "Invalid request body";

type CheckoutError = (StatusCode, Json<CheckoutResult>);

fn checkout_error_response(err: PaymentError) -> CheckoutError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        PaymentError::InvalidRequest(message) => message,
        _ => SERVER_ERROR.to_string(),
    };

    (status, Json(CheckoutResult::failure(message)))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "braintree-checkout",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "provider": state.gateway.provider_name(),
    }))
}

/// Issue a client token for the Drop-in UI, as plain text
#[instrument(skip(state))]
pub async fn client_token(State(state): State<AppState>) -> Response {
    match issue_client_token(state.gateway.as_ref()).await {
        Ok(token) => token.into_inner().into_response(),
        Err(e) => {
            error!("Failed to generate client token: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, CLIENT_TOKEN_ERROR).into_response()
        }
    }
}

/// Run a checkout against the gateway
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResult>, CheckoutError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected checkout body: {}", rejection);
        (
            StatusCode::BAD_REQUEST,
            Json(CheckoutResult::failure(INVALID_BODY)),
        )
    })?;

    let result = process_checkout(state.gateway.as_ref(), request)
        .await
        .map_err(|e| {
            if e.is_client_error() {
                warn!("Checkout rejected: {}", e);
            } else {
                error!("Error during checkout: {}", e);
            }
            checkout_error_response(e)
        })?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_keeps_message() {
        let (status, Json(body)) =
            checkout_error_response(PaymentError::InvalidRequest("Missing amount".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, CheckoutResult::failure("Missing amount"));
    }

    #[test]
    fn test_infrastructure_error_is_generic() {
        let (status, Json(body)) = checkout_error_response(PaymentError::ProviderError {
            provider: "braintree".to_string(),
            message: "Authentication credentials are invalid.".to_string(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message.as_deref(), Some(SERVER_ERROR));
    }
}
