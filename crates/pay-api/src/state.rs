//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment gateway and the validated server configuration.

use pay_braintree::BraintreeGateway;
use pay_core::{BoxedPaymentGateway, PaymentError, PaymentResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// PEM files for serving HTTPS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// HTTPS certificate and key; plain HTTP when `None`
    pub tls: Option<TlsConfig>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().map_err(|_| {
                PaymentError::Configuration(format!("PORT must be a valid port number, got {:?}", p))
            })?,
            None => 3000,
        };

        let tls = match (lookup("TLS_CERT_PATH"), lookup("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => {
                return Err(PaymentError::Configuration(
                    "TLS_CERT_PATH and TLS_KEY_PATH must be set together".to_string(),
                ))
            }
        };

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        if host.trim().is_empty() {
            return Err(PaymentError::Configuration("HOST must not be empty".to_string()));
        }

        Ok(Self {
            host: host.trim().to_string(),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            tls,
        })
    }

    /// Resolve the socket address to bind to.
    ///
    /// `HOST` may be an IP literal or a name such as `localhost`; the first
    /// resolved address wins.
    pub async fn socket_addr(&self) -> PaymentResult<SocketAddr> {
        let invalid = || {
            PaymentError::Configuration(format!(
                "Invalid socket address: {}:{}",
                self.host, self.port
            ))
        };

        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn scheme(&self) -> &'static str {
        if self.tls.is_some() {
            "https"
        } else {
            "http"
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment gateway, shared by all requests
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Braintree
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let gateway = BraintreeGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Braintree: {}", e))?;

        tracing::info!(
            "Braintree gateway ready: merchant={}, environment={}",
            gateway.config().merchant_id,
            gateway.config().environment
        );

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create state around an already constructed gateway
    pub fn with_gateway(config: AppConfig, gateway: BoxedPaymentGateway) -> Self {
        Self { gateway, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert!(config.tls.is_none());
        assert_eq!(config.scheme(), "http");
    }

    #[test]
    fn test_tls_paths() {
        let config = AppConfig::from_lookup(vars(&[
            ("TLS_CERT_PATH", "./certs/localhost.pem"),
            ("TLS_KEY_PATH", "./certs/localhost-key.pem"),
        ]))
        .unwrap();

        assert_eq!(
            config.tls,
            Some(TlsConfig {
                cert_path: PathBuf::from("./certs/localhost.pem"),
                key_path: PathBuf::from("./certs/localhost-key.pem"),
            })
        );
        assert_eq!(config.scheme(), "https");

        let err = AppConfig::from_lookup(vars(&[("TLS_CERT_PATH", "./certs/localhost.pem")]))
            .unwrap_err();
        assert!(err.to_string().contains("must be set together"));
    }

    #[test]
    fn test_invalid_port() {
        assert!(AppConfig::from_lookup(vars(&[("PORT", "https")])).is_err());
        assert!(AppConfig::from_lookup(vars(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_empty_host() {
        assert!(AppConfig::from_lookup(vars(&[("HOST", "  ")])).is_err());
    }

    #[tokio::test]
    async fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            tls: None,
        };

        let addr = config.socket_addr().await.unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[tokio::test]
    async fn test_socket_addr_resolves_hostname() {
        let config = AppConfig::from_lookup(vars(&[("HOST", "localhost"), ("PORT", "3443")])).unwrap();

        let addr = config.socket_addr().await.unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 3443);
    }
}
