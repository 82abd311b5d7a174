//! # Braintree Configuration
//!
//! Configuration management for the Braintree integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// API version sent in the `Braintree-Version` header
pub const BRAINTREE_API_VERSION: &str = "2019-01-01";

/// Braintree environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraintreeEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl BraintreeEnvironment {
    /// GraphQL endpoint for this environment
    pub fn graphql_url(&self) -> &'static str {
        match self {
            BraintreeEnvironment::Sandbox => "https://payments.sandbox.braintree-api.com/graphql",
            BraintreeEnvironment::Production => "https://payments.braintree-api.com/graphql",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BraintreeEnvironment::Sandbox => "sandbox",
            BraintreeEnvironment::Production => "production",
        }
    }
}

impl FromStr for BraintreeEnvironment {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(BraintreeEnvironment::Sandbox),
            "production" => Ok(BraintreeEnvironment::Production),
            other => Err(PaymentError::Configuration(format!(
                "BRAINTREE_ENVIRONMENT must be sandbox or production, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for BraintreeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Braintree API configuration
#[derive(Clone)]
pub struct BraintreeConfig {
    /// Merchant account ID
    pub merchant_id: String,

    /// API public key
    pub public_key: String,

    /// API private key
    pub private_key: String,

    /// Sandbox or production
    pub environment: BraintreeEnvironment,

    /// GraphQL endpoint (overridable for testing/mocking)
    pub api_url: String,

    /// API version
    pub api_version: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl BraintreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `BRAINTREE_MERCHANT_ID`
    /// - `BRAINTREE_PUBLIC_KEY`
    /// - `BRAINTREE_PRIVATE_KEY`
    ///
    /// Optional: `BRAINTREE_ENVIRONMENT` (default sandbox),
    /// `BRAINTREE_TIMEOUT_SECS` (default 30).
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, PaymentError> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(PaymentError::Configuration(format!("{} not set", key))),
            }
        };

        let merchant_id = required("BRAINTREE_MERCHANT_ID")?;
        let public_key = required("BRAINTREE_PUBLIC_KEY")?;
        let private_key = required("BRAINTREE_PRIVATE_KEY")?;

        let environment = match lookup("BRAINTREE_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => BraintreeEnvironment::default(),
        };

        let timeout = match lookup("BRAINTREE_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    PaymentError::Configuration(format!(
                        "BRAINTREE_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        value
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        Ok(Self {
            merchant_id,
            public_key,
            private_key,
            environment,
            api_url: environment.graphql_url().to_string(),
            api_version: BRAINTREE_API_VERSION.to_string(),
            timeout,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        merchant_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        let environment = BraintreeEnvironment::Sandbox;
        Self {
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            environment,
            api_url: environment.graphql_url().to_string(),
            api_version: BRAINTREE_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == BraintreeEnvironment::Production
    }

    /// Builder: set custom API URL (for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for BraintreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BraintreeConfig")
            .field("merchant_id", &self.merchant_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
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

    const CREDENTIALS: [(&str, &str); 3] = [
        ("BRAINTREE_MERCHANT_ID", "merchant_abc"),
        ("BRAINTREE_PUBLIC_KEY", "public_xyz"),
        ("BRAINTREE_PRIVATE_KEY", "private_secret"),
    ];

    #[test]
    fn test_defaults_to_sandbox() {
        let config = BraintreeConfig::from_lookup(vars(&CREDENTIALS)).unwrap();

        assert_eq!(config.merchant_id, "merchant_abc");
        assert_eq!(config.environment, BraintreeEnvironment::Sandbox);
        assert_eq!(config.api_url, "https://payments.sandbox.braintree-api.com/graphql");
        assert_eq!(config.api_version, "2019-01-01");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_environment() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("BRAINTREE_ENVIRONMENT", "Production"));
        pairs.push(("BRAINTREE_TIMEOUT_SECS", "10"));

        let config = BraintreeConfig::from_lookup(vars(&pairs)).unwrap();
        assert!(config.is_production());
        assert_eq!(config.api_url, "https://payments.braintree-api.com/graphql");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_key() {
        let err = BraintreeConfig::from_lookup(vars(&CREDENTIALS[..2])).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: BRAINTREE_PRIVATE_KEY not set");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs[0] = ("BRAINTREE_MERCHANT_ID", "  ");
        assert!(BraintreeConfig::from_lookup(vars(&pairs)).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("BRAINTREE_ENVIRONMENT", "qa"));
        assert!(BraintreeConfig::from_lookup(vars(&pairs)).is_err());

        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("BRAINTREE_TIMEOUT_SECS", "soon"));
        assert!(BraintreeConfig::from_lookup(vars(&pairs)).is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = BraintreeConfig::new("merchant", "public", "private_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("private_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
