//! # Braintree-Checkout RS
//!
//! Client token + checkout server in front of Braintree.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export BRAINTREE_MERCHANT_ID=...
//! export BRAINTREE_PUBLIC_KEY=...
//! export BRAINTREE_PRIVATE_KEY=...
//!
//! # Serve HTTPS with local certificates (optional)
//! export TLS_CERT_PATH=./certs/localhost.pem
//! export TLS_KEY_PATH=./certs/localhost-key.pem
//!
//! # Run the server
//! braintree-checkout
//! ```

use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use pay_api::{routes, state::AppState};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let config = state.config.clone();
    let addr = config.socket_addr().await?;

    info!("Environment: {}", config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    info!(
        "🚀 Braintree-Checkout starting on {}://{}",
        config.scheme(),
        addr
    );

    if !config.is_production() {
        info!("🔑 Client token: GET {}://{}/client_token", config.scheme(), addr);
        info!("💳 Checkout: POST {}://{}/checkout", config.scheme(), addr);
    }

    // Start server
    match &config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                .await
                .with_context(|| {
                    format!(
                        "Failed to load TLS certificate {} / key {}",
                        tls.cert_path.display(),
                        tls.key_path.display()
                    )
                })?;

            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            warn!("TLS_CERT_PATH/TLS_KEY_PATH not set, serving plain HTTP");

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// `LOG_FORMAT=json` switches to JSON lines; `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn print_banner() {
    println!(
        r#"
  💳 Braintree-Checkout RS 💳
  ━━━━━━━━━━━━━━━━━━━━━━━━━━━
  Client token + checkout server
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
