//! Payroll engine HTTP server.
//!
//! Reads `payroll.yaml` from `PAYROLL_CONFIG_DIR` (default `./config`) and
//! serves the payroll API. `RUST_LOG` overrides the configured log filter.

use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_DIR: &str = "./config";

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir =
        env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    init_tracing(config.log_filter());

    let address = config.bind_address();
    info!(config_dir = %config_dir, issuer = %config.issuer(), "Loaded configuration");

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
