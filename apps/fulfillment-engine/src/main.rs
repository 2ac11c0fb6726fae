//! Fulfillment Engine Binary
//!
//! Starts the order fulfillment HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin fulfillment-engine
//! ```
//!
//! # Environment Variables
//!
//! - `FULFILLMENT_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`
//!
//! Any `${VAR}` referenced from the config file is read from the environment
//! or a `.env` file.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use fulfillment_engine::config::{Config, load_config};
use fulfillment_engine::infrastructure::config::InMemoryContainer;
use fulfillment_engine::infrastructure::http::{ENDPOINTS, create_router};
use fulfillment_engine::observability::{MetricsConfig, init_metrics, init_tracing};
use tokio::net::TcpListener;
use tokio::signal;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "FULFILLMENT_CONFIG";

/// Config file used when `FULFILLMENT_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = read_config()?;
    init_tracing(&config.observability.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting fulfillment engine");

    if config.observability.metrics.enabled {
        let addr = config.metrics_addr()?;
        init_metrics(&MetricsConfig::with_addr(addr)).context("failed to start metrics exporter")?;
    }

    let container = InMemoryContainer::in_memory(&config);
    tracing::info!(
        products = container.catalog().len(),
        totals_policy = ?config.orders.totals_policy,
        transition_policy = ?config.orders.transition_policy,
        "Catalog seeded"
    );

    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let bind = format!("{}:{}", config.server.bind_address, config.server.http_port);
    let http_addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;
    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    for endpoint in ENDPOINTS {
        tracing::info!("  {endpoint}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Fulfillment engine stopped");
    Ok(())
}

/// Load `.env` from the current directory or the nearest ancestor holding one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Read the configuration.
///
/// An explicitly named file must exist. Without one, `config.yaml` is used if
/// present and defaults apply otherwise.
fn read_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config(Some(&path)).with_context(|| format!("failed to load config {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return load_config(Some(DEFAULT_CONFIG_PATH)).context("failed to load config.yaml");
    }
    Ok(Config::default())
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
