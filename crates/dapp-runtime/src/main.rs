//! # Honeypot dApp
//!
//! Entry point inside the rollup machine.
//!
//! The request loop is synchronous and blocks inside the host's `finish`
//! call, so it runs on a blocking thread while the async side waits for a
//! shutdown signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dapp_runtime::DappConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// How long a signalled shutdown waits for the loop to reach its next
/// `finish`.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Load and validate configuration from the environment.
fn load_config() -> Result<DappConfig> {
    let config = DappConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Rollup device: {}", config.device.path.display());
    info!("State device: {}", config.storage.state_path.display());
    info!("Portal: {}", config.addresses.portal);
    info!("Withdrawal: {}", config.addresses.withdrawal);
    info!("Token: {}", config.addresses.token);
    Ok(config)
}

#[cfg(target_os = "linux")]
fn serve(config: DappConfig, shutdown: Arc<AtomicBool>) -> Result<()> {
    let mut runtime = dapp_runtime::open_host(&config)
        .context("Failed to start dApp")?
        .with_shutdown(shutdown);
    let outcome = runtime.run();
    let stats = runtime.shutdown().context("Failed to close ledger")?;
    info!(?stats, "Request loop finished");
    outcome.context("Request loop failed")
}

#[cfg(not(target_os = "linux"))]
fn serve(_config: DappConfig, _shutdown: Arc<AtomicBool>) -> Result<()> {
    anyhow::bail!("the rollup device is only available on Linux")
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    let mut worker = tokio::task::spawn_blocking(move || serve(config, flag));

    tokio::select! {
        joined = &mut worker => {
            return joined.context("Request loop panicked")?;
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            shutdown.store(true, Ordering::SeqCst);
        }
    }

    match tokio::time::timeout(SHUTDOWN_GRACE, worker).await {
        Ok(joined) => joined.context("Request loop panicked")?,
        Err(_) => {
            // Every accepted state change is already flushed; the kernel
            // drops the device lock on exit.
            warn!("Request loop still waiting on the host, exiting");
            std::process::exit(0);
        }
    }
}
