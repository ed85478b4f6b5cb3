//! Signal handling for graceful shutdown

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::service::ServiceState;

/// Setup signal handlers for graceful shutdown
pub fn setup_signal_handlers() -> Result<oneshot::Receiver<()>> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let shutdown_tx = Arc::new(std::sync::Mutex::new(Some(shutdown_tx)));

    // Handle Ctrl+C (SIGINT)
    {
        let shutdown_tx = Arc::clone(&shutdown_tx);
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C signal: {}", e);
                return;
            }

            info!("Ctrl+C signal received");
            send_shutdown(&shutdown_tx);
        });
    }

    // Handle SIGTERM (Unix only)
    #[cfg(unix)]
    {
        let shutdown_tx = Arc::clone(&shutdown_tx);
        tokio::spawn(async move {
            use signal_hook::consts::SIGTERM;
            use std::sync::atomic::{AtomicBool, Ordering};

            let shutdown_flag = Arc::new(AtomicBool::new(false));

            // Register signal handler
            if let Err(e) = signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown_flag)) {
                error!("Failed to register SIGTERM handler: {}", e);
                return;
            }

            // Poll for signal
            loop {
                if shutdown_flag.load(Ordering::Relaxed) {
                    info!("SIGTERM signal received");
                    send_shutdown(&shutdown_tx);
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        });
    }

    Ok(shutdown_rx)
}

fn send_shutdown(shutdown_tx: &std::sync::Mutex<Option<oneshot::Sender<()>>>) {
    let sender = match shutdown_tx.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    if let Some(sender) = sender {
        let _ = sender.send(());
    }
}

/// Graceful shutdown handler
pub async fn graceful_shutdown(
    service_state: Arc<ServiceState>,
    refresh_handle: tokio::task::JoinHandle<()>,
) -> Result<()> {
    info!("Starting graceful shutdown...");

    service_state.stop_refresh_loop();

    // Wait for the refresh task to complete with timeout
    let shutdown_timeout = Duration::from_secs(service_state.config.service.shutdown_timeout_secs);
    match timeout(shutdown_timeout, refresh_handle).await {
        Ok(Ok(())) => {
            info!("RefreshClock stopped gracefully");
        }
        Ok(Err(e)) => {
            error!("Refresh task failed: {}", e);
        }
        Err(_) => {
            warn!("Refresh cycle did not finish within timeout, forcing shutdown");
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}
