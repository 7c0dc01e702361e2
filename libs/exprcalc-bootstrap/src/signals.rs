use anyhow::Result;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Signals that can trigger shutdown.
#[derive(Debug, Clone, Copy)]
enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

/// Wait for termination signals (Ctrl+C, SIGTERM).
///
/// # Errors
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_shutdown() -> Result<()> {
    let received = tokio::select! {
        result = wait_ctrl_c() => result?,
        result = wait_sigterm() => result?,
    };

    tracing::info!(signal = ?received, "Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

/// Cancel `cancel` once a shutdown signal arrives.
///
/// If the signal handlers cannot be installed, falls back to Ctrl+C only.
#[must_use]
pub fn cancel_on_shutdown(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!(error = %e, "shutdown: signal waiter failed, falling back to ctrl_c()");
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!(error = %e, "shutdown: ctrl_c() unavailable");
            }
        }
        cancel.cancel();
    })
}

async fn wait_ctrl_c() -> Result<ShutdownSignal> {
    signal::ctrl_c().await.map_err(|e| {
        tracing::error!(%e, "Error handling Ctrl+C signal");
        e
    })?;
    Ok(ShutdownSignal::CtrlC)
}

#[cfg(unix)]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    let mut handler =
        signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
            tracing::error!(%e, "Failed to install SIGTERM handler");
            e
        })?;
    handler.recv().await;
    Ok(ShutdownSignal::Sigterm)
}

#[cfg(not(unix))]
async fn wait_sigterm() -> Result<ShutdownSignal> {
    std::future::pending::<Result<ShutdownSignal>>().await
}
