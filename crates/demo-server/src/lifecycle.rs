//! Process lifecycle: serve on a background task, wait for a shutdown trigger,
//! then drain in-flight requests within a fixed budget.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use demo_core::error::{DemoError, Result};

/// Drain budget after a shutdown signal.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Serve `app` on `listener` until `shutdown` resolves, then stop accepting
/// and give in-flight requests `drain_timeout` to finish.
///
/// Returns `DemoError::ShutdownTimeout` when the budget elapses first; the
/// remaining connections are dropped with the server task.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let address = listener
        .local_addr()
        .map_err(|e| DemoError::Internal(format!("listener address: {e}")))?;
    let cancel = CancellationToken::new();

    let mut server = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            info!(%address, "server listening");
            let res = axum::serve(listener, app)
                .with_graceful_shutdown(cancel.cancelled_owned())
                .await;
            if let Err(e) = &res {
                error!(error = %e, "failed to listen and serve");
            }
            res
        })
    };

    shutdown.await;
    info!("shutting down the server...");
    cancel.cancel();

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(Ok(Ok(()))) => Ok(()),
        Ok(Ok(Err(e))) => Err(DemoError::Internal(format!("failed to listen and serve: {e}"))),
        Ok(Err(e)) => Err(DemoError::Internal(format!("server task: {e}"))),
        Err(_) => {
            server.abort();
            Err(DemoError::ShutdownTimeout(drain_timeout))
        }
    }
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
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
    info!("signal received, starting graceful shutdown");
}
