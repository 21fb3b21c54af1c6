//! http-server-demo
//!
//! - `/hello`, `/redis/set`, `/redis/get/:key` (instrumented)
//! - `/ready`, `/health`, `/metrics`
//! - SIGINT/SIGTERM => 5s graceful drain

use std::process::ExitCode;
use std::sync::Arc;

use demo_core::error::{DemoError, Result};
use demo_server::{
    app_state::AppState,
    config,
    lifecycle::{self, SHUTDOWN_TIMEOUT},
    obs,
    router::{self, Timeouts},
    store::RedisStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    obs::logging::init();
    tracing::info!("starting the server...");

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.client_code().as_str(), "startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::from_env()?;

    let store = RedisStore::connect(&cfg.redis_address, &cfg.redis_password).await?;
    let state = AppState::new(Arc::new(store));

    let app = router::build_router_with(
        state.clone(),
        Timeouts { read: cfg.server_read_timeout, write: cfg.server_write_timeout },
    );

    let listener = tokio::net::TcpListener::bind(cfg.server_address.as_str())
        .await
        .map_err(|e| DemoError::Internal(format!("bind {}: {e}", cfg.server_address)))?;

    match lifecycle::serve_until(listener, app, lifecycle::shutdown_signal(), SHUTDOWN_TIMEOUT).await {
        Ok(()) => {}
        // logged, not escalated
        Err(e) => tracing::error!(error = %e, "failed to shut down the server"),
    }

    drop(state);
    tracing::info!("store connection released");
    Ok(())
}
