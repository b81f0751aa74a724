use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_intake_server::config::Config;
use quiz_intake_server::routes::{router, AppState};
use quiz_intake_storage::PgSubmissionStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quiz_intake=debug")),
        )
        .init();

    let config = Config::from_env()?;

    // Pool lifecycle is explicit: built once here, handed to the router
    // through state, closed after the listener drains.
    let store = PgSubmissionStore::connect(&config.database)?;

    let state = AppState {
        store: Arc::new(store.clone()),
        public_host: config.server.public_host.clone(),
        api_key: config.auth.api_key.clone(),
    };

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    info!(
        addr = %config.server.bind_address,
        public_host = %config.server.public_host,
        "quiz-intake listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("connection pool closed, exiting");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
