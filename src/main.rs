use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info};

use forkflow_api::config::{init_tracing, load_config};
use forkflow_api::db::{establish_connection_from_app_config, run_migrations};
use forkflow_api::events::{process_events, EventSender};
use forkflow_api::{app_router, AppState};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.log_level, config.log_json);

    info!(environment = %config.environment, "Starting forkflow-api");

    let db = establish_connection_from_app_config(&config).await?;
    if config.auto_migrate {
        run_migrations(&db).await?;
    }
    let db = Arc::new(db);

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let event_sender = Arc::new(EventSender::new(tx));
    let event_loop = tokio::spawn(process_events(rx));

    let state = AppState::new(db, config.clone(), event_sender);
    let app = app_router(state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(address = %config.bind_address(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Handlers are gone at this point; dropping the state's sender ends
    // the event loop.
    if let Err(e) = event_loop.await {
        error!(error = %e, "Event loop terminated abnormally");
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
