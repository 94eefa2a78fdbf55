use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use snippetbox_core::{InMemorySnippetStore, SnippetStore};
use snippetbox_storage::{MySqlSnippetStore, MySqlStoreOptions};
use snippetbox_web::app::App;
use snippetbox_web::cli::{Cli, StorageBackendArg};
use snippetbox_web::state::AppState;
use snippetbox_web::telemetry;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::try_parse()?;
    telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting snippetbox server"
    );

    let store: Arc<dyn SnippetStore> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(InMemorySnippetStore::new()),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let options = MySqlStoreOptions::builder()
                .max_connections(config.mysql_max_connections)
                .build();
            let store = MySqlSnippetStore::connect_with(&mysql_dsn, options).await?;
            info!(
                max_connections = config.mysql_max_connections,
                "connected to mysql"
            );
            Arc::new(store)
        }
    };

    run_server(config.listen_addr, store).await?;

    Ok(())
}

async fn run_server(listen_addr: SocketAddr, store: Arc<dyn SnippetStore>) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
