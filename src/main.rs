use clap::Parser;
use ordex::api::{create_router, AppState};
use ordex::config::AppConfig;
use ordex::error::Result;
use ordex::execution::{ExecutionCoordinator, SimulatedExecutor};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Deduplicating order execution service
#[derive(Parser, Debug)]
#[command(name = "ordex", version, about)]
struct Cli {
    /// Directory containing default.toml
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    /// Override the configured listen port
    #[arg(long, env = "ORDEX_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir)?;
    init_logging(&config.logging.level);

    let port = cli.port.unwrap_or(config.server.port);
    let executor = Arc::new(SimulatedExecutor::new(config.executor.clone()));
    let coordinator = Arc::new(ExecutionCoordinator::new(executor));
    let state = AppState::new(coordinator, config.executor.order_timeout_ms);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, port)
        .parse()
        .map_err(|e| ordex::OrdexError::Internal(format!("Invalid bind address: {}", e)))?;
    info!("Starting execution service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ordex::OrdexError::Internal(format!("Server error: {}", e)))?;

    info!("Shutdown complete");
    Ok(())
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},ordex=debug", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
