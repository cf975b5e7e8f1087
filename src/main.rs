use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use employee_api::app::{app, serve, shutdown_signal, AppState};
use employee_api::config::{self, StoreBackend};
use employee_api::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "employee-api")]
#[command(about = "Employee directory REST service")]
#[command(version)]
struct Args {
    #[arg(long, help = "Interface to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(short, long, help = "Port to listen on (overrides EMPLOYEE_API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Use the in-memory store instead of Postgres")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("employee_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.database.backend = StoreBackend::Memory;
    }
    tracing::info!("Starting Employee API in {:?} mode", config.environment);

    let store = DatabaseManager::open_store(&config.database)
        .await
        .context("failed to open employee store")?;

    let state = AppState::new(store.clone(), config.api.request_timeout());
    let router = app(state, &config.api);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Employee API listening on http://{}", bind_addr);

    serve(listener, router, shutdown_signal(), config.server.shutdown_grace()).await?;

    store.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}
