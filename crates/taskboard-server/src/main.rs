//! Task board server binary
//!
//! Wires a store, the board service, and the HTTP API together. One binary
//! covers every deployment variant: `--no-realtime` drops the SSE fan-out,
//! `--store memory` runs without a database (volatile, for demos and UI
//! testing).

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard_api::{ApiServer, ApiServerConfig};
use taskboard_service::{
    BoardService, BroadcastNotifier, MemoryStore, NoopNotifier, Notifier, SeaOrmStore, Store,
};

/// Team task board server
#[derive(Parser, Debug)]
#[command(name = "taskboard-server")]
#[command(about = "Run the team task board server", long_about = None)]
#[command(version)]
struct Cli {
    /// HTTP server bind address
    #[arg(long, env = "HTTP_ADDR", default_value = "0.0.0.0:3000")]
    http_addr: String,

    /// Database connection URL (SQLite or Postgres)
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://taskboard.db?mode=rwc"
    )]
    database_url: String,

    /// Shared secret required in the x-auth-code header for deletions
    #[arg(long, env = "DELETION_CODE")]
    deletion_code: String,

    /// Backing store implementation
    #[arg(long, value_enum, default_value_t = StoreKind::SeaOrm)]
    store: StoreKind,

    /// Disable the SSE realtime channel (plain REST variant)
    #[arg(long)]
    no_realtime: bool,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// SeaORM over the configured database URL
    SeaOrm,
    /// Volatile in-memory store; data is lost on shutdown
    Memory,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let store: Arc<dyn Store> = match cli.store {
        StoreKind::SeaOrm => {
            // Store-connection failure at startup is fatal.
            let db = taskboard_db::connect(&cli.database_url)
                .await
                .context("failed to connect to database")?;
            taskboard_db::migrate(&db)
                .await
                .context("failed to run migrations")?;
            Arc::new(SeaOrmStore::new(db))
        }
        StoreKind::Memory => {
            info!("Using in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let realtime = if cli.no_realtime {
        None
    } else {
        Some(Arc::new(BroadcastNotifier::default()))
    };
    let notifier: Arc<dyn Notifier> = match &realtime {
        Some(broadcast) => broadcast.clone(),
        None => Arc::new(NoopNotifier),
    };

    let service = BoardService::new(store, notifier, cli.deletion_code);

    let bind_addr = cli
        .http_addr
        .parse()
        .context("invalid HTTP bind address")?;
    let server = ApiServer::new(
        ApiServerConfig {
            bind_addr,
            enable_cors: !cli.no_cors,
        },
        service,
        realtime,
    );

    let server_handle = tokio::spawn(async move {
        if let Err(err) = server.start().await {
            error!("API server error: {}", err);
        }
    });

    info!("Task board running on http://{}", cli.http_addr);
    info!("Press Ctrl+C to stop");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(err) => {
            error!("Error listening for shutdown signal: {}", err);
        }
    }

    server_handle.abort();
    info!("Task board stopped");

    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
