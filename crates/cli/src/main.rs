use catalog_domain::CliOverrides;
use catalog_jobs::{CacheSweepJob, JobRunner, OutboxRelayJob, OutboxRetentionJob};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "catalog-service")]
#[command(version)]
#[command(about = "Catalog Service - product catalog with versioned writes and change events")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Catalog Service v{}", env!("CARGO_PKG_VERSION"));
    match bootstrap::config_source(cli.config.as_deref()) {
        Some(path) => info!(path = %path, "Configuration loaded"),
        None => info!("No configuration file found, using defaults"),
    }

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool.clone());
    let services = di::Services::new(&config, &repos)?;
    let use_cases = di::UseCases::new(&repos, &services);

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_outbox_relay(
            OutboxRelayJob::new(services.dispatcher.clone())
                .with_interval(Duration::from_millis(config.outbox.relay_interval_ms)),
        )
        .with_cache_sweep(
            CacheSweepJob::new(services.cache.clone())
                .with_interval(Duration::from_secs(config.cache.sweep_interval_secs)),
        )
        .with_outbox_retention(OutboxRetentionJob::new(
            use_cases.purge_published.clone(),
            config.outbox.retention_hours,
        ))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let web_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.port).parse()?;

    server::start_web_server(web_addr, use_cases.app_state(&services), shutdown.clone()).await?;

    shutdown.cancel();
    pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}
