mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use burrow_core::Shortener;
use burrow_gateway::cors::cors_layer;
use burrow_gateway::{App, AppState};
use burrow_generator::{RandomGenerator, RandomGeneratorSettings};
use burrow_shortener::ShortenerService;
use burrow_storage::{InMemoryRepository, MappingStore, SqliteRepository};
use clap::Parser;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    burrow_telemetry::init(config.log_format)?;

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(config.code_length)
            .build(),
    )?;

    let listen_addr = config.listen_addr();
    let base_url = config.base_url();

    info!(
        listen_addr = %listen_addr,
        base_url = %base_url,
        storage_backend = %config.storage,
        code_length = generator.length(),
        max_attempts = config.max_attempts,
        "starting burrow gateway"
    );

    let shortener: Arc<dyn Shortener> = match config.storage {
        StorageBackendArg::InMemory => {
            warn!("in-memory storage selected; mappings are lost on shutdown");
            build_shortener(InMemoryRepository::new(), generator, config.max_attempts)
        }
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(&config.db_path)
                .await
                .with_context(|| format!("failed to open database '{}'", config.db_path))?;
            build_shortener(repository, generator, config.max_attempts)
        }
    };

    let cors = cors_layer(&config.allowed_origins).context("invalid allowed origin")?;
    let router = App::router(AppState::new(shortener, base_url), cors);

    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(addr = %listen_addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn build_shortener<R: MappingStore>(
    repository: R,
    generator: RandomGenerator,
    max_attempts: usize,
) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::new(repository, generator).with_max_attempts(max_attempts))
}

/// Resolves once `signal` fires. If the signal cannot be listened for, the
/// server keeps running instead of shutting down at once.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        warn!(error = %err, "failed to listen for shutdown signal; running until killed");
        std::future::pending::<()>().await;
    }
}
