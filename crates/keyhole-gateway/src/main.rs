use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyhole_cache::MokaResolutionCache;
use keyhole_core::RecordStore;
use keyhole_gateway::app::App;
use keyhole_gateway::cli::{StorageBackendArg, CLI};
use keyhole_gateway::state::AppState;
use keyhole_generator::HashGenerator;
use keyhole_ingest::ImportService;
use keyhole_resolver::ResolverService;
use keyhole_storage::{InMemoryRecordStore, RedisRecordStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        domain_prefix = %config.domain_prefix,
        storage_backend = %config.storage,
        "starting keyhole gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config, InMemoryRecordStore::new()).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .clone()
                .ok_or("redis url is required when storage backend is redis")?;
            let store = RedisRecordStore::connect(&redis_url).await?;
            run_server(config, store).await?;
        }
    }

    Ok(())
}

async fn run_server<S: RecordStore + Clone>(
    config: CLI,
    store: S,
) -> Result<(), Box<dyn std::error::Error>> {
    let generator = HashGenerator::with_prefix(config.domain_prefix.clone());
    // Clones of the cache share one underlying map, so ingestion upserts
    // are immediately visible to redirect lookups.
    let cache = MokaResolutionCache::new();

    let importer = ImportService::new(store.clone(), cache.clone(), generator);
    let resolver = ResolverService::new(cache);

    let warmed = resolver.rehydrate(&store).await?;
    info!(records = warmed, "resolution cache warmed from record store");

    let state = AppState::new(Arc::new(importer), Arc::new(resolver));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state)).await?;
    Ok(())
}
