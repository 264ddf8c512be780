//! Cache Aside - HTTP service demonstrating the cache-aside pattern
//!
//! Call any read endpoint twice: the first response pays the simulated
//! database latency, the second is served from the cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::{signal, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_aside::{
    api::create_router,
    cache::{DistributedCache, MemoryStore, RedisStore},
    database::{Latency, SimulatedDatabase},
    spawn_cleanup_task, AppState, Config,
};

/// Main entry point for the cache-aside server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis, or fall back to the in-memory store and its sweep task
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_aside=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache-aside server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, namespace={}, port={}, simulate_latency={}",
        if config.redis_url.is_some() { "redis" } else { "memory" },
        config.instance_name,
        config.server_port,
        config.simulate_latency
    );

    let (store, cleanup_handle): (Arc<dyn DistributedCache>, Option<JoinHandle<()>>) =
        match &config.redis_url {
            Some(url) => {
                let store: Arc<dyn DistributedCache> = Arc::new(
                    RedisStore::connect(url)
                        .await
                        .context("failed to initialize Redis cache store")?,
                );
                (store, None)
            }
            None => {
                warn!("REDIS_URL not set, using in-memory cache store");
                let memory = Arc::new(MemoryStore::new());
                let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
                let store: Arc<dyn DistributedCache> = memory;
                (store, Some(handle))
            }
        };

    let latency = if config.simulate_latency {
        Latency::default()
    } else {
        Latency::none()
    };
    let state = AppState::with_store(store, &config.instance_name, SimulatedDatabase::new(latency));

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Expiration sweep task aborted");
    }
}
