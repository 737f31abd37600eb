use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Handle;

use medswap_ai::{AnalyzerConfig, InventoryWatcher};
use medswap_api::app::{build_app, AppServices};
use medswap_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    medswap_observability::init();

    let config = ApiConfig::from_env();
    let services = Arc::new(
        AppServices::from_config(&config, AnalyzerConfig::from_env())
            .context("failed to load demo catalogue")?,
    );

    // Keep the displayed analysis in step with the local inventory.
    let watcher = InventoryWatcher::default()
        .spawn(services.store.clone(), services.coordinator.clone(), Handle::current())
        .context("failed to start inventory watcher")?;
    drop(
        services
            .coordinator
            .spawn_refresh_from(&*services.store, &Handle::current()),
    );

    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await?;

    tokio::task::spawn_blocking(move || watcher.shutdown()).await?;
    Ok(())
}
