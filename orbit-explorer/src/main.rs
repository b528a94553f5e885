use orbit_explorer::config;
use orbit_explorer::module::handler::{EventRouter, UiEvent};
use orbit_explorer::module::orbit::{OrbitExplorer, SatelliteStore};
use orbit_explorer::module::scene::SceneMirror;
use orbit_explorer::module::source;
use orbit_explorer::service::{self, ExplorerService};

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = config::read_config()?;

    // Initialize logging
    let _logging_guard = orbit_explorer::logging::init_logging(
        &config.log_dir,
        "orbit-explorer",
        &config.log_level,
        Duration::from_secs(config.log_retention_days * 24 * 60 * 60),
    )?;

    tracing::info!("Orbit Explorer starting...");
    tracing::info!("Server will listen on {}", config.server_address());

    // Entities are loaded once; without them there is nothing to explore
    let source = source::from_config(&config.source);
    tracing::info!("Loading satellites from {}", source.describe());
    let satellites = source
        .load_all()
        .await
        .with_context(|| format!("Failed to load satellites from {}", source.describe()))?;

    let store = Arc::new(SatelliteStore::new(satellites));
    tracing::info!("Loaded {} satellites", store.len());

    let explorer = OrbitExplorer::new(store, SceneMirror::new()).with_ranking_size(config.ranking_size);
    let mut router = EventRouter::new(explorer);

    // Initial view, then the deep link on top of it
    if let Err(e) = router.handle(UiEvent::OrbitClassChanged {
        orbit_class: config.default_orbit_class,
    }) {
        tracing::warn!("Initial {} ranking unavailable: {}", config.default_orbit_class, e);
    }

    if let Some(query) = config.initial_search.as_deref().filter(|q| !q.trim().is_empty()) {
        tracing::info!("Applying initial search '{}'", query);
        if let Err(e) = router.handle(UiEvent::SearchSubmitted { query: query.to_string() }) {
            tracing::warn!("Initial search failed: {}", e);
        }
    }

    let explorer_service = ExplorerService::from_router(router);
    service::serve(explorer_service, &config.server_address()).await?;

    tracing::info!("Orbit Explorer stopped");
    Ok(())
}
