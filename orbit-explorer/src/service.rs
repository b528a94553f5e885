use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use orbit_common::{SelectionContext, View};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::module::handler::{EventRouter, UiEvent};
use crate::module::orbit::{ExplorerError, OrbitExplorer};
use crate::module::scene::{SceneMirror, SceneSnapshot};

/// Reply to every UI event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub view: View,
    pub selection: SelectionContext,
    /// What the globe should show after the event
    pub scene: SceneSnapshot,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    id: Option<String>,
}

/// Explorer engine shared by the HTTP handlers.
///
/// The mutex serialises events: each one is applied completely before the
/// next starts.
pub struct ExplorerService {
    router: Mutex<EventRouter<SceneMirror>>,
}

impl ExplorerService {
    pub fn new(explorer: OrbitExplorer<SceneMirror>) -> Arc<Self> {
        Self::from_router(EventRouter::new(explorer))
    }

    /// Wrap a router that already handled startup events
    pub fn from_router(router: EventRouter<SceneMirror>) -> Arc<Self> {
        Arc::new(Self {
            router: Mutex::new(router),
        })
    }

    pub async fn dispatch(&self, event: UiEvent) -> Result<EventResponse, ExplorerError> {
        let mut router = self.router.lock().await;
        let view = router.handle(event)?;

        Ok(EventResponse {
            event_id: Uuid::now_v7(),
            view,
            selection: router.selection(),
            scene: router.explorer().highlighter().renderer().snapshot(),
        })
    }

    pub async fn scene(&self) -> SceneSnapshot {
        self.router.lock().await.explorer().highlighter().renderer().snapshot()
    }
}

/// Error body returned to UI clients
struct ApiError(ExplorerError);

impl From<ExplorerError> for ApiError {
    fn from(e: ExplorerError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ExplorerError::EmptyQuery => StatusCode::BAD_REQUEST,
            ExplorerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ExplorerError::InsufficientEntities { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ExplorerError::Render(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn handle_event(
    State(service): State<Arc<ExplorerService>>,
    Json(event): Json<UiEvent>,
) -> Result<Json<EventResponse>, ApiError> {
    debug!("Received UI event: {:?}", event);
    Ok(Json(service.dispatch(event).await?))
}

/// Deep-link form of a search, `/api/search?id=25544`
async fn handle_search(
    State(service): State<Arc<ExplorerService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EventResponse>, ApiError> {
    let query = params.id.unwrap_or_default();
    Ok(Json(service.dispatch(UiEvent::SearchSubmitted { query }).await?))
}

async fn handle_scene(State(service): State<Arc<ExplorerService>>) -> Json<SceneSnapshot> {
    Json(service.scene().await)
}

pub fn router(service: Arc<ExplorerService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", post(handle_event))
        .route("/api/search", get(handle_search))
        .route("/api/scene", get(handle_scene))
        .with_state(service)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the HTTP surface until Ctrl-C
pub async fn serve(service: Arc<ExplorerService>, address: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Orbit explorer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received.");
        })
        .await?;

    Ok(())
}
