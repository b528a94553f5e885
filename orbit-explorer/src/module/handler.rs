///! Routes UI events onto the orbit explorer.
use orbit_common::{NotFoundNotice, OrbitClass, SatelliteId, SelectionContext, View};
use serde::{Deserialize, Serialize};

use super::orbit::{ExplorerError, OrbitExplorer};
use super::scene::SceneRenderer;

/// Events a UI client can deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    OrbitClassChanged { orbit_class: OrbitClass },
    SearchSubmitted { query: String },
    NeighbourRowClicked { id: SatelliteId },
    RandomRequested,
    HomeRequested,
}

/// Event router with the explorer it drives
pub struct EventRouter<R: SceneRenderer> {
    explorer: OrbitExplorer<R>,
}

impl<R: SceneRenderer> EventRouter<R> {
    pub fn new(explorer: OrbitExplorer<R>) -> Self {
        Self { explorer }
    }

    pub fn explorer(&self) -> &OrbitExplorer<R> {
        &self.explorer
    }

    pub fn selection(&self) -> SelectionContext {
        self.explorer.selection()
    }

    /// Handle one event to completion.
    ///
    /// A search that matches nothing is a normal outcome for the UI and comes
    /// back as `View::NotFound`.
    pub fn handle(&mut self, event: UiEvent) -> Result<View, ExplorerError> {
        tracing::debug!("Handling UI event: {:?}", event);

        let result = match event {
            UiEvent::OrbitClassChanged { orbit_class } => {
                self.explorer.select_orbit_class(orbit_class).map(View::Ranking)
            }
            UiEvent::SearchSubmitted { query } => self.explorer.search(&query).map(View::Neighbours),
            UiEvent::RandomRequested => self.explorer.search_random().map(View::Neighbours),
            UiEvent::NeighbourRowClicked { id } => self.explorer.toggle_path(&id).map(View::PathToggled),
            UiEvent::HomeRequested => self.explorer.reset().map(|_| View::Cleared),
        };

        match result {
            Err(ExplorerError::NotFound { query }) => {
                let notice = NotFoundNotice { query };
                tracing::info!("{}", notice.message());
                Ok(View::NotFound(notice))
            }
            Err(e) => {
                tracing::warn!("UI event failed: {}", e);
                Err(e)
            }
            ok => ok,
        }
    }
}
