///! Orbit explorer - the state engine behind the globe UI
///!
///! Holds the shared store, the highlight manager and the current selection.
///! Every entry point runs to completion: highlight state is reset and rebuilt
///! before a view is returned, then the camera is asked to follow.
use super::{
    error::ExplorerError,
    filter::filter_by_class,
    highlight::PathHighlighter,
    ranker::{rank_top_bottom, DEFAULT_RANKING_SIZE},
    resolver::{resolve, RANDOM_QUERY},
    store::SatelliteStore,
};
use crate::module::scene::SceneRenderer;
use orbit_common::{
    NeighbourView, OrbitClass, PathColor, PathToggle, RankingView, SatelliteId, SelectionContext,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

pub struct OrbitExplorer<R: SceneRenderer> {
    store: Arc<SatelliteStore>,
    highlighter: PathHighlighter<R>,
    selection: SelectionContext,
    ranking_size: usize,
    rng: StdRng,
}

impl<R: SceneRenderer> OrbitExplorer<R> {
    pub fn new(store: Arc<SatelliteStore>, renderer: R) -> Self {
        Self {
            store,
            highlighter: PathHighlighter::new(renderer),
            selection: SelectionContext::default(),
            ranking_size: DEFAULT_RANKING_SIZE,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_ranking_size(mut self, size: usize) -> Self {
        self.ranking_size = size;
        self
    }

    /// Replace the random source, used for reproducible "random" searches
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn store(&self) -> &SatelliteStore {
        &self.store
    }

    pub fn highlighter(&self) -> &PathHighlighter<R> {
        &self.highlighter
    }

    pub fn selection(&self) -> SelectionContext {
        self.selection
    }

    pub fn ranking_size(&self) -> usize {
        self.ranking_size
    }

    /// Switch to an orbit class and show its most/least unique satellites.
    ///
    /// Paths are cleared before ranking, so a class that is too small leaves
    /// an empty globe and the error. Paths the renderer refuses are listed in
    /// `unrendered` and the rest of the ranking is still drawn.
    pub fn select_orbit_class(&mut self, class: OrbitClass) -> Result<RankingView, ExplorerError> {
        self.selection = SelectionContext::OrbitClass(class);
        self.highlighter.clear_all()?;

        let store = Arc::clone(&self.store);
        let members = filter_by_class(store.get_all(), class);
        let ranking = rank_top_bottom(&members, self.ranking_size)?;

        let mut unrendered = Vec::new();
        for sat in &ranking.top {
            self.show_or_record(&sat.id, PathColor::Red, &mut unrendered);
        }
        for sat in &ranking.bottom {
            self.show_or_record(&sat.id, PathColor::Green, &mut unrendered);
        }

        let focus: Vec<SatelliteId> = ranking
            .top
            .iter()
            .chain(ranking.bottom.iter())
            .map(|s| s.id.clone())
            .collect();
        self.highlighter.focus_camera(&focus);

        tracing::info!(
            "Ranked {} {} satellites, showing top/bottom {}",
            members.len(),
            class,
            self.ranking_size
        );
        Ok(RankingView::new(class, &ranking.top, &ranking.bottom).with_unrendered(unrendered))
    }

    /// Look up a satellite and show it with its nearest neighbours.
    ///
    /// The selection switches to search mode even when nothing is found; the
    /// highlighted paths only change on success. Refused paths are listed in
    /// `unrendered`.
    pub fn search(&mut self, query: &str) -> Result<NeighbourView, ExplorerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExplorerError::EmptyQuery);
        }

        self.selection = SelectionContext::Search;
        let resolved = resolve(&self.store, query, &mut self.rng)?;

        self.highlighter.clear_all()?;
        let mut unrendered = Vec::new();
        self.show_or_record(&resolved.target.id, PathColor::Blue, &mut unrendered);
        for sat in &resolved.neighbours {
            self.show_or_record(&sat.id, PathColor::Yellow, &mut unrendered);
        }

        let focus: Vec<SatelliteId> = std::iter::once(&resolved.target)
            .chain(resolved.neighbours.iter())
            .map(|s| s.id.clone())
            .collect();
        self.highlighter.focus_camera(&focus);

        tracing::info!(
            "Search '{}' resolved to {} with {} neighbour(s)",
            query,
            resolved.target.id,
            resolved.neighbours.len()
        );
        Ok(NeighbourView::new(resolved.target, resolved.neighbours).with_unrendered(unrendered))
    }

    pub fn search_random(&mut self) -> Result<NeighbourView, ExplorerError> {
        self.search(RANDOM_QUERY)
    }

    /// Flip one satellite's path, e.g. from a neighbour-row click
    pub fn toggle_path(&mut self, id: &str) -> Result<PathToggle, ExplorerError> {
        let store = Arc::clone(&self.store);
        let color = self.highlighter.toggle(&store, id, None)?;
        Ok(PathToggle {
            id: id.to_string(),
            color,
        })
    }

    /// Remove every path without touching the selection
    pub fn reset(&mut self) -> Result<(), ExplorerError> {
        self.highlighter.clear_all()?;
        Ok(())
    }

    /// Show one path of a rebuild. A refusal leaves that satellite unhighlighted
    /// and is recorded instead of stopping the rebuild.
    fn show_or_record(&mut self, id: &str, color: PathColor, unrendered: &mut Vec<SatelliteId>) {
        if let Err(e) = self.highlighter.show(id, color) {
            tracing::warn!("Failed to show {:?} path for {}: {}", color, id, e);
            if !unrendered.iter().any(|u| u == id) {
                unrendered.push(id.to_string());
            }
        }
    }
}
