///! Search / neighbour resolution
use super::error::ExplorerError;
use super::store::SatelliteStore;
use orbit_common::Satellite;
use rand::Rng;

/// Query that picks a satellite at random (case-insensitive)
pub const RANDOM_QUERY: &str = "random";

/// A found satellite and its neighbours
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSearch {
    pub target: Satellite,
    /// Neighbour-list order, ids missing from the store dropped
    pub neighbours: Vec<Satellite>,
}

pub fn is_random_query(query: &str) -> bool {
    query.eq_ignore_ascii_case(RANDOM_QUERY)
}

/// Resolve `query` to a satellite and its neighbour records.
///
/// "random" draws uniformly from the whole store regardless of orbit class.
/// Unknown ids fail with the query echoed back; dangling neighbour ids are
/// skipped.
pub fn resolve<G: Rng>(
    store: &SatelliteStore,
    query: &str,
    rng: &mut G,
) -> Result<ResolvedSearch, ExplorerError> {
    let not_found = || ExplorerError::NotFound { query: query.to_string() };

    let target = if is_random_query(query) {
        if store.is_empty() {
            return Err(not_found());
        }
        let index = rng.random_range(0..store.len());
        &store.get_all()[index]
    } else {
        store.get_by_id(query).ok_or_else(not_found)?
    };

    let mut neighbours = Vec::with_capacity(target.neighbours.len());
    for id in &target.neighbours {
        match store.get_by_id(id) {
            Some(sat) => neighbours.push(sat.clone()),
            None => tracing::debug!("Neighbour {} of {} not in store, skipping", id, target.id),
        }
    }

    if neighbours.is_empty() && !target.neighbours.is_empty() {
        tracing::info!(
            "None of the {} neighbour(s) of {} could be resolved",
            target.neighbours.len(),
            target.id
        );
    }

    Ok(ResolvedSearch {
        target: target.clone(),
        neighbours,
    })
}
