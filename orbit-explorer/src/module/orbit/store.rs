///! Read-only satellite store keyed by NORAD ID
use orbit_common::{Satellite, SatelliteId};
use std::collections::HashMap;

/// Loaded satellite collection
///
/// Built once at startup and shared read-only afterwards. Insertion order is
/// kept so filtering and random picks are reproducible.
#[derive(Debug, Default)]
pub struct SatelliteStore {
    satellites: Vec<Satellite>,
    index: HashMap<SatelliteId, usize>,
}

impl SatelliteStore {
    /// Build the store from loaded records.
    ///
    /// A repeated id replaces the earlier record but keeps its position.
    pub fn new(records: impl IntoIterator<Item = Satellite>) -> Self {
        let mut satellites: Vec<Satellite> = Vec::new();
        let mut index = HashMap::new();

        for sat in records {
            match index.get(&sat.id) {
                Some(&pos) => {
                    tracing::debug!("Duplicate satellite id {}, keeping latest record", sat.id);
                    satellites[pos] = sat;
                }
                None => {
                    index.insert(sat.id.clone(), satellites.len());
                    satellites.push(sat);
                }
            }
        }

        Self { satellites, index }
    }

    /// All satellites in load order
    pub fn get_all(&self) -> &[Satellite] {
        &self.satellites
    }

    /// Exact, case-sensitive lookup
    pub fn get_by_id(&self, id: &str) -> Option<&Satellite> {
        self.index.get(id).map(|&pos| &self.satellites[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}
