//! Render instructions handed back to the UI collaborator.

use serde::{Deserialize, Serialize};

use crate::types::{OrbitClass, PathColor, Satellite, SatelliteId};

/// Format a uniqueness score the way the ranking tables show it.
///
/// Scores below 0.01 switch to exponent notation so tiny values stay readable.
pub fn format_uniqueness(score: Option<f64>) -> String {
    match score {
        Some(value) if value < 0.01 => exponential(value),
        Some(value) => format!("{:.2}", value),
        None => "N/A".to_string(),
    }
}

/// Two-digit mantissa with an explicitly signed exponent, e.g. `1.23e-3`, `0.00e+0`
fn exponential(value: f64) -> String {
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// One row of a top/bottom table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,            // 1-based position within its table
    pub id: SatelliteId,
    pub name: String,
    pub score: String,          // Pre-formatted, "N/A" when unknown
    pub uniqueness: Option<f64>,
}

impl RankingRow {
    fn from_satellite(index: usize, sat: &Satellite) -> Self {
        Self {
            rank: index + 1,
            id: sat.id.clone(),
            name: sat.display_name().to_string(),
            score: format_uniqueness(sat.uniqueness),
            uniqueness: sat.uniqueness,
        }
    }
}

/// Most/least unique tables for one orbit class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingView {
    pub orbit_class: OrbitClass,
    pub top_title: String,
    pub bottom_title: String,
    /// Most unique first
    pub top: Vec<RankingRow>,
    /// Least unique first
    pub bottom: Vec<RankingRow>,
    /// Ranked satellites the renderer refused to draw
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrendered: Vec<SatelliteId>,
}

impl RankingView {
    pub fn new(orbit_class: OrbitClass, top: &[&Satellite], bottom: &[&Satellite]) -> Self {
        Self {
            orbit_class,
            top_title: format!("{} Most Unique Orbits ({})", top.len(), orbit_class),
            bottom_title: format!("{} Least Unique Orbits ({})", bottom.len(), orbit_class),
            top: top.iter().enumerate().map(|(i, s)| RankingRow::from_satellite(i, s)).collect(),
            bottom: bottom.iter().enumerate().map(|(i, s)| RankingRow::from_satellite(i, s)).collect(),
            unrendered: Vec::new(),
        }
    }

    pub fn with_unrendered(mut self, ids: Vec<SatelliteId>) -> Self {
        self.unrendered = ids;
        self
    }

    pub fn top_ids(&self) -> Vec<&str> {
        self.top.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn bottom_ids(&self) -> Vec<&str> {
        self.bottom.iter().map(|r| r.id.as_str()).collect()
    }
}

/// A searched satellite and its resolved neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighbourView {
    pub target: Satellite,
    /// Neighbour-list order, dangling ids already dropped
    pub neighbours: Vec<Satellite>,
    pub summary: String,
    /// Satellites of this view the renderer refused to draw
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrendered: Vec<SatelliteId>,
}

impl NeighbourView {
    pub fn new(target: Satellite, neighbours: Vec<Satellite>) -> Self {
        let summary = if neighbours.is_empty() {
            format!("No neighbours found for NORAD ID: {}", target.id)
        } else {
            format!("{} Nearest Satellites for NORAD ID: {}", neighbours.len(), target.id)
        };
        Self {
            target,
            neighbours,
            summary,
            unrendered: Vec::new(),
        }
    }

    pub fn with_unrendered(mut self, ids: Vec<SatelliteId>) -> Self {
        self.unrendered = ids;
        self
    }
}

/// Search query that matched nothing, echoed back as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundNotice {
    pub query: String,
}

impl NotFoundNotice {
    pub fn message(&self) -> String {
        format!("NORAD ID not found in data source: {}", self.query)
    }
}

/// Result of a neighbour-row click
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathToggle {
    pub id: SatelliteId,
    /// Colour now shown, `None` when the path was removed or the id was unknown
    pub color: Option<PathColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Ranking(RankingView),
    Neighbours(NeighbourView),
    NotFound(NotFoundNotice),
    PathToggled(PathToggle),
    Cleared,
}
