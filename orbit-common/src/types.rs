use serde::{Deserialize, Serialize};

/// Satellite identifier (NORAD catalog number as text, e.g. "25544")
pub type SatelliteId = String;

/// Orbital regime bucket matching the CZML `orbit_class` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitClass {
    #[serde(rename = "LEO")]
    Leo,
    #[serde(rename = "MEO")]
    Meo,
    #[serde(rename = "GEO")]
    Geo,
    #[serde(rename = "HEO")]
    Heo,
}

impl OrbitClass {
    pub const ALL: [OrbitClass; 4] = [OrbitClass::Leo, OrbitClass::Meo, OrbitClass::Geo, OrbitClass::Heo];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrbitClass::Leo => "LEO",
            OrbitClass::Meo => "MEO",
            OrbitClass::Geo => "GEO",
            OrbitClass::Heo => "HEO",
        }
    }
}

impl std::fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrbitClass {
    type Err = String;

    /// Exact match only: "leo" is not a recognised class.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEO" => Ok(OrbitClass::Leo),
            "MEO" => Ok(OrbitClass::Meo),
            "GEO" => Ok(OrbitClass::Geo),
            "HEO" => Ok(OrbitClass::Heo),
            _ => Err(format!("Unknown orbit class: {}", s)),
        }
    }
}

/// Colour tag of a path overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathColor {
    Red,     // Most unique orbits
    Green,   // Least unique orbits
    Blue,    // Searched satellite
    Yellow,  // Nearest neighbours
    White,   // Fallback when nothing was remembered
}

/// A loaded satellite. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub id: SatelliteId,
    #[serde(default)]
    pub name: String,
    /// `None` when the source carried a class outside the fixed set
    #[serde(default)]
    pub orbit_class: Option<OrbitClass>,
    #[serde(default)]
    pub uniqueness: Option<f64>,
    /// Precomputed nearest neighbours, closest first. May dangle.
    #[serde(default)]
    pub neighbours: Vec<SatelliteId>,
}

impl Satellite {
    pub fn new(id: impl Into<SatelliteId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            orbit_class: None,
            uniqueness: None,
            neighbours: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: OrbitClass) -> Self {
        self.orbit_class = Some(class);
        self
    }

    pub fn with_uniqueness(mut self, score: f64) -> Self {
        self.uniqueness = Some(score);
        self
    }

    pub fn with_neighbours<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SatelliteId>,
    {
        self.neighbours = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Name for display, "N/A" when empty
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "N/A" } else { &self.name }
    }
}

/// What the UI currently has selected.
///
/// `Search` means no orbit-class radio is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "orbit_class", rename_all = "snake_case")]
pub enum SelectionContext {
    OrbitClass(OrbitClass),
    Search,
}

impl Default for SelectionContext {
    fn default() -> Self {
        SelectionContext::OrbitClass(OrbitClass::Leo)
    }
}
