///! Orbit class filter
use orbit_common::{OrbitClass, Satellite};

/// Satellites whose orbit class equals `class`, in input order.
///
/// Records with an unrecognised class carry `None` and never match.
pub fn filter_by_class(all: &[Satellite], class: OrbitClass) -> Vec<&Satellite> {
    all.iter()
        .filter(|sat| sat.orbit_class == Some(class))
        .collect()
}
