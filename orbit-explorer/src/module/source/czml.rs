///! CZML adapter
///!
///! Turns a CZML document into typed satellite records once at load time, so
///! nothing downstream has to probe optional packet properties.
use anyhow::{Context, Result};
use orbit_common::{OrbitClass, Satellite, SatelliteId};
use serde_json::Value;

const DOCUMENT_PACKET_ID: &str = "document";

/// Parse a CZML document (JSON array of packets)
pub fn parse_czml(content: &str) -> Result<Vec<Satellite>> {
    let document: Value = serde_json::from_str(content).context("CZML is not valid JSON")?;
    let packets = document
        .as_array()
        .context("CZML document must be a JSON array of packets")?;

    let mut satellites = Vec::with_capacity(packets.len());
    let mut skipped = 0;

    for packet in packets {
        match packet_to_satellite(packet) {
            Some(sat) => satellites.push(sat),
            None => skipped += 1,
        }
    }

    tracing::debug!(
        "Parsed {} satellites from {} CZML packets ({} skipped)",
        satellites.len(),
        packets.len(),
        skipped
    );

    Ok(satellites)
}

/// `None` for the document packet and packets without an id
fn packet_to_satellite(packet: &Value) -> Option<Satellite> {
    let id = id_value(packet.get("id")?)?;
    if id == DOCUMENT_PACKET_ID {
        return None;
    }

    let name = packet
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut sat = Satellite::new(id, name);

    if let Some(properties) = packet.get("properties") {
        sat.orbit_class = properties
            .get("orbit_class")
            .map(unwrap_czml_value)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<OrbitClass>().ok());

        sat.uniqueness = properties
            .get("uniqueness")
            .map(unwrap_czml_value)
            .and_then(Value::as_f64);

        sat.neighbours = properties
            .get("neighbours")
            .map(|v| neighbour_ids(unwrap_czml_value(v)))
            .unwrap_or_default();
    }

    Some(sat)
}

/// Strip the `{"number": ..}` style wrappers CZML allows around values
fn unwrap_czml_value(value: &Value) -> &Value {
    if let Value::Object(map) = value {
        if map.len() == 1 {
            for key in ["number", "string", "array", "value"] {
                if let Some(inner) = map.get(key) {
                    return inner;
                }
            }
        }
    }
    value
}

/// Ids arrive as strings or bare numbers
fn id_value(value: &Value) -> Option<SatelliteId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Neighbours are either a plain array or an object keyed by rank ("1", "2", ...)
fn neighbour_ids(value: &Value) -> Vec<SatelliteId> {
    match value {
        Value::Array(items) => items.iter().filter_map(id_value).collect(),
        Value::Object(map) => {
            let mut ranked: Vec<(Option<u64>, &String, &Value)> = map
                .iter()
                .map(|(key, v)| (key.trim().parse::<u64>().ok(), key, v))
                .collect();
            // Numeric ranks first in numeric order, anything else after by key
            ranked.sort_by(|a, b| match (a.0, b.0) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.1.cmp(b.1),
            });
            ranked.into_iter().filter_map(|(_, _, v)| id_value(v)).collect()
        }
        _ => Vec::new(),
    }
}
