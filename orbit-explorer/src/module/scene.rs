///! Rendering collaborator interface
///!
///! The globe itself lives in the browser. The engine only talks to a
///! `SceneRenderer`, and `SceneMirror` records what the globe should show so
///! HTTP clients can pull it and apply it to their viewer.
use chrono::{DateTime, Utc};
use orbit_common::{PathColor, SatelliteId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::orbit::RenderError;

/// Operations the globe must support
pub trait SceneRenderer: Send {
    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), RenderError>;

    /// `None` removes the overlay
    fn set_path_overlay(&mut self, id: &str, color: Option<PathColor>) -> Result<(), RenderError>;

    /// Fly the camera to a group. Fire-and-forget: the engine never waits on it.
    fn focus_camera(&mut self, ids: &[SatelliteId]) -> Result<(), RenderError>;
}

/// Last camera request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraFocus {
    pub ids: Vec<SatelliteId>,
    pub requested_at: DateTime<Utc>,
}

/// Serializable copy of what the globe should be showing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub overlays: BTreeMap<SatelliteId, PathColor>,
    pub visible: BTreeSet<SatelliteId>,
    pub camera: Option<CameraFocus>,
}

/// In-process renderer backing the HTTP surface
#[derive(Debug, Default)]
pub struct SceneMirror {
    scene: SceneSnapshot,
}

impl SceneMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.clone()
    }

    pub fn overlay(&self, id: &str) -> Option<PathColor> {
        self.scene.overlays.get(id).copied()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.scene.visible.contains(id)
    }
}

impl SceneRenderer for SceneMirror {
    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), RenderError> {
        if visible {
            self.scene.visible.insert(id.to_string());
        } else {
            self.scene.visible.remove(id);
        }
        Ok(())
    }

    fn set_path_overlay(&mut self, id: &str, color: Option<PathColor>) -> Result<(), RenderError> {
        match color {
            Some(color) => {
                self.scene.overlays.insert(id.to_string(), color);
            }
            None => {
                self.scene.overlays.remove(id);
            }
        }
        Ok(())
    }

    fn focus_camera(&mut self, ids: &[SatelliteId]) -> Result<(), RenderError> {
        tracing::debug!("Camera focus requested on {} satellite(s)", ids.len());
        self.scene.camera = Some(CameraFocus {
            ids: ids.to_vec(),
            requested_at: Utc::now(),
        });
        Ok(())
    }
}
