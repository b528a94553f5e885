//! Renderer double that can be told to refuse calls.
use super::error::RenderError;
use crate::module::scene::{SceneMirror, SceneRenderer};
use orbit_common::{PathColor, SatelliteId};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct FlakyRenderer {
    pub mirror: SceneMirror,
    pub fail_overlay_for: HashSet<SatelliteId>,
    pub fail_visible_for: HashSet<SatelliteId>,
    pub fail_camera: bool,
    pub calls: usize,
}

impl SceneRenderer for FlakyRenderer {
    fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), RenderError> {
        self.calls += 1;
        if self.fail_visible_for.contains(id) {
            return Err(RenderError::Rejected {
                operation: "set_visible",
                id: id.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.mirror.set_visible(id, visible)
    }

    fn set_path_overlay(&mut self, id: &str, color: Option<PathColor>) -> Result<(), RenderError> {
        self.calls += 1;
        if self.fail_overlay_for.contains(id) {
            return Err(RenderError::Rejected {
                operation: "set_path_overlay",
                id: id.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.mirror.set_path_overlay(id, color)
    }

    fn focus_camera(&mut self, ids: &[SatelliteId]) -> Result<(), RenderError> {
        self.calls += 1;
        if self.fail_camera {
            return Err(RenderError::Unavailable("camera offline".to_string()));
        }
        self.mirror.focus_camera(ids)
    }
}
