///! Path highlight manager
///!
///! Owns the set of satellites that currently show a coloured path. Every
///! transition is mirrored to the renderer first; internal state only changes
///! once the renderer accepted the call.
use super::error::RenderError;
use super::store::SatelliteStore;
use crate::module::scene::SceneRenderer;
use orbit_common::{PathColor, SatelliteId};
use std::collections::{BTreeMap, HashMap};

pub struct PathHighlighter<R: SceneRenderer> {
    renderer: R,
    active: BTreeMap<SatelliteId, PathColor>,
    /// Last colour each satellite was shown with, survives `clear_all`
    remembered: HashMap<SatelliteId, PathColor>,
}

impl<R: SceneRenderer> PathHighlighter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            active: BTreeMap::new(),
            remembered: HashMap::new(),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn color_of(&self, id: &str) -> Option<PathColor> {
        self.active.get(id).copied()
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    /// Highlighted satellites in id order
    pub fn active(&self) -> impl Iterator<Item = (&str, PathColor)> + '_ {
        self.active.iter().map(|(id, color)| (id.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Show a path, or re-colour it when one is already shown.
    pub fn show(&mut self, id: &str, color: PathColor) -> Result<(), RenderError> {
        self.renderer.set_path_overlay(id, Some(color))?;

        if !self.active.contains_key(id) {
            if let Err(e) = self.renderer.set_visible(id, true) {
                if let Err(rollback) = self.renderer.set_path_overlay(id, None) {
                    tracing::warn!("Failed to roll back path overlay for {}: {}", id, rollback);
                }
                return Err(e);
            }
        }

        self.active.insert(id.to_string(), color);
        self.remembered.insert(id.to_string(), color);
        Ok(())
    }

    /// Remove a path. No-op when none is shown.
    pub fn hide(&mut self, id: &str) -> Result<(), RenderError> {
        let Some(previous) = self.active.get(id).copied() else {
            return Ok(());
        };

        self.renderer.set_path_overlay(id, None)?;
        if let Err(e) = self.renderer.set_visible(id, false) {
            if let Err(rollback) = self.renderer.set_path_overlay(id, Some(previous)) {
                tracing::warn!("Failed to restore path overlay for {}: {}", id, rollback);
            }
            return Err(e);
        }

        self.active.remove(id);
        Ok(())
    }

    /// Remove every path.
    ///
    /// Each satellite is handled on its own: the ones the renderer refused stay
    /// highlighted and are reported together.
    pub fn clear_all(&mut self) -> Result<(), RenderError> {
        let ids: Vec<SatelliteId> = self.active.keys().cloned().collect();
        let mut failed = Vec::new();

        for id in ids {
            if let Err(e) = self.hide(&id) {
                tracing::warn!("Failed to clear path for {}: {}", id, e);
                failed.push(id);
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(RenderError::ClearIncomplete { failed })
        }
    }

    /// Flip a path on or off.
    ///
    /// Turning on uses `color`, else the remembered colour, else white. Ids not
    /// in the store are ignored since they can come from stale UI rows.
    /// Returns the colour now shown.
    pub fn toggle(
        &mut self,
        store: &SatelliteStore,
        id: &str,
        color: Option<PathColor>,
    ) -> Result<Option<PathColor>, RenderError> {
        if !store.contains(id) {
            tracing::debug!("Ignoring path toggle for unknown satellite {}", id);
            return Ok(None);
        }

        if self.is_highlighted(id) {
            self.hide(id)?;
            return Ok(None);
        }

        let color = color
            .or_else(|| self.remembered.get(id).copied())
            .unwrap_or(PathColor::White);
        self.show(id, color)?;
        Ok(Some(color))
    }

    /// Ask the renderer to fly to a group; failures are logged only.
    pub fn focus_camera(&mut self, ids: &[SatelliteId]) {
        if ids.is_empty() {
            return;
        }
        if let Err(e) = self.renderer.focus_camera(ids) {
            tracing::warn!("Camera focus failed, keeping current view: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_support::FlakyRenderer;
    use orbit_common::Satellite;

    fn store() -> SatelliteStore {
        SatelliteStore::new(vec![
            Satellite::new("1", "one"),
            Satellite::new("2", "two"),
            Satellite::new("3", "three"),
        ])
    }

    fn highlighter() -> PathHighlighter<FlakyRenderer> {
        PathHighlighter::new(FlakyRenderer::default())
    }

    #[test]
    fn test_show_creates_and_recolours() {
        let mut hl = highlighter();
        hl.show("1", PathColor::Red).unwrap();
        assert_eq!(hl.color_of("1"), Some(PathColor::Red));
        assert!(hl.renderer().mirror.is_visible("1"));

        hl.show("1", PathColor::Blue).unwrap();
        assert_eq!(hl.len(), 1);
        assert_eq!(hl.color_of("1"), Some(PathColor::Blue));
        assert_eq!(hl.renderer().mirror.overlay("1"), Some(PathColor::Blue));
    }

    #[test]
    fn test_hide_is_noop_without_path() {
        let mut hl = highlighter();
        hl.hide("1").unwrap();
        assert!(hl.is_empty());
        assert_eq!(hl.renderer().calls, 0);
    }

    #[test]
    fn test_clear_all_twice() {
        let mut hl = highlighter();
        hl.show("1", PathColor::Red).unwrap();
        hl.show("2", PathColor::Green).unwrap();

        hl.clear_all().unwrap();
        assert!(hl.is_empty());
        assert_eq!(hl.renderer().mirror.snapshot().overlays.len(), 0);
        assert_eq!(hl.renderer().mirror.snapshot().visible.len(), 0);

        hl.clear_all().unwrap();
        assert!(hl.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let store = store();
        let mut hl = highlighter();
        hl.show("2", PathColor::Yellow).unwrap();

        let before: Vec<(String, PathColor)> = hl.active().map(|(i, c)| (i.to_string(), c)).collect();
        assert_eq!(hl.toggle(&store, "1", Some(PathColor::Red)).unwrap(), Some(PathColor::Red));
        assert_eq!(hl.toggle(&store, "1", Some(PathColor::Red)).unwrap(), None);
        let after: Vec<(String, PathColor)> = hl.active().map(|(i, c)| (i.to_string(), c)).collect();

        assert_eq!(before, after);
        assert_eq!(hl.renderer().mirror.overlay("1"), None);
    }

    #[test]
    fn test_toggle_off_ignores_colour() {
        let store = store();
        let mut hl = highlighter();
        hl.show("1", PathColor::Blue).unwrap();

        assert_eq!(hl.toggle(&store, "1", Some(PathColor::Red)).unwrap(), None);
        assert!(!hl.is_highlighted("1"));
    }

    #[test]
    fn test_toggle_unknown_id_is_silent() {
        let store = store();
        let mut hl = highlighter();
        assert_eq!(hl.toggle(&store, "99999", None).unwrap(), None);
        assert!(hl.is_empty());
        assert_eq!(hl.renderer().calls, 0);
    }

    #[test]
    fn test_toggle_uses_remembered_colour() {
        let store = store();
        let mut hl = highlighter();

        assert_eq!(hl.toggle(&store, "3", None).unwrap(), Some(PathColor::White));
        hl.show("1", PathColor::Yellow).unwrap();
        hl.clear_all().unwrap();

        assert_eq!(hl.toggle(&store, "1", None).unwrap(), Some(PathColor::Yellow));
    }

    #[test]
    fn test_failed_show_leaves_state_unchanged() {
        let mut hl = highlighter();
        hl.renderer.fail_overlay_for.insert("1".to_string());

        assert!(hl.show("1", PathColor::Red).is_err());
        assert!(hl.is_empty());
        assert_eq!(hl.renderer().mirror.overlay("1"), None);
    }

    #[test]
    fn test_failed_visibility_rolls_back_overlay() {
        let mut hl = highlighter();
        hl.renderer.fail_visible_for.insert("1".to_string());

        assert!(hl.show("1", PathColor::Red).is_err());
        assert!(hl.is_empty());
        assert_eq!(hl.renderer().mirror.overlay("1"), None);
    }

    #[test]
    fn test_failed_hide_keeps_path() {
        let mut hl = highlighter();
        hl.show("1", PathColor::Red).unwrap();
        hl.renderer.fail_visible_for.insert("1".to_string());

        assert!(hl.hide("1").is_err());
        assert_eq!(hl.color_of("1"), Some(PathColor::Red));
        assert_eq!(hl.renderer().mirror.overlay("1"), Some(PathColor::Red));
    }

    #[test]
    fn test_clear_all_reports_refused_paths() {
        let mut hl = highlighter();
        hl.show("1", PathColor::Red).unwrap();
        hl.show("2", PathColor::Green).unwrap();
        hl.renderer.fail_overlay_for.insert("2".to_string());

        let err = hl.clear_all().unwrap_err();
        assert_eq!(err, RenderError::ClearIncomplete { failed: vec!["2".to_string()] });
        assert!(!hl.is_highlighted("1"));
        assert!(hl.is_highlighted("2"));
        assert_eq!(hl.renderer().mirror.overlay("2"), Some(PathColor::Green));
    }

    #[test]
    fn test_camera_failure_is_swallowed() {
        let mut hl = highlighter();
        hl.show("1", PathColor::Red).unwrap();
        hl.renderer.fail_camera = true;

        hl.focus_camera(&["1".to_string()]);
        assert_eq!(hl.color_of("1"), Some(PathColor::Red));
    }
}
