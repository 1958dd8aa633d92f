use layers::vector::{VectorLayer, VectorLayerSnapshot};
use runtime::PointerEvent;
use scene::entity::EntityId;

use crate::basemap::{MapDisplayState, toggle_basemap};
use crate::config::{AppConfig, EngineSettings};
use crate::demo::seed_demo_shape;
use crate::drawing::{DrawingOutcome, DrawingSession, DrawingState};
use crate::export::{ExportError, PolygonData};
use crate::viewer::{MountTarget, Viewer, create_viewer};

/// One mounted map: the viewer plus the basemap and drawing state that
/// operate on it. UI layers call into this and nothing below it.
#[derive(Debug)]
pub struct MapApp {
    config: AppConfig,
    viewer: Viewer,
    basemap: MapDisplayState,
    drawing: DrawingSession,
    vector_layer: VectorLayer,
}

impl MapApp {
    pub fn mount(config: AppConfig, target: MountTarget) -> Self {
        let engine = EngineSettings::from_config(&config);
        let viewer = create_viewer(target, &engine);
        Self {
            config,
            viewer,
            basemap: MapDisplayState::default(),
            drawing: DrawingSession::new(),
            vector_layer: VectorLayer::new(0),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    pub fn basemap(&self) -> MapDisplayState {
        self.basemap
    }

    pub fn drawing(&self) -> &DrawingSession {
        &self.drawing
    }

    /// Returns whether the alternate basemap is now mounted.
    pub fn toggle_basemap(&mut self) -> bool {
        toggle_basemap(
            &mut self.viewer,
            &mut self.basemap,
            self.config.basemap_token(),
        );
        self.basemap.using_alternate_basemap
    }

    /// Returns whether edit mode is now active.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.drawing.toggle_edit_mode(&mut self.viewer) == DrawingState::Capturing
    }

    pub fn cancel_edit_mode(&mut self) {
        self.drawing.cancel_edit_mode(&mut self.viewer);
    }

    /// Delivers a pointer event from the render surface.
    ///
    /// The event reaches the drawing session only if the session's listener
    /// is registered for its kind.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> DrawingOutcome {
        let targets = self.viewer.input().route(&event);
        match self.drawing.listener() {
            Some(listener) if targets.contains(&listener) => {
                self.drawing.on_pointer_event(&mut self.viewer, &event)
            }
            _ => DrawingOutcome::Ignored,
        }
    }

    pub fn seed_demo(&mut self) -> EntityId {
        seed_demo_shape(&mut self.viewer)
    }

    /// Draw data for every polygon, previews resolved as of this call.
    pub fn vector_snapshot(&self) -> VectorLayerSnapshot {
        self.vector_layer.extract(self.viewer.entities())
    }

    /// Polygons committed by the drawing session that still exist.
    pub fn export_drawn(&self) -> Result<Vec<PolygonData>, ExportError> {
        self.drawing
            .completed()
            .iter()
            .filter(|id| self.viewer.entities().contains(**id))
            .map(|id| PolygonData::from_entity(self.viewer.entities(), *id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::MapApp;
    use crate::config::{AppConfig, BASEMAP_TOKEN_VAR};
    use crate::drawing::DrawingOutcome;
    use crate::viewer::MountTarget;
    use layers::imagery::ImageryProvider;
    use runtime::PointerEvent;

    fn app() -> MapApp {
        let env: HashMap<String, String> =
            [(BASEMAP_TOKEN_VAR.to_string(), "pk.valid".to_string())].into();
        MapApp::mount(
            AppConfig::resolve(&env),
            MountTarget::new("globe", 1000.0, 800.0),
        )
    }

    #[test]
    fn draws_a_triangle_around_the_view_center() {
        let mut app = app();
        assert!(app.toggle_edit_mode());

        for (x, y) in [(500.0, 400.0), (540.0, 400.0), (520.0, 360.0)] {
            let outcome = app.dispatch_pointer(PointerEvent::left_click(x, y));
            assert!(matches!(outcome, DrawingOutcome::PointAdded(_)));
        }
        let outcome = app.dispatch_pointer(PointerEvent::right_click(500.0, 400.0));

        let DrawingOutcome::Completed(id) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert!(!app.drawing().is_edit_mode());
        assert!(app.drawing().points().is_empty());
        assert_eq!(app.viewer().entities().len(), 1);
        assert_eq!(app.viewer().input().listener_count(), 0);

        let exported = app.export_drawn().expect("export");
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].id, id.to_string());
        assert_eq!(exported[0].positions.len(), 3);
    }

    #[test]
    fn one_click_then_right_click_commits_nothing() {
        let mut app = app();
        app.toggle_edit_mode();
        app.dispatch_pointer(PointerEvent::left_click(500.0, 400.0));

        let outcome = app.dispatch_pointer(PointerEvent::right_click(500.0, 400.0));

        assert_eq!(outcome, DrawingOutcome::Cancelled);
        assert!(app.viewer().entities().is_empty());
        assert!(app.drawing().points().is_empty());
        assert!(!app.drawing().is_edit_mode());
    }

    #[test]
    fn clicks_outside_edit_mode_are_not_delivered() {
        let mut app = app();
        let outcome = app.dispatch_pointer(PointerEvent::left_click(500.0, 400.0));
        assert_eq!(outcome, DrawingOutcome::Ignored);
        assert_eq!(app.drawing().point_count(), 0);
    }

    #[test]
    fn preview_shows_up_in_snapshots_as_points_arrive() {
        let mut app = app();
        app.seed_demo();
        app.toggle_edit_mode();
        assert_eq!(app.vector_snapshot().fills.len(), 1);

        for (x, y) in [(500.0, 400.0), (540.0, 400.0), (520.0, 360.0)] {
            app.dispatch_pointer(PointerEvent::left_click(x, y));
        }
        assert_eq!(app.vector_snapshot().fills.len(), 2);

        app.cancel_edit_mode();
        assert_eq!(app.vector_snapshot().fills.len(), 1);
    }

    #[test]
    fn basemap_toggle_uses_configured_token() {
        let mut app = app();
        assert!(app.toggle_basemap());
        assert_eq!(
            app.viewer().imagery_layers().providers(),
            vec![&ImageryProvider::mapbox_style("streets-v11", "pk.valid")]
        );
        assert!(!app.toggle_basemap());
        assert!(!app.basemap().using_alternate_basemap);
    }
}
