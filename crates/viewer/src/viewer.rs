use foundation::math::{Ellipsoid, Vec2, Vec3};
use layers::imagery::{ImageryLayerCollection, ImageryProvider};
use runtime::{InputRouter, ListenerId, PointerEventKind};
use scene::EntityCollection;
use scene::camera::Camera;
use scene::entity::{Entity, EntityId};
use scene::picking::SurfacePicker;
use tracing::debug;

use crate::basemap::default_imagery;
use crate::config::EngineSettings;
use crate::host::DrawingHost;

/// The page element the render surface attaches to.
#[derive(Debug, Clone, PartialEq)]
pub struct MountTarget {
    pub element_id: String,
    pub width: f64,
    pub height: f64,
}

impl MountTarget {
    pub fn new(element_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            element_id: element_id.into(),
            width,
            height,
        }
    }
}

/// Auxiliary UI widgets drawn around the globe.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub animation: bool,
    pub timeline: bool,
    pub fullscreen_button: bool,
    pub base_layer_picker: bool,
    pub geocoder: bool,
    pub home_button: bool,
    pub scene_mode_picker: bool,
    pub navigation_help_button: bool,
    pub info_box: bool,
    pub selection_indicator: bool,
    pub vr_button: bool,
}

impl ViewerOptions {
    /// Every widget off: a bare globe.
    pub const fn minimal() -> Self {
        Self {
            animation: false,
            timeline: false,
            fullscreen_button: false,
            base_layer_picker: false,
            geocoder: false,
            home_button: false,
            scene_mode_picker: false,
            navigation_help_button: false,
            info_box: false,
            selection_indicator: false,
            vr_button: false,
        }
    }

    pub fn enabled_widgets(&self) -> Vec<&'static str> {
        [
            ("animation", self.animation),
            ("timeline", self.timeline),
            ("fullscreen_button", self.fullscreen_button),
            ("base_layer_picker", self.base_layer_picker),
            ("geocoder", self.geocoder),
            ("home_button", self.home_button),
            ("scene_mode_picker", self.scene_mode_picker),
            ("navigation_help_button", self.navigation_help_button),
            ("info_box", self.info_box),
            ("selection_indicator", self.selection_indicator),
            ("vr_button", self.vr_button),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            animation: true,
            timeline: true,
            fullscreen_button: true,
            base_layer_picker: true,
            geocoder: true,
            home_button: true,
            scene_mode_picker: true,
            navigation_help_button: true,
            info_box: true,
            selection_indicator: true,
            vr_button: false,
        }
    }
}

/// A globe render surface and the collections it draws.
#[derive(Debug)]
pub struct Viewer {
    target: MountTarget,
    options: ViewerOptions,
    engine: EngineSettings,
    entities: EntityCollection,
    imagery_layers: ImageryLayerCollection,
    camera: Camera,
    ellipsoid: Ellipsoid,
    input: InputRouter,
}

/// Builds the application's viewer: bare chrome and the offline basemap.
pub fn create_viewer(target: MountTarget, engine: &EngineSettings) -> Viewer {
    Viewer::new(
        target,
        ViewerOptions::minimal(),
        engine.clone(),
        Some(default_imagery(engine)),
    )
}

impl Viewer {
    pub fn new(
        target: MountTarget,
        options: ViewerOptions,
        engine: EngineSettings,
        base_layer: Option<ImageryProvider>,
    ) -> Self {
        let mut imagery_layers = ImageryLayerCollection::new();
        if let Some(provider) = base_layer {
            imagery_layers.add_imagery_provider(provider);
        }
        let camera = Camera::default_for_viewport(target.width, target.height);
        debug!(
            element = %target.element_id,
            widgets = ?options.enabled_widgets(),
            "viewer created"
        );

        Self {
            target,
            options,
            engine,
            entities: EntityCollection::new(),
            imagery_layers,
            camera,
            ellipsoid: Ellipsoid::WGS84,
            input: InputRouter::new(),
        }
    }

    pub fn target(&self) -> &MountTarget {
        &self.target
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }

    pub fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityCollection {
        &mut self.entities
    }

    pub fn imagery_layers(&self) -> &ImageryLayerCollection {
        &self.imagery_layers
    }

    pub fn imagery_layers_mut(&mut self) -> &mut ImageryLayerCollection {
        &mut self.imagery_layers
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.target.width = width;
        self.target.height = height;
        self.camera.set_viewport(width, height);
    }
}

impl DrawingHost for Viewer {
    fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.add(entity)
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        self.entities.remove(id)
    }

    fn pick_ellipsoid(&self, pos_px: Vec2) -> Option<Vec3> {
        self.camera.pick_ellipsoid(pos_px, &self.ellipsoid)
    }

    fn register_input(&mut self, kinds: &[PointerEventKind]) -> ListenerId {
        self.input.register(kinds)
    }

    fn unregister_input(&mut self, id: ListenerId) -> bool {
        self.input.unregister(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{MountTarget, ViewerOptions, create_viewer};
    use crate::config::EngineSettings;
    use crate::host::DrawingHost;
    use foundation::math::Vec2;
    use layers::imagery::ImageryProvider;

    #[test]
    fn created_viewer_has_bare_chrome_and_offline_basemap() {
        let viewer = create_viewer(
            MountTarget::new("globe", 1000.0, 800.0),
            &EngineSettings::default(),
        );
        assert!(viewer.options().enabled_widgets().is_empty());
        assert_eq!(viewer.imagery_layers().len(), 1);
        assert_eq!(
            viewer.imagery_layers().providers(),
            vec![&ImageryProvider::tile_map_service(
                "assets/Textures/NaturalEarthII"
            )]
        );
        assert!(viewer.entities().is_empty());
        assert_eq!(viewer.input().listener_count(), 0);
    }

    #[test]
    fn default_options_show_standard_widgets() {
        let widgets = ViewerOptions::default().enabled_widgets();
        assert!(widgets.contains(&"timeline"));
        assert!(!widgets.contains(&"vr_button"));
    }

    #[test]
    fn resize_moves_the_pickable_center() {
        let mut viewer = create_viewer(
            MountTarget::new("globe", 1000.0, 800.0),
            &EngineSettings::default(),
        );
        assert!(viewer.pick_ellipsoid(Vec2::new(500.0, 400.0)).is_some());
        viewer.resize(200.0, 100.0);
        assert_eq!(viewer.target().width, 200.0);
        assert!(viewer.pick_ellipsoid(Vec2::new(100.0, 50.0)).is_some());
    }
}
