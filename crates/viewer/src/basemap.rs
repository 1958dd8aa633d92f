use layers::imagery::ImageryProvider;
use tracing::debug;

use crate::config::EngineSettings;
use crate::viewer::Viewer;

/// Offline Natural Earth II tiles, relative to the resource base.
pub const DEFAULT_IMAGERY_PATH: &str = "Textures/NaturalEarthII";
/// Hosted style mounted as the alternate basemap.
pub const ALTERNATE_STYLE_ID: &str = "streets-v11";

/// Which of the two basemaps is mounted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct MapDisplayState {
    pub using_alternate_basemap: bool,
}

pub fn default_imagery(engine: &EngineSettings) -> ImageryProvider {
    ImageryProvider::tile_map_service(engine.resource_url(DEFAULT_IMAGERY_PATH))
}

pub fn alternate_imagery(access_token: &str) -> ImageryProvider {
    ImageryProvider::mapbox_style(ALTERNATE_STYLE_ID, access_token)
}

/// Swaps the basemap.
///
/// The whole imagery stack is replaced: every mounted layer is removed
/// before the other basemap is added, so the stack never holds both.
pub fn toggle_basemap(viewer: &mut Viewer, state: &mut MapDisplayState, access_token: &str) {
    let provider = if state.using_alternate_basemap {
        default_imagery(viewer.engine())
    } else {
        alternate_imagery(access_token)
    };

    let layers = viewer.imagery_layers_mut();
    layers.remove_all();
    layers.add_imagery_provider(provider);
    state.using_alternate_basemap = !state.using_alternate_basemap;

    debug!(
        alternate = state.using_alternate_basemap,
        "basemap toggled"
    );
}
