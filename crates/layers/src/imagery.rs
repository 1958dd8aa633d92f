use crate::layer::{Layer, LayerId};
use crate::symbology::LayerStyle;

/// Default account owning hosted Mapbox styles.
pub const MAPBOX_DEFAULT_USERNAME: &str = "mapbox";

/// Where imagery tiles come from. Construction never touches the network;
/// fetch and auth failures surface later through the tile pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageryProvider {
    /// Tiles laid out as a Tile Map Service tree under `url`.
    TileMapService { url: String },
    /// A hosted Mapbox style rendered to raster tiles.
    MapboxStyle {
        username: String,
        style_id: String,
        access_token: String,
    },
}

impl ImageryProvider {
    pub fn tile_map_service(url: impl Into<String>) -> Self {
        Self::TileMapService { url: url.into() }
    }

    pub fn mapbox_style(style_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::MapboxStyle {
            username: MAPBOX_DEFAULT_USERNAME.to_string(),
            style_id: style_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::TileMapService { .. } => "tile-map-service",
            Self::MapboxStyle { .. } => "mapbox-style",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageryLayer {
    id: LayerId,
    pub style: LayerStyle,
    pub provider: ImageryProvider,
}

impl ImageryLayer {
    pub fn new(id: u64, provider: ImageryProvider) -> Self {
        Self {
            id: LayerId(id),
            style: LayerStyle::default(),
            provider,
        }
    }
}

impl Layer for ImageryLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> &'static str {
        self.provider.kind()
    }
}

/// Ordered imagery stack; index 0 is drawn first (the base layer).
#[derive(Debug, Default)]
pub struct ImageryLayerCollection {
    next_id: u64,
    layers: Vec<ImageryLayer>,
}

impl ImageryLayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_imagery_provider(&mut self, provider: ImageryProvider) -> LayerId {
        let layer = ImageryLayer::new(self.next_id, provider);
        self.next_id += 1;
        let id = layer.id();
        self.layers.push(layer);
        id
    }

    pub fn remove_all(&mut self) {
        self.layers.clear();
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageryLayer> {
        self.layers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageryLayer> {
        self.layers.iter()
    }

    /// Providers in draw order, for comparing stacks irrespective of layer ids.
    pub fn providers(&self) -> Vec<&ImageryProvider> {
        self.layers.iter().map(|l| &l.provider).collect()
    }
}
