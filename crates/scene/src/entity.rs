use foundation::handles::Handle;

use crate::components::{ComponentProperties, PolygonGraphics};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub Handle);

impl EntityId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn generation(&self) -> u32 {
        self.0.generation()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entity-{}v{}", self.index(), self.generation())
    }
}

/// A scene object. Only polygon graphics are modelled.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    pub name: Option<String>,
    pub polygon: Option<PolygonGraphics>,
    pub properties: ComponentProperties,
}

impl Entity {
    pub fn polygon(graphics: PolygonGraphics) -> Self {
        Self {
            polygon: Some(graphics),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.set(key, value);
        self
    }
}
