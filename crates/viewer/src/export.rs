use std::collections::BTreeMap;

use foundation::math::ecef_to_geodetic;
use scene::EntityCollection;
use scene::entity::EntityId;
use serde::{Deserialize, Serialize};

/// Serializable record of a polygon entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonData {
    pub id: String,
    pub name: Option<String>,
    /// Outer ring as `[lon, lat]` in degrees.
    pub positions: Vec<[f64; 2]>,
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    NotFound(EntityId),
    NotAPolygon(EntityId),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NotFound(id) => write!(f, "no entity {id}"),
            ExportError::NotAPolygon(id) => write!(f, "entity {id} has no polygon graphics"),
        }
    }
}

impl std::error::Error for ExportError {}

impl PolygonData {
    /// Snapshot of `id` as it resolves right now.
    pub fn from_entity(entities: &EntityCollection, id: EntityId) -> Result<Self, ExportError> {
        let entity = entities.get(id).ok_or(ExportError::NotFound(id))?;
        let graphics = entity
            .polygon
            .as_ref()
            .ok_or(ExportError::NotAPolygon(id))?;

        let positions = graphics
            .hierarchy
            .resolve()
            .positions
            .into_iter()
            .map(|p| {
                let geo = ecef_to_geodetic(p.into());
                [geo.lon_deg(), geo.lat_deg()]
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            name: entity.name.clone(),
            positions,
            properties: entity.properties.pairs.iter().cloned().collect(),
        })
    }
}
