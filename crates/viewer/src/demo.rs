use foundation::math::positions_from_degrees;
use scene::components::{Color, PolygonGraphics, PolygonHierarchy};
use scene::entity::{Entity, EntityId};

use crate::viewer::Viewer;

/// Wyoming state border as `lon, lat` pairs (degrees).
#[rustfmt::skip]
pub const WYOMING_OUTLINE: [f64; 24] = [
    -109.080842, 45.002073,
    -105.91517, 45.002073,
    -104.058488, 44.996596,
    -104.053011, 43.002989,
    -104.053011, 41.003906,
    -105.728954, 40.998429,
    -107.919731, 41.003906,
    -109.04798, 40.998429,
    -111.047063, 40.998429,
    -111.047063, 42.000709,
    -111.047063, 44.476286,
    -111.05254, 45.002073,
];

/// Adds the static Wyoming polygon: translucent red fill, black outline,
/// flat on the ellipsoid.
pub fn seed_demo_shape(viewer: &mut Viewer) -> EntityId {
    let hierarchy = PolygonHierarchy::new(positions_from_degrees(&WYOMING_OUTLINE, 0.0));
    let graphics = PolygonGraphics::new(hierarchy)
        .with_height(0.0)
        .with_material(Color::RED.with_alpha(0.5))
        .with_outline(Color::BLACK);
    viewer.entities_mut().add(
        Entity::polygon(graphics)
            .with_name("Wyoming")
            .with_property("kind", "demo"),
    )
}

#[cfg(test)]
mod tests {
    use super::{WYOMING_OUTLINE, seed_demo_shape};
    use crate::config::EngineSettings;
    use crate::viewer::{MountTarget, create_viewer};
    use foundation::math::{Ellipsoid, ecef_to_geodetic};
    use layers::vector::VectorLayer;
    use scene::components::Color;

    #[test]
    fn seeds_one_static_polygon() {
        let mut viewer = create_viewer(
            MountTarget::new("globe", 1000.0, 800.0),
            &EngineSettings::default(),
        );
        let id = seed_demo_shape(&mut viewer);

        assert_eq!(viewer.entities().len(), 1);
        let graphics = viewer
            .entities()
            .get(id)
            .and_then(|e| e.polygon.as_ref())
            .expect("polygon");
        assert_eq!(graphics.material, Color::RED.with_alpha(0.5));
        assert!(graphics.outline);
        assert_eq!(graphics.height, Some(0.0));

        let positions = graphics.hierarchy.resolve().positions;
        assert_eq!(positions.len(), WYOMING_OUTLINE.len() / 2);
        let first = ecef_to_geodetic(positions[0].into());
        assert!((first.lon_deg() - WYOMING_OUTLINE[0]).abs() < 1e-9);
        assert!((first.lat_deg() - WYOMING_OUTLINE[1]).abs() < 1e-9);
        assert!(Ellipsoid::WGS84.contains_surface_point(positions[0], 1e-9));
    }

    #[test]
    fn demo_polygon_renders_fill_and_outline() {
        let mut viewer = create_viewer(
            MountTarget::new("globe", 1000.0, 800.0),
            &EngineSettings::default(),
        );
        seed_demo_shape(&mut viewer);

        let snap = VectorLayer::new(1).extract(viewer.entities());
        assert_eq!(snap.fills.len(), 1);
        let triangles = &snap.fills[0].triangles;
        assert!(!triangles.is_empty());
        assert_eq!(triangles.len() % 3, 0);
        assert_eq!(snap.outlines[0].color, Color::BLACK);
    }
}
