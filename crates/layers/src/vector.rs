use earcutr::earcut;
use foundation::math::{Vec3, WGS84_A, WGS84_B, ecef_to_geodetic, geodetic_to_ecef};
use scene::EntityCollection;
use scene::components::{Color, PolygonGraphics, PolygonHierarchy};
use scene::entity::EntityId;

use crate::layer::{Layer, LayerId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VectorLayer {
    id: LayerId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFill {
    pub entity: EntityId,
    pub color: Color,
    // Flat triangle list (3 vertices per triangle) in world coordinates.
    pub triangles: Vec<Vec3>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonOutline {
    pub entity: EntityId,
    pub color: Color,
    /// Closed ring: the first vertex is repeated at the end.
    pub ring: Vec<Vec3>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct VectorLayerSnapshot {
    pub fills: Vec<PolygonFill>,
    pub outlines: Vec<PolygonOutline>,
}

impl VectorLayer {
    pub fn new(id: u64) -> Self {
        Self { id: LayerId(id) }
    }

    /// Resolves every polygon's hierarchy as of now and builds draw data.
    ///
    /// Live hierarchies are evaluated here and nowhere else, so a preview
    /// bound to a growing point list costs nothing between extractions.
    pub fn extract(&self, entities: &EntityCollection) -> VectorLayerSnapshot {
        let mut out = VectorLayerSnapshot::default();

        for (entity, graphics) in entities.polygons() {
            let hierarchy = clamp_height(graphics.hierarchy.resolve(), graphics);

            let triangles = triangulate_hierarchy(&hierarchy);
            if !triangles.is_empty() {
                out.fills.push(PolygonFill {
                    entity,
                    color: graphics.material,
                    triangles,
                });
            }

            if graphics.outline && hierarchy.positions.len() >= 2 {
                let mut ring = hierarchy.positions.clone();
                drop_closing_duplicate(&mut ring);
                ring.push(ring[0]);
                out.outlines.push(PolygonOutline {
                    entity,
                    color: graphics.outline_color,
                    ring,
                });
            }
        }

        out
    }
}

fn clamp_height(mut hierarchy: PolygonHierarchy, graphics: &PolygonGraphics) -> PolygonHierarchy {
    let Some(height) = graphics.height else {
        return hierarchy;
    };
    set_height(&mut hierarchy, height);
    hierarchy
}

fn set_height(hierarchy: &mut PolygonHierarchy, height_m: f64) {
    for p in &mut hierarchy.positions {
        let mut geo = ecef_to_geodetic((*p).into());
        geo.alt_m = height_m;
        *p = geodetic_to_ecef(geo).into();
    }
    for hole in &mut hierarchy.holes {
        set_height(hole, height_m);
    }
}

fn triangulate_hierarchy(hierarchy: &PolygonHierarchy) -> Vec<Vec3> {
    let mut rings: Vec<&[Vec3]> = vec![hierarchy.positions.as_slice()];
    rings.extend(hierarchy.holes.iter().map(|h| h.positions.as_slice()));
    triangulate_area_rings(&rings)
}

fn triangulate_area_rings(rings: &[&[Vec3]]) -> Vec<Vec3> {
    // Triangulate in a local tangent plane at the centroid of the outer ring.
    let Some(outer) = rings.first() else {
        return Vec::new();
    };
    if outer.len() < 3 {
        return Vec::new();
    }

    let origin = centroid(outer);
    let n = ellipsoid_normal_ecef(origin);

    // Build tangent basis.
    let up = if n.z.abs() < 0.99 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };
    let Some(east) = up.cross(n).normalized() else {
        return Vec::new();
    };
    let north = n.cross(east);

    // Flatten rings into 2D coordinates + a parallel 3D vertex list.
    let mut vertices_3d: Vec<Vec3> = Vec::new();
    let mut coords_2d: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (ring_i, ring) in rings.iter().enumerate() {
        let mut ring_pts: Vec<Vec3> = ring.to_vec();
        drop_closing_duplicate(&mut ring_pts);
        if ring_pts.len() < 3 {
            continue;
        }

        if ring_i > 0 {
            hole_indices.push(vertices_3d.len());
        }

        for p in ring_pts {
            let v = p - origin;
            coords_2d.push(v.dot(east));
            coords_2d.push(v.dot(north));
            vertices_3d.push(p);
        }
    }

    if vertices_3d.len() < 3 {
        return Vec::new();
    }

    let indices = match earcut(&coords_2d, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };

    indices
        .into_iter()
        .filter_map(|idx| vertices_3d.get(idx).copied())
        .collect()
}

fn drop_closing_duplicate(points: &mut Vec<Vec3>) {
    if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied())
        && points.len() >= 2
        && first.distance(last) < 1e-9
    {
        points.pop();
    }
}

fn ellipsoid_normal_ecef(p: Vec3) -> Vec3 {
    // Gradient of (x^2/A^2 + y^2/A^2 + z^2/B^2).
    let a2 = WGS84_A * WGS84_A;
    let b2 = WGS84_B * WGS84_B;
    let g = Vec3::new(p.x / a2, p.y / a2, p.z / b2);
    g.normalized().unwrap_or(g)
}

fn centroid(vertices: &[Vec3]) -> Vec3 {
    let sum = vertices.iter().fold(Vec3::ZERO, |acc, v| acc + *v);
    sum * (1.0 / vertices.len() as f64)
}

impl Layer for VectorLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "vector"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::VectorLayer;
    use foundation::math::{Ellipsoid, Vec3, positions_from_degrees};
    use scene::EntityCollection;
    use scene::components::{
        Color, HierarchyProvider, HierarchySource, PolygonGraphics, PolygonHierarchy,
    };
    use scene::entity::Entity;

    #[derive(Debug)]
    struct Points(Rc<RefCell<Vec<Vec3>>>);

    impl HierarchyProvider for Points {
        fn hierarchy(&self) -> PolygonHierarchy {
            PolygonHierarchy::new(self.0.borrow().clone())
        }
    }

    fn square_deg() -> Vec<Vec3> {
        positions_from_degrees(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0], 0.0)
    }

    #[test]
    fn square_triangulates_into_two_triangles() {
        let mut entities = EntityCollection::new();
        entities.add(Entity::polygon(
            PolygonGraphics::new(PolygonHierarchy::new(square_deg()))
                .with_material(Color::RED.with_alpha(0.5))
                .with_outline(Color::BLACK),
        ));

        let snap = VectorLayer::new(1).extract(&entities);
        assert_eq!(snap.fills.len(), 1);
        assert_eq!(snap.fills[0].triangles.len(), 6);
        assert_eq!(snap.outlines.len(), 1);
        assert_eq!(snap.outlines[0].ring.len(), 5);
        assert_eq!(snap.outlines[0].ring[0], snap.outlines[0].ring[4]);
    }

    #[test]
    fn live_preview_is_resolved_at_extract_time() {
        let points = Rc::new(RefCell::new(Vec::new()));
        let mut entities = EntityCollection::new();
        entities.add(Entity::polygon(PolygonGraphics::new(HierarchySource::Live(
            Rc::new(Points(points.clone())),
        ))));

        let layer = VectorLayer::new(1);
        assert!(layer.extract(&entities).fills.is_empty());

        points.borrow_mut().extend(square_deg().into_iter().take(3));
        let snap = layer.extract(&entities);
        assert_eq!(snap.fills.len(), 1);
        assert_eq!(snap.fills[0].triangles.len(), 3);
    }

    #[test]
    fn height_clamps_vertices_to_surface() {
        let lifted = positions_from_degrees(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0], 5_000.0);
        let mut entities = EntityCollection::new();
        entities.add(Entity::polygon(
            PolygonGraphics::new(PolygonHierarchy::new(lifted)).with_height(0.0),
        ));

        let snap = VectorLayer::new(1).extract(&entities);
        for v in &snap.fills[0].triangles {
            assert!(Ellipsoid::WGS84.contains_surface_point(*v, 1e-7));
        }
    }

    #[test]
    fn hole_adds_triangles() {
        let outer = positions_from_degrees(&[0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0], 0.0);
        let hole = positions_from_degrees(&[1.0, 1.0, 3.0, 1.0, 3.0, 3.0, 1.0, 3.0], 0.0);
        let mut entities = EntityCollection::new();
        entities.add(Entity::polygon(PolygonGraphics::new(
            PolygonHierarchy::new(outer).with_hole(PolygonHierarchy::new(hole)),
        )));

        let snap = VectorLayer::new(1).extract(&entities);
        // A square with a square hole needs eight triangles.
        assert_eq!(snap.fills[0].triangles.len(), 24);
    }
}
