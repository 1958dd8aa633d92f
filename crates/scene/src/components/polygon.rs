use std::fmt;
use std::rc::Rc;

use foundation::math::Vec3;

use super::Color;

/// Outer ring plus optional holes, each in world coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonHierarchy {
    pub positions: Vec<Vec3>,
    pub holes: Vec<PolygonHierarchy>,
}

impl PolygonHierarchy {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            holes: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hole(mut self, hole: PolygonHierarchy) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Geometry computed on demand, each time a consumer asks for it.
pub trait HierarchyProvider: fmt::Debug {
    fn hierarchy(&self) -> PolygonHierarchy;
}

/// Where a polygon's geometry comes from.
///
/// `Static` is a snapshot fixed at construction. `Live` is re-evaluated on
/// every [`HierarchySource::resolve`], so edits to whatever the provider
/// reads show up without touching the entity.
#[derive(Debug, Clone)]
pub enum HierarchySource {
    Static(PolygonHierarchy),
    Live(Rc<dyn HierarchyProvider>),
}

impl HierarchySource {
    pub fn resolve(&self) -> PolygonHierarchy {
        match self {
            HierarchySource::Static(h) => h.clone(),
            HierarchySource::Live(provider) => provider.hierarchy(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, HierarchySource::Live(_))
    }
}

impl From<PolygonHierarchy> for HierarchySource {
    fn from(h: PolygonHierarchy) -> Self {
        HierarchySource::Static(h)
    }
}

#[derive(Debug, Clone)]
pub struct PolygonGraphics {
    pub hierarchy: HierarchySource,
    /// Constant height above the ellipsoid (meters); `None` keeps vertex heights.
    pub height: Option<f64>,
    pub material: Color,
    pub outline: bool,
    pub outline_color: Color,
}

impl PolygonGraphics {
    pub fn new(hierarchy: impl Into<HierarchySource>) -> Self {
        Self {
            hierarchy: hierarchy.into(),
            height: None,
            material: Color::WHITE,
            outline: false,
            outline_color: Color::BLACK,
        }
    }

    pub fn with_height(mut self, height_m: f64) -> Self {
        self.height = Some(height_m);
        self
    }

    pub fn with_material(mut self, color: Color) -> Self {
        self.material = color;
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = true;
        self.outline_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{HierarchyProvider, HierarchySource, PolygonGraphics, PolygonHierarchy};
    use foundation::math::Vec3;

    #[derive(Debug)]
    struct Shared(Rc<RefCell<Vec<Vec3>>>);

    impl HierarchyProvider for Shared {
        fn hierarchy(&self) -> PolygonHierarchy {
            PolygonHierarchy::new(self.0.borrow().clone())
        }
    }

    #[test]
    fn live_source_tracks_later_edits() {
        let points = Rc::new(RefCell::new(Vec::new()));
        let graphics = PolygonGraphics::new(HierarchySource::Live(Rc::new(Shared(points.clone()))));
        assert!(graphics.hierarchy.resolve().is_empty());

        points.borrow_mut().push(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(graphics.hierarchy.resolve().positions.len(), 1);
        assert!(graphics.hierarchy.is_live());
    }

    #[test]
    fn static_source_is_a_snapshot() {
        let mut positions = vec![Vec3::new(1.0, 0.0, 0.0)];
        let graphics = PolygonGraphics::new(PolygonHierarchy::new(positions.clone()));
        positions.push(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(graphics.hierarchy.resolve().positions.len(), 1);
        assert!(!graphics.hierarchy.is_live());
    }
}
