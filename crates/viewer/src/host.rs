use foundation::math::{Vec2, Vec3};
use runtime::{ListenerId, PointerEventKind};
use scene::entity::{Entity, EntityId};

/// What the drawing state machine needs from a rendering surface.
///
/// [`crate::viewer::Viewer`] is the real implementation; tests substitute
/// scripted hosts.
pub trait DrawingHost {
    fn add_entity(&mut self, entity: Entity) -> EntityId;
    fn remove_entity(&mut self, id: EntityId) -> bool;
    /// Pointer position to reference-ellipsoid surface position.
    fn pick_ellipsoid(&self, pos_px: Vec2) -> Option<Vec3>;
    fn register_input(&mut self, kinds: &[PointerEventKind]) -> ListenerId;
    fn unregister_input(&mut self, id: ListenerId) -> bool;
}
