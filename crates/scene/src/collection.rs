use crate::components::{PolygonGraphics, PolygonHierarchy};
use crate::entity::{Entity, EntityId};
use foundation::handles::Handle;

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// The viewer's entity store.
///
/// Ordering contract:
/// - Iteration yields live entities in ascending slot index order.
/// - Removed slots are reused with a bumped generation, so ids issued before
///   a removal never resolve to the entity that later took the slot.
#[derive(Debug, Default)]
pub struct EntityCollection {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityId(Handle::new(index, slot.generation));
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityId(Handle::new(index, 0))
    }

    /// Removes `id`. Returns `false` when `id` is stale or unknown.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return false;
        };
        if slot.generation != id.generation() || slot.entity.is_none() {
            return false;
        }

        slot.entity = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.len -= 1;
        true
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.entity
                .as_ref()
                .map(|e| (EntityId(Handle::new(idx as u32, slot.generation)), e))
        })
    }

    pub fn polygons(&self) -> impl Iterator<Item = (EntityId, &PolygonGraphics)> {
        self.iter()
            .filter_map(|(id, e)| e.polygon.as_ref().map(|p| (id, p)))
    }

    /// Resolves every polygon's geometry now. Live hierarchies are
    /// evaluated once per call.
    pub fn resolve_polygons(&self) -> Vec<(EntityId, PolygonHierarchy)> {
        self.polygons()
            .map(|(id, p)| (id, p.hierarchy.resolve()))
            .collect()
    }

    pub fn remove_all(&mut self) {
        let ids: Vec<EntityId> = self.iter().map(|(id, _)| id).collect();
        for id in ids {
            self.remove(id);
        }
    }
}
