//! Arena-style entity storage.
//!
//! Entities are referenced by [`EntityId`] handles that index parallel
//! `Vec`s.  No entity holds a pointer to another entity or to the world;
//! every cross-reference goes through an id and is resolved here.

use rv_core::{EntityId, Place};

use crate::Movement;

/// Structure-of-Arrays storage for all entity state.
///
/// Every `Vec` field has exactly `count` elements; the `EntityId` value is
/// the index into all of them:
///
/// ```ignore
/// let name = &store.names[id.index()];
/// ```
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    /// Number of entities.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Human-readable name, for logging.
    pub names: Vec<String>,

    /// Position and in-flight movement.
    pub movement: Vec<Movement>,

    /// What the entity is doing right now.  `None` means idle / off schedule.
    pub activity: Vec<Option<String>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return its handle.  `place = None` creates an
    /// entity with no position data.
    pub fn push(&mut self, name: impl Into<String>, place: Option<Place>) -> EntityId {
        let id = EntityId(self.count as u32);
        self.names.push(name.into());
        self.movement.push(place.map_or_else(Movement::unplaced, Movement::stationary));
        self.activity.push(None);
        self.count += 1;
        id
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        id.index() < self.count
    }

    /// Iterator over all `EntityId`s in ascending index order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.count as u32).map(EntityId)
    }

    pub fn movement(&self, id: EntityId) -> Option<&Movement> {
        self.movement.get(id.index())
    }

    pub fn movement_mut(&mut self, id: EntityId) -> Option<&mut Movement> {
        self.movement.get_mut(id.index())
    }

    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Look up an entity by name.  Linear scan; meant for setup code.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| EntityId(i as u32))
    }
}
