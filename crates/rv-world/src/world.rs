//! The in-memory reference world.

use rv_core::{EntityId, GameClock, GameTime, Place};
use tracing::trace;

use crate::{EntityStore, LocationGraph, TransitState, WorldCommands, WorldError, WorldQuery, WorldResult};

/// Entities, the location graph, and the clock.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World {
    /// World clock.  Advanced only through [`WorldCommands::advance_time`].
    pub clock: GameClock,

    /// Location graph used to plan journeys.
    pub graph: LocationGraph,

    /// Arena of entity state, indexed by `EntityId`.
    pub entities: EntityStore,

    pub(crate) player: EntityId,
}

impl World {
    /// Advance by `minutes` and report every `(entity, place)` edge
    /// completion, grouped by entity in ascending id order.
    pub fn advance(&mut self, minutes: u64) -> Vec<(EntityId, Place)> {
        self.clock.advance(minutes);
        let mut reached = Vec::new();
        for (i, movement) in self.entities.movement.iter_mut().enumerate() {
            for place in movement.advance(minutes) {
                reached.push((EntityId(i as u32), place));
            }
        }
        reached
    }

    pub fn entity_count(&self) -> usize {
        self.entities.count
    }
}

impl WorldQuery for World {
    fn entity_location(&self, id: EntityId) -> Option<Place> {
        self.entities.movement(id)?.place
    }

    fn transit_state(&self, id: EntityId) -> Option<TransitState> {
        self.entities.movement(id)?.transit_state()
    }

    fn player_id(&self) -> EntityId {
        self.player
    }

    fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.entity_ids().collect()
    }

    fn current_activity(&self, id: EntityId) -> Option<&str> {
        self.entities.activity.get(id.index())?.as_deref()
    }

    fn current_time(&self) -> GameTime {
        self.clock.now
    }

    fn location_exists(&self, place: Place) -> bool {
        self.graph.contains(place)
    }
}

impl WorldCommands for World {
    fn begin_move(&mut self, id: EntityId, destination: Place) -> WorldResult<()> {
        let movement = self
            .entities
            .movement
            .get_mut(id.index())
            .ok_or(WorldError::EntityNotFound(id))?;
        let origin = movement.replan_origin().ok_or(WorldError::NotPlaced(id))?;
        let legs = self.graph.route(origin, destination)?;
        trace!(entity = %id, from = %origin, to = %destination, legs = legs.len(), "journey planned");
        movement.start_journey(legs);
        Ok(())
    }

    fn wait(&mut self, id: EntityId) -> WorldResult<()> {
        self.entities
            .movement_mut(id)
            .ok_or(WorldError::EntityNotFound(id))?
            .stop_after_current();
        Ok(())
    }

    fn set_activity(&mut self, id: EntityId, activity: Option<String>) -> WorldResult<()> {
        let slot = self
            .entities
            .activity
            .get_mut(id.index())
            .ok_or(WorldError::EntityNotFound(id))?;
        *slot = activity;
        Ok(())
    }

    fn advance_time(&mut self, minutes: u64) {
        self.advance(minutes);
    }
}
