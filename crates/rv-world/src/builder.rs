//! Fluent builder for constructing a [`World`].
//!
//! # Usage
//!
//! ```rust
//! use rv_core::{GameTime, LocationId, Place, RegionId};
//! use rv_world::{LocationGraphBuilder, WorldBuilder, WorldQuery};
//!
//! let home   = Place::new(RegionId(0), LocationId(0));
//! let square = Place::new(RegionId(0), LocationId(1));
//! let mut g = LocationGraphBuilder::new();
//! g.add_path(home, square, 10);
//!
//! let mut b = WorldBuilder::new(g.build()).start(GameTime::at(0, 8, 0));
//! let player = b.entity("player", home);
//! let world = b.player(player).build().unwrap();
//!
//! assert_eq!(world.entity_location(player), Some(home));
//! ```

use rv_core::{EntityId, GameClock, GameTime, Place};

use crate::{EntityStore, LocationGraph, World, WorldError, WorldResult};

/// Fluent builder for [`World`].
///
/// | Method          | Default                       |
/// |-----------------|-------------------------------|
/// | `.player(id)`   | The first entity added        |
/// | `.start(t)`     | `GameTime::ZERO`              |
pub struct WorldBuilder {
    graph:    LocationGraph,
    entities: EntityStore,
    player:   Option<EntityId>,
    start:    GameTime,
}

impl WorldBuilder {
    pub fn new(graph: LocationGraph) -> Self {
        Self {
            graph,
            entities: EntityStore::new(),
            player:   None,
            start:    GameTime::ZERO,
        }
    }

    /// Add an entity standing at `place`.
    pub fn entity(&mut self, name: impl Into<String>, place: Place) -> EntityId {
        self.entities.push(name, Some(place))
    }

    /// Add an entity with no position data.
    pub fn unplaced_entity(&mut self, name: impl Into<String>) -> EntityId {
        self.entities.push(name, None)
    }

    /// Give `id` an initial activity label.
    pub fn activity(&mut self, id: EntityId, label: impl Into<String>) -> &mut Self {
        if let Some(slot) = self.entities.activity.get_mut(id.index()) {
            *slot = Some(label.into());
        }
        self
    }

    pub fn player(mut self, id: EntityId) -> Self {
        self.player = Some(id);
        self
    }

    pub fn start(mut self, start: GameTime) -> Self {
        self.start = start;
        self
    }

    /// Validate and produce the world.
    ///
    /// Fails if there are no entities, the player id is out of range, or an
    /// entity starts at a place missing from the graph.
    pub fn build(self) -> WorldResult<World> {
        if self.entities.is_empty() {
            return Err(WorldError::Config("world has no entities".into()));
        }
        let player = self.player.unwrap_or(EntityId(0));
        if !self.entities.contains(player) {
            return Err(WorldError::EntityNotFound(player));
        }
        for movement in &self.entities.movement {
            if let Some(place) = movement.place {
                if !self.graph.contains(place) {
                    return Err(WorldError::UnknownPlace(place));
                }
            }
        }

        Ok(World {
            clock:    GameClock::new(self.start),
            graph:    self.graph,
            entities: self.entities,
            player,
        })
    }
}
