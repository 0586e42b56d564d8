//! Read-only view handed to every handler.

use rv_core::{EntityId, GameTime, Place};
use rv_world::WorldQuery;

use crate::Category;

/// The occurrence being dispatched, plus read access to the world.
///
/// Built per dispatch and discarded afterwards.  Handlers that need to change
/// the world return a value describing the change; the host applies it.
pub struct TriggerContext<'a> {
    pub category: Category,

    /// The entity the occurrence is about: the arriving entity for `Reach`,
    /// the first participant for `Meet`/`NpcMeet`, the player for
    /// `GameStart`.
    pub subject: EntityId,

    /// Where it happened, when known.
    pub place: Option<Place>,

    /// Every entity involved, `subject` first, without duplicates.  Empty for
    /// `GameStart`.
    pub participants: Vec<EntityId>,

    pub world: &'a dyn WorldQuery,
}

impl<'a> TriggerContext<'a> {
    pub fn player(&self) -> EntityId {
        self.world.player_id()
    }

    pub fn involves_player(&self) -> bool {
        self.participants.contains(&self.player())
    }

    /// Participants other than the player.
    pub fn others(&self) -> impl Iterator<Item = EntityId> + '_ {
        let player = self.player();
        self.participants.iter().copied().filter(move |&id| id != player)
    }

    pub fn now(&self) -> GameTime {
        self.world.current_time()
    }
}
