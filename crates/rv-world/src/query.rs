//! Narrow collaborator interfaces the prediction and dispatch core consume.
//!
//! The core never owns world topology, inventory, or entity records.  It reads
//! positions and activities through [`WorldQuery`] and issues movement and
//! activity changes through [`WorldCommands`].  [`crate::World`] is the
//! in-memory reference implementation; hosts with their own world model
//! implement both traits over it.

use rv_core::{EntityId, GameTime, Place};

use crate::WorldResult;

/// In-progress movement along the current edge.
///
/// Only one segment is ever in flight.  Any further legs of a multi-stop
/// journey are queued inside the world and are not visible here, except for
/// the journey's `final_destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitState {
    /// Start of the edge currently being traversed.
    pub origin: Place,
    /// End of the edge currently being traversed.
    pub destination: Place,
    /// Minutes until `destination` is reached.
    pub remaining_minutes: u32,
    /// Where the whole journey ends.  Equals `destination` on the last leg.
    pub final_destination: Place,
}

/// Read-only world queries.
pub trait WorldQuery {
    /// Current `(region, location)` of `id`.  While in transit this is the
    /// origin of the current edge.  `None` if the entity is unknown or has no
    /// position.
    fn entity_location(&self, id: EntityId) -> Option<Place>;

    /// Movement state of `id`, or `None` when stationary or unknown.
    fn transit_state(&self, id: EntityId) -> Option<TransitState>;

    /// The player-controlled entity.
    fn player_id(&self) -> EntityId;

    /// Every live entity, in ascending id order.
    fn entity_ids(&self) -> Vec<EntityId>;

    /// Label of what `id` is doing right now, if anything.
    fn current_activity(&self, id: EntityId) -> Option<&str>;

    /// Absolute game time.
    fn current_time(&self) -> GameTime;

    /// Current minute of day.
    fn minute_of_day(&self) -> u32 {
        self.current_time().minute_of_day()
    }

    /// `true` if `place` exists in the world graph.  Used to validate
    /// schedules at registration time.
    fn location_exists(&self, _place: Place) -> bool {
        true
    }
}

/// Mutating world commands issued by the scheduling agent and the host.
pub trait WorldCommands {
    /// Start (or redirect) a journey of `id` towards `destination`.
    ///
    /// If `id` is already mid-edge, the current edge is finished first and the
    /// remainder of the journey is re-planned from its end.
    fn begin_move(&mut self, id: EntityId, destination: Place) -> WorldResult<()>;

    /// Stop after the current edge (if any) and stay there.
    fn wait(&mut self, id: EntityId) -> WorldResult<()>;

    /// Replace the current activity label of `id`.
    fn set_activity(&mut self, id: EntityId, activity: Option<String>) -> WorldResult<()>;

    /// Advance the world clock and every movement by `minutes`.
    fn advance_time(&mut self, minutes: u64);
}
