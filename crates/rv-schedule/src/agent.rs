//! The scheduling agent: timetable in, "where should I be now" out.
//!
//! [`decide`] is pure over the world query interface and is safe to call
//! every tick.  [`agent_tick`] applies the decision through
//! [`WorldCommands`].

use rv_core::{EntityId, GameTime, Place};
use rv_world::{WorldCommands, WorldQuery, WorldResult};
use tracing::{debug, trace, warn};

use crate::Schedule;

/// What the agent wants the world to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Start (or redirect) a journey to the place.
    Move(Place),
    /// Replace the activity label.  `None` means idle / off schedule.
    SetActivity(Option<String>),
}

/// Decide what `id` should be doing at `now`.
///
/// | Situation                                       | Result                      |
/// |-------------------------------------------------|-----------------------------|
/// | Empty schedule                                  | `None`                      |
/// | No single active entry                          | `SetActivity(None)`         |
/// | Already travelling to the entry's destination   | `None`                      |
/// | Standing at the destination                     | `SetActivity(Some(label))`  |
/// | Anywhere else                                   | `Move(destination)`         |
/// | No position data                                | `None` (logged)             |
pub fn decide<W: WorldQuery + ?Sized>(
    schedule: &Schedule,
    world: &W,
    id: EntityId,
    now: GameTime,
) -> Option<Decision> {
    if schedule.is_empty() {
        return None;
    }
    let Some(entry) = schedule.active_entry(now) else {
        return Some(Decision::SetActivity(None));
    };

    if let Some(transit) = world.transit_state(id) {
        if transit.final_destination == entry.destination {
            return None;
        }
        return Some(Decision::Move(entry.destination));
    }

    let Some(here) = world.entity_location(id) else {
        debug!(entity = %id, "no position data; agent skipped");
        return None;
    };
    if here == entry.destination {
        Some(Decision::SetActivity(Some(entry.activity.clone())))
    } else {
        Some(Decision::Move(entry.destination))
    }
}

/// Issue the world command for `decision`.
pub fn apply_decision<W: WorldCommands + ?Sized>(
    world: &mut W,
    id: EntityId,
    decision: &Decision,
) -> WorldResult<()> {
    match decision {
        Decision::Move(dest)          => world.begin_move(id, *dest),
        Decision::SetActivity(label)  => world.set_activity(id, label.clone()),
    }
}

/// Run the agent for one entity: decide, then apply.
///
/// Returns the decision that was applied.  A world command that fails (for
/// example a destination with no route) is logged and yields `None`.
pub fn agent_tick<W>(schedule: &Schedule, world: &mut W, id: EntityId, now: GameTime) -> Option<Decision>
where
    W: WorldQuery + WorldCommands + ?Sized,
{
    let decision = decide(schedule, &*world, id, now)?;
    if let Decision::SetActivity(label) = &decision {
        if world.current_activity(id) == label.as_deref() {
            return None;
        }
    }
    match apply_decision(world, id, &decision) {
        Ok(()) => {
            trace!(entity = %id, ?decision, "agent decision applied");
            Some(decision)
        }
        Err(err) => {
            warn!(entity = %id, ?decision, %err, "agent decision could not be applied");
            None
        }
    }
}
