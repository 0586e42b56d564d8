//! The prediction aggregator.

use rv_trigger::{Registry, TriggerState};
use rv_world::WorldQuery;
use tracing::{debug, trace};

use crate::{EventKind, EventPayload, PredictedEvent, earliest_meeting, predict_arrivals, project};

/// Every candidate event in the next `horizon` minutes.
///
/// 1. Project the player's route.
/// 2. For each other entity with position data, predict a meeting with the
///    player.
/// 3. Predict the player's arrivals at reach-triggered places.
/// 4. Sort by `(offset, kind)`, keeping insertion order for ties, and drop
///    exact duplicates.
///
/// Entities without position data are skipped.  If the player has none, the
/// result is empty.
pub fn predict_events<O, W>(
    world: &W,
    registry: &Registry<O>,
    state: &TriggerState,
    horizon: u64,
    tolerance: u32,
) -> Vec<PredictedEvent>
where
    W: WorldQuery + ?Sized,
{
    let player = world.player_id();
    let Some(player_route) = project(world, player, horizon) else {
        debug!(%player, horizon, "player route unavailable; no predictions");
        return Vec::new();
    };

    let mut events = Vec::new();
    for other in world.entity_ids() {
        if other == player {
            continue;
        }
        let Some(route) = project(world, other, horizon) else {
            trace!(entity = %other, "skipped: no projectable route");
            continue;
        };
        if let Some(meeting) = earliest_meeting(&player_route, &route, horizon, tolerance) {
            events.push(PredictedEvent {
                kind:         EventKind::Meet,
                offset:       meeting.offset,
                participants: vec![player, other],
                interrupts:   true,
                payload:      EventPayload::Meet { place: meeting.place },
            });
        }
    }
    events.extend(predict_arrivals(player, &player_route, registry, state, horizon));

    events.retain(|e| e.offset < horizon);
    events.sort_by_key(PredictedEvent::order_key);

    let mut unique: Vec<PredictedEvent> = Vec::with_capacity(events.len());
    for event in events {
        if !unique.contains(&event) {
            unique.push(event);
        }
    }
    trace!(horizon, count = unique.len(), "events predicted");
    unique
}
