//! Arrival prediction: projected waypoints that land on a reach trigger.

use rv_core::EntityId;
use rv_trigger::{HandlerId, Registry, TriggerState};

use crate::{EventKind, EventPayload, PredictedEvent, Route};

/// Reach events for every waypoint of `route` strictly after now and before
/// `horizon` whose place matches at least one live reach filter.
///
/// Only the declarative filters are consulted; a handler's dynamic
/// `should_trigger` runs at dispatch time.
pub fn predict_arrivals<O>(
    entity: EntityId,
    route: &Route,
    registry: &Registry<O>,
    state: &TriggerState,
    horizon: u64,
) -> Vec<PredictedEvent> {
    route
        .waypoints()
        .iter()
        .filter(|w| w.offset > 0 && w.offset < horizon)
        .filter_map(|w| {
            let handlers: Vec<HandlerId> = registry
                .live_reach_filters(state)
                .filter(|(_, filter)| filter.matches(w.place))
                .map(|(id, _)| id.clone())
                .collect();
            if handlers.is_empty() {
                return None;
            }
            Some(PredictedEvent {
                kind:         EventKind::Reach,
                offset:       w.offset,
                participants: vec![entity],
                interrupts:   true,
                payload:      EventPayload::Reach { place: w.place, handlers },
            })
        })
        .collect()
}
