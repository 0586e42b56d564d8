//! Movement route projection.
//!
//! # Lookahead
//!
//! Projection looks exactly one hop ahead.  A stationary entity projects to
//! where it stands; a moving entity projects to the end of the edge it is on.
//! Legs queued behind that edge are not projected.

use rv_core::{EntityId, Place};
use rv_world::WorldQuery;
use tracing::trace;

/// A place and the minutes from now at which the entity is there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub place:  Place,
    pub offset: u64,
}

impl Waypoint {
    pub const fn new(place: Place, offset: u64) -> Self {
        Self { place, offset }
    }
}

/// A non-empty, time-ascending sequence of waypoints.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// `None` if `waypoints` is empty.  Waypoints are sorted by offset
    /// (stable).
    pub fn new(mut waypoints: Vec<Waypoint>) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        waypoints.sort_by_key(|w| w.offset);
        Some(Self { waypoints })
    }

    /// A single waypoint at offset 0.
    pub fn stationary(place: Place) -> Self {
        Self { waypoints: vec![Waypoint::new(place, 0)] }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

/// Project where `id` will be within `horizon` minutes.
///
/// | Entity                                     | Route                          |
/// |--------------------------------------------|--------------------------------|
/// | Stationary                                 | `[(place, 0)]`                 |
/// | Moving, edge ends before `horizon`         | `[(edge end, remaining)]`      |
/// | Moving, edge ends at or after `horizon`    | `None`                         |
/// | Unknown or unplaced                        | `None`                         |
pub fn project<W: WorldQuery + ?Sized>(world: &W, id: EntityId, horizon: u64) -> Option<Route> {
    if let Some(transit) = world.transit_state(id) {
        let offset = transit.remaining_minutes as u64;
        if offset >= horizon {
            trace!(entity = %id, offset, horizon, "edge completes beyond horizon");
            return None;
        }
        return Some(Route { waypoints: vec![Waypoint::new(transit.destination, offset)] });
    }
    let Some(place) = world.entity_location(id) else {
        trace!(entity = %id, "no position data; nothing to project");
        return None;
    };
    Some(Route::stationary(place))
}
