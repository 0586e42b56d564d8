//! Per-entity movement state.

use std::collections::VecDeque;

use rv_core::Place;

use crate::{Leg, TransitState};

/// The edge currently being traversed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveLeg {
    leg:       Leg,
    remaining: u32,
}

/// The movement state for a single entity.
///
/// An entity is either **stationary** (`leg` is `None`) or **in transit**
/// along exactly one edge.  Further legs of the journey wait in `queued` and
/// start one at a time as each edge completes.
///
/// The world uses a **teleport-at-arrival** model per edge: the entity
/// logically stays at the edge's origin until the edge's remaining time runs
/// out, then instantly appears at its end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    /// Current position (origin of the active edge while in transit).
    /// `None` for entities that were never placed.
    pub place: Option<Place>,
    active:    Option<ActiveLeg>,
    queued:    VecDeque<Leg>,
}

impl Movement {
    /// A stationary entity at `place`.
    #[inline]
    pub fn stationary(place: Place) -> Self {
        Self { place: Some(place), active: None, queued: VecDeque::new() }
    }

    /// An entity with no position data.
    #[inline]
    pub fn unplaced() -> Self {
        Self::default()
    }

    #[inline]
    pub fn in_transit(&self) -> bool {
        self.active.is_some()
    }

    /// Where the journey ends, or `None` when stationary.
    pub fn final_destination(&self) -> Option<Place> {
        let active = self.active?;
        Some(self.queued.back().map_or(active.leg.to, |l| l.to))
    }

    /// Snapshot of the current edge, for [`crate::WorldQuery::transit_state`].
    pub fn transit_state(&self) -> Option<TransitState> {
        let active = self.active?;
        Some(TransitState {
            origin:            active.leg.from,
            destination:       active.leg.to,
            remaining_minutes: active.remaining,
            final_destination: self.final_destination().unwrap_or(active.leg.to),
        })
    }

    /// Replace the journey with `legs`.
    ///
    /// When already mid-edge, that edge is kept and `legs` must start at its
    /// end; they are queued behind it.  Otherwise the first leg starts now.
    pub fn start_journey(&mut self, legs: Vec<Leg>) {
        self.queued = legs.into();
        if self.active.is_none() {
            self.start_next_leg();
        }
    }

    /// Drop everything queued after the current edge.
    pub fn stop_after_current(&mut self) {
        self.queued.clear();
    }

    /// End of the current edge, or the current place when stationary.  This
    /// is where a new journey has to be planned from.
    pub fn replan_origin(&self) -> Option<Place> {
        match self.active {
            Some(a) => Some(a.leg.to),
            None    => self.place,
        }
    }

    /// Advance by `minutes`, completing as many edges as fit.
    ///
    /// Returns every place reached, in order.
    pub fn advance(&mut self, minutes: u64) -> Vec<Place> {
        let mut budget = minutes;
        let mut reached = Vec::new();
        while let Some(active) = self.active.as_mut() {
            if budget == 0 {
                break;
            }
            if (active.remaining as u64) <= budget {
                budget -= active.remaining as u64;
                let to = active.leg.to;
                self.place = Some(to);
                self.active = None;
                reached.push(to);
                self.start_next_leg();
            } else {
                active.remaining -= budget as u32;
                budget = 0;
            }
        }
        reached
    }

    fn start_next_leg(&mut self) {
        let Some(leg) = self.queued.pop_front() else {
            self.active = None;
            return;
        };
        self.place = Some(leg.from);
        self.active = Some(ActiveLeg { leg, remaining: leg.minutes.max(1) });
    }
}
