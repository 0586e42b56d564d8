//! Declarative match predicates.
//!
//! Filters are plain data so the arrival predictor can evaluate reach filters
//! against projected waypoints without constructing a dispatch context.

use rv_core::{EntityId, LocationId, Place, RegionId};

use crate::TriggerContext;

// ── ReachFilter ───────────────────────────────────────────────────────────────

/// Matches a place.  A `None` component matches anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachFilter {
    pub region:   Option<RegionId>,
    pub location: Option<LocationId>,
}

impl ReachFilter {
    /// Matches every place.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches exactly `place`.
    pub fn at(place: Place) -> Self {
        Self { region: Some(place.region), location: Some(place.location) }
    }

    /// Matches every location of `region`.
    pub fn region(region: RegionId) -> Self {
        Self { region: Some(region), location: None }
    }

    pub fn matches(&self, place: Place) -> bool {
        self.region.is_none_or(|r| r == place.region)
            && self.location.is_none_or(|l| l == place.location)
    }
}

// ── MeetFilter ────────────────────────────────────────────────────────────────

/// Matches a participant set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeetFilter {
    /// Any meeting.
    #[default]
    Any,
    /// Meetings that include this entity.
    With(EntityId),
    /// Meetings that include every one of these entities.
    AllOf(Vec<EntityId>),
}

impl MeetFilter {
    pub fn matches(&self, participants: &[EntityId]) -> bool {
        match self {
            MeetFilter::Any         => true,
            MeetFilter::With(id)    => participants.contains(id),
            MeetFilter::AllOf(ids)  => ids.iter().all(|id| participants.contains(id)),
        }
    }
}

// ── Filter ────────────────────────────────────────────────────────────────────

/// The declarative part of a registration, chosen by category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Game-start handlers have no declarative filter.
    Always,
    Reach(ReachFilter),
    Meet(MeetFilter),
}

impl Filter {
    /// Evaluate against a dispatch context.
    ///
    /// A reach filter never matches a context without a place.
    pub fn matches(&self, ctx: &TriggerContext<'_>) -> bool {
        match self {
            Filter::Always    => true,
            Filter::Reach(f)  => ctx.place.is_some_and(|p| f.matches(p)),
            Filter::Meet(f)   => f.matches(&ctx.participants),
        }
    }
}
