//! Predicted events.

use rv_core::{EntityId, Place};
use rv_trigger::HandlerId;

/// Kind of predicted occurrence.
///
/// The derive order is the tie-break between events at the same offset:
/// `Meet` sorts before `Reach`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Meet,
    Reach,
}

/// Kind-specific details.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventPayload {
    Meet { place: Place },
    /// `handlers` are the reach handlers whose filters match `place`, in
    /// dispatch order.
    Reach { place: Place, handlers: Vec<HandlerId> },
}

/// A candidate interruption point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictedEvent {
    pub kind: EventKind,

    /// Minutes from now.  Always below the requested horizon.
    pub offset: u64,

    /// For `Meet`: the player first, then the other entity.  For `Reach`: the
    /// arriving entity.
    pub participants: Vec<EntityId>,

    /// Only interrupting events may cut a time advance short.
    pub interrupts: bool,

    pub payload: EventPayload,
}

impl PredictedEvent {
    pub fn place(&self) -> Place {
        match &self.payload {
            EventPayload::Meet { place } | EventPayload::Reach { place, .. } => *place,
        }
    }

    /// Sort key: offset, then kind.
    #[inline]
    pub fn order_key(&self) -> (u64, EventKind) {
        (self.offset, self.kind)
    }
}
