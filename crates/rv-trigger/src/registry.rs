//! Handler registration.
//!
//! # Ordering
//!
//! Each category keeps its handlers in dispatch order:
//!
//! | Category                      | Order                                    |
//! |-------------------------------|------------------------------------------|
//! | `GameStart`, `Reach`, `Meet`  | Descending priority                      |
//! | `NpcMeet`                     | Ascending priority                       |
//!
//! Ties keep registration order in both cases.

use std::cmp::Reverse;

use tracing::{debug, warn};

use crate::{
    Category, Filter, HandlerId, MeetFilter, ReachFilter, Trigger, TriggerError, TriggerResult,
    TriggerState,
};

// ── Registration ──────────────────────────────────────────────────────────────

/// Everything about a handler except its code.
///
/// Built with one of the category constructors, then refined:
///
/// ```rust
/// use rv_core::{LocationId, Place, RegionId};
/// use rv_trigger::{Registration, ReachFilter};
///
/// let tavern = Place::new(RegionId(0), LocationId(6));
/// let r = Registration::reach("first-visit-tavern", ReachFilter::at(tavern))
///     .priority(10)
///     .once();
/// assert!(r.once);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub id:       HandlerId,
    pub category: Category,
    pub priority: i32,
    pub once:     bool,
    pub filter:   Filter,
}

impl Registration {
    fn with(category: Category, id: HandlerId, filter: Filter) -> Self {
        Self { id, category, priority: 0, once: false, filter }
    }

    pub fn game_start(id: impl Into<HandlerId>) -> Self {
        Self::with(Category::GameStart, id.into(), Filter::Always)
    }

    pub fn reach(id: impl Into<HandlerId>, filter: ReachFilter) -> Self {
        Self::with(Category::Reach, id.into(), Filter::Reach(filter))
    }

    pub fn meet(id: impl Into<HandlerId>, filter: MeetFilter) -> Self {
        Self::with(Category::Meet, id.into(), Filter::Meet(filter))
    }

    pub fn npc_meet(id: impl Into<HandlerId>, filter: MeetFilter) -> Self {
        Self::with(Category::NpcMeet, id.into(), Filter::Meet(filter))
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Fire at most once until the triggered-set is reset.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

// ── RegisteredHandler ─────────────────────────────────────────────────────────

/// A registration bound to its handler.
pub struct RegisteredHandler<O> {
    pub registration: Registration,
    pub(crate) handler: Box<dyn Trigger<O>>,
}

impl<O> RegisteredHandler<O> {
    pub fn id(&self) -> &HandlerId {
        &self.registration.id
    }

    pub fn handler(&self) -> &dyn Trigger<O> {
        self.handler.as_ref()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Handlers per category, each list kept in dispatch order.
///
/// Registration happens once at start-up; the registry is read-only
/// afterwards.  Mutable once-only bookkeeping lives in [`TriggerState`].
pub struct Registry<O> {
    by_category: [Vec<RegisteredHandler<O>>; 4],
}

impl<O> Default for Registry<O> {
    fn default() -> Self {
        Self { by_category: [Vec::new(), Vec::new(), Vec::new(), Vec::new()] }
    }
}

impl<O> Registry<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler.
    ///
    /// Fails if `registration.id` is already registered in the same category.
    pub fn register(
        &mut self,
        registration: Registration,
        handler: impl Trigger<O> + 'static,
    ) -> TriggerResult<()> {
        let category = registration.category;
        let list = &mut self.by_category[category.index()];
        if list.iter().any(|h| h.registration.id == registration.id) {
            warn!(%category, id = %registration.id, "duplicate handler registration rejected");
            return Err(TriggerError::DuplicateHandler { category, id: registration.id });
        }

        debug!(%category, id = %registration.id, priority = registration.priority, once = registration.once, "handler registered");
        list.push(RegisteredHandler { registration, handler: Box::new(handler) });

        // Stable sorts: equal priorities keep registration order.
        if category.ascending_priority() {
            list.sort_by_key(|h| h.registration.priority);
        } else {
            list.sort_by_key(|h| Reverse(h.registration.priority));
        }
        Ok(())
    }

    /// Handlers for `category`, in dispatch order.
    pub fn handlers(&self, category: Category) -> &[RegisteredHandler<O>] {
        &self.by_category[category.index()]
    }

    pub fn len(&self) -> usize {
        self.by_category.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reach filters of handlers that can still fire, in dispatch order.
    ///
    /// Once-only handlers already recorded in `state` are left out.
    pub fn live_reach_filters<'a>(
        &'a self,
        state: &'a TriggerState,
    ) -> impl Iterator<Item = (&'a HandlerId, &'a ReachFilter)> + 'a {
        self.handlers(Category::Reach).iter().filter_map(move |h| {
            let reg = &h.registration;
            if reg.once && state.is_triggered(Category::Reach, &reg.id) {
                return None;
            }
            match &reg.filter {
                Filter::Reach(f) => Some((&reg.id, f)),
                _ => None,
            }
        })
    }
}
