//! `WakeQueue` — sparse per-time entity activation queue.
//!
//! Most entities spend most minutes inside one schedule window.  Instead of
//! running every agent on every step, each entity registers the time of its
//! next schedule boundary and only the entities whose boundary has arrived
//! are re-planned.

use std::collections::BTreeMap;

use rv_core::{EntityId, GameTime};

use crate::Schedule;

/// Maps game times to the entities that must re-plan at that time.
#[derive(Clone, Debug, Default)]
pub struct WakeQueue {
    inner: BTreeMap<GameTime, Vec<EntityId>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial queue from schedules indexed by `EntityId`.
    ///
    /// Each entity wakes at `schedule.next_boundary(start)`.  Empty schedules
    /// are not inserted.
    pub fn build_from_schedules(schedules: &[Schedule], start: GameTime) -> Self {
        let mut queue = Self::new();
        for (i, schedule) in schedules.iter().enumerate() {
            if let Some(wake) = schedule.next_boundary(start) {
                queue.push(wake, EntityId(i as u32));
            }
        }
        queue
    }

    /// Schedule `entity` to wake at `time`.
    ///
    /// An entity may be queued more than once; callers de-duplicate.
    pub fn push(&mut self, time: GameTime, entity: EntityId) {
        self.inner.entry(time).or_default().push(entity);
        self.total += 1;
    }

    /// Remove and return every entity queued at or before `now`, in time
    /// order.
    pub fn drain_due(&mut self, now: GameTime) -> Vec<EntityId> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let entities: Vec<EntityId> = due.into_values().flatten().collect();
        self.total -= entities.len();
        entities
    }

    /// The earliest queued time, or `None` if empty.
    pub fn next_time(&self) -> Option<GameTime> {
        self.inner.keys().next().copied()
    }

    /// Total number of (time, entity) entries.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
