//! Core timetable types: `ScheduleEntry`, `Schedule`, and `ScheduleIssue`.
//!
//! # Cycle model
//!
//! Each entity carries a `Schedule`: a list of entries and a `cycle_minutes`
//! period (1440 for a daily timetable, 10080 for a weekly one).  At absolute
//! time `t` the position inside the cycle is:
//!
//! ```text
//! minute = t % cycle_minutes
//! ```
//!
//! An entry `[start, end)` is active when `start <= minute < end`.  When
//! `start > end` the window wraps past the end of the cycle and is active when
//! `minute >= start || minute < end`.  `start == end` is an empty window.
//!
//! Exactly one active entry means "be there, doing that".  Zero active entries
//! means the entity is off schedule.  More than one is a configuration fault;
//! the minute resolves to no match.

use rv_core::{GameTime, MINUTES_PER_DAY, Place};
use thiserror::Error;
use tracing::warn;

// ── ScheduleEntry ─────────────────────────────────────────────────────────────

/// One timetable row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleEntry {
    /// First minute of the window, inclusive.
    pub start_minute: u32,

    /// End of the window, exclusive.  Smaller than `start_minute` for windows
    /// that run through midnight.
    pub end_minute: u32,

    /// Application-defined activity label (`"sleep"`, `"work"`, ...).
    pub activity: String,

    /// Where the entity should be for this activity.
    pub destination: Place,
}

impl ScheduleEntry {
    pub fn new(start_minute: u32, end_minute: u32, activity: impl Into<String>, destination: Place) -> Self {
        Self { start_minute, end_minute, activity: activity.into(), destination }
    }

    /// `true` if the window runs past the end of the cycle.
    #[inline]
    pub fn wraps(&self) -> bool {
        self.start_minute > self.end_minute
    }

    /// `true` if `minute` (a position inside the cycle) falls in the window.
    pub fn contains(&self, minute: u32) -> bool {
        if self.wraps() {
            minute >= self.start_minute || minute < self.end_minute
        } else {
            self.start_minute <= minute && minute < self.end_minute
        }
    }

    /// The window as half-open linear segments inside `[0, cycle)`.
    fn segments(&self, cycle: u32) -> Vec<(u32, u32)> {
        let (start, end) = (self.start_minute.min(cycle), self.end_minute.min(cycle));
        if self.wraps() {
            vec![(start, cycle), (0, end)]
        } else if start < end {
            vec![(start, end)]
        } else {
            Vec::new()
        }
    }
}

// ── ScheduleIssue ─────────────────────────────────────────────────────────────

/// A configuration fault found by [`Schedule::validated`].
///
/// Issues are reported, never fatal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScheduleIssue {
    #[error("entries {first:?} and {second:?} have overlapping windows")]
    Overlap { first: String, second: String },

    #[error("entry {activity:?} targets unknown location {destination}; entry disabled")]
    UnknownDestination { activity: String, destination: Place },

    #[error("entry {activity:?} has an empty window at minute {minute}")]
    EmptyWindow { activity: String, minute: u32 },

    #[error("entry {activity:?} has a bound outside the {cycle}-minute cycle")]
    OutOfCycle { activity: String, cycle: u32 },
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// A cyclic timetable for one entity.
///
/// Entries are kept sorted by `start_minute` (stable, so equal starts keep
/// their input order).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    /// Length of one cycle in minutes.
    pub cycle_minutes: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::empty()
    }
}

impl Schedule {
    /// Construct a schedule, sorting entries by start minute.
    ///
    /// A `cycle_minutes` of zero is replaced by one day.
    pub fn new(mut entries: Vec<ScheduleEntry>, cycle_minutes: u32) -> Self {
        entries.sort_by_key(|e| e.start_minute);
        let cycle_minutes = if cycle_minutes == 0 { MINUTES_PER_DAY } else { cycle_minutes };
        Self { entries, cycle_minutes }
    }

    /// A 24-hour schedule.
    pub fn daily(entries: Vec<ScheduleEntry>) -> Self {
        Self::new(entries, MINUTES_PER_DAY)
    }

    /// A schedule with no entries.  Player-controlled entities have one.
    pub fn empty() -> Self {
        Self { entries: Vec::new(), cycle_minutes: MINUTES_PER_DAY }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Read-only slice of all entries (sorted by start minute).
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Position of `now` inside this schedule's cycle.
    #[inline]
    pub fn minute_of_cycle(&self, now: GameTime) -> u32 {
        now.minute_of_cycle(self.cycle_minutes)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// The single entry active at `now`.
    ///
    /// `None` when no window contains `now`, and also when more than one does.
    pub fn active_entry(&self, now: GameTime) -> Option<&ScheduleEntry> {
        let minute = self.minute_of_cycle(now);
        let mut active = self.entries.iter().filter(|e| e.contains(minute));
        let first = active.next()?;
        match active.next() {
            None => Some(first),
            Some(_) => None,
        }
    }

    /// The earliest time strictly after `now` at which some window opens or
    /// closes.  `None` for an empty schedule.
    pub fn next_boundary(&self, now: GameTime) -> Option<GameTime> {
        let cycle = self.cycle_minutes as u64;
        let minute = self.minute_of_cycle(now) as u64;
        self.entries
            .iter()
            .flat_map(|e| [e.start_minute, e.end_minute])
            .map(|b| {
                let b = b as u64 % cycle;
                match (b + cycle - minute) % cycle {
                    0 => cycle,
                    d => d,
                }
            })
            .min()
            .map(|delta| now + delta)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check the schedule against the world and report configuration faults.
    ///
    /// `known` answers whether a destination exists.  Entries with unknown
    /// destinations are dropped from the returned schedule; every other issue
    /// is reported but leaves the entry in place.  Each issue is logged at
    /// `warn` level.
    pub fn validated(self, known: impl Fn(Place) -> bool) -> (Schedule, Vec<ScheduleIssue>) {
        let cycle = self.cycle_minutes;
        let mut issues = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());

        for entry in self.entries {
            if !known(entry.destination) {
                issues.push(ScheduleIssue::UnknownDestination {
                    activity:    entry.activity,
                    destination: entry.destination,
                });
                continue;
            }
            if entry.start_minute >= cycle || entry.end_minute > cycle {
                issues.push(ScheduleIssue::OutOfCycle { activity: entry.activity.clone(), cycle });
            }
            if entry.start_minute == entry.end_minute {
                issues.push(ScheduleIssue::EmptyWindow {
                    activity: entry.activity.clone(),
                    minute:   entry.start_minute,
                });
            }
            kept.push(entry);
        }

        let segments: Vec<Vec<(u32, u32)>> = kept.iter().map(|e| e.segments(cycle)).collect();
        for i in 0..kept.len() {
            for j in (i + 1)..kept.len() {
                let overlap = segments[i].iter().any(|&(a_lo, a_hi)| {
                    segments[j].iter().any(|&(b_lo, b_hi)| a_lo < b_hi && b_lo < a_hi)
                });
                if overlap {
                    issues.push(ScheduleIssue::Overlap {
                        first:  kept[i].activity.clone(),
                        second: kept[j].activity.clone(),
                    });
                }
            }
        }

        for issue in &issues {
            warn!(%issue, "schedule configuration fault");
        }

        (Schedule { entries: kept, cycle_minutes: cycle }, issues)
    }
}
