//! Game time model.
//!
//! # Design
//!
//! Time is a monotonically increasing count of simulated **minutes** since
//! day 0, 00:00.  Schedules only ever look at the position inside a repeating
//! cycle:
//!
//!   minute_of_cycle = time % cycle_minutes
//!
//! Using an integer minute as the canonical unit keeps all schedule and
//! prediction arithmetic exact.  Sub-minute resolution is not supported.

use std::fmt;

/// Minutes in one day.  The default schedule cycle.
pub const MINUTES_PER_DAY: u32 = 1_440;

/// Minutes in one week.  Use as `cycle_minutes` for weekly timetables.
pub const MINUTES_PER_WEEK: u32 = 7 * MINUTES_PER_DAY;

// ── GameTime ──────────────────────────────────────────────────────────────────

/// An absolute game time, in minutes since day 0 00:00.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime(pub u64);

impl GameTime {
    pub const ZERO: GameTime = GameTime(0);

    /// Build a time from a day index and a clock reading.
    pub fn at(day: u64, hour: u32, minute: u32) -> GameTime {
        GameTime(day * MINUTES_PER_DAY as u64 + hour as u64 * 60 + minute as u64)
    }

    /// Return the time `n` minutes after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> GameTime {
        GameTime(self.0 + n)
    }

    /// Minutes elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: GameTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Position within the current day, `0..1440`.
    #[inline]
    pub fn minute_of_day(self) -> u32 {
        self.minute_of_cycle(MINUTES_PER_DAY)
    }

    /// Position within a cycle of `cycle_minutes`.
    ///
    /// A zero-length cycle is treated as a one-day cycle.
    #[inline]
    pub fn minute_of_cycle(self, cycle_minutes: u32) -> u32 {
        let cycle = if cycle_minutes == 0 { MINUTES_PER_DAY } else { cycle_minutes };
        (self.0 % cycle as u64) as u32
    }

    /// Zero-based day index.
    #[inline]
    pub fn day(self) -> u64 {
        self.0 / MINUTES_PER_DAY as u64
    }

    /// `(hour, minute)` of the current day.
    pub fn hm(self) -> (u32, u32) {
        let m = self.minute_of_day();
        (m / 60, m % 60)
    }
}

impl std::ops::Add<u64> for GameTime {
    type Output = GameTime;
    #[inline]
    fn add(self, rhs: u64) -> GameTime {
        GameTime(self.0 + rhs)
    }
}

impl std::ops::Sub for GameTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: GameTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.hm();
        write!(f, "day {} {:02}:{:02}", self.day(), h, m)
    }
}

// ── GameClock ─────────────────────────────────────────────────────────────────

/// The world's clock.  Holds no heap data and is cheap to copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    pub now: GameTime,
}

impl GameClock {
    pub fn new(start: GameTime) -> Self {
        Self { now: start }
    }

    /// Advance the clock by `minutes`.
    #[inline]
    pub fn advance(&mut self, minutes: u64) {
        self.now = self.now.offset(minutes);
    }

    /// Current minute of day (the value exposed to hosts as "current time").
    #[inline]
    pub fn minute_of_day(&self) -> u32 {
        self.now.minute_of_day()
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.now.fmt(f)
    }
}
