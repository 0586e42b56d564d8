//! Top-level session configuration.

use crate::{CoreError, CoreResult, EntityId, GameTime, MINUTES_PER_DAY};

/// Default co-location window for meeting prediction, in minutes.
pub const DEFAULT_MEET_TOLERANCE_MINUTES: u32 = 5;

/// Default activity label that vetoes social interruptions of the player.
pub const DEFAULT_ASLEEP_ACTIVITY: &str = "sleep";

/// Session-wide settings.
///
/// Typically loaded from a JSON file by the host application (enable the
/// `serde` feature) and handed to `rv_session::SessionBuilder`.  Missing
/// fields fall back to [`SessionConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// The player-controlled entity.
    pub player: EntityId,

    /// Two waypoints at the same place whose offsets differ by at most this
    /// many minutes count as a meeting.
    pub meet_tolerance_minutes: u32,

    /// When the player's current activity equals this label, meet dispatch
    /// short-circuits to "no result".
    pub asleep_activity: String,

    /// Game time at which the world clock starts.
    pub start_time: GameTime,

    /// Schedule cycle used when a schedule source does not state one.
    pub cycle_minutes: u32,

    /// Upper bound on inner steps of one `advance` call.  Guards against a
    /// misbehaving world that never lets time progress.
    pub max_advance_steps: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player:                 EntityId(0),
            meet_tolerance_minutes: DEFAULT_MEET_TOLERANCE_MINUTES,
            asleep_activity:        DEFAULT_ASLEEP_ACTIVITY.to_owned(),
            start_time:             GameTime::ZERO,
            cycle_minutes:          MINUTES_PER_DAY,
            max_advance_steps:      10_000,
        }
    }
}

impl SessionConfig {
    /// Default config with `player` as the player entity.
    pub fn for_player(player: EntityId) -> Self {
        Self { player, ..Self::default() }
    }

    /// Reject settings the session cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.player.is_valid() {
            return Err(CoreError::Config("player id is the invalid sentinel".into()));
        }
        if self.asleep_activity.trim().is_empty() {
            return Err(CoreError::Config("asleep_activity must not be blank".into()));
        }
        if self.cycle_minutes == 0 {
            return Err(CoreError::Config("cycle_minutes must be at least 1".into()));
        }
        if self.max_advance_steps == 0 {
            return Err(CoreError::Config("max_advance_steps must be at least 1".into()));
        }
        Ok(())
    }
}
