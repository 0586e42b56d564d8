//! `rv-core` — foundational types for the `rendezvous` framework.
//!
//! This crate is a dependency of every other `rv-*` crate.  It intentionally
//! has no `rv-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `EntityId`, `RegionId`, `LocationId`, `Place`         |
//! | [`time`]    | `GameTime`, `GameClock`, minute constants             |
//! | [`config`]  | `SessionConfig`                                       |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DEFAULT_ASLEEP_ACTIVITY, DEFAULT_MEET_TOLERANCE_MINUTES, SessionConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, LocationId, Place, RegionId};
pub use time::{GameClock, GameTime, MINUTES_PER_DAY, MINUTES_PER_WEEK};
