//! `rv-schedule` — entity timetables, the scheduling agent, wake queue, and
//! CSV loading.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`schedule`]   | `ScheduleEntry`, `Schedule`, `ScheduleIssue`             |
//! | [`agent`]      | `Decision`, `decide`, `apply_decision`, `agent_tick`     |
//! | [`wake_queue`] | `WakeQueue` (`BTreeMap<GameTime, Vec<EntityId>>`)        |
//! | [`loader`]     | `load_schedules_csv`, `load_schedules_reader`            |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                     |
//!
//! # Agent model (summary)
//!
//! ```text
//! minute   = now % cycle_minutes
//! entry    = the single entry whose [start, end) window holds minute
//! decision = Move(entry.destination)        if not there yet
//!          | SetActivity(entry.activity)    if there
//!          | SetActivity(None)              if no single entry matches
//! ```

pub mod agent;
pub mod error;
pub mod loader;
pub mod schedule;
pub mod wake_queue;

#[cfg(test)]
mod tests;

pub use agent::{Decision, agent_tick, apply_decision, decide};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedules_csv, load_schedules_reader};
pub use schedule::{Schedule, ScheduleEntry, ScheduleIssue};
pub use wake_queue::WakeQueue;
