//! `rv-predict` — "what happens in the next N minutes?"
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`route`]     | `Waypoint`, `Route`, `project` (one-hop lookahead)       |
//! | [`meeting`]   | `Meeting`, `earliest_meeting`, `predict_meeting`         |
//! | [`arrival`]   | `predict_arrivals` (player route vs. reach filters)      |
//! | [`event`]     | `EventKind`, `EventPayload`, `PredictedEvent`            |
//! | [`aggregate`] | `predict_events`                                         |
//!
//! # Output guarantees
//!
//! For a horizon `H`, every event returned by [`predict_events`] has
//! `offset < H`, the list is sorted by `(offset, kind)` with `Meet` before
//! `Reach`, and contains no duplicates.

pub mod aggregate;
pub mod arrival;
pub mod event;
pub mod meeting;
pub mod route;


pub use aggregate::predict_events;
pub use arrival::predict_arrivals;
pub use event::{EventKind, EventPayload, PredictedEvent};
pub use meeting::{Meeting, earliest_meeting, predict_meeting};
pub use route::{Route, Waypoint, project};
