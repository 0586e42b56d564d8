//! `rv-session` — the host-facing entry points of the rendezvous framework.
//!
//! A [`Session`] owns the world, the schedules, the handler registry, and
//! the triggered-set for one game.  Hosts call into it; nothing is global.
//!
//! # Advance loop
//!
//! ```text
//! loop:
//!   ① Wake     — run agents whose schedule boundary is due; queue the next.
//!   ② Predict  — predict_events(remaining minutes).
//!   ③ Now      — dispatch meetings at offset 0 not yet dispatched.
//!   ④ Step     — advance the world to the earliest of
//!                  next interrupting event | next wake | next edge end | end.
//!   ⑤ Arrive   — run agents that finished an edge.
//!   ⑥ Fire     — dispatch events predicted for this instant.
//!                The first handler result stops the advance.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`session`]  | `Session`, `Advance`                                 |
//! | [`builder`]  | `SessionBuilder`                                     |
//! | [`observer`] | `SessionObserver`, `NoopObserver`                    |
//! | [`error`]    | `SessionError`, `SessionResult<T>`                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rv_session::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(config, world)
//!     .schedules(schedules)
//!     .registry(registry)
//!     .build()?;
//! if let Some(intro) = session.new_game() { show(intro) }
//! let step = session.advance(120, &mut NoopObserver);
//! if let Some(fired) = step.fired { show(fired.output) }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod session;


pub use builder::SessionBuilder;
pub use error::{SessionError, SessionResult};
pub use observer::{NoopObserver, SessionObserver};
pub use session::{Advance, Session};
