//! `rv-trigger` — narrative handlers and their dispatch.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`category`] | `Category` (`GameStart`, `Reach`, `Meet`, `NpcMeet`)          |
//! | [`context`]  | `TriggerContext` — the occurrence plus world access           |
//! | [`filter`]   | `ReachFilter`, `MeetFilter`, `Filter`                         |
//! | [`handler`]  | `Trigger` trait, `from_fn`, `HandlerId`, `HandlerError`       |
//! | [`registry`] | `Registration`, `Registry` (per-category dispatch order)      |
//! | [`state`]    | `TriggerState` — the triggered-set                            |
//! | [`dispatch`] | `dispatch_game_start`, `dispatch_reach`, `dispatch_meet`      |
//! | [`creation`] | `CreationFlowState` character-creation state machine          |
//! | [`error`]    | `TriggerError`, `TriggerResult<T>`                            |
//!
//! # Guarantees
//!
//! - At most one handler result per dispatch.
//! - A once-only handler produces a result at most once until
//!   [`TriggerState::reset`].
//! - A failing handler never aborts dispatch.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `TriggerState` and creation-flow types become serializable.    |

pub mod category;
pub mod context;
pub mod creation;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod handler;
pub mod registry;
pub mod state;


pub use category::Category;
pub use context::TriggerContext;
pub use creation::{
    Character, CreationCatalog, CreationFields, CreationFlowState, CreationStep, FlowInput,
    FlowStep, MAX_NAME_CHARS, Prompt, Rejection,
};
pub use dispatch::{Fired, dispatch, dispatch_game_start, dispatch_meet, dispatch_reach};
pub use error::{TriggerError, TriggerResult};
pub use filter::{Filter, MeetFilter, ReachFilter};
pub use handler::{FnTrigger, HandlerError, HandlerId, Trigger, from_fn};
pub use registry::{RegisteredHandler, Registration, Registry};
pub use state::TriggerState;
