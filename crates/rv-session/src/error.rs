use rv_core::{CoreError, EntityId};
use rv_schedule::ScheduleError;
use rv_trigger::TriggerError;
use rv_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match entity count {expected}")]
    EntityCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("config names {config} as the player but the world says {world}")]
    PlayerMismatch { config: EntityId, world: EntityId },

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("trigger error: {0}")]
    Trigger(#[from] TriggerError),

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type SessionResult<T> = Result<T, SessionError>;
