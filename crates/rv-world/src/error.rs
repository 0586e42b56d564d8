use rv_core::{EntityId, Place};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("entity {0} has no position")]
    NotPlaced(EntityId),

    #[error("location {0} is not in the world graph")]
    UnknownPlace(Place),

    #[error("no route from {from} to {to}")]
    NoRoute { from: Place, to: Place },

    #[error("world configuration error: {0}")]
    Config(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
