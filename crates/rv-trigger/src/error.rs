use thiserror::Error;

use crate::{Category, HandlerId};

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("handler {id} is already registered for {category}")]
    DuplicateHandler { category: Category, id: HandlerId },
}

pub type TriggerResult<T> = Result<T, TriggerError>;
