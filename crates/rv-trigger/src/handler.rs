//! The `Trigger` trait — the extension point for narrative content.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::TriggerContext;

// ── HandlerId ─────────────────────────────────────────────────────────────────

/// Stable name of a registered handler.
///
/// Together with the category it keys the triggered-set, so it must not change
/// between a save and a load.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerId(Cow<'static, str>);

impl HandlerId {
    pub const fn new_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for HandlerId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── HandlerError ──────────────────────────────────────────────────────────────

/// A fault inside a handler.  The dispatcher logs it and moves on.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

// ── Trigger ───────────────────────────────────────────────────────────────────

/// A narrative handler producing results of type `O`.
///
/// # Required methods
///
/// Only [`handle`][Self::handle] is required.  The declarative filter given at
/// registration is checked first; [`should_trigger`][Self::should_trigger]
/// adds a dynamic check on top and defaults to `true`.
///
/// # Results
///
/// | `handle` returns | Dispatcher does                                        |
/// |------------------|--------------------------------------------------------|
/// | `Ok(Some(o))`    | Stops; `o` is the dispatch result                      |
/// | `Ok(None)`       | Tries the next handler                                 |
/// | `Err(e)`         | Logs `e` at `warn` and tries the next handler          |
///
/// Wrap a closure with [`from_fn`] to register it directly.
pub trait Trigger<O> {
    fn should_trigger(&self, _ctx: &TriggerContext<'_>) -> bool {
        true
    }

    fn handle(&self, ctx: &TriggerContext<'_>) -> Result<Option<O>, HandlerError>;
}

/// A [`Trigger`] backed by a closure.  See [`from_fn`].
pub struct FnTrigger<F>(F);

/// Turn `f` into a [`Trigger`] whose `handle` calls `f`.
pub fn from_fn<O, F>(f: F) -> FnTrigger<F>
where
    F: Fn(&TriggerContext<'_>) -> Result<Option<O>, HandlerError>,
{
    FnTrigger(f)
}

impl<O, F> Trigger<O> for FnTrigger<F>
where
    F: Fn(&TriggerContext<'_>) -> Result<Option<O>, HandlerError>,
{
    fn handle(&self, ctx: &TriggerContext<'_>) -> Result<Option<O>, HandlerError> {
        (self.0)(ctx)
    }
}
