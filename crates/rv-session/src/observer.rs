//! Session observer trait for progress reporting and narration hooks.

use rv_core::GameTime;
use rv_predict::PredictedEvent;
use rv_trigger::Fired;

/// Callbacks invoked by [`Session::advance`][crate::Session::advance].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust,ignore
/// struct Clock;
///
/// impl<O> SessionObserver<O> for Clock {
///     fn on_step(&mut self, now: GameTime, minutes: u64, _woken: usize) {
///         println!("{now} (+{minutes} min)");
///     }
/// }
/// ```
pub trait SessionObserver<O> {
    /// Called after each prediction pass with the full candidate list.
    fn on_predicted(&mut self, _now: GameTime, _events: &[PredictedEvent]) {}

    /// Called after the world advanced by `minutes`.
    ///
    /// `woken` is the number of agents that ran after the step.
    fn on_step(&mut self, _now: GameTime, _minutes: u64, _woken: usize) {}

    /// Called when a handler produced a result.  The advance stops right after.
    fn on_dispatched(&mut self, _now: GameTime, _fired: &Fired<O>) {}

    /// Called once when `advance` returns.
    fn on_advance_end(&mut self, _now: GameTime, _elapsed: u64) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl<O> SessionObserver<O> for NoopObserver {}
