//! The `Session` struct and its advance loop.

use std::collections::{BTreeMap, BTreeSet};

use rv_core::{EntityId, GameTime, Place, SessionConfig};
use rv_predict::{EventKind, EventPayload, PredictedEvent};
use rv_schedule::{Decision, Schedule, ScheduleIssue, WakeQueue};
use rv_trigger::{Fired, Registration, Registry, Trigger, TriggerState};
use rv_world::{WorldCommands, WorldQuery};
use tracing::{debug, info, trace, warn};

use crate::{SessionObserver, SessionResult};

/// Player, other participant, and place of an ongoing meeting.
type Encounter = (EntityId, EntityId, Place);

/// How an ongoing meeting was last handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum EncounterState {
    /// A handler produced a result.  Not dispatched again while it lasts.
    Dispatched,
    /// Vetoed or declined at this instant.  Retried once time moves on or
    /// on the next advance.
    Declined(GameTime),
}

// ── Advance ───────────────────────────────────────────────────────────────────

/// What one [`Session::advance`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advance<O> {
    /// Minutes actually elapsed.  Less than requested when interrupted.
    pub elapsed: u64,

    /// The handler result that stopped the advance, if any.
    pub fired: Option<Fired<O>>,
}

impl<O> Advance<O> {
    pub fn interrupted(&self) -> bool {
        self.fired.is_some()
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// All per-game state the core owns, plus the world it drives.
///
/// Every host entry point is a method here; there is no global state.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session<W, O> {
    pub config: SessionConfig,

    /// The world collaborator.
    pub world: W,

    /// Per-entity timetables, indexed by `EntityId`.
    pub schedules: Vec<Schedule>,

    /// Handlers.  Read-only once the session runs.
    pub registry: Registry<O>,

    /// The triggered-set.  Cleared by [`reset_triggered`](Self::reset_triggered).
    pub triggers: TriggerState,

    /// Next schedule boundary per entity.
    pub wake_queue: WakeQueue,

    /// Ongoing meetings and how they were last handled.  Dropped as soon as
    /// the pair is no longer predicted to be together.
    pub(crate) encounters: BTreeMap<Encounter, EncounterState>,

    pub(crate) schedule_issues: Vec<(EntityId, ScheduleIssue)>,
}

impl<W, O> Session<W, O>
where
    W: WorldQuery + WorldCommands,
{
    // ── Host entry points ─────────────────────────────────────────────────

    /// Candidate events in the next `horizon` minutes, sorted.
    pub fn predict_events(&self, horizon: u64) -> Vec<PredictedEvent> {
        rv_predict::predict_events(
            &self.world,
            &self.registry,
            &self.triggers,
            horizon,
            self.config.meet_tolerance_minutes,
        )
    }

    pub fn dispatch_game_start(&mut self) -> Option<O> {
        self.fire_game_start().map(|f| f.output)
    }

    pub fn dispatch_reach(&mut self, entity: EntityId, place: Place) -> Option<O> {
        self.fire_reach(entity, place).map(|f| f.output)
    }

    pub fn dispatch_meet(&mut self, first: EntityId, others: &[EntityId]) -> Option<O> {
        self.fire_meet(first, others).map(|f| f.output)
    }

    /// Forget every once-only firing.  Call on new game.
    pub fn reset_triggered(&mut self) {
        self.triggers.reset();
        self.encounters.clear();
    }

    /// Reset, then dispatch game start.
    pub fn new_game(&mut self) -> Option<O> {
        info!(now = %self.world.current_time(), "new game");
        self.reset_triggered();
        self.dispatch_game_start()
    }

    /// Run the scheduling agent for `id` at `now`.
    pub fn agent_tick(&mut self, id: EntityId, now: GameTime) -> Option<Decision> {
        let Some(schedule) = self.schedules.get(id.index()) else {
            debug!(entity = %id, "no schedule slot; agent skipped");
            return None;
        };
        rv_schedule::agent_tick(schedule, &mut self.world, id, now)
    }

    /// Add a handler after construction.
    pub fn register(
        &mut self,
        registration: Registration,
        handler: impl Trigger<O> + 'static,
    ) -> SessionResult<()> {
        Ok(self.registry.register(registration, handler)?)
    }

    /// Configuration faults found in the schedules at build time.
    pub fn schedule_issues(&self) -> &[(EntityId, ScheduleIssue)] {
        &self.schedule_issues
    }

    pub fn now(&self) -> GameTime {
        self.world.current_time()
    }

    // ── Advance loop ──────────────────────────────────────────────────────

    /// Advance time by up to `minutes`, stopping at the first occurrence whose
    /// handler produces a result.
    ///
    /// Each pass:
    ///
    /// 1. Run agents whose schedule boundary is due.
    /// 2. Predict over the remaining minutes.
    /// 3. Dispatch meetings predicted for right now that have not been
    ///    dispatched yet.
    /// 4. Step the world to the earliest of: the next interrupting event, the
    ///    next schedule boundary, the next edge completion, the end.
    /// 5. Run agents that finished an edge, then dispatch the events predicted
    ///    for the new instant.  A player arrival that fell outside the
    ///    prediction horizon is dispatched here as well.
    pub fn advance<Obs>(&mut self, minutes: u64, observer: &mut Obs) -> Advance<O>
    where
        Obs: SessionObserver<O>,
    {
        let mut remaining = minutes;
        let mut elapsed = 0;
        let mut fired = None;
        self.encounters.retain(|_, state| *state == EncounterState::Dispatched);

        for _ in 0..self.config.max_advance_steps.max(1) {
            let now = self.world.current_time();
            self.tick_due(now);

            // Horizon of at least 1 so meetings at this instant stay visible
            // on the final pass; otherwise the encounter memo would be wiped.
            let events = self.predict_events(remaining.max(1));
            observer.on_predicted(now, &events);

            fired = self.dispatch_current_meetings(&events);
            if fired.is_some() || remaining == 0 {
                break;
            }

            let step = self.next_step(now, remaining, &events);
            let arriving: Vec<EntityId> = self
                .world
                .entity_ids()
                .into_iter()
                .filter(|&id| {
                    self.world
                        .transit_state(id)
                        .is_some_and(|t| t.remaining_minutes as u64 <= step)
                })
                .collect();

            self.world.advance_time(step);
            elapsed += step;
            remaining -= step;
            let now = self.world.current_time();

            let player_arrived = arriving.contains(&self.world.player_id());
            let mut woken = 0;
            for id in arriving {
                self.agent_tick(id, now);
                woken += 1;
            }
            observer.on_step(now, step, woken);

            fired = events
                .iter()
                .filter(|e| e.interrupts && e.offset == step)
                .find_map(|e| self.fire_event(e));
            if fired.is_none() && player_arrived {
                fired = self.fire_unpredicted_arrival(&events, step);
            }
            if fired.is_some() {
                break;
            }
        }

        if fired.is_none() && remaining > 0 {
            warn!(requested = minutes, elapsed, limit = self.config.max_advance_steps, "advance step limit reached");
        }
        if let Some(f) = &fired {
            observer.on_dispatched(self.world.current_time(), f);
        }
        observer.on_advance_end(self.world.current_time(), elapsed);
        Advance { elapsed, fired }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Run every agent whose wake time has come and queue its next boundary.
    pub(crate) fn tick_due(&mut self, now: GameTime) -> usize {
        let mut due = self.wake_queue.drain_due(now);
        due.sort_unstable();
        due.dedup();
        for &id in &due {
            self.agent_tick(id, now);
            if let Some(next) = self.schedules.get(id.index()).and_then(|s| s.next_boundary(now)) {
                self.wake_queue.push(next, id);
            }
        }
        due.len()
    }

    /// Run every agent once.  Used when a session starts.
    pub(crate) fn tick_all(&mut self, now: GameTime) {
        for id in self.world.entity_ids() {
            self.agent_tick(id, now);
        }
    }

    fn next_step(&self, now: GameTime, remaining: u64, events: &[PredictedEvent]) -> u64 {
        let next_event = events
            .iter()
            .filter(|e| e.interrupts && e.offset > 0)
            .map(|e| e.offset)
            .min();
        let next_wake = self.wake_queue.next_time().map(|t| t.since(now).max(1));
        let next_edge = self
            .world
            .entity_ids()
            .into_iter()
            .filter_map(|id| self.world.transit_state(id))
            .map(|t| (t.remaining_minutes as u64).max(1))
            .min();

        [next_event, next_wake, next_edge]
            .into_iter()
            .flatten()
            .fold(remaining, u64::min)
    }

    /// Dispatch offset-0 meetings not already dispatched, and forget
    /// encounters that are over.
    fn dispatch_current_meetings(&mut self, events: &[PredictedEvent]) -> Option<Fired<O>> {
        let current: BTreeSet<Encounter> = events
            .iter()
            .filter(|e| e.kind == EventKind::Meet && e.offset == 0)
            .filter_map(encounter_key)
            .collect();
        self.encounters.retain(|k, _| current.contains(k));

        events
            .iter()
            .filter(|e| e.interrupts && e.offset == 0)
            .find_map(|e| self.fire_event(e))
    }

    /// Resolve a predicted event to its real occurrence.
    fn fire_event(&mut self, event: &PredictedEvent) -> Option<Fired<O>> {
        match &event.payload {
            EventPayload::Meet { .. } => {
                let key = encounter_key(event)?;
                let now = self.world.current_time();
                match self.encounters.get(&key) {
                    Some(EncounterState::Dispatched) => {
                        trace!(player = %key.0, other = %key.1, "meeting already dispatched");
                        return None;
                    }
                    Some(EncounterState::Declined(at)) if *at == now => return None,
                    _ => {}
                }
                let fired = self.fire_meet(key.0, &[key.1]);
                let state = match fired {
                    Some(_) => EncounterState::Dispatched,
                    None    => EncounterState::Declined(now),
                };
                self.encounters.insert(key, state);
                fired
            }
            EventPayload::Reach { place, .. } => {
                let entity = *event.participants.first()?;
                if self.world.entity_location(entity) != Some(*place) {
                    debug!(entity = %entity, %place, "predicted arrival did not happen");
                    return None;
                }
                self.fire_reach(entity, *place)
            }
        }
    }

    /// Dispatch the player's arrival at its new place unless a predicted
    /// reach for it was already resolved at this step.
    fn fire_unpredicted_arrival(&mut self, events: &[PredictedEvent], step: u64) -> Option<Fired<O>> {
        let player = self.world.player_id();
        let place = self.world.entity_location(player)?;
        let predicted = events.iter().any(|e| {
            e.kind == EventKind::Reach
                && e.offset == step
                && e.place() == place
                && e.participants.first() == Some(&player)
        });
        if predicted {
            return None;
        }
        debug!(%place, "arrival beyond prediction horizon");
        self.fire_reach(player, place)
    }

    fn fire_game_start(&mut self) -> Option<Fired<O>> {
        rv_trigger::dispatch_game_start(&self.registry, &mut self.triggers, &self.world)
    }

    fn fire_reach(&mut self, entity: EntityId, place: Place) -> Option<Fired<O>> {
        rv_trigger::dispatch_reach(&self.registry, &mut self.triggers, &self.world, entity, place)
    }

    fn fire_meet(&mut self, first: EntityId, others: &[EntityId]) -> Option<Fired<O>> {
        rv_trigger::dispatch_meet(
            &self.registry,
            &mut self.triggers,
            &self.world,
            &self.config.asleep_activity,
            first,
            others,
        )
    }
}

fn encounter_key(event: &PredictedEvent) -> Option<Encounter> {
    match event.participants.as_slice() {
        [player, other, ..] => Some((*player, *other, event.place())),
        _ => None,
    }
}
