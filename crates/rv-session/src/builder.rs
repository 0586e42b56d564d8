//! Fluent builder for constructing a [`Session`].

use std::collections::BTreeMap;

use rv_core::{EntityId, SessionConfig};
use rv_schedule::{Schedule, WakeQueue};
use rv_trigger::{Registry, TriggerState};
use rv_world::{WorldCommands, WorldQuery};
use tracing::{info, warn};

use crate::{Session, SessionError, SessionResult};

/// Fluent builder for [`Session<W, O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                          |
/// |-------------------|----------------------------------|
/// | `.schedules(v)`   | `Schedule::empty()` per entity   |
/// | `.registry(r)`    | Empty `Registry`                 |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config, world)
///     .schedules(schedules)
///     .registry(registry)
///     .build()?;
/// session.new_game();
/// session.advance(60, &mut NoopObserver);
/// ```
pub struct SessionBuilder<W, O> {
    config:    SessionConfig,
    world:     W,
    schedules: Option<Vec<Schedule>>,
    registry:  Option<Registry<O>>,
}

impl<W, O> SessionBuilder<W, O>
where
    W: WorldQuery + WorldCommands,
{
    pub fn new(config: SessionConfig, world: W) -> Self {
        Self { config, world, schedules: None, registry: None }
    }

    /// Per-entity schedules, indexed by `EntityId`.  Must be one per entity.
    pub fn schedules(mut self, schedules: Vec<Schedule>) -> Self {
        self.schedules = Some(schedules);
        self
    }

    pub fn registry(mut self, registry: Registry<O>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Validate the config and inputs, drop unusable schedule entries, queue
    /// the first wake-ups, and run every agent once so NPCs start where their
    /// timetables say.
    pub fn build(self) -> SessionResult<Session<W, O>> {
        let world_player = self.world.player_id();
        if self.config.player != world_player {
            return Err(SessionError::PlayerMismatch {
                config: self.config.player,
                world:  world_player,
            });
        }
        self.config.validate()?;

        let entity_count = self.world.entity_ids().len();
        let schedules = match self.schedules {
            Some(s) => {
                if s.len() != entity_count {
                    return Err(SessionError::EntityCountMismatch {
                        expected: entity_count,
                        got:      s.len(),
                        what:     "schedules",
                    });
                }
                s
            }
            None => vec![Schedule::empty(); entity_count],
        };

        // ── Validate schedules against the world ──────────────────────────
        let mut schedule_issues = Vec::new();
        let mut checked = Vec::with_capacity(schedules.len());
        for (i, schedule) in schedules.into_iter().enumerate() {
            let (schedule, issues) = schedule.validated(|p| self.world.location_exists(p));
            let id = EntityId(i as u32);
            schedule_issues.extend(issues.into_iter().map(|issue| (id, issue)));
            checked.push(schedule);
        }
        if !schedule_issues.is_empty() {
            warn!(count = schedule_issues.len(), "schedule issues found");
        }

        let now = self.world.current_time();
        let wake_queue = WakeQueue::build_from_schedules(&checked, now);

        let mut session = Session {
            config: self.config,
            world: self.world,
            schedules: checked,
            registry: self.registry.unwrap_or_default(),
            triggers: TriggerState::default(),
            wake_queue,
            encounters: BTreeMap::new(),
            schedule_issues,
        };
        session.tick_all(now);

        info!(
            entities = entity_count,
            handlers = session.registry.len(),
            queued = session.wake_queue.len(),
            %now,
            "session ready"
        );
        Ok(session)
    }
}
