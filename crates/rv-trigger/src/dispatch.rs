//! Resolve a real occurrence to at most one handler result.
//!
//! # Algorithm (per category)
//!
//! ```text
//! for handler in registry.handlers(category):       // dispatch order
//!     skip if once && already triggered
//!     skip unless filter matches && should_trigger
//!     match handle(ctx):
//!         Ok(Some(o)) => mark if once; return o
//!         Ok(None)    => continue
//!         Err(e)      => warn; continue
//! return None
//! ```

use rv_core::{EntityId, Place};
use rv_world::WorldQuery;
use tracing::{debug, trace, warn};

use crate::{Category, HandlerId, Registry, TriggerContext, TriggerState};

/// The winning handler and its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<O> {
    pub category: Category,
    pub handler:  HandlerId,
    pub output:   O,
}

/// Run the handlers of `ctx.category` against `ctx`.
pub fn dispatch<O>(
    registry: &Registry<O>,
    state: &mut TriggerState,
    ctx: &TriggerContext<'_>,
) -> Option<Fired<O>> {
    let category = ctx.category;
    for registered in registry.handlers(category) {
        let reg = &registered.registration;
        if reg.once && state.is_triggered(category, &reg.id) {
            trace!(%category, id = %reg.id, "once-only handler already fired");
            continue;
        }
        if !reg.filter.matches(ctx) || !registered.handler().should_trigger(ctx) {
            continue;
        }
        match registered.handler().handle(ctx) {
            Ok(Some(output)) => {
                if reg.once {
                    state.mark(category, reg.id.clone());
                }
                debug!(%category, id = %reg.id, subject = %ctx.subject, "handler fired");
                return Some(Fired { category, handler: reg.id.clone(), output });
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%category, id = %reg.id, subject = %ctx.subject, %err, "handler failed; trying next");
            }
        }
    }
    None
}

/// New game started.
pub fn dispatch_game_start<O>(
    registry: &Registry<O>,
    state: &mut TriggerState,
    world: &dyn WorldQuery,
) -> Option<Fired<O>> {
    let player = world.player_id();
    let ctx = TriggerContext {
        category:     Category::GameStart,
        subject:      player,
        place:        world.entity_location(player),
        participants: Vec::new(),
        world,
    };
    dispatch(registry, state, &ctx)
}

/// `entity` arrived at `place`.
pub fn dispatch_reach<O>(
    registry: &Registry<O>,
    state: &mut TriggerState,
    world: &dyn WorldQuery,
    entity: EntityId,
    place: Place,
) -> Option<Fired<O>> {
    let ctx = TriggerContext {
        category:     Category::Reach,
        subject:      entity,
        place:        Some(place),
        participants: vec![entity],
        world,
    };
    dispatch(registry, state, &ctx)
}

/// `first` met every entity in `others`.
///
/// Short-circuits to `None` while the player's activity is `asleep_activity`.
/// When the player is not among the participants, `NpcMeet` handlers are
/// consulted before `Meet` handlers.
pub fn dispatch_meet<O>(
    registry: &Registry<O>,
    state: &mut TriggerState,
    world: &dyn WorldQuery,
    asleep_activity: &str,
    first: EntityId,
    others: &[EntityId],
) -> Option<Fired<O>> {
    let player = world.player_id();
    if world.current_activity(player) == Some(asleep_activity) {
        debug!(%player, "player unavailable; meet dispatch skipped");
        return None;
    }

    let mut participants = Vec::with_capacity(others.len() + 1);
    for &id in std::iter::once(&first).chain(others) {
        if !participants.contains(&id) {
            participants.push(id);
        }
    }
    let place = world.entity_location(first);

    let categories: &[Category] = if participants.contains(&player) {
        &[Category::Meet]
    } else {
        &[Category::NpcMeet, Category::Meet]
    };

    for &category in categories {
        let ctx = TriggerContext {
            category,
            subject: first,
            place,
            participants: participants.clone(),
            world,
        };
        if let Some(fired) = dispatch(registry, state, &ctx) {
            return Some(fired);
        }
    }
    None
}
