//! Ashford's narrative handlers.

use rv_trigger::{
    MeetFilter, ReachFilter, Registration, Registry, Trigger, TriggerContext, TriggerResult,
    from_fn,
};

use crate::world::{BRAM, EDDA, INN, MEADOWS, SQUARE, entity_name, place_name};

/// What a handler asks the host to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    Line(String),
    CreateCharacter,
}

fn line(text: &'static str) -> impl Trigger<Scene> {
    from_fn(move |_: &TriggerContext<'_>| Ok(Some(Scene::Line(text.to_owned()))))
}

pub fn registry() -> TriggerResult<Registry<Scene>> {
    let mut reg = Registry::new();

    reg.register(
        Registration::game_start("prologue").once(),
        from_fn(|_: &TriggerContext<'_>| Ok(Some(Scene::CreateCharacter))),
    )?;

    // ── Reach ─────────────────────────────────────────────────────────────
    reg.register(
        Registration::reach("square-first-visit", ReachFilter::at(SQUARE)).once().priority(10),
        line("Stalls of turnips and wool crowd the market square."),
    )?;
    reg.register(
        Registration::reach("inn-evening", ReachFilter::at(INN)),
        from_fn(|ctx: &TriggerContext<'_>| {
            let (hour, _) = ctx.now().hm();
            if hour < 18 {
                return Ok(None);
            }
            Ok(Some(Scene::Line("Lamplight and loud talk spill out of the Drowsy Ox.".into())))
        }),
    )?;
    reg.register(
        Registration::reach("meadows", ReachFilter::region(MEADOWS)).once(),
        from_fn(|ctx: &TriggerContext<'_>| {
            let Some(place) = ctx.place else { return Ok(None) };
            Ok(Some(Scene::Line(format!("The river roars past {}.", place_name(place)))))
        }),
    )?;

    // ── Meet ──────────────────────────────────────────────────────────────
    reg.register(
        Registration::meet("bram-first", MeetFilter::With(BRAM)).once().priority(10),
        line("Bram wipes soot from his brow. \"New in Ashford? Mind the sparks.\""),
    )?;
    reg.register(
        Registration::meet("greeting", MeetFilter::Any),
        from_fn(|ctx: &TriggerContext<'_>| {
            let names: Vec<&str> = ctx.others().map(entity_name).collect();
            if names.is_empty() {
                return Ok(None);
            }
            Ok(Some(Scene::Line(format!("You nod to {}.", names.join(" and ")))))
        }),
    )?;
    reg.register(
        Registration::npc_meet("gossip", MeetFilter::AllOf(vec![BRAM, EDDA])),
        line("Bram and Edda argue over the price of flour."),
    )?;

    Ok(reg)
}
