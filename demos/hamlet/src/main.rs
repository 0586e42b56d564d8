//! hamlet — one scripted day in the village of Ashford.
//!
//! Four villagers, five places.  The player walks a fixed list of errands
//! while the smith, the miller, and the innkeeper follow their timetables.
//! Every time a handler produces a scene the advance stops and the scene is
//! printed.
//!
//! ```text
//! cargo run -p hamlet                      # built-in settings
//! cargo run -p hamlet -- demos/hamlet/hamlet.json
//! RUST_LOG=rv_session=debug cargo run -p hamlet
//! ```

mod creation;
mod handlers;
mod world;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rv_core::{GameTime, Place, SessionConfig};
use rv_predict::PredictedEvent;
use rv_schedule::load_schedules_reader;
use rv_session::{SessionBuilder, SessionObserver};
use rv_trigger::Fired;
use rv_world::{WorldCommands, WorldQuery};

use handlers::Scene;
use world::{BRAM, COTTAGE, EDDA, INN, MILL, PLAYER, SMITHY, SQUARE, entity_name, place_name};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Largest single advance the host asks for.
const STEP_MINUTES: u64 = 30;

const START: GameTime = GameTime(7 * 60);
const END:   GameTime = GameTime(23 * 60 + 30);

/// What the player does, and when.
enum Errand {
    Walk(Place),
    /// Stop at the end of the path currently being walked.
    Halt,
    Sleep,
}

static ERRANDS: [(GameTime, Errand); 7] = [
    (GameTime(8 * 60),       Errand::Walk(SQUARE)),
    (GameTime(9 * 60),       Errand::Walk(SMITHY)),
    (GameTime(11 * 60 + 30), Errand::Walk(MILL)),
    (GameTime(14 * 60),      Errand::Walk(INN)),
    (GameTime(14 * 60 + 10), Errand::Halt),
    (GameTime(18 * 60 + 30), Errand::Walk(INN)),
    (GameTime(22 * 60 + 30), Errand::Walk(COTTAGE)),
];

static BEDTIME: (GameTime, Errand) = (GameTime(23 * 60), Errand::Sleep);

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts steps and logs predictions at debug level.
#[derive(Default)]
struct Narrator {
    steps:  usize,
    scenes: usize,
}

impl SessionObserver<Scene> for Narrator {
    fn on_predicted(&mut self, now: GameTime, events: &[PredictedEvent]) {
        if let Some(next) = events.first() {
            debug!(%now, kind = ?next.kind, offset = next.offset, place = %next.place(), "next predicted event");
        }
    }

    fn on_step(&mut self, _now: GameTime, _minutes: u64, _woken: usize) {
        self.steps += 1;
    }

    fn on_dispatched(&mut self, _now: GameTime, _fired: &Fired<Scene>) {
        self.scenes += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Settings.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => SessionConfig { start_time: START, ..SessionConfig::for_player(PLAYER) },
    };
    info!(start = %config.start_time, tolerance = config.meet_tolerance_minutes, "settings loaded");

    // 2. World, timetables, handlers.
    let world = world::build(config.start_time)?;
    let schedules =
        load_schedules_reader(Cursor::new(world::SCHEDULE_CSV), world.entity_count(), config.cycle_minutes)?;
    let registry = handlers::registry()?;

    let mut session = SessionBuilder::new(config, world)
        .schedules(schedules)
        .registry(registry)
        .build()?;
    for (id, issue) in session.schedule_issues() {
        println!("schedule issue for {}: {issue}", entity_name(*id));
    }

    println!("=== hamlet — a day in Ashford ===");
    println!();

    // 3. New game.
    match session.new_game() {
        Some(Scene::CreateCharacter) => {
            let catalog = creation::catalog();
            let character = creation::run(&catalog, creation::script())
                .context("character creation did not finish")?;
            info!(name = %character.name, origin = %character.origin, "character created");
        }
        Some(Scene::Line(text)) => println!("{text}"),
        None => {}
    }

    // 4. A scene the player only hears about.
    if let Some(Scene::Line(text)) = session.dispatch_meet(BRAM, &[EDDA]) {
        println!("Through the window you overhear: {text}");
    }
    println!();

    // 5. The day.
    let mut narrator = Narrator::default();
    let mut plan = ERRANDS.iter().chain(std::iter::once(&BEDTIME)).peekable();
    while session.now() < END {
        let now = session.now();
        while let Some((_, errand)) = plan.next_if(|(at, _)| *at <= now) {
            match errand {
                Errand::Walk(dest) => {
                    session.world.begin_move(PLAYER, *dest)?;
                    println!("[{now}] You set off for {}.", place_name(*dest));
                }
                Errand::Halt => {
                    session.world.wait(PLAYER)?;
                    println!("[{now}] You change your mind and stop at the next crossing.");
                }
                Errand::Sleep => {
                    session.world.set_activity(PLAYER, Some("sleep".into()))?;
                    println!("[{now}] You blow out the candle.");
                }
            }
        }

        let until = plan.peek().map_or(END, |(at, _)| (*at).min(END));
        let minutes = until.since(now).clamp(1, STEP_MINUTES);
        let out = session.advance(minutes, &mut narrator);
        if let Some(fired) = out.fired {
            if let Scene::Line(text) = fired.output {
                println!("[{}] {text}", session.now());
            }
        }
    }

    // 6. Summary.
    println!();
    println!("{} steps, {} scenes", narrator.steps, narrator.scenes);
    println!("{:<20} {:<20} {:<10}", "Villager", "Where", "Doing");
    println!("{}", "-".repeat(50));
    for id in session.world.entity_ids() {
        let place = session.world.entity_location(id).map_or("on the road", place_name);
        let doing = session.world.current_activity(id).unwrap_or("-");
        println!("{:<20} {:<20} {:<10}", entity_name(id), place, doing);
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: SessionConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
