//! Unit tests for rv-schedule.

use rv_core::{EntityId, GameTime, LocationId, MINUTES_PER_WEEK, Place, RegionId};
use rv_world::{LocationGraphBuilder, World, WorldBuilder, WorldCommands, WorldQuery};

use crate::{
    Decision, Schedule, ScheduleEntry, ScheduleIssue, WakeQueue, agent_tick, decide,
    load_schedules_reader,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn loc(l: u32) -> Place {
    Place::new(RegionId(0), LocationId(l))
}

fn entry(start: u32, end: u32, label: &str, l: u32) -> ScheduleEntry {
    ScheduleEntry::new(start, end, label, loc(l))
}

/// Day at minute `m`.
fn at(m: u64) -> GameTime {
    GameTime(m)
}

/// Sleep 22:00–06:00 at L0, prepare 06:00–07:00 at L1, eat 07:00–08:00 at L2.
fn morning() -> Schedule {
    Schedule::daily(vec![
        entry(360, 420, "prepare", 1),
        entry(420, 480, "eat", 2),
        entry(1320, 360, "sleep", 0),
    ])
}

/// L0 ↔ L1 ↔ L2, 10 minutes per edge.  One NPC standing at `start`.
fn world_with_npc(start: Place) -> (World, EntityId) {
    let mut g = LocationGraphBuilder::new();
    g.add_path(loc(0), loc(1), 10).add_path(loc(1), loc(2), 10);
    let mut b = WorldBuilder::new(g.build());
    b.entity("player", loc(0));
    let npc = b.entity("npc", start);
    (b.build().unwrap(), npc)
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use super::*;

    #[test]
    fn new_sorts_by_start_minute() {
        let starts: Vec<u32> = morning().entries().iter().map(|e| e.start_minute).collect();
        assert_eq!(starts, vec![360, 420, 1320]);
    }

    #[test]
    fn zero_cycle_defaults_to_one_day() {
        assert_eq!(Schedule::new(vec![], 0).cycle_minutes, 1440);
    }

    #[test]
    fn window_is_half_open() {
        let e = entry(360, 420, "prepare", 1);
        assert!(e.contains(360));
        assert!(e.contains(419));
        assert!(!e.contains(420));
        assert!(!e.contains(359));
    }

    #[test]
    fn wrapping_window() {
        let e = entry(1320, 360, "sleep", 0);
        assert!(e.wraps());
        assert!(e.contains(1320));
        assert!(e.contains(0));
        assert!(e.contains(359));
        assert!(!e.contains(360));
        assert!(!e.contains(1000));
    }

    #[test]
    fn empty_window_never_matches() {
        let e = entry(500, 500, "nothing", 0);
        assert!((0..1440).all(|m| !e.contains(m)));
    }

    #[test]
    fn active_entry_by_minute_of_day() {
        let s = morning();
        assert_eq!(s.active_entry(at(450)).unwrap().activity, "eat");
        assert_eq!(s.active_entry(at(100)).unwrap().activity, "sleep");
        assert_eq!(s.active_entry(GameTime::at(3, 6, 30)).unwrap().activity, "prepare");
        assert!(s.active_entry(at(600)).is_none());
    }

    #[test]
    fn overlapping_minutes_resolve_to_no_match() {
        let s = Schedule::daily(vec![entry(0, 600, "a", 0), entry(500, 700, "b", 1)]);
        assert_eq!(s.active_entry(at(450)).unwrap().activity, "a");
        assert!(s.active_entry(at(550)).is_none());
        assert_eq!(s.active_entry(at(650)).unwrap().activity, "b");
    }

    #[test]
    fn weekly_cycle() {
        let s = Schedule::new(vec![entry(1440, 2880, "market-day", 1)], MINUTES_PER_WEEK);
        assert!(s.active_entry(GameTime::at(0, 12, 0)).is_none());
        assert_eq!(s.active_entry(GameTime::at(1, 12, 0)).unwrap().activity, "market-day");
        assert_eq!(s.active_entry(GameTime::at(8, 12, 0)).unwrap().activity, "market-day");
        assert!(s.active_entry(GameTime::at(2, 12, 0)).is_none());
    }

    #[test]
    fn next_boundary() {
        let s = morning();
        assert_eq!(s.next_boundary(at(400)), Some(at(420)));
        assert_eq!(s.next_boundary(at(420)), Some(at(480)));
        // After 08:00 the next boundary is 22:00.
        assert_eq!(s.next_boundary(at(500)), Some(at(1320)));
        // Wraps into the next day.
        assert_eq!(s.next_boundary(at(1400)), Some(at(1440 + 360)));
        assert_eq!(Schedule::empty().next_boundary(at(0)), None);
    }

    #[test]
    fn single_boundary_wakes_a_full_cycle_later() {
        let s = Schedule::daily(vec![entry(0, 0, "x", 0)]);
        assert_eq!(s.next_boundary(at(0)), Some(at(1440)));
    }

    #[test]
    fn validated_drops_unknown_destinations() {
        let s = Schedule::daily(vec![entry(0, 100, "ok", 0), entry(200, 300, "lost", 9)]);
        let (s, issues) = s.validated(|p| p.location.0 < 3);
        assert_eq!(s.len(), 1);
        assert_eq!(issues, vec![ScheduleIssue::UnknownDestination {
            activity:    "lost".into(),
            destination: loc(9),
        }]);
        assert!(s.active_entry(at(250)).is_none());
    }

    #[test]
    fn validated_reports_overlap_including_wrap() {
        let s = Schedule::daily(vec![entry(1300, 100, "night", 0), entry(50, 200, "dawn", 1)]);
        let (s, issues) = s.validated(|_| true);
        assert_eq!(s.len(), 2);
        assert!(matches!(&issues[..], [ScheduleIssue::Overlap { .. }]));
    }

    #[test]
    fn validated_accepts_adjacent_windows() {
        let (_, issues) = morning().validated(|_| true);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn validated_reports_empty_and_out_of_cycle() {
        let s = Schedule::daily(vec![entry(10, 10, "blink", 0), entry(1500, 1600, "late", 1)]);
        let (_, issues) = s.validated(|_| true);
        assert!(issues.iter().any(|i| matches!(i, ScheduleIssue::EmptyWindow { minute: 10, .. })));
        assert!(issues.iter().any(|i| matches!(i, ScheduleIssue::OutOfCycle { cycle: 1440, .. })));
    }

    #[test]
    fn random_schedules_hold_between_boundaries() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let entries = (0..rng.gen_range(1..5))
                .map(|i| entry(rng.gen_range(0..1440), rng.gen_range(0..1440), "x", i))
                .collect();
            let s = Schedule::daily(entries);
            let now = at(rng.gen_range(0..3 * 1440));
            let next = s.next_boundary(now).unwrap();
            assert!(next > now && next.since(now) <= 1440);

            let first = s.active_entry(now).map(|e| e.destination);
            for m in now.0..next.0 {
                assert_eq!(s.active_entry(at(m)).map(|e| e.destination), first);
            }
        }
    }
}

// ── Scheduling agent ──────────────────────────────────────────────────────────

#[cfg(test)]
mod agent {
    use super::*;

    fn meal() -> Schedule {
        Schedule::daily(vec![entry(360, 420, "prepare", 1), entry(420, 480, "eat", 2)])
    }

    #[test]
    fn moves_when_elsewhere() {
        let (w, npc) = world_with_npc(loc(1));
        assert_eq!(decide(&meal(), &w, npc, at(450)), Some(Decision::Move(loc(2))));
    }

    #[test]
    fn sets_activity_when_there() {
        let (w, npc) = world_with_npc(loc(2));
        assert_eq!(
            decide(&meal(), &w, npc, at(450)),
            Some(Decision::SetActivity(Some("eat".into())))
        );
    }

    #[test]
    fn off_schedule_clears_activity() {
        let (w, npc) = world_with_npc(loc(2));
        assert_eq!(decide(&meal(), &w, npc, at(900)), Some(Decision::SetActivity(None)));
    }

    #[test]
    fn empty_schedule_yields_nothing() {
        let (w, npc) = world_with_npc(loc(2));
        assert_eq!(decide(&Schedule::empty(), &w, npc, at(450)), None);
    }

    #[test]
    fn unknown_entity_yields_nothing() {
        let (w, _) = world_with_npc(loc(2));
        assert_eq!(decide(&meal(), &w, EntityId(40), at(450)), None);
    }

    #[test]
    fn does_not_reissue_move_toward_same_destination() {
        let (mut w, npc) = world_with_npc(loc(0));
        let s = meal();
        assert_eq!(agent_tick(&s, &mut w, npc, at(450)), Some(Decision::Move(loc(2))));
        assert_eq!(w.transit_state(npc).unwrap().final_destination, loc(2));

        w.advance_time(5);
        assert_eq!(decide(&s, &w, npc, at(455)), None);
        assert_eq!(agent_tick(&s, &mut w, npc, at(455)), None);
    }

    #[test]
    fn redirects_when_destination_changes_mid_journey() {
        let (mut w, npc) = world_with_npc(loc(0));
        let s = meal();
        agent_tick(&s, &mut w, npc, at(360));
        assert_eq!(w.transit_state(npc).unwrap().final_destination, loc(1));
        assert_eq!(decide(&s, &w, npc, at(420)), Some(Decision::Move(loc(2))));
    }

    #[test]
    fn tick_applies_activity_once() {
        let (mut w, npc) = world_with_npc(loc(2));
        let s = meal();
        assert!(agent_tick(&s, &mut w, npc, at(450)).is_some());
        assert_eq!(w.current_activity(npc), Some("eat"));
        assert_eq!(agent_tick(&s, &mut w, npc, at(451)), None);
    }

    #[test]
    fn tick_swallows_unroutable_move() {
        let mut g = LocationGraphBuilder::new();
        g.add_location(loc(0)).add_location(loc(2));
        let mut b = WorldBuilder::new(g.build());
        let npc = b.entity("stranded", loc(0));
        let mut w = b.build().unwrap();

        assert_eq!(agent_tick(&meal(), &mut w, npc, at(450)), None);
        assert_eq!(w.transit_state(npc), None);
    }
}

// ── WakeQueue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wake_queue {
    use super::*;

    #[test]
    fn push_and_drain_due() {
        let mut q = WakeQueue::new();
        q.push(at(10), EntityId(1));
        q.push(at(5), EntityId(2));
        q.push(at(20), EntityId(3));
        assert_eq!(q.len(), 3);
        assert_eq!(q.next_time(), Some(at(5)));

        assert_eq!(q.drain_due(at(10)), vec![EntityId(2), EntityId(1)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_time(), Some(at(20)));
        assert!(q.drain_due(at(19)).is_empty());
    }

    #[test]
    fn build_skips_empty_schedules() {
        let q = WakeQueue::build_from_schedules(&[Schedule::empty(), morning()], at(400));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_time(), Some(at(420)));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{ScheduleError, load_schedules_csv};

    const CSV: &str = "\
entity_id,start_minute,end_minute,activity,region,location,cycle_minutes
1,420,480,eat,0,2,1440
1,360,420,prepare,0,1,1440
2,1440,2880,market-day,1,4,10080
3,0,60,stretch,0,0,
";

    #[test]
    fn loads_per_entity() {
        let s = load_schedules_reader(Cursor::new(CSV), 4, 1440).unwrap();
        assert_eq!(s.len(), 4);
        assert!(s[0].is_empty());
        assert_eq!(s[1].len(), 2);
        assert_eq!(s[1].entries()[0].activity, "prepare");
        assert_eq!(s[2].cycle_minutes, 10_080);
        assert_eq!(s[2].entries()[0].destination, Place::new(RegionId(1), LocationId(4)));
    }

    #[test]
    fn empty_cycle_uses_default() {
        let s = load_schedules_reader(Cursor::new(CSV), 4, 720).unwrap();
        assert_eq!(s[3].cycle_minutes, 720);
    }

    #[test]
    fn cycle_column_is_optional() {
        let csv = "entity_id,start_minute,end_minute,activity,region,location\n0,0,60,x,0,0\n";
        let s = load_schedules_reader(Cursor::new(csv), 1, 1440).unwrap();
        assert_eq!(s[0].len(), 1);
        assert_eq!(s[0].cycle_minutes, 1440);
    }

    #[test]
    fn out_of_range_entities_skipped() {
        let s = load_schedules_reader(Cursor::new(CSV), 2, 1440).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s[1].len(), 2);
    }

    #[test]
    fn malformed_row_errors() {
        let csv = "entity_id,start_minute,end_minute,activity,region,location\n0,dawn,60,x,0,0\n";
        assert!(matches!(
            load_schedules_reader(Cursor::new(csv), 1, 1440),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.csv");
        std::fs::write(&path, CSV).unwrap();
        let s = load_schedules_csv(&path, 4, 1440).unwrap();
        assert_eq!(s[1].len(), 2);
        assert!(matches!(
            load_schedules_csv(&dir.path().join("missing.csv"), 1, 1440),
            Err(ScheduleError::Io(_))
        ));
    }
}
