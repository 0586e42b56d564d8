//! Unit tests for rv-world.

use rv_core::{EntityId, GameTime, LocationId, Place, RegionId};

use crate::{
    Leg, LocationGraph, LocationGraphBuilder, Movement, World, WorldBuilder, WorldCommands,
    WorldError, WorldQuery,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn p(region: u32, location: u32) -> Place {
    Place::new(RegionId(region), LocationId(location))
}

/// Line graph: A(0/0) ↔ B(0/1) ↔ C(0/2) with 10 / 20 minute edges, plus an
/// isolated D(1/0).
fn line_graph() -> LocationGraph {
    let mut b = LocationGraphBuilder::new();
    b.add_path(p(0, 0), p(0, 1), 10)
        .add_path(p(0, 1), p(0, 2), 20)
        .add_location(p(1, 0));
    b.build()
}

/// Player at A, NPC at C, one unplaced entity.
fn world() -> (World, EntityId, EntityId, EntityId) {
    let mut b = WorldBuilder::new(line_graph()).start(GameTime::at(0, 8, 0));
    let player = b.entity("player", p(0, 0));
    let npc    = b.entity("npc", p(0, 2));
    let ghost  = b.unplaced_entity("ghost");
    let w = b.player(player).build().unwrap();
    (w, player, npc, ghost)
}

// ── LocationGraph ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::*;

    #[test]
    fn counts() {
        let g = line_graph();
        assert_eq!(g.location_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.contains(p(1, 0)));
        assert!(!g.contains(p(9, 9)));
    }

    #[test]
    fn edge_minutes_is_directed_lookup() {
        let g = line_graph();
        assert_eq!(g.edge_minutes(p(0, 0), p(0, 1)), Some(10));
        assert_eq!(g.edge_minutes(p(0, 1), p(0, 0)), Some(10));
        assert_eq!(g.edge_minutes(p(0, 0), p(0, 2)), None);
    }

    #[test]
    fn route_same_place_is_empty() {
        let g = line_graph();
        assert!(g.route(p(0, 1), p(0, 1)).unwrap().is_empty());
    }

    #[test]
    fn route_two_hops() {
        let g = line_graph();
        let legs = g.route(p(0, 0), p(0, 2)).unwrap();
        assert_eq!(legs, vec![
            Leg { from: p(0, 0), to: p(0, 1), minutes: 10 },
            Leg { from: p(0, 1), to: p(0, 2), minutes: 20 },
        ]);
    }

    #[test]
    fn route_prefers_cheaper_detour() {
        let mut b = LocationGraphBuilder::new();
        b.add_directed_edge(p(0, 0), p(0, 1), 100)
            .add_directed_edge(p(0, 0), p(0, 2), 5)
            .add_directed_edge(p(0, 2), p(0, 1), 5);
        let legs = b.build().route(p(0, 0), p(0, 1)).unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs.iter().map(|l| l.minutes).sum::<u32>(), 10);
    }

    #[test]
    fn route_unknown_place_errors() {
        let g = line_graph();
        assert!(matches!(
            g.route(p(0, 0), p(7, 7)),
            Err(WorldError::UnknownPlace(place)) if place == p(7, 7)
        ));
    }

    #[test]
    fn route_disconnected_errors() {
        let g = line_graph();
        assert!(matches!(g.route(p(0, 0), p(1, 0)), Err(WorldError::NoRoute { .. })));
    }

    #[test]
    fn zero_minute_edge_is_raised_to_one() {
        let mut b = LocationGraphBuilder::new();
        b.add_directed_edge(p(0, 0), p(0, 1), 0);
        assert_eq!(b.build().edge_minutes(p(0, 0), p(0, 1)), Some(1));
    }

    #[test]
    fn empty_graph() {
        let g = LocationGraph::empty();
        assert!(g.is_empty());
        assert!(g.route(p(0, 0), p(0, 1)).is_err());
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    fn journey() -> Vec<Leg> {
        line_graph().route(p(0, 0), p(0, 2)).unwrap()
    }

    #[test]
    fn stationary_has_no_transit() {
        let m = Movement::stationary(p(0, 0));
        assert!(!m.in_transit());
        assert_eq!(m.transit_state(), None);
        assert_eq!(m.final_destination(), None);
        assert_eq!(m.replan_origin(), Some(p(0, 0)));
    }

    #[test]
    fn unplaced_has_no_origin() {
        let m = Movement::unplaced();
        assert_eq!(m.place, None);
        assert_eq!(m.replan_origin(), None);
    }

    #[test]
    fn only_first_leg_is_in_flight() {
        let mut m = Movement::stationary(p(0, 0));
        m.start_journey(journey());
        let t = m.transit_state().unwrap();
        assert_eq!(t.origin, p(0, 0));
        assert_eq!(t.destination, p(0, 1));
        assert_eq!(t.remaining_minutes, 10);
        assert_eq!(t.final_destination, p(0, 2));
        assert_eq!(m.place, Some(p(0, 0)));
    }

    #[test]
    fn advance_partial_edge() {
        let mut m = Movement::stationary(p(0, 0));
        m.start_journey(journey());
        assert!(m.advance(4).is_empty());
        assert_eq!(m.transit_state().unwrap().remaining_minutes, 6);
        assert_eq!(m.place, Some(p(0, 0)));
    }

    #[test]
    fn advance_across_legs_reports_each_place() {
        let mut m = Movement::stationary(p(0, 0));
        m.start_journey(journey());
        let reached = m.advance(15);
        assert_eq!(reached, vec![p(0, 1)]);
        let t = m.transit_state().unwrap();
        assert_eq!(t.origin, p(0, 1));
        assert_eq!(t.remaining_minutes, 15);

        assert_eq!(m.advance(100), vec![p(0, 2)]);
        assert!(!m.in_transit());
        assert_eq!(m.place, Some(p(0, 2)));
    }

    #[test]
    fn stop_after_current_finishes_edge_only() {
        let mut m = Movement::stationary(p(0, 0));
        m.start_journey(journey());
        m.stop_after_current();
        assert_eq!(m.final_destination(), Some(p(0, 1)));
        assert_eq!(m.advance(60), vec![p(0, 1)]);
        assert!(!m.in_transit());
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod world {
    use super::*;

    #[test]
    fn builder_defaults_player_to_first_entity() {
        let mut b = WorldBuilder::new(line_graph());
        let first = b.entity("a", p(0, 0));
        b.entity("b", p(0, 1));
        let w = b.build().unwrap();
        assert_eq!(w.player_id(), first);
        assert_eq!(w.current_time(), GameTime::ZERO);
    }

    #[test]
    fn builder_rejects_unknown_start_place() {
        let mut b = WorldBuilder::new(line_graph());
        b.entity("lost", p(5, 5));
        assert!(matches!(b.build(), Err(WorldError::UnknownPlace(_))));
    }

    #[test]
    fn builder_rejects_empty_world() {
        assert!(matches!(WorldBuilder::new(line_graph()).build(), Err(WorldError::Config(_))));
    }

    #[test]
    fn builder_rejects_out_of_range_player() {
        let mut b = WorldBuilder::new(line_graph());
        b.entity("a", p(0, 0));
        assert!(matches!(
            b.player(EntityId(3)).build(),
            Err(WorldError::EntityNotFound(EntityId(3)))
        ));
    }

    #[test]
    fn queries_reflect_initial_state() {
        let (w, player, npc, ghost) = world();
        assert_eq!(w.entity_ids(), vec![player, npc, ghost]);
        assert_eq!(w.entity_location(npc), Some(p(0, 2)));
        assert_eq!(w.entity_location(ghost), None);
        assert_eq!(w.entity_location(EntityId(42)), None);
        assert_eq!(w.transit_state(player), None);
        assert_eq!(w.minute_of_day(), 8 * 60);
        assert!(w.location_exists(p(1, 0)));
        assert!(!w.location_exists(p(1, 1)));
    }

    #[test]
    fn begin_move_and_advance() {
        let (mut w, player, _, _) = world();
        w.begin_move(player, p(0, 2)).unwrap();
        assert_eq!(w.transit_state(player).unwrap().destination, p(0, 1));

        let reached = w.advance(30);
        assert_eq!(reached, vec![(player, p(0, 1)), (player, p(0, 2))]);
        assert_eq!(w.entity_location(player), Some(p(0, 2)));
        assert_eq!(w.current_time(), GameTime::at(0, 8, 30));
    }

    #[test]
    fn redirect_mid_edge_keeps_current_edge() {
        let (mut w, player, _, _) = world();
        w.begin_move(player, p(0, 2)).unwrap();
        w.advance_time(5);
        w.begin_move(player, p(0, 0)).unwrap();

        let t = w.transit_state(player).unwrap();
        assert_eq!(t.destination, p(0, 1));
        assert_eq!(t.remaining_minutes, 5);
        assert_eq!(t.final_destination, p(0, 0));
    }

    #[test]
    fn begin_move_errors() {
        let (mut w, player, _, ghost) = world();
        assert!(matches!(w.begin_move(ghost, p(0, 0)), Err(WorldError::NotPlaced(_))));
        assert!(matches!(
            w.begin_move(EntityId(9), p(0, 0)),
            Err(WorldError::EntityNotFound(_))
        ));
        assert!(matches!(w.begin_move(player, p(1, 0)), Err(WorldError::NoRoute { .. })));
        assert_eq!(w.transit_state(player), None);
    }

    #[test]
    fn wait_stops_after_current_edge() {
        let (mut w, player, _, _) = world();
        w.begin_move(player, p(0, 2)).unwrap();
        w.wait(player).unwrap();
        w.advance_time(100);
        assert_eq!(w.entity_location(player), Some(p(0, 1)));
        assert_eq!(w.transit_state(player), None);
    }

    #[test]
    fn set_activity_round_trips() {
        let (mut w, _, npc, _) = world();
        assert_eq!(w.current_activity(npc), None);
        w.set_activity(npc, Some("sleep".into())).unwrap();
        assert_eq!(w.current_activity(npc), Some("sleep"));
        w.set_activity(npc, None).unwrap();
        assert_eq!(w.current_activity(npc), None);
        assert!(w.set_activity(EntityId(9), None).is_err());
    }
}
