//! The hamlet of Ashford: places, paths, villagers, and their timetables.

use rv_core::{EntityId, GameTime, LocationId, Place, RegionId};
use rv_world::{LocationGraphBuilder, World, WorldBuilder, WorldResult};

// ── Places ────────────────────────────────────────────────────────────────────

pub const COTTAGE: Place = Place { region: RegionId(0), location: LocationId(0) };
pub const SQUARE:  Place = Place { region: RegionId(0), location: LocationId(1) };
pub const SMITHY:  Place = Place { region: RegionId(0), location: LocationId(2) };
pub const INN:     Place = Place { region: RegionId(0), location: LocationId(3) };
pub const MILL:    Place = Place { region: RegionId(1), location: LocationId(0) };

/// The river meadows, where the mill stands.
pub const MEADOWS: RegionId = RegionId(1);

pub fn place_name(place: Place) -> &'static str {
    match place {
        COTTAGE => "your cottage",
        SQUARE  => "the market square",
        SMITHY  => "the smithy",
        INN     => "the Drowsy Ox",
        MILL    => "the mill",
        _       => "somewhere unnamed",
    }
}

// ── Villagers ─────────────────────────────────────────────────────────────────

pub const PLAYER: EntityId = EntityId(0);
pub const BRAM:   EntityId = EntityId(1);
pub const EDDA:   EntityId = EntityId(2);
pub const ROOK:   EntityId = EntityId(3);

pub fn entity_name(id: EntityId) -> &'static str {
    match id {
        PLAYER => "you",
        BRAM   => "Bram the smith",
        EDDA   => "Edda the miller",
        ROOK   => "Rook the innkeeper",
        _      => "a stranger",
    }
}

// ── Timetables ────────────────────────────────────────────────────────────────

// Daily cycle.  The player has no rows: the host drives the player.
pub const SCHEDULE_CSV: &str = "\
entity_id,start_minute,end_minute,activity,region,location,cycle_minutes\n\
1,1320,360,sleep,0,2,1440\n\
1,360,1080,work,0,2,1440\n\
1,1080,1320,drink,0,3,1440\n\
2,1260,300,sleep,1,0,1440\n\
2,300,660,grind,1,0,1440\n\
2,660,780,market,0,1,1440\n\
2,780,1260,grind,1,0,1440\n\
3,0,120,serve,0,3,1440\n\
3,120,600,sleep,0,3,1440\n\
3,600,1440,serve,0,3,1440\n\
";

// ── World ─────────────────────────────────────────────────────────────────────

/// Build Ashford with every villager at home and the clock at `start`.
pub fn build(start: GameTime) -> WorldResult<World> {
    let mut g = LocationGraphBuilder::new();
    g.add_path(COTTAGE, SQUARE, 10)
        .add_path(SQUARE, SMITHY, 5)
        .add_path(SQUARE, INN, 5)
        .add_path(SMITHY, INN, 8)
        .add_path(SQUARE, MILL, 25);

    let mut b = WorldBuilder::new(g.build()).start(start);
    let player = b.entity("player", COTTAGE);
    b.entity("bram", SMITHY);
    b.entity("edda", MILL);
    b.entity("rook", INN);
    b.player(player).build()
}
