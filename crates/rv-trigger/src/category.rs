//! The closed set of event categories.

use std::fmt;

/// What kind of occurrence a handler responds to.
///
/// The derive order is also the order categories are cleared and listed in;
/// it carries no priority meaning.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Fired once when a new game begins.
    GameStart,
    /// An entity (normally the player) arrived at a place.
    Reach,
    /// The player met one or more entities.
    Meet,
    /// Entities met without the player.  Consulted before `Meet`.
    NpcMeet,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::GameStart,
        Category::Reach,
        Category::Meet,
        Category::NpcMeet,
    ];

    /// Dense index for per-category tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `true` if handlers run lowest priority first.
    ///
    /// Only `NpcMeet` is ordered this way; every other category runs highest
    /// priority first.
    #[inline]
    pub fn ascending_priority(self) -> bool {
        matches!(self, Category::NpcMeet)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::GameStart => "game-start",
            Category::Reach     => "reach",
            Category::Meet      => "meet",
            Category::NpcMeet   => "npc-meet",
        })
    }
}
