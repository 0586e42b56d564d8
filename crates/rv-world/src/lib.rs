//! `rv-world` — world collaborator interfaces and the reference world.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`query`]    | `WorldQuery`, `WorldCommands`, `TransitState`                     |
//! | [`graph`]    | `LocationGraph` (CSR), `LocationGraphBuilder`, `Leg`, Dijkstra    |
//! | [`movement`] | `Movement` — one active edge plus queued legs                     |
//! | [`store`]    | `EntityStore` — SoA arena indexed by `EntityId`                   |
//! | [`world`]    | `World` — implements both collaborator traits                     |
//! | [`builder`]  | `WorldBuilder`                                                    |
//! | [`error`]    | `WorldError`, `WorldResult<T>`                                    |
//!
//! # Movement model
//!
//! 1. `begin_move` plans a shortest path over the location graph.
//! 2. Only the first edge is in flight; its end and remaining minutes are
//!    what [`WorldQuery::transit_state`] reports.  Later legs are queued.
//! 3. `advance_time` completes edges in order, starting each queued leg as
//!    the previous one ends.
//! 4. A new `begin_move` while mid-edge keeps the current edge and re-plans
//!    the rest from its end.

pub mod builder;
pub mod error;
pub mod graph;
pub mod movement;
pub mod query;
pub mod store;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{WorldError, WorldResult};
pub use graph::{Leg, LocationGraph, LocationGraphBuilder};
pub use movement::Movement;
pub use query::{TransitState, WorldCommands, WorldQuery};
pub use store::EntityStore;
pub use world::World;
