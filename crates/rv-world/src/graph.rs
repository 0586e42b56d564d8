//! Location graph and the shortest-path primitive.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a node index `n`, its outgoing edges occupy
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Nodes are [`Place`]s; a `HashMap<Place, u32>` maps a place back to its
//! node index.  Edge costs are whole travel minutes (at least 1).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use rv_core::Place;

use crate::WorldError;

/// Sentinel for "no predecessor edge" during path reconstruction.
const NO_EDGE: u32 = u32::MAX;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One edge of a planned journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    pub from:    Place,
    pub to:      Place,
    pub minutes: u32,
}

// ── LocationGraph ─────────────────────────────────────────────────────────────

/// Directed location graph in CSR format.
///
/// Do not construct directly; use [`LocationGraphBuilder`].
pub struct LocationGraph {
    places:         Vec<Place>,
    index:          HashMap<Place, u32>,
    node_out_start: Vec<u32>,
    edge_from:      Vec<u32>,
    edge_to:        Vec<u32>,
    edge_minutes:   Vec<u32>,
}

impl LocationGraph {
    /// A graph with no locations.  Every route query fails.
    pub fn empty() -> Self {
        LocationGraphBuilder::new().build()
    }

    pub fn location_count(&self) -> usize {
        self.places.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn contains(&self, place: Place) -> bool {
        self.index.contains_key(&place)
    }

    /// All known places, in insertion order.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Direct edge cost from `from` to `to`, if they are adjacent.
    pub fn edge_minutes(&self, from: Place, to: Place) -> Option<u32> {
        let (&a, &b) = (self.index.get(&from)?, self.index.get(&to)?);
        self.out_edges(a)
            .find(|&e| self.edge_to[e] == b)
            .map(|e| self.edge_minutes[e])
    }

    #[inline]
    fn out_edges(&self, node: u32) -> impl Iterator<Item = usize> + '_ {
        let start = self.node_out_start[node as usize] as usize;
        let end   = self.node_out_start[node as usize + 1] as usize;
        start..end
    }

    /// Shortest path from `from` to `to` as a list of legs.
    ///
    /// `from == to` yields an empty journey.
    pub fn route(&self, from: Place, to: Place) -> Result<Vec<Leg>, WorldError> {
        let src = *self.index.get(&from).ok_or(WorldError::UnknownPlace(from))?;
        let dst = *self.index.get(&to).ok_or(WorldError::UnknownPlace(to))?;
        if src == dst {
            return Ok(Vec::new());
        }

        let n = self.places.len();
        let mut dist      = vec![u32::MAX; n];
        let mut prev_edge = vec![NO_EDGE; n];
        dist[src as usize] = 0;

        // Secondary key (node index) keeps tie-breaking deterministic.
        let mut heap: BinaryHeap<Reverse<(u32, u32)>> = BinaryHeap::new();
        heap.push(Reverse((0, src)));

        while let Some(Reverse((cost, node))) = heap.pop() {
            if node == dst {
                return Ok(self.reconstruct(&prev_edge, dst));
            }
            if cost > dist[node as usize] {
                continue;
            }
            for edge in self.out_edges(node) {
                let next     = self.edge_to[edge];
                let new_cost = cost.saturating_add(self.edge_minutes[edge]);
                if new_cost < dist[next as usize] {
                    dist[next as usize]      = new_cost;
                    prev_edge[next as usize] = edge as u32;
                    heap.push(Reverse((new_cost, next)));
                }
            }
        }

        Err(WorldError::NoRoute { from, to })
    }

    fn reconstruct(&self, prev_edge: &[u32], to: u32) -> Vec<Leg> {
        let mut legs = Vec::new();
        let mut cur = to;
        loop {
            let e = prev_edge[cur as usize];
            if e == NO_EDGE {
                break;
            }
            let e = e as usize;
            legs.push(Leg {
                from:    self.places[self.edge_from[e] as usize],
                to:      self.places[self.edge_to[e] as usize],
                minutes: self.edge_minutes[e],
            });
            cur = self.edge_from[e];
        }
        legs.reverse();
        legs
    }
}

// ── LocationGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`LocationGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rv_core::{LocationId, Place, RegionId};
/// use rv_world::LocationGraphBuilder;
///
/// let home   = Place::new(RegionId(0), LocationId(0));
/// let tavern = Place::new(RegionId(0), LocationId(1));
/// let mut b = LocationGraphBuilder::new();
/// b.add_path(home, tavern, 15);
/// let graph = b.build();
/// assert_eq!(graph.location_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
#[derive(Default)]
pub struct LocationGraphBuilder {
    places:    Vec<Place>,
    index:     HashMap<Place, u32>,
    raw_edges: Vec<(u32, u32, u32)>,
}

impl LocationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `place`.  Adding the same place twice is a no-op.
    pub fn add_location(&mut self, place: Place) -> &mut Self {
        self.node(place);
        self
    }

    fn node(&mut self, place: Place) -> u32 {
        if let Some(&i) = self.index.get(&place) {
            return i;
        }
        let i = self.places.len() as u32;
        self.places.push(place);
        self.index.insert(place, i);
        i
    }

    /// Add a **directed** edge.  Places are registered on first use; a
    /// zero-minute cost is raised to one minute.
    pub fn add_directed_edge(&mut self, from: Place, to: Place, minutes: u32) -> &mut Self {
        let (a, b) = (self.node(from), self.node(to));
        self.raw_edges.push((a, b, minutes.max(1)));
        self
    }

    /// Add edges in both directions.
    pub fn add_path(&mut self, a: Place, b: Place, minutes: u32) -> &mut Self {
        self.add_directed_edge(a, b, minutes);
        self.add_directed_edge(b, a, minutes)
    }

    pub fn location_count(&self) -> usize {
        self.places.len()
    }

    /// Consume the builder and produce a [`LocationGraph`].
    pub fn build(self) -> LocationGraph {
        let node_count = self.places.len();
        let mut raw = self.raw_edges;
        raw.sort_by_key(|&(from, _, _)| from);

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &raw {
            node_out_start[from as usize + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }

        LocationGraph {
            places:       self.places,
            index:        self.index,
            node_out_start,
            edge_from:    raw.iter().map(|e| e.0).collect(),
            edge_to:      raw.iter().map(|e| e.1).collect(),
            edge_minutes: raw.iter().map(|e| e.2).collect(),
        }
    }
}
