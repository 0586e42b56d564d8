//! Once-only bookkeeping.

use std::collections::BTreeSet;

use tracing::info;

use crate::{Category, HandlerId};

/// The triggered-set: which once-only handlers have already fired.
///
/// Owned by the host session and passed by reference into dispatch.  Only
/// once-only handlers are ever recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerState {
    triggered: BTreeSet<(Category, HandlerId)>,
}

impl TriggerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self, category: Category, id: &HandlerId) -> bool {
        self.triggered.contains(&(category, id.clone()))
    }

    /// Record a firing.  Returns `false` if it was already recorded.
    pub fn mark(&mut self, category: Category, id: HandlerId) -> bool {
        self.triggered.insert((category, id))
    }

    /// Forget every firing in every category.  Called on new game.
    pub fn reset(&mut self) {
        let cleared = self.triggered.len();
        self.triggered.clear();
        info!(cleared, "triggered handlers reset");
    }

    pub fn len(&self) -> usize {
        self.triggered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggered.is_empty()
    }

    /// Recorded firings in `(category, id)` order.
    pub fn iter(&self) -> impl Iterator<Item = &(Category, HandlerId)> {
        self.triggered.iter()
    }
}
