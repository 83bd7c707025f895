//! Arena handles.

use std::fmt;

/// Stable handle of an entity inside a [`Graph`](crate::graph::Graph) arena.
///
/// Handles are assigned in creation order and never reused; they are only
/// meaningful for the graph that produced them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

/// Most entities one graph arena holds. Handle `u32::MAX` is never a slot.
pub(crate) const MAX_ENTITIES: usize = u32::MAX as usize;

impl EntityId {
    /// Handle of arena slot `index`. The builder keeps the arena below
    /// [`MAX_ENTITIES`]; an index past it maps to `u32::MAX`, which no slot
    /// answers to.
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position of the entity in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}
