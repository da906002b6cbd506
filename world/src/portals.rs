//! Directed registry of portal links.

use std::collections::BTreeMap;

use tilecraft_core::CellCoord;

/// Directed mapping from a portal coordinate to its destination.
///
/// The registry knows nothing about tiles: it neither checks that a source is
/// a portal tile nor forgets links when the tile underneath changes. Linking
/// `a → b` says nothing about `b → a`, and several sources may share one
/// destination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortalRegistry {
    connections: BTreeMap<CellCoord, CellCoord>,
}

impl PortalRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `from → to`, returning the destination it replaced.
    pub fn link(&mut self, from: CellCoord, to: CellCoord) -> Option<CellCoord> {
        self.connections.insert(from, to)
    }

    /// Removes the link stored for `from`, returning its destination.
    pub fn unlink(&mut self, from: CellCoord) -> Option<CellCoord> {
        self.connections.remove(&from)
    }

    /// Destination linked to `from`, if any.
    #[must_use]
    pub fn lookup(&self, from: CellCoord) -> Option<CellCoord> {
        self.connections.get(&from).copied()
    }

    /// Removes every link.
    pub fn clear(&mut self) {
        self.connections.clear();
    }

    /// Number of stored links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Reports whether no links are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Iterates `(from, to)` pairs ordered by source coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellCoord)> + '_ {
        self.connections.iter().map(|(from, to)| (*from, *to))
    }
}
