//! Tile layer and entity list owned by the world.

use tilecraft_core::{
    BoardDimensions, BoardSnapshot, CellCoord, EditError, EntityId, EntityKind, EntityRecord,
    EntitySnapshot, EntityView, TileKind, TileView,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) kind: EntityKind,
    pub(crate) cell: CellCoord,
}

impl Entity {
    fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
        }
    }
}

/// Outcome of toggling an entity on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Toggle {
    Placed(Entity),
    Removed(Entity),
}

#[derive(Clone, Debug)]
pub(crate) struct Board {
    dimensions: BoardDimensions,
    tiles: Vec<TileKind>,
    entities: Vec<Entity>,
    next_entity: u32,
}

impl Board {
    pub(crate) fn empty(dimensions: BoardDimensions) -> Self {
        Self {
            dimensions,
            tiles: vec![TileKind::Empty; dimensions.cell_count()],
            entities: Vec::new(),
            next_entity: 0,
        }
    }

    /// Rebuilds a board from a snapshot, fitting it to its declared dimensions.
    ///
    /// Missing tiles read as empty, surplus tiles and out-of-bounds entities
    /// are discarded. Entity identifiers are assigned in snapshot order.
    pub(crate) fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let dimensions = BoardDimensions::new(snapshot.rows, snapshot.cols);
        let mut board = Self::empty(dimensions);

        for (row, tiles) in snapshot.tiles.iter().enumerate() {
            for (column, tile) in tiles.iter().enumerate() {
                let (Ok(row), Ok(column)) = (u32::try_from(row), u32::try_from(column)) else {
                    continue;
                };
                if let Some(index) = dimensions.index(CellCoord::new(row, column)) {
                    board.tiles[index] = *tile;
                }
            }
        }

        for record in snapshot.entities {
            let cell = CellCoord::new(record.row, record.column);
            if dimensions.contains(cell) {
                let _ = board.insert(record.kind, cell);
            }
        }

        board
    }

    pub(crate) fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.dimensions.rows(),
            cols: self.dimensions.columns(),
            tiles: self
                .tile_view()
                .rows()
                .map(<[TileKind]>::to_vec)
                .collect(),
            entities: self
                .entities
                .iter()
                .map(|entity| EntityRecord {
                    kind: entity.kind,
                    row: entity.cell.row(),
                    column: entity.cell.column(),
                })
                .collect(),
        }
    }

    pub(crate) const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    pub(crate) fn tile(&self, cell: CellCoord) -> Option<TileKind> {
        self.tile_view().tile(cell)
    }

    pub(crate) fn tile_view(&self) -> TileView<'_> {
        TileView::new(&self.tiles, self.dimensions)
    }

    pub(crate) fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entity_view(&self) -> EntityView {
        EntityView::from_snapshots(self.entities.iter().map(Entity::snapshot).collect())
    }

    pub(crate) fn player(&self) -> Option<Entity> {
        self.entities
            .iter()
            .copied()
            .find(|entity| entity.kind == EntityKind::Player)
    }

    pub(crate) fn spawn_point(&self) -> Option<CellCoord> {
        self.tile_view().spawn_point()
    }

    pub(crate) fn set_tile(&mut self, cell: CellCoord, tile: TileKind) -> Result<(), EditError> {
        let index = self.dimensions.index(cell).ok_or(EditError::OutOfRange)?;
        self.tiles[index] = tile;
        Ok(())
    }

    pub(crate) fn toggle_entity(
        &mut self,
        cell: CellCoord,
        kind: EntityKind,
    ) -> Result<Toggle, EditError> {
        if !self.dimensions.contains(cell) {
            return Err(EditError::OutOfRange);
        }

        let existing = self
            .entities
            .iter()
            .position(|entity| entity.cell == cell && entity.kind == kind);
        match existing {
            Some(index) => Ok(Toggle::Removed(self.entities.remove(index))),
            None => Ok(Toggle::Placed(self.insert(kind, cell))),
        }
    }

    /// Empties the tile and returns the entities that were removed from the cell.
    pub(crate) fn clear_cell(&mut self, cell: CellCoord) -> Result<Vec<Entity>, EditError> {
        let index = self.dimensions.index(cell).ok_or(EditError::OutOfRange)?;
        self.tiles[index] = TileKind::Empty;

        let (removed, kept): (Vec<Entity>, Vec<Entity>) = self
            .entities
            .iter()
            .partition(|entity| entity.cell == cell);
        self.entities = kept;
        Ok(removed)
    }

    /// Builds a board of the new size holding the overlapping top-left region.
    ///
    /// Returns the new board and the number of entities that no longer fit.
    pub(crate) fn resized(&self, dimensions: BoardDimensions) -> (Self, u32) {
        let mut next = Self::empty(dimensions);
        next.next_entity = self.next_entity;

        let rows = self.dimensions.rows().min(dimensions.rows());
        let columns = self.dimensions.columns().min(dimensions.columns());
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(row, column);
                if let (Some(from), Some(to)) = (self.dimensions.index(cell), dimensions.index(cell))
                {
                    next.tiles[to] = self.tiles[from];
                }
            }
        }

        next.entities = self
            .entities
            .iter()
            .copied()
            .filter(|entity| dimensions.contains(entity.cell))
            .collect();
        let dropped = self.entities.len() - next.entities.len();
        (next, u32::try_from(dropped).unwrap_or(u32::MAX))
    }

    /// Swaps in a fully computed entity list.
    pub(crate) fn replace_entities(&mut self, entities: Vec<Entity>) {
        debug_assert!(entities
            .iter()
            .all(|entity| self.dimensions.contains(entity.cell)));
        self.entities = entities;
    }

    fn insert(&mut self, kind: EntityKind, cell: CellCoord) -> Entity {
        let entity = Entity {
            id: EntityId::new(self.next_entity),
            kind,
            cell,
        };
        self.next_entity = self.next_entity.wrapping_add(1);
        self.entities.push(entity);
        entity
    }
}
