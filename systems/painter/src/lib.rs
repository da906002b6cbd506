#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editor system that turns brush strokes and portal requests into board commands.

use tilecraft_core::{BoardDimensions, Brush, CellCoord, Command, Event, TileKind};

/// Pointer button that started an interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints with the selected brush.
    Primary,
    /// Erases the cell regardless of the selected brush.
    Secondary,
}

/// Pointer input distilled from adapter events.
///
/// Adapters translate screen positions into cells; `None` means the pointer
/// is not over the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerInput {
    /// A button went down over the provided cell.
    Pressed {
        /// Button that was pressed.
        button: PointerButton,
        /// Cell under the pointer.
        cell: Option<CellCoord>,
    },
    /// The pointer moved.
    Moved {
        /// Cell now under the pointer.
        cell: Option<CellCoord>,
    },
    /// Every button was released.
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stroke {
    last_cell: Option<CellCoord>,
}

/// Editor system holding the selected brush and the active stroke.
#[derive(Clone, Debug)]
pub struct Painter {
    brush: Brush,
    dimensions: BoardDimensions,
    stroke: Option<Stroke>,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new(BoardDimensions::default())
    }
}

impl Painter {
    /// Creates a painter for a board of the provided size.
    #[must_use]
    pub fn new(dimensions: BoardDimensions) -> Self {
        Self {
            brush: Brush::default(),
            dimensions,
            stroke: None,
        }
    }

    /// Brush applied by primary strokes.
    #[must_use]
    pub const fn brush(&self) -> Brush {
        self.brush
    }

    /// Selects the brush applied by subsequent strokes.
    pub fn select_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    /// Reports whether a primary stroke is in progress.
    #[must_use]
    pub const fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Consumes world events and pointer input to emit paint commands.
    ///
    /// A stroke paints each cell it enters once, so toggle brushes do not
    /// flicker while the pointer rests inside a cell.
    pub fn handle(&mut self, events: &[Event], input: PointerInput, out: &mut Vec<Command>) {
        self.observe(events);

        match input {
            PointerInput::Pressed {
                button: PointerButton::Primary,
                cell,
            } => {
                self.stroke = Some(Stroke { last_cell: cell });
                if let Some(cell) = cell {
                    self.paint(cell, self.brush, out);
                }
            }
            PointerInput::Pressed {
                button: PointerButton::Secondary,
                cell,
            } => {
                if let Some(cell) = cell {
                    self.paint(cell, Brush::Eraser, out);
                }
            }
            PointerInput::Moved { cell } => {
                let Some(stroke) = self.stroke.as_mut() else {
                    return;
                };
                if stroke.last_cell == cell {
                    return;
                }
                stroke.last_cell = cell;
                if let Some(cell) = cell {
                    self.paint(cell, self.brush, out);
                }
            }
            PointerInput::Released => self.stroke = None,
        }
    }

    /// Tracks board size changes reported by the world.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::BoardResized { dimensions, .. } | Event::BoardImported { dimensions, .. } => {
                    self.dimensions = *dimensions;
                }
                _ => {}
            }
        }
    }

    /// Emits the command that applies `brush` to `cell`.
    ///
    /// Tile brushes replace the tile, entity brushes toggle an entity and the
    /// eraser clears the cell. Cells outside the board emit nothing.
    pub fn paint(&self, cell: CellCoord, brush: Brush, out: &mut Vec<Command>) {
        if !self.dimensions.contains(cell) {
            return;
        }
        out.push(match brush {
            Brush::Tile(tile) => Command::SetTile { cell, tile },
            Brush::Entity(kind) => Command::ToggleEntity { cell, kind },
            Brush::Eraser => Command::ClearCell { cell },
        });
    }

    /// Emits a portal link when the source cell holds an entrance portal.
    ///
    /// `tile_at` should mirror the world's `query::tile_at` helper.
    pub fn request_link<F>(&self, from: CellCoord, to: CellCoord, tile_at: F, out: &mut Vec<Command>)
    where
        F: Fn(CellCoord) -> Option<TileKind>,
    {
        if tile_at(from) == Some(TileKind::EnterPortal) {
            out.push(Command::LinkPortal { from, to });
        }
    }

    /// Emits the removal of the link stored for `from`.
    pub fn request_unlink(&self, from: CellCoord, out: &mut Vec<Command>) {
        out.push(Command::UnlinkPortal { from });
    }

    /// Emits a resize request with both dimensions raised to at least one.
    pub fn request_resize(&self, rows: u32, columns: u32, out: &mut Vec<Command>) {
        out.push(Command::ResizeBoard {
            rows: rows.max(1),
            columns: columns.max(1),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilecraft_core::EntityKind;

    #[test]
    fn brushes_map_onto_commands() {
        let painter = Painter::default();
        let cell = CellCoord::new(1, 2);
        let mut out = Vec::new();
        painter.paint(cell, Brush::Tile(TileKind::Spawn), &mut out);
        painter.paint(cell, Brush::Entity(EntityKind::BigDot), &mut out);
        painter.paint(cell, Brush::Eraser, &mut out);

        assert_eq!(
            out,
            vec![
                Command::SetTile {
                    cell,
                    tile: TileKind::Spawn,
                },
                Command::ToggleEntity {
                    cell,
                    kind: EntityKind::BigDot,
                },
                Command::ClearCell { cell },
            ]
        );
    }

    #[test]
    fn moves_without_a_stroke_paint_nothing() {
        let mut painter = Painter::default();
        let mut out = Vec::new();
        painter.handle(
            &[],
            PointerInput::Moved {
                cell: Some(CellCoord::new(0, 0)),
            },
            &mut out,
        );
        assert!(out.is_empty());
        assert!(!painter.is_stroking());
    }

    #[test]
    fn resize_requests_are_raised_to_one() {
        let painter = Painter::default();
        let mut out = Vec::new();
        painter.request_resize(0, 3, &mut out);
        assert_eq!(
            out,
            vec![Command::ResizeBoard {
                rows: 1,
                columns: 3,
            }]
        );
    }
}
