#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board, portal and stat state for Tilecraft.
//!
//! The world owns three independent stores: the board (tiles plus entities),
//! the [`PortalRegistry`] and the [`StatCounters`]. All mutation goes through
//! [`apply`], which handles one [`Command`] at a time and either swaps in a
//! fully updated store or leaves everything untouched.

mod board;
mod portals;
mod stats;
mod tick;

use tilecraft_core::{
    BoardDimensions, Command, EditError, Event, MoveBudget, MoveRejection, StatKey,
};
use tracing::debug;

use crate::board::{Board, Toggle};

pub use crate::{portals::PortalRegistry, stats::StatCounters};

/// Represents the authoritative Tilecraft world state.
#[derive(Debug)]
pub struct World {
    board: Board,
    portals: PortalRegistry,
    stats: StatCounters,
    move_budget: MoveBudget,
    tick_index: u64,
}

impl World {
    /// Creates a world with an empty default-sized board, no portal links and default stats.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::empty(BoardDimensions::default()),
            portals: PortalRegistry::new(),
            stats: StatCounters::new(),
            move_budget: MoveBudget::default(),
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMoveBudget { budget } => {
            world.move_budget = budget;
            out_events.push(Event::MoveBudgetConfigured { budget });
        }
        Command::ResizeBoard { rows, columns } => {
            let dimensions = BoardDimensions::new(rows, columns);
            let (board, dropped_entities) = world.board.resized(dimensions);
            world.board = board;
            debug!(%dimensions, dropped_entities, "board resized");
            out_events.push(Event::BoardResized {
                dimensions,
                dropped_entities,
            });
        }
        Command::SetTile { cell, tile } => match world.board.set_tile(cell, tile) {
            Ok(()) => out_events.push(Event::TilePainted { cell, tile }),
            Err(reason) => reject_edit(cell, reason, out_events),
        },
        Command::ToggleEntity { cell, kind } => match world.board.toggle_entity(cell, kind) {
            Ok(Toggle::Placed(entity)) => out_events.push(Event::EntityPlaced {
                entity: entity.id,
                kind: entity.kind,
                cell: entity.cell,
            }),
            Ok(Toggle::Removed(entity)) => out_events.push(Event::EntityRemoved {
                entity: entity.id,
                kind: entity.kind,
                cell: entity.cell,
            }),
            Err(reason) => reject_edit(cell, reason, out_events),
        },
        Command::ClearCell { cell } => match world.board.clear_cell(cell) {
            Ok(removed) => {
                for entity in &removed {
                    out_events.push(Event::EntityRemoved {
                        entity: entity.id,
                        kind: entity.kind,
                        cell: entity.cell,
                    });
                }
                out_events.push(Event::CellCleared {
                    cell,
                    removed_entities: u32::try_from(removed.len()).unwrap_or(u32::MAX),
                });
            }
            Err(reason) => reject_edit(cell, reason, out_events),
        },
        Command::ImportBoard { snapshot } => {
            let board = Board::from_snapshot(snapshot);
            let dimensions = board.dimensions();
            let entity_count = u32::try_from(board.entities().len()).unwrap_or(u32::MAX);
            world.board = board;
            debug!(%dimensions, entity_count, "board imported");
            out_events.push(Event::BoardImported {
                dimensions,
                entity_count,
            });
        }
        Command::LinkPortal { from, to } => {
            let _ = world.portals.link(from, to);
            out_events.push(Event::PortalLinked { from, to });
        }
        Command::UnlinkPortal { from } => {
            if let Some(to) = world.portals.unlink(from) {
                out_events.push(Event::PortalUnlinked { from, to });
            }
        }
        Command::ClearPortals => {
            world.portals.clear();
            out_events.push(Event::PortalsCleared);
        }
        Command::AdvanceTick {
            direction,
            enemy_steps,
        } => {
            let Some(player) = world.board.player() else {
                debug!(?direction, "tick ignored: no player on the board");
                out_events.push(Event::MoveRejected {
                    direction,
                    reason: MoveRejection::NoPlayer,
                });
                return;
            };

            if world.move_budget == MoveBudget::Spend {
                if world.stats.get(StatKey::Movement) == 0 {
                    debug!(?direction, "tick refused: movement points exhausted");
                    out_events.push(Event::MoveRejected {
                        direction,
                        reason: MoveRejection::OutOfMovementPoints,
                    });
                    return;
                }
                let value = world.stats.decrement(StatKey::Movement);
                out_events.push(Event::StatChanged {
                    key: StatKey::Movement,
                    value,
                });
            }

            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TickAdvanced {
                tick: world.tick_index,
            });
            tick::advance(
                &mut world.board,
                &world.portals,
                player,
                direction,
                &enemy_steps,
                out_events,
            );
        }
        Command::AdjustStat { key, delta } => {
            let value = world.stats.adjust(key, delta);
            out_events.push(Event::StatChanged { key, value });
        }
        Command::SetStat { key, value } => {
            world.stats.set(key, value);
            out_events.push(Event::StatChanged { key, value });
        }
        Command::ResetStats => {
            world.stats.reset();
            out_events.push(Event::StatsReset);
        }
    }
}

fn reject_edit(cell: tilecraft_core::CellCoord, reason: EditError, out_events: &mut Vec<Event>) {
    debug!(%cell, ?reason, "edit rejected");
    out_events.push(Event::EditRejected { cell, reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tilecraft_core::{
        BoardDimensions, BoardSnapshot, CellCoord, EntitySnapshot, EntityView, MoveBudget,
        StatKey, TileKind, TileView,
    };

    use super::{PortalRegistry, StatCounters, World};

    /// Dimensions of the board.
    #[must_use]
    pub fn dimensions(world: &World) -> BoardDimensions {
        world.board.dimensions()
    }

    /// Read-only view of the tile layer.
    #[must_use]
    pub fn tiles(world: &World) -> TileView<'_> {
        world.board.tile_view()
    }

    /// Tile stored in the cell, if the cell lies on the board.
    #[must_use]
    pub fn tile_at(world: &World, cell: CellCoord) -> Option<TileKind> {
        world.board.tile(cell)
    }

    /// Captures the entities on the board in board order.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        world.board.entity_view()
    }

    /// The player entity, if one exists.
    #[must_use]
    pub fn player(world: &World) -> Option<EntitySnapshot> {
        world.board.player().map(|entity| EntitySnapshot {
            id: entity.id,
            kind: entity.kind,
            cell: entity.cell,
        })
    }

    /// First spawn tile scanning row-major.
    #[must_use]
    pub fn spawn_point(world: &World) -> Option<CellCoord> {
        world.board.spawn_point()
    }

    /// Provides read-only access to the portal registry.
    #[must_use]
    pub fn portals(world: &World) -> &PortalRegistry {
        &world.portals
    }

    /// Destination linked to a portal coordinate, if any.
    #[must_use]
    pub fn portal_destination(world: &World, from: CellCoord) -> Option<CellCoord> {
        world.portals.lookup(from)
    }

    /// Provides read-only access to the stat counters.
    #[must_use]
    pub fn stats(world: &World) -> &StatCounters {
        &world.stats
    }

    /// Current value of a single stat counter.
    #[must_use]
    pub fn stat(world: &World, key: StatKey) -> u32 {
        world.stats.get(key)
    }

    /// Budget policy applied to player moves.
    #[must_use]
    pub fn move_budget(world: &World) -> MoveBudget {
        world.move_budget
    }

    /// Number of ticks that have run.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Serializable copy of the board for export.
    #[must_use]
    pub fn snapshot(world: &World) -> BoardSnapshot {
        world.board.to_snapshot()
    }
}
