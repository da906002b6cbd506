//! Resolution of a single simulation tick.

use tilecraft_core::{
    CellCoord, Direction, EnemyStep, EntityId, EntityKind, Event, PortalFault, TileKind,
};
use tracing::{debug, trace};

use crate::{
    board::{Board, Entity},
    portals::PortalRegistry,
};

/// Moves every enemy, then resolves capture or the player's move.
///
/// `player` is the player's state before the tick. The new entity list is
/// assembled off to the side and swapped into the board in one step.
pub(crate) fn advance(
    board: &mut Board,
    portals: &PortalRegistry,
    player: Entity,
    direction: Direction,
    enemy_steps: &[EnemyStep],
    out_events: &mut Vec<Event>,
) {
    let dimensions = board.dimensions();
    let mut entities = board.entities().to_vec();
    let mut captor: Option<EntityId> = None;

    for enemy in entities
        .iter_mut()
        .filter(|entity| entity.kind == EntityKind::Enemy)
    {
        let destination = planned_destination(enemy, enemy_steps, |cell| dimensions.contains(cell));
        if destination != enemy.cell {
            trace!(enemy = enemy.id.get(), from = %enemy.cell, to = %destination, "enemy stepped");
            out_events.push(Event::EnemyMoved {
                enemy: enemy.id,
                from: enemy.cell,
                to: destination,
            });
            enemy.cell = destination;
        }
        if destination == player.cell && captor.is_none() {
            captor = Some(enemy.id);
        }
    }

    if let Some(enemy) = captor {
        out_events.push(Event::PlayerCaptured {
            player: player.id,
            cell: player.cell,
            enemy,
        });
        match board.spawn_point() {
            Some(spawn) => {
                debug!(player = player.id.get(), %spawn, "player captured, respawning");
                relocate_player(&mut entities, player, spawn);
                out_events.push(Event::PlayerRespawned {
                    player: player.id,
                    spawn,
                });
            }
            None => {
                debug!(player = player.id.get(), cell = %player.cell, "player captured with no spawn tile");
                out_events.push(Event::RespawnUnavailable {
                    player: player.id,
                    cell: player.cell,
                });
            }
        }
        board.replace_entities(entities);
        return;
    }

    let blocked = Event::PlayerBlocked {
        player: player.id,
        cell: player.cell,
        direction,
    };

    let Some(target) = player.cell.step(direction, dimensions) else {
        out_events.push(blocked);
        board.replace_entities(entities);
        return;
    };

    match board.tile(target) {
        Some(TileKind::EnterPortal) => match resolve_portal(portals, target, |cell| {
            dimensions.contains(cell)
        }) {
            Ok(destination) => {
                debug!(portal = %target, %destination, "player teleported");
                relocate_player(&mut entities, player, destination);
                out_events.push(Event::PlayerTeleported {
                    player: player.id,
                    portal: target,
                    destination,
                });
            }
            Err(fault) => {
                debug!(portal = %target, ?fault, "portal could not deliver player");
                out_events.push(Event::PortalFailed {
                    portal: target,
                    fault,
                });
                out_events.push(blocked);
            }
        },
        Some(tile) if tile.is_walkable() => {
            relocate_player(&mut entities, player, target);
            out_events.push(Event::PlayerMoved {
                player: player.id,
                from: player.cell,
                to: target,
            });
        }
        _ => out_events.push(blocked),
    }

    board.replace_entities(entities);
}

/// Destination for an enemy this tick; invalid or missing plans keep it in place.
fn planned_destination<F>(enemy: &Entity, enemy_steps: &[EnemyStep], in_bounds: F) -> CellCoord
where
    F: Fn(CellCoord) -> bool,
{
    let Some(step) = enemy_steps.iter().find(|step| step.enemy == enemy.id) else {
        return enemy.cell;
    };

    if in_bounds(step.to) && enemy.cell.chebyshev_distance(step.to) <= 1 {
        step.to
    } else {
        debug!(enemy = enemy.id.get(), from = %enemy.cell, to = %step.to, "discarding invalid enemy step");
        enemy.cell
    }
}

fn resolve_portal<F>(
    portals: &PortalRegistry,
    portal: CellCoord,
    in_bounds: F,
) -> Result<CellCoord, PortalFault>
where
    F: Fn(CellCoord) -> bool,
{
    let destination = portals.lookup(portal).ok_or(PortalFault::Unlinked)?;
    if in_bounds(destination) {
        Ok(destination)
    } else {
        Err(PortalFault::DestinationOutOfBounds)
    }
}

/// Takes the player out of the list and re-appends it at `cell`.
fn relocate_player(entities: &mut Vec<Entity>, player: Entity, cell: CellCoord) {
    entities.retain(|entity| entity.id != player.id);
    entities.push(Entity { cell, ..player });
}
