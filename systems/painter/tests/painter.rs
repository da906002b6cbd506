use tilecraft_core::{
    BoardDimensions, Brush, CellCoord, Command, EntityKind, Event, TileKind,
};
use tilecraft_system_painter::{Painter, PointerButton, PointerInput};
use tilecraft_world::{self as world, query, World};

fn press(cell: CellCoord) -> PointerInput {
    PointerInput::Pressed {
        button: PointerButton::Primary,
        cell: Some(cell),
    }
}

fn move_to(cell: Option<CellCoord>) -> PointerInput {
    PointerInput::Moved { cell }
}

fn drive(world: &mut World, painter: &mut Painter, inputs: &[PointerInput]) -> Vec<Event> {
    let mut log = Vec::new();
    let mut pending = Vec::new();
    for input in inputs {
        let mut commands = Vec::new();
        painter.handle(&pending, *input, &mut commands);
        pending.clear();
        for command in commands {
            world::apply(world, command, &mut pending);
        }
        log.extend(pending.iter().cloned());
    }
    log
}

#[test]
fn drag_paints_each_entered_cell_once() {
    let mut painter = Painter::default();
    let mut commands = Vec::new();

    for input in [
        press(CellCoord::new(0, 0)),
        move_to(Some(CellCoord::new(0, 0))),
        move_to(Some(CellCoord::new(0, 1))),
        move_to(Some(CellCoord::new(0, 1))),
        move_to(Some(CellCoord::new(1, 1))),
        PointerInput::Released,
        move_to(Some(CellCoord::new(2, 2))),
    ] {
        painter.handle(&[], input, &mut commands);
    }

    assert_eq!(
        commands,
        vec![
            Command::SetTile {
                cell: CellCoord::new(0, 0),
                tile: TileKind::Wall,
            },
            Command::SetTile {
                cell: CellCoord::new(0, 1),
                tile: TileKind::Wall,
            },
            Command::SetTile {
                cell: CellCoord::new(1, 1),
                tile: TileKind::Wall,
            },
        ],
        "stroke should paint entered cells once and stop on release",
    );
}

#[test]
fn toggle_brush_does_not_flicker_within_a_cell() {
    let mut world = World::new();
    let mut painter = Painter::default();
    painter.select_brush(Brush::Entity(EntityKind::SmallDot));

    let _ = drive(
        &mut world,
        &mut painter,
        &[
            press(CellCoord::new(3, 3)),
            move_to(Some(CellCoord::new(3, 3))),
            move_to(Some(CellCoord::new(3, 3))),
            PointerInput::Released,
        ],
    );

    assert_eq!(query::entity_view(&world).len(), 1);
}

#[test]
fn reentering_a_cell_after_leaving_the_board_paints_again() {
    let mut painter = Painter::default();
    painter.select_brush(Brush::Tile(TileKind::Exit));
    let mut commands = Vec::new();

    for input in [
        press(CellCoord::new(0, 0)),
        move_to(None),
        move_to(Some(CellCoord::new(0, 0))),
    ] {
        painter.handle(&[], input, &mut commands);
    }

    assert_eq!(commands.len(), 2);
}

#[test]
fn secondary_press_erases_regardless_of_brush() {
    let mut world = World::new();
    let mut painter = Painter::default();
    let cell = CellCoord::new(2, 4);

    let _ = drive(&mut world, &mut painter, &[press(cell), PointerInput::Released]);
    painter.select_brush(Brush::Entity(EntityKind::Enemy));
    let _ = drive(&mut world, &mut painter, &[press(cell), PointerInput::Released]);
    assert_eq!(query::tile_at(&world, cell), Some(TileKind::Wall));
    assert_eq!(query::entity_view(&world).len(), 1);

    let events = drive(
        &mut world,
        &mut painter,
        &[PointerInput::Pressed {
            button: PointerButton::Secondary,
            cell: Some(cell),
        }],
    );

    assert!(events.contains(&Event::CellCleared {
        cell,
        removed_entities: 1,
    }));
    assert_eq!(query::tile_at(&world, cell), Some(TileKind::Empty));
    assert!(query::entity_view(&world).is_empty());
    assert!(!painter.is_stroking(), "secondary press does not start a stroke");
}

#[test]
fn painter_follows_board_resizes() {
    let mut world = World::new();
    let mut painter = Painter::default();
    let mut commands = Vec::new();
    painter.request_resize(3, 3, &mut commands);

    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(query::dimensions(&world), BoardDimensions::new(3, 3));

    painter.handle(&events, press(CellCoord::new(5, 5)), &mut commands);
    assert!(commands.is_empty(), "cells off the resized board are ignored");

    painter.handle(&[], move_to(Some(CellCoord::new(2, 2))), &mut commands);
    assert_eq!(commands.len(), 1);
}

#[test]
fn links_are_only_requested_from_entrance_portals() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetTile {
            cell: CellCoord::new(1, 1),
            tile: TileKind::EnterPortal,
        },
        &mut events,
    );
    let painter = Painter::default();
    let mut commands = Vec::new();

    painter.request_link(
        CellCoord::new(0, 0),
        CellCoord::new(4, 4),
        |cell| query::tile_at(&world, cell),
        &mut commands,
    );
    assert!(commands.is_empty(), "empty tiles cannot be linked");

    painter.request_link(
        CellCoord::new(1, 1),
        CellCoord::new(4, 4),
        |cell| query::tile_at(&world, cell),
        &mut commands,
    );
    painter.request_unlink(CellCoord::new(6, 6), &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::LinkPortal {
                from: CellCoord::new(1, 1),
                to: CellCoord::new(4, 4),
            },
            Command::UnlinkPortal {
                from: CellCoord::new(6, 6),
            },
        ]
    );
}
