//! Interactive line-oriented editing and play session.

use std::{io::BufRead, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use tilecraft_core::{
    Brush, CellCoord, Command, Direction, Event, MoveRejection, ParseError, PortalFault, StatKey,
};
use tilecraft_rendering::{RenderingBackend, Scene};
use tilecraft_system_painter::Painter;
use tilecraft_system_pursuit::Pursuit;
use tilecraft_world::{self as world, query, World};
use tracing::{debug, info, warn};

use crate::board_file;

const HELP: &str = "\
moves:    w a s d | up down left right
editing:  brush <name> | paint <row> <col> [brush] | erase <row> <col> | resize <rows> <cols>
portals:  link <r,c> <r,c> | unlink <r,c> | portals clear
stats:    stat <key> +N | stat <key> -N | stat <key> =N | stats reset
files:    export <path> | import <path>
other:    show | help | quit";

/// One parsed line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Move(Direction),
    SelectBrush(Brush),
    Paint {
        cell: CellCoord,
        brush: Option<Brush>,
    },
    Erase(CellCoord),
    Link {
        from: CellCoord,
        to: CellCoord,
    },
    Unlink(CellCoord),
    ClearPortals,
    Resize {
        rows: u32,
        columns: u32,
    },
    Stat {
        key: StatKey,
        change: StatChange,
    },
    ResetStats,
    Export(PathBuf),
    Import(PathBuf),
    Show,
    Help,
    Quit,
}

/// Requested change to a stat counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatChange {
    Adjust(i32),
    Set(u32),
}

impl FromStr for StatChange {
    type Err = LineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || LineError::StatChange(value.to_owned());
        if let Some(amount) = value.strip_prefix('=') {
            return amount.parse().map(Self::Set).map_err(|_| invalid());
        }
        if !value.starts_with(['+', '-']) {
            return Err(invalid());
        }
        value.parse().map(Self::Adjust).map_err(|_| invalid())
    }
}

/// Reasons a line of input could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum LineError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a whole number")]
    Number(String),
    #[error("stat change must look like +N, -N or =N, found '{0}'")]
    StatChange(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parses a line of input; blank lines yield `None`.
pub(crate) fn parse_line(input: &str) -> Result<Option<Line>, LineError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };

    if let Some(direction) = key_direction(verb) {
        return if args.is_empty() {
            Ok(Some(Line::Move(direction)))
        } else {
            Err(LineError::Usage("w | a | s | d"))
        };
    }

    let line = match (verb.to_ascii_lowercase().as_str(), args) {
        ("brush", [name]) => Line::SelectBrush(name.parse()?),
        ("brush", _) => return Err(LineError::Usage("brush <name>")),
        ("paint", [row, column]) => Line::Paint {
            cell: cell_from_parts(row, column)?,
            brush: None,
        },
        ("paint", [row, column, brush]) => Line::Paint {
            cell: cell_from_parts(row, column)?,
            brush: Some(brush.parse()?),
        },
        ("paint", _) => return Err(LineError::Usage("paint <row> <col> [brush]")),
        ("erase", [row, column]) => Line::Erase(cell_from_parts(row, column)?),
        ("erase", _) => return Err(LineError::Usage("erase <row> <col>")),
        ("link", [from, to]) => Line::Link {
            from: from.parse()?,
            to: to.parse()?,
        },
        ("link", _) => return Err(LineError::Usage("link <r,c> <r,c>")),
        ("unlink", [from]) => Line::Unlink(from.parse()?),
        ("unlink", _) => return Err(LineError::Usage("unlink <r,c>")),
        ("portals", ["clear"]) => Line::ClearPortals,
        ("portals", _) => return Err(LineError::Usage("portals clear")),
        ("resize", [rows, columns]) => Line::Resize {
            rows: number(rows)?,
            columns: number(columns)?,
        },
        ("resize", _) => return Err(LineError::Usage("resize <rows> <cols>")),
        ("stat", [key, change]) => Line::Stat {
            key: key.parse()?,
            change: change.parse()?,
        },
        ("stat", _) => return Err(LineError::Usage("stat <key> +N|-N|=N")),
        ("stats", ["reset"]) => Line::ResetStats,
        ("stats", _) => return Err(LineError::Usage("stats reset")),
        ("export", [path]) => Line::Export(PathBuf::from(*path)),
        ("export", _) => return Err(LineError::Usage("export <path>")),
        ("import", [path]) => Line::Import(PathBuf::from(*path)),
        ("import", _) => return Err(LineError::Usage("import <path>")),
        ("show", []) => Line::Show,
        ("help", _) => Line::Help,
        ("quit" | "exit", []) => Line::Quit,
        _ => return Err(LineError::Unknown(verb.to_owned())),
    };
    Ok(Some(line))
}

/// Maps movement keys onto screen deltas, then onto board directions.
fn key_direction(word: &str) -> Option<Direction> {
    let (dx, dy) = match word.to_ascii_lowercase().as_str() {
        "w" | "up" => (0, -1),
        "s" | "down" => (0, 1),
        "a" | "left" => (-1, 0),
        "d" | "right" => (1, 0),
        _ => return None,
    };
    Direction::from_screen_delta(dx, dy)
}

fn number(value: &str) -> Result<u32, LineError> {
    value
        .parse()
        .map_err(|_| LineError::Number(value.to_owned()))
}

fn cell_from_parts(row: &str, column: &str) -> Result<CellCoord, LineError> {
    Ok(CellCoord::new(number(row)?, number(column)?))
}

/// Whether the session keeps reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Owns the world and the systems driven by user input.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    painter: Painter,
    pursuit: Pursuit,
}

impl Session {
    pub(crate) fn new(world: World, pursuit: Pursuit) -> Self {
        let painter = Painter::new(query::dimensions(&world));
        Self {
            world,
            painter,
            pursuit,
        }
    }

    /// Reads lines until input ends or the user quits.
    pub(crate) fn run<R, B>(&mut self, input: R, backend: &mut B) -> Result<()>
    where
        R: BufRead,
        B: RenderingBackend,
    {
        backend.present(&Scene::capture(&self.world))?;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            match parse_line(&line) {
                Ok(None) => {}
                Ok(Some(parsed)) => {
                    if self.execute(parsed, backend)? == Flow::Quit {
                        break;
                    }
                }
                Err(error) => {
                    debug!(%line, %error, "ignoring input");
                    backend.notify(&error.to_string())?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn execute<B>(&mut self, line: Line, backend: &mut B) -> Result<Flow>
    where
        B: RenderingBackend,
    {
        let mut commands = Vec::new();
        match line {
            Line::Move(direction) => self.pursuit.handle(
                direction,
                &query::entity_view(&self.world),
                query::dimensions(&self.world),
                &mut commands,
            ),
            Line::SelectBrush(brush) => {
                self.painter.select_brush(brush);
                backend.notify(&format!("brush: {}", brush.label()))?;
                return Ok(Flow::Continue);
            }
            Line::Paint { cell, brush } => {
                let brush = brush.unwrap_or(self.painter.brush());
                self.painter.paint(cell, brush, &mut commands);
                if commands.is_empty() {
                    backend.notify(&format!("{cell} is outside the board"))?;
                    return Ok(Flow::Continue);
                }
            }
            Line::Erase(cell) => {
                self.painter.paint(cell, Brush::Eraser, &mut commands);
                if commands.is_empty() {
                    backend.notify(&format!("{cell} is outside the board"))?;
                    return Ok(Flow::Continue);
                }
            }
            Line::Link { from, to } => {
                self.painter.request_link(
                    from,
                    to,
                    |cell| query::tile_at(&self.world, cell),
                    &mut commands,
                );
                if commands.is_empty() {
                    backend.notify(&format!("{from} is not an entrance portal"))?;
                    return Ok(Flow::Continue);
                }
            }
            Line::Unlink(from) => self.painter.request_unlink(from, &mut commands),
            Line::ClearPortals => commands.push(Command::ClearPortals),
            Line::Resize { rows, columns } => {
                self.painter.request_resize(rows, columns, &mut commands);
            }
            Line::Stat { key, change } => commands.push(match change {
                StatChange::Adjust(delta) => Command::AdjustStat { key, delta },
                StatChange::Set(value) => Command::SetStat { key, value },
            }),
            Line::ResetStats => commands.push(Command::ResetStats),
            Line::Export(path) => {
                match board_file::save(&path, &query::snapshot(&self.world)) {
                    Ok(()) => {
                        info!(path = %path.display(), "board exported");
                        backend.notify(&format!("exported to {}", path.display()))?;
                    }
                    Err(error) => {
                        warn!(path = %path.display(), "export failed: {error:#}");
                        backend.notify(&format!("{error:#}"))?;
                    }
                }
                return Ok(Flow::Continue);
            }
            Line::Import(path) => match board_file::load(&path) {
                Ok(snapshot) => {
                    info!(path = %path.display(), "board imported");
                    commands.push(Command::ImportBoard { snapshot });
                }
                Err(error) => {
                    warn!(path = %path.display(), "import failed: {error:#}");
                    backend.notify(&format!("{error:#}"))?;
                    return Ok(Flow::Continue);
                }
            },
            Line::Show => {}
            Line::Help => {
                backend.notify(HELP)?;
                backend.notify(&brush_list())?;
                return Ok(Flow::Continue);
            }
            Line::Quit => return Ok(Flow::Quit),
        }

        let events = self.apply(commands);
        for message in events.iter().filter_map(describe) {
            backend.notify(&message)?;
        }
        backend.present(&Scene::capture(&self.world))?;
        Ok(Flow::Continue)
    }

    fn apply(&mut self, commands: Vec<Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        self.painter.observe(&events);
        events
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        &self.world
    }
}

/// Toolbar brushes by the names `brush` accepts.
fn brush_list() -> String {
    let names: Vec<&str> = Brush::PALETTE.iter().map(|brush| brush.name()).collect();
    format!("brushes:  {}", names.join(" "))
}

/// Human-readable feedback for events worth telling the user about.
fn describe(event: &Event) -> Option<String> {
    let message = match event {
        Event::EditRejected { cell, .. } => format!("{cell} is outside the board"),
        Event::BoardImported {
            dimensions,
            entity_count,
        } => format!("imported a {dimensions} board with {entity_count} entities"),
        Event::PlayerTeleported {
            portal,
            destination,
            ..
        } => format!("teleported from {portal} to {destination}"),
        Event::PortalFailed {
            portal,
            fault: PortalFault::Unlinked,
        } => format!("the portal at {portal} is not linked"),
        Event::PortalFailed {
            portal,
            fault: PortalFault::DestinationOutOfBounds,
        } => format!("the portal at {portal} leads off the board"),
        Event::PlayerCaptured { cell, .. } => format!("caught at {cell}!"),
        Event::PlayerRespawned { spawn, .. } => format!("respawned at {spawn}"),
        Event::RespawnUnavailable { cell, .. } => {
            format!("no spawn tile on the board, staying at {cell}")
        }
        Event::MoveRejected {
            reason: MoveRejection::NoPlayer,
            ..
        } => "place a player first".to_owned(),
        Event::MoveRejected {
            reason: MoveRejection::OutOfMovementPoints,
            ..
        } => "out of movement points".to_owned(),
        _ => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_backend::TextBackend;
    use tilecraft_core::{EntityKind, TileKind};
    use tilecraft_system_pursuit::{Config, PursuitTuning};

    fn session() -> Session {
        Session::new(
            World::new(),
            Pursuit::new(Config::new(5, PursuitTuning::default())),
        )
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut backend = TextBackend::new(Vec::new());
        session
            .run(script.as_bytes(), &mut backend)
            .expect("script runs");
        String::from_utf8(backend.into_inner()).expect("output is utf-8")
    }

    #[test]
    fn parses_movement_keys_and_words() {
        assert_eq!(parse_line("w"), Ok(Some(Line::Move(Direction::North))));
        assert_eq!(parse_line("  Left "), Ok(Some(Line::Move(Direction::West))));
        assert_eq!(parse_line("d"), Ok(Some(Line::Move(Direction::East))));
        assert_eq!(parse_line("down"), Ok(Some(Line::Move(Direction::South))));
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn parses_editing_commands() {
        assert_eq!(
            parse_line("paint 2 3 enterPortal"),
            Ok(Some(Line::Paint {
                cell: CellCoord::new(2, 3),
                brush: Some(Brush::Tile(TileKind::EnterPortal)),
            }))
        );
        assert_eq!(
            parse_line("link 2,2 5,5"),
            Ok(Some(Line::Link {
                from: CellCoord::new(2, 2),
                to: CellCoord::new(5, 5),
            }))
        );
        assert_eq!(
            parse_line("stat moves +3"),
            Ok(Some(Line::Stat {
                key: StatKey::Movement,
                change: StatChange::Adjust(3),
            }))
        );
        assert_eq!(
            parse_line("stat Magic =0"),
            Ok(Some(Line::Stat {
                key: StatKey::Magic,
                change: StatChange::Set(0),
            }))
        );
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(
            parse_line("paint 1"),
            Err(LineError::Usage("paint <row> <col> [brush]"))
        );
        assert_eq!(
            parse_line("dance"),
            Err(LineError::Unknown("dance".to_owned()))
        );
        assert_eq!(
            parse_line("stat attack 4"),
            Err(LineError::StatChange("4".to_owned()))
        );
        assert!(matches!(
            parse_line("brush lava"),
            Err(LineError::Parse(ParseError::Brush(_)))
        ));
        assert_eq!(
            parse_line("resize x 3"),
            Err(LineError::Number("x".to_owned()))
        );
    }

    #[test]
    fn script_edits_then_moves_the_player() {
        let mut session = session();
        let output = run_script(
            &mut session,
            "paint 4 4 player\nd\nbogus\nquit\nd\n",
        );

        let player = query::player(session.world()).expect("player placed");
        assert_eq!(player.cell, CellCoord::new(4, 5));
        assert!(output.contains("unknown command 'bogus'"), "{output}");
        assert_eq!(
            query::tick_index(session.world()),
            1,
            "input after quit is not processed"
        );
    }

    #[test]
    fn help_lists_every_toolbar_brush() {
        let mut session = session();
        let output = run_script(&mut session, "help\n");

        assert!(
            output.contains(
                "brushes:  wall spawn exit enterPortal empty smallDot bigDot player enemy eraser"
            ),
            "{output}"
        );
    }

    #[test]
    fn linking_requires_an_entrance_portal() {
        let mut session = session();
        let output = run_script(&mut session, "link 1,1 3,3\npaint 1 1 enterPortal\nlink 1,1 3,3\n");

        assert!(output.contains("1,1 is not an entrance portal"), "{output}");
        assert_eq!(
            query::portal_destination(session.world(), CellCoord::new(1, 1)),
            Some(CellCoord::new(3, 3))
        );
    }

    #[test]
    fn failed_import_leaves_the_board_untouched() {
        let mut session = session();
        let path = std::env::temp_dir().join(format!(
            "tilecraft-session-{}-bad.json",
            std::process::id()
        ));
        std::fs::write(&path, "{\"rows\": \"x\"}").expect("scratch file writes");

        let script = format!("paint 0 0 enemy\nimport {}\n", path.display());
        let output = run_script(&mut session, &script);
        let _ = std::fs::remove_file(&path);

        assert!(output.contains("not a valid board file"), "{output}");
        let entities = query::entity_view(session.world());
        assert_eq!(entities.len(), 1);
        assert_eq!(
            entities.iter().next().map(|entity| entity.kind),
            Some(EntityKind::Enemy)
        );
    }
}
