#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for editing and playing Tilecraft boards.

mod board_file;
mod config;
mod session;
mod text_backend;

use std::{io, path::PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tilecraft_core::{BoardSnapshot, CellCoord, Command, MoveBudget};
use tilecraft_rendering::{Palette, RenderingBackend, Scene};
use tilecraft_system_pursuit::{Config as PursuitConfig, Pursuit};
use tilecraft_world::{self as world, query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{FileConfig, Overrides, Settings},
    session::Session,
    text_backend::TextBackend,
};

/// Grid board editor with a turn-based pursuit simulation.
#[derive(Debug, Parser)]
#[command(name = "tilecraft", version, about, long_about = None)]
struct Cli {
    /// TOML file supplying defaults for seed, board size and enemy tuning.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tint the board with the editor palette using ANSI colors.
    #[arg(long, global = true)]
    color: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Write an empty board file.
    New {
        /// Destination of the board file.
        path: PathBuf,
        /// Row count of the new board.
        #[arg(long)]
        rows: Option<u32>,
        /// Column count of the new board.
        #[arg(long)]
        cols: Option<u32>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print a board file.
    Show {
        /// Board file to print.
        path: PathBuf,
    },
    /// Edit and play a board with line commands read from stdin.
    Play {
        /// Board file loaded at startup.
        #[arg(long, value_name = "PATH")]
        board: Option<PathBuf>,
        /// Seed for enemy movement; random when absent.
        #[arg(long)]
        seed: Option<u64>,
        /// Let the player move without spending movement points.
        #[arg(long)]
        unlimited_moves: bool,
        /// Portal link applied at startup, written as `row,col=row,col`.
        #[arg(long = "link", value_name = "FROM=TO", value_parser = parse_link)]
        links: Vec<(CellCoord, CellCoord)>,
    },
}

fn parse_link(value: &str) -> Result<(CellCoord, CellCoord), String> {
    let (from, to) = value
        .split_once('=')
        .ok_or_else(|| format!("'{value}' is not written as row,col=row,col"))?;
    let from = from.parse::<CellCoord>().map_err(|error| error.to_string())?;
    let to = to.parse::<CellCoord>().map_err(|error| error.to_string())?;
    Ok((from, to))
}

/// Entry point for the Tilecraft command-line interface.
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    match cli.action {
        Action::New {
            path,
            rows,
            cols,
            force,
        } => {
            let settings = Settings::resolve(
                &file,
                Overrides {
                    rows,
                    cols,
                    ..Overrides::default()
                },
            );
            new_board(&path, settings, force)
        }
        Action::Show { path } => show_board(&path, cli.color),
        Action::Play {
            board,
            seed,
            unlimited_moves,
            links,
        } => {
            let settings = Settings::resolve(
                &file,
                Overrides {
                    seed,
                    unlimited_moves,
                    ..Overrides::default()
                },
            );
            play(board.as_deref(), settings, &links, cli.color)
        }
    }
}

/// Logs go to stderr so stdout carries only the board.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn apply_all(world: &mut World, commands: impl IntoIterator<Item = Command>) {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
}

fn new_board(path: &std::path::Path, settings: Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite", path.display());
    }

    let mut world = World::new();
    apply_all(
        &mut world,
        [Command::ResizeBoard {
            rows: settings.rows,
            columns: settings.cols,
        }],
    );
    let snapshot = query::snapshot(&world);
    board_file::save(path, &snapshot)?;
    info!(path = %path.display(), rows = snapshot.rows, cols = snapshot.cols, "created board");
    Ok(())
}

fn show_board(path: &std::path::Path, color: bool) -> Result<()> {
    let world = world_from(board_file::load(path)?);
    let mut backend = text_backend(color);
    backend.present(&Scene::capture(&world))
}

fn text_backend(color: bool) -> TextBackend<io::StdoutLock<'static>> {
    let backend = TextBackend::new(io::stdout().lock());
    if color {
        backend.with_palette(Palette::default())
    } else {
        backend
    }
}

fn world_from(snapshot: BoardSnapshot) -> World {
    let mut world = World::new();
    apply_all(&mut world, [Command::ImportBoard { snapshot }]);
    world
}

fn play(
    board: Option<&std::path::Path>,
    settings: Settings,
    links: &[(CellCoord, CellCoord)],
    color: bool,
) -> Result<()> {
    let mut world = match board {
        Some(path) => world_from(board_file::load(path)?),
        None => {
            let mut world = World::new();
            apply_all(
                &mut world,
                [Command::ResizeBoard {
                    rows: settings.rows,
                    columns: settings.cols,
                }],
            );
            world
        }
    };

    if settings.unlimited_moves {
        apply_all(
            &mut world,
            [Command::ConfigureMoveBudget {
                budget: MoveBudget::Unlimited,
            }],
        );
    }
    apply_all(
        &mut world,
        links
            .iter()
            .map(|&(from, to)| Command::LinkPortal { from, to }),
    );

    let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
    info!(
        seed,
        dimensions = %query::dimensions(&world),
        unlimited_moves = settings.unlimited_moves,
        links = links.len(),
        "starting session"
    );

    let pursuit = Pursuit::new(PursuitConfig::new(seed, settings.tuning));
    let mut session = Session::new(world, pursuit);
    let mut backend = text_backend(color);
    session.run(io::stdin().lock(), &mut backend)
}
