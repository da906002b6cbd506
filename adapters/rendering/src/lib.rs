#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tilecraft adapters.

use std::fmt::Write as _;

use anyhow::Result as AnyResult;
use tilecraft_core::{BoardDimensions, CellCoord, EntityKind, StatKey, TileKind};
use tilecraft_world::{query, World};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Byte RGB channels, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        let byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.red), byte(self.green), byte(self.blue)]
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let channel = |value: f32| value + (1.0 - value) * amount;

        Self {
            red: channel(self.red),
            green: channel(self.green),
            blue: channel(self.blue),
            alpha: self.alpha,
        }
    }
}

/// Colors used by the board editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Fill behind empty cells.
    pub background: Color,
    /// Wall tiles.
    pub wall: Color,
    /// Spawn tiles.
    pub spawn: Color,
    /// Exit tiles.
    pub exit: Color,
    /// Entrance portal tiles.
    pub enter_portal: Color,
    /// Exit portal tiles.
    pub exit_portal: Color,
    /// Small dots.
    pub small_dot: Color,
    /// Big dots.
    pub big_dot: Color,
    /// The player.
    pub player: Color,
    /// Enemies.
    pub enemy: Color,
}

impl Palette {
    /// Color used to fill a cell holding `tile`.
    #[must_use]
    pub const fn tile(&self, tile: TileKind) -> Color {
        match tile {
            TileKind::Empty => self.background,
            TileKind::Wall => self.wall,
            TileKind::Spawn => self.spawn,
            TileKind::Exit => self.exit,
            TileKind::EnterPortal => self.enter_portal,
            TileKind::ExitPortal => self.exit_portal,
        }
    }

    /// Color used to draw an entity of `kind`.
    #[must_use]
    pub const fn entity(&self, kind: EntityKind) -> Color {
        match kind {
            EntityKind::SmallDot => self.small_dot,
            EntityKind::BigDot => self.big_dot,
            EntityKind::Player => self.player,
            EntityKind::Enemy => self.enemy,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let spawn = Color::from_rgb_u8(0x9b, 0xe7, 0xc5);
        Self {
            background: Color::from_rgb_u8(0x3f, 0x51, 0x72),
            wall: Color::from_rgb_u8(0x23, 0x35, 0x53),
            spawn,
            exit: spawn.lighten(0.4),
            enter_portal: Color::from_rgb_u8(0xc2, 0x93, 0xf2).lighten(0.3),
            exit_portal: Color::from_rgb_u8(0xc2, 0x93, 0xf2).lighten(0.6),
            small_dot: Color::from_rgb_u8(0x7d, 0xd6, 0xa1),
            big_dot: Color::from_rgb_u8(0x7d, 0xf6, 0xa0),
            player: Color::from_rgb_u8(0xc2, 0x93, 0xf2),
            enemy: Color::from_rgb_u8(0xff, 0x9d, 0xb4),
        }
    }
}

/// Contents of a single cell ready for drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellVisual {
    /// Cell being described.
    pub cell: CellCoord,
    /// Tile drawn first.
    pub tile: TileKind,
    /// Entities drawn on top of the tile, bottom-most first.
    pub occupants: Vec<EntityKind>,
}

impl CellVisual {
    /// Color of whatever wins the glyph.
    #[must_use]
    pub fn color(&self, palette: &Palette) -> Color {
        match self.occupants.last() {
            Some(kind) => palette.entity(*kind),
            None => palette.tile(self.tile),
        }
    }

    /// Single character used by text front ends.
    ///
    /// The top-most occupant wins over the tile.
    #[must_use]
    pub fn glyph(&self) -> char {
        match self.occupants.last() {
            Some(kind) => entity_glyph(*kind),
            None => tile_glyph(self.tile),
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";

const fn tile_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Empty => '.',
        TileKind::Wall => '#',
        TileKind::Spawn => 'S',
        TileKind::Exit => 'E',
        TileKind::EnterPortal => 'O',
        TileKind::ExitPortal => 'o',
    }
}

const fn entity_glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::SmallDot => ',',
        EntityKind::BigDot => '*',
        EntityKind::Enemy => 'X',
        EntityKind::Player => '@',
    }
}

const fn draw_layer(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::SmallDot => 0,
        EntityKind::BigDot => 1,
        EntityKind::Enemy => 2,
        EntityKind::Player => 3,
    }
}

/// Scene description capturing everything a front end draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    /// Size of the board.
    pub dimensions: BoardDimensions,
    /// Every cell in row-major order.
    pub cells: Vec<CellVisual>,
    /// Portal links as `(from, to)` pairs ordered by source.
    pub portals: Vec<(CellCoord, CellCoord)>,
    /// Stat counters in display order.
    pub stats: Vec<(StatKey, u32)>,
    /// Number of ticks that have run.
    pub tick: u64,
}

impl Scene {
    /// Captures a scene from the current world state.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        let dimensions = query::dimensions(world);
        let tiles = query::tiles(world);
        let entities = query::entity_view(world);

        let cells = dimensions
            .cells()
            .map(|cell| {
                let mut occupants: Vec<EntityKind> =
                    entities.at(cell).map(|entity| entity.kind).collect();
                occupants.sort_by_key(|kind| draw_layer(*kind));
                CellVisual {
                    cell,
                    tile: tiles.tile(cell).unwrap_or_default(),
                    occupants,
                }
            })
            .collect();

        Self {
            dimensions,
            cells,
            portals: query::portals(world).iter().collect(),
            stats: query::stats(world).iter().collect(),
            tick: query::tick_index(world),
        }
    }

    /// Visual for a single cell, if it lies on the board.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&CellVisual> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index))
    }

    /// Draws the board with one glyph per cell and one line per row.
    #[must_use]
    pub fn render_text(&self) -> String {
        let columns = usize::try_from(self.dimensions.columns()).unwrap_or(usize::MAX);
        let mut out = String::with_capacity(self.cells.len() + self.cells.len() / columns.max(1));
        for row in self.cells.chunks(columns.max(1)) {
            out.extend(row.iter().map(CellVisual::glyph));
            out.push('\n');
        }
        out
    }

    /// Same layout as [`Scene::render_text`], with each glyph tinted by
    /// the palette using 24-bit ANSI escapes.
    #[must_use]
    pub fn render_ansi(&self, palette: &Palette) -> String {
        let columns = usize::try_from(self.dimensions.columns()).unwrap_or(usize::MAX);
        let mut out = String::new();
        for row in self.cells.chunks(columns.max(1)) {
            for visual in row {
                let [red, green, blue] = visual.color(palette).to_rgb_u8();
                let _ = write!(out, "\x1b[38;2;{red};{green};{blue}m{}", visual.glyph());
            }
            out.push_str(ANSI_RESET);
            out.push('\n');
        }
        out
    }

    /// Summarises stats, tick count and portal links in a few lines.
    #[must_use]
    pub fn render_status(&self) -> String {
        let mut parts: Vec<String> = self
            .stats
            .iter()
            .map(|(key, value)| format!("{} {value}", key.label()))
            .collect();
        parts.push(format!("| tick {}", self.tick));

        let mut out = parts.join("  ");
        out.push('\n');
        for (from, to) in &self.portals {
            let _ = writeln!(out, "portal {from} -> {to}");
        }
        out
    }
}

/// Rendering backend capable of presenting Tilecraft scenes.
pub trait RenderingBackend {
    /// Presents a captured scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Shows a line of feedback next to the scene.
    fn notify(&mut self, message: &str) -> AnyResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 128, 255).lighten(0.5);
        assert!((color.red - 0.5).abs() < f32::EPSILON);
        assert!((color.blue - 1.0).abs() < f32::EPSILON);
        assert!((color.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn top_occupant_wins_the_glyph() {
        let visual = CellVisual {
            cell: CellCoord::new(0, 0),
            tile: TileKind::Wall,
            occupants: vec![EntityKind::BigDot, EntityKind::Player],
        };
        assert_eq!(visual.glyph(), '@');

        let bare = CellVisual {
            occupants: Vec::new(),
            ..visual
        };
        assert_eq!(bare.glyph(), '#');
    }

    #[test]
    fn byte_channels_survive_the_float_round_trip() {
        assert_eq!(Color::from_rgb_u8(0x3f, 0x51, 0x72).to_rgb_u8(), [0x3f, 0x51, 0x72]);
        assert_eq!(Color::from_rgb_u8(0, 0, 0).lighten(1.0).to_rgb_u8(), [255, 255, 255]);
    }

    #[test]
    fn cell_color_follows_the_glyph() {
        let palette = Palette::default();
        let visual = CellVisual {
            cell: CellCoord::new(0, 0),
            tile: TileKind::Spawn,
            occupants: vec![EntityKind::SmallDot, EntityKind::Enemy],
        };
        assert_eq!(visual.color(&palette), palette.enemy);

        let bare = CellVisual {
            occupants: Vec::new(),
            ..visual
        };
        assert_eq!(bare.color(&palette), palette.spawn);
    }

    #[test]
    fn status_without_stats_starts_with_the_tick() {
        let scene = Scene {
            dimensions: BoardDimensions::new(1, 1),
            cells: Vec::new(),
            portals: Vec::new(),
            stats: Vec::new(),
            tick: 3,
        };
        assert_eq!(scene.render_status(), "| tick 3\n");
    }

    #[test]
    fn palette_distinguishes_every_tile() {
        let palette = Palette::default();
        for (index, first) in TileKind::ALL.iter().enumerate() {
            for second in &TileKind::ALL[index + 1..] {
                assert_ne!(
                    palette.tile(*first),
                    palette.tile(*second),
                    "{first:?} and {second:?} share a color"
                );
            }
        }
    }
}
