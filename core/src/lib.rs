#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilecraft board editor.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually changed. Systems read immutable views such as [`EntityView`] and
//! [`TileView`] and respond exclusively with new commands.

mod snapshot;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use snapshot::{BoardSnapshot, EntityRecord, SnapshotError};

/// Number of rows on the board created at startup.
pub const DEFAULT_BOARD_ROWS: u32 = 9;

/// Number of columns on the board created at startup.
pub const DEFAULT_BOARD_COLUMNS: u32 = 9;

/// Largest accepted row or column count for a board.
pub const MAX_BOARD_DIMENSION: u32 = 512;

/// Value every stat counter holds after creation or reset.
pub const DEFAULT_STAT_VALUE: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Selects whether player moves spend movement points.
    ConfigureMoveBudget {
        /// Budget policy applied to subsequent ticks.
        budget: MoveBudget,
    },
    /// Replaces the board with one of the provided size, keeping the overlap.
    ResizeBoard {
        /// Requested row count; clamped to `1..=MAX_BOARD_DIMENSION`.
        rows: u32,
        /// Requested column count; clamped to `1..=MAX_BOARD_DIMENSION`.
        columns: u32,
    },
    /// Paints a single tile without touching the entities on that cell.
    SetTile {
        /// Cell whose tile is replaced.
        cell: CellCoord,
        /// Tile written into the cell.
        tile: TileKind,
    },
    /// Removes the entity of this kind on the cell, or places one if absent.
    ToggleEntity {
        /// Cell the entity lives on.
        cell: CellCoord,
        /// Kind of entity toggled.
        kind: EntityKind,
    },
    /// Resets the cell's tile to empty and removes every entity on it.
    ClearCell {
        /// Cell to clear.
        cell: CellCoord,
    },
    /// Replaces the whole board with an imported snapshot.
    ImportBoard {
        /// Snapshot that already passed the top-level format check.
        snapshot: BoardSnapshot,
    },
    /// Points the portal at `from` to the destination `to`, overwriting any previous link.
    LinkPortal {
        /// Source coordinate of the link.
        from: CellCoord,
        /// Destination the player is sent to.
        to: CellCoord,
    },
    /// Removes the link stored for `from`, if any.
    UnlinkPortal {
        /// Source coordinate of the link.
        from: CellCoord,
    },
    /// Removes every portal link.
    ClearPortals,
    /// Advances the simulation by one tick in response to a directional input.
    AdvanceTick {
        /// Direction the player attempts to move.
        direction: Direction,
        /// Planned enemy steps, computed against the player's pre-move cell.
        enemy_steps: Vec<EnemyStep>,
    },
    /// Adds `delta` to a stat counter, saturating at zero.
    AdjustStat {
        /// Counter to adjust.
        key: StatKey,
        /// Signed amount applied to the counter.
        delta: i32,
    },
    /// Overwrites a stat counter with an explicit value.
    SetStat {
        /// Counter to overwrite.
        key: StatKey,
        /// New counter value.
        value: u32,
    },
    /// Restores every stat counter to [`DEFAULT_STAT_VALUE`].
    ResetStats,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms the move budget policy now in effect.
    MoveBudgetConfigured {
        /// Active budget policy.
        budget: MoveBudget,
    },
    /// Confirms that the board was rebuilt with new dimensions.
    BoardResized {
        /// Dimensions after clamping.
        dimensions: BoardDimensions,
        /// Number of entities dropped because they fell outside the new bounds.
        dropped_entities: u32,
    },
    /// Confirms that an imported snapshot replaced the board.
    BoardImported {
        /// Dimensions of the imported board.
        dimensions: BoardDimensions,
        /// Number of entities retained from the snapshot.
        entity_count: u32,
    },
    /// Confirms that a tile was painted.
    TilePainted {
        /// Painted cell.
        cell: CellCoord,
        /// Tile now stored in the cell.
        tile: TileKind,
    },
    /// Confirms that an entity was placed onto the board.
    EntityPlaced {
        /// Identifier assigned to the entity.
        entity: EntityId,
        /// Kind of the placed entity.
        kind: EntityKind,
        /// Cell the entity occupies.
        cell: CellCoord,
    },
    /// Confirms that an entity was removed from the board.
    EntityRemoved {
        /// Identifier of the removed entity.
        entity: EntityId,
        /// Kind of the removed entity.
        kind: EntityKind,
        /// Cell the entity occupied.
        cell: CellCoord,
    },
    /// Confirms that a cell was cleared.
    CellCleared {
        /// Cleared cell.
        cell: CellCoord,
        /// Number of entities removed from the cell.
        removed_entities: u32,
    },
    /// Reports that an edit targeted an invalid cell and was ignored.
    EditRejected {
        /// Cell named by the rejected edit.
        cell: CellCoord,
        /// Reason the edit was rejected.
        reason: EditError,
    },
    /// Confirms that a portal link was stored.
    PortalLinked {
        /// Source coordinate of the link.
        from: CellCoord,
        /// Destination coordinate of the link.
        to: CellCoord,
    },
    /// Confirms that an existing portal link was removed.
    PortalUnlinked {
        /// Source coordinate of the removed link.
        from: CellCoord,
        /// Destination the link pointed at.
        to: CellCoord,
    },
    /// Confirms that every portal link was removed.
    PortalsCleared,
    /// Indicates that a simulation tick ran.
    TickAdvanced {
        /// Sequence number of the tick, starting at one.
        tick: u64,
    },
    /// Confirms that an enemy changed cells during a tick.
    EnemyMoved {
        /// Identifier of the enemy.
        enemy: EntityId,
        /// Cell the enemy left.
        from: CellCoord,
        /// Cell the enemy entered.
        to: CellCoord,
    },
    /// Confirms that the player stepped onto an adjacent cell.
    PlayerMoved {
        /// Identifier of the player entity.
        player: EntityId,
        /// Cell the player left.
        from: CellCoord,
        /// Cell the player entered.
        to: CellCoord,
    },
    /// Confirms that the player entered a linked portal and was sent to its destination.
    PlayerTeleported {
        /// Identifier of the player entity.
        player: EntityId,
        /// Portal cell the player stepped onto.
        portal: CellCoord,
        /// Destination the player now occupies.
        destination: CellCoord,
    },
    /// Reports that the requested player move was not possible.
    PlayerBlocked {
        /// Identifier of the player entity.
        player: EntityId,
        /// Cell the player remains on.
        cell: CellCoord,
        /// Direction that was attempted.
        direction: Direction,
    },
    /// Reports that the player entered a portal that could not be resolved.
    PortalFailed {
        /// Portal cell the player attempted to enter.
        portal: CellCoord,
        /// Reason the portal could not be used.
        fault: PortalFault,
    },
    /// Reports that an enemy reached the player's cell.
    PlayerCaptured {
        /// Identifier of the captured player.
        player: EntityId,
        /// Cell where the capture happened.
        cell: CellCoord,
        /// First enemy that reached the player.
        enemy: EntityId,
    },
    /// Confirms that a captured player was returned to the spawn tile.
    PlayerRespawned {
        /// Identifier of the player entity.
        player: EntityId,
        /// Spawn tile the player now occupies.
        spawn: CellCoord,
    },
    /// Reports that a captured player could not respawn because no spawn tile exists.
    RespawnUnavailable {
        /// Identifier of the player entity.
        player: EntityId,
        /// Cell the player remains on.
        cell: CellCoord,
    },
    /// Reports that a tick request was refused before anything moved.
    MoveRejected {
        /// Direction that was requested.
        direction: Direction,
        /// Reason the tick was refused.
        reason: MoveRejection,
    },
    /// Confirms the new value of a stat counter.
    StatChanged {
        /// Counter that changed.
        key: StatKey,
        /// Value after the change.
        value: u32,
    },
    /// Confirms that every stat counter returned to its default.
    StatsReset,
}

/// Location of a single board cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Largest per-axis distance between two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }

    /// Neighbouring cell in the provided direction, if it lies on the board.
    #[must_use]
    pub fn step(self, direction: Direction, dimensions: BoardDimensions) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        self.offset(row_delta, column_delta, dimensions)
    }

    /// Cell displaced by the provided deltas, if it lies on the board.
    #[must_use]
    pub fn offset(
        self,
        row_delta: i32,
        column_delta: i32,
        dimensions: BoardDimensions,
    ) -> Option<CellCoord> {
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        let cell = CellCoord::new(row, column);
        dimensions.contains(cell).then_some(cell)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for CellCoord {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::Cell(value.to_owned());
        let (row, column) = value.trim().split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<u32>().map_err(|_| invalid())?;
        let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(row, column))
    }
}

/// Size of the board measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardDimensions {
    rows: u32,
    columns: u32,
}

impl BoardDimensions {
    /// Creates board dimensions, clamping both axes to `1..=MAX_BOARD_DIMENSION`.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows: rows.clamp(1, MAX_BOARD_DIMENSION),
            columns: columns.clamp(1, MAX_BOARD_DIMENSION),
        }
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies inside the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Row-major index of the cell, if it lies inside the board.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_ROWS, DEFAULT_BOARD_COLUMNS)
    }
}

impl fmt::Display for BoardDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in clockwise order starting north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Row and column displacement of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    /// Maps a screen-space `(dx, dy)` input onto a direction.
    ///
    /// Only the four unit displacements are accepted; `dy` grows downward.
    #[must_use]
    pub const fn from_screen_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (-1, 0) => Some(Self::West),
            (1, 0) => Some(Self::East),
            (0, -1) => Some(Self::North),
            (0, 1) => Some(Self::South),
            _ => None,
        }
    }
}

/// Static terrain stored in a board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileKind {
    /// Open floor.
    #[default]
    Empty,
    /// Impassable terrain.
    Wall,
    /// Cell where a captured player reappears.
    Spawn,
    /// Level exit marker.
    Exit,
    /// Portal entrance resolved through the portal registry.
    EnterPortal,
    /// Reserved portal exit marker with no simulation behaviour.
    ExitPortal,
}

impl TileKind {
    /// Every tile kind in declaration order.
    pub const ALL: [TileKind; 6] = [
        TileKind::Empty,
        TileKind::Wall,
        TileKind::Spawn,
        TileKind::Exit,
        TileKind::EnterPortal,
        TileKind::ExitPortal,
    ];

    /// Name used in board files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Spawn => "spawn",
            Self::Exit => "exit",
            Self::EnterPortal => "enterPortal",
            Self::ExitPortal => "exitPortal",
        }
    }

    /// Reports whether the player may step onto this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Empty | Self::EnterPortal)
    }
}

impl FromStr for TileKind {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::Tile(value.to_owned()))
    }
}

/// Placeable tokens that live on top of tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Small collectible dot.
    SmallDot,
    /// Large collectible dot.
    BigDot,
    /// The player-controlled token.
    Player,
    /// Enemy that chases or flees the player.
    Enemy,
}

impl EntityKind {
    /// Every entity kind in declaration order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::SmallDot,
        EntityKind::BigDot,
        EntityKind::Player,
        EntityKind::Enemy,
    ];

    /// Name used in board files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallDot => "smallDot",
            Self::BigDot => "bigDot",
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

impl FromStr for EntityKind {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::Entity(value.to_owned()))
    }
}

/// Unique identifier assigned to an entity by the world.
///
/// Identifiers live only as long as the world; board files do not store them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitySnapshot {
    /// Identifier assigned by the world.
    pub id: EntityId,
    /// Kind of entity.
    pub kind: EntityKind,
    /// Cell the entity occupies.
    pub cell: CellCoord,
}

/// Read-only snapshot of every entity, in board order.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new view from snapshots already in board order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EntitySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured entities in board order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// First player entity, if one exists.
    #[must_use]
    pub fn player(&self) -> Option<&EntitySnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.kind == EntityKind::Player)
    }

    /// Iterator over every enemy in board order.
    pub fn enemies(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == EntityKind::Enemy)
    }

    /// Iterator over the entities occupying a cell, in board order.
    pub fn at(&self, cell: CellCoord) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.cell == cell)
    }

    /// Number of entities in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read-only view into the dense tile layer.
#[derive(Clone, Copy, Debug)]
pub struct TileView<'a> {
    tiles: &'a [TileKind],
    dimensions: BoardDimensions,
}

impl<'a> TileView<'a> {
    /// Captures a new tile view backed by the provided row-major slice.
    #[must_use]
    pub fn new(tiles: &'a [TileKind], dimensions: BoardDimensions) -> Self {
        Self { tiles, dimensions }
    }

    /// Tile stored in the cell, if the cell lies on the board.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<TileKind> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// First spawn tile found scanning row-major.
    #[must_use]
    pub fn spawn_point(&self) -> Option<CellCoord> {
        self.dimensions
            .cells()
            .find(|cell| self.tile(*cell) == Some(TileKind::Spawn))
    }

    /// Iterator over the rows of the tile layer.
    pub fn rows(&self) -> impl Iterator<Item = &'a [TileKind]> {
        let width = self.dimensions.columns() as usize;
        self.tiles.chunks(width.max(1))
    }

    /// Dimensions of the underlying tile layer.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }
}

/// Paint tool applied to a cell by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Brush {
    /// Replaces the cell's tile.
    Tile(TileKind),
    /// Toggles an entity of this kind on the cell.
    Entity(EntityKind),
    /// Clears the tile and every entity on the cell.
    Eraser,
}

impl Brush {
    /// Brushes offered by the editor toolbar, in display order.
    pub const PALETTE: [Brush; 10] = [
        Brush::Tile(TileKind::Wall),
        Brush::Tile(TileKind::Spawn),
        Brush::Tile(TileKind::Exit),
        Brush::Tile(TileKind::EnterPortal),
        Brush::Tile(TileKind::Empty),
        Brush::Entity(EntityKind::SmallDot),
        Brush::Entity(EntityKind::BigDot),
        Brush::Entity(EntityKind::Player),
        Brush::Entity(EntityKind::Enemy),
        Brush::Eraser,
    ];

    /// Name accepted when selecting the brush by text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tile(tile) => tile.name(),
            Self::Entity(kind) => kind.name(),
            Self::Eraser => "eraser",
        }
    }

    /// Human-readable toolbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tile(TileKind::Empty) => "Empty",
            Self::Tile(TileKind::Wall) => "Wall",
            Self::Tile(TileKind::Spawn) => "Spawn",
            Self::Tile(TileKind::Exit) => "Exit",
            Self::Tile(TileKind::EnterPortal) => "Portal",
            Self::Tile(TileKind::ExitPortal) => "Portal Exit",
            Self::Entity(EntityKind::SmallDot) => "Small Dot",
            Self::Entity(EntityKind::BigDot) => "Big Dot",
            Self::Entity(EntityKind::Player) => "Player",
            Self::Entity(EntityKind::Enemy) => "Enemy",
            Self::Eraser => "Eraser",
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::Tile(TileKind::Wall)
    }
}

impl FromStr for Brush {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("eraser") {
            return Ok(Self::Eraser);
        }
        if let Ok(tile) = value.parse::<TileKind>() {
            return Ok(Self::Tile(tile));
        }
        value
            .parse::<EntityKind>()
            .map(Self::Entity)
            .map_err(|_| ParseError::Brush(value.to_owned()))
    }
}

/// Named stat counters available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    /// Points spent by player moves.
    #[serde(rename = "moves")]
    Movement,
    /// Attack allocation.
    #[serde(rename = "attack")]
    Attack,
    /// Defense allocation.
    #[serde(rename = "defense")]
    Defense,
    /// Magic allocation.
    #[serde(rename = "magic")]
    Magic,
}

impl StatKey {
    /// Every stat key in display order.
    pub const ALL: [StatKey; 4] = [
        StatKey::Movement,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::Magic,
    ];

    /// Stable identifier of the counter.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Movement => "moves",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::Magic => "magic",
        }
    }

    /// Display label of the counter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movement => "Movement",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::Magic => "Magic",
        }
    }

    /// Position of the counter within [`StatKey::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Movement => 0,
            Self::Attack => 1,
            Self::Defense => 2,
            Self::Magic => 3,
        }
    }
}

impl FromStr for StatKey {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.id().eq_ignore_ascii_case(value) || key.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::Stat(value.to_owned()))
    }
}

/// Policy deciding whether player moves consume movement points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveBudget {
    /// Moves are free.
    Unlimited,
    /// Each tick spends one movement point and is refused at zero.
    #[default]
    Spend,
}

/// Planned step for a single enemy during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemyStep {
    /// Enemy that moves.
    pub enemy: EntityId,
    /// Cell the enemy should occupy after the tick.
    pub to: CellCoord,
}

impl EnemyStep {
    /// Creates a new enemy step.
    #[must_use]
    pub const fn new(enemy: EntityId, to: CellCoord) -> Self {
        Self { enemy, to }
    }
}

/// Reasons a board edit may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditError {
    /// The cell lies outside the board.
    OutOfRange,
}

/// Reasons a tick request may be refused before anything moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The board holds no player entity.
    NoPlayer,
    /// The movement counter is exhausted.
    OutOfMovementPoints,
}

/// Reasons a portal could not deliver the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalFault {
    /// The portal has no registry entry.
    Unlinked,
    /// The linked destination lies outside the board.
    DestinationOutOfBounds,
}

/// Errors raised while parsing textual names and coordinates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not a `row,column` pair.
    #[error("'{0}' is not a row,column coordinate")]
    Cell(String),
    /// The text names no tile kind.
    #[error("'{0}' is not a tile type")]
    Tile(String),
    /// The text names no entity kind.
    #[error("'{0}' is not an entity type")]
    Entity(String),
    /// The text names no brush.
    #[error("'{0}' is not a brush")]
    Brush(String),
    /// The text names no stat counter.
    #[error("'{0}' is not a stat")]
    Stat(String),
}
