use serde::{Deserialize, Serialize};

/// Number of cell columns laid out on a single side's board.
pub const GRID_COLUMNS: u8 = 6;

/// Number of cell rows laid out on a single side's board.
pub const GRID_ROWS: u8 = 3;

/// Total number of cells owned by a single side's board.
pub const CELL_COUNT: usize = GRID_COLUMNS as usize * GRID_ROWS as usize;

/// Dense index of a board cell in column-major scan order (`column * 3 + row`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Wraps the provided raw index. Values outside the board are rejected by the world.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the underlying numeric index.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Index usable for slice access.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Reports whether the index addresses a cell on the board.
    #[must_use]
    pub const fn is_on_board(&self) -> bool {
        (self.0 as usize) < CELL_COUNT
    }

    /// Builds the index addressing the provided coordinate.
    #[must_use]
    pub const fn from_coord(coord: GridCoord) -> Self {
        Self(coord.column * GRID_ROWS + coord.row)
    }

    /// Column and row addressed by the index.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        GridCoord {
            column: self.0 / GRID_ROWS,
            row: self.0 % GRID_ROWS,
        }
    }

    /// Iterates every cell of a board in scan order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8).map(CellIndex)
    }
}

/// Column/row address of a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    column: u8,
    row: u8,
}

impl GridCoord {
    /// Creates a coordinate, clamping both axes onto the board.
    #[must_use]
    pub fn clamped(column: i32, row: i32) -> Self {
        Self {
            column: column.clamp(0, i32::from(GRID_COLUMNS) - 1) as u8,
            row: row.clamp(0, i32::from(GRID_ROWS) - 1) as u8,
        }
    }

    /// Column of the coordinate, increasing to the right.
    #[must_use]
    pub const fn column(&self) -> u8 {
        self.column
    }

    /// Row of the coordinate, increasing downwards.
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }
}

/// Continuous position in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal component, increasing to the right.
    pub x: f32,
    /// Vertical component, increasing upwards.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Moves towards `target` by at most `max_step`, landing on it when closer.
    #[must_use]
    pub fn move_towards(self, target: WorldPoint, max_step: f32) -> WorldPoint {
        let distance = self.distance(target);
        if distance <= max_step || distance <= f32::EPSILON {
            return target;
        }
        let scale = max_step / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }
}

/// Transform between board cells and world positions for one side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardLayout {
    cell_length: f32,
    left_edge: f32,
    top_edge: f32,
    origin: WorldPoint,
}

impl BoardLayout {
    /// Creates a layout from its cell length, board edges and the centre of cell (0, 0).
    #[must_use]
    pub const fn new(cell_length: f32, left_edge: f32, top_edge: f32, origin: WorldPoint) -> Self {
        Self {
            cell_length,
            left_edge,
            top_edge,
            origin,
        }
    }

    /// Returns the same layout shifted by the provided offset.
    #[must_use]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        Self {
            cell_length: self.cell_length,
            left_edge: self.left_edge + dx,
            top_edge: self.top_edge + dy,
            origin: WorldPoint::new(self.origin.x + dx, self.origin.y + dy),
        }
    }

    /// Side length of a cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Maps a world position onto the cell underneath it, clamped to the board.
    #[must_use]
    pub fn position_to_coord(&self, position: WorldPoint) -> GridCoord {
        let column = ((position.x - self.left_edge) / self.cell_length) as i32;
        let row = ((self.top_edge - position.y) / self.cell_length) as i32;
        GridCoord::clamped(column, row)
    }

    /// Centre of the provided cell in world units.
    #[must_use]
    pub fn coord_to_position(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + f32::from(coord.column()) * self.cell_length,
            self.origin.y - f32::from(coord.row()) * self.cell_length,
        )
    }

    /// Centre of the cell addressed by the index.
    #[must_use]
    pub fn cell_anchor(&self, cell: CellIndex) -> WorldPoint {
        self.coord_to_position(cell.coord())
    }

    /// Cell underneath a world position.
    #[must_use]
    pub fn cell_at(&self, position: WorldPoint) -> CellIndex {
        CellIndex::from_coord(self.position_to_coord(position))
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(0.832, -2.496, 0.446, WorldPoint::new(-2.08, 0.036))
    }
}
