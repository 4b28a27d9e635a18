//! Immutable tile map and grid/world coordinate conversions.

use glam::Vec3;
use thiserror::Error;

/// Side length of a single arena tile expressed in world units.
pub const DEFAULT_TILE_SIZE: f32 = 4.0;

/// Layout of the stock arena. `#` marks a wall and `.` marks floor.
pub const DEFAULT_LAYOUT: [&str; 11] = [
    "############",
    "#....#.....#",
    "#.##.#.###.#",
    "#.#......#.#",
    "#...####...#",
    "#.#......#.#",
    "#.####.###.#",
    "#..........#",
    "#.##.##.##.#",
    "#..........#",
    "############",
];

const WALL_GLYPH: char = '#';
const FLOOR_GLYPH: char = '.';

/// Contents of a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable wall block.
    Wall,
    /// Walkable floor.
    Floor,
}

/// Location of a single grid cell. Coordinates may fall outside the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    column: i32,
    row: i32,
}

impl GridCell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell, growing along world +x.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the cell, growing along world +z.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// Reasons a map layout may be rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MapError {
    /// The layout contained no rows or an empty first row.
    #[error("map layout is empty")]
    Empty,
    /// A row did not match the width of the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell used a glyph other than `#` or `.`.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        /// Zero-based row of the glyph.
        row: usize,
        /// Zero-based column of the glyph.
        column: usize,
        /// Offending character.
        glyph: char,
    },
    /// The tile size was zero, negative or not finite.
    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
    /// The layout has no floor cell to stand on.
    #[error("map layout has no floor cells")]
    NoFloor,
}

/// Fixed rectangular wall/floor grid centred on the world origin.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticMap {
    columns: u32,
    rows: u32,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl StaticMap {
    /// Builds the stock arena used by the campaign.
    #[must_use]
    pub fn arena() -> Self {
        let rows = DEFAULT_LAYOUT.len() as u32;
        let columns = DEFAULT_LAYOUT[0].len() as u32;
        let tiles = DEFAULT_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|glyph| {
                if glyph == WALL_GLYPH {
                    Tile::Wall
                } else {
                    Tile::Floor
                }
            })
            .collect();
        Self {
            columns,
            rows,
            tile_size: DEFAULT_TILE_SIZE,
            tiles,
        }
    }

    /// Parses a layout made of `#` (wall) and `.` (floor) rows.
    pub fn parse<S: AsRef<str>>(rows: &[S], tile_size: f32) -> Result<Self, MapError> {
        if !tile_size.is_finite() || tile_size <= 0.0 {
            return Err(MapError::InvalidTileSize(tile_size));
        }

        let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if expected == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != expected {
                return Err(MapError::RaggedRow {
                    row: row_index,
                    expected,
                    found,
                });
            }

            for (column, glyph) in row.chars().enumerate() {
                let tile = match glyph {
                    WALL_GLYPH => Tile::Wall,
                    FLOOR_GLYPH => Tile::Floor,
                    glyph => {
                        return Err(MapError::UnknownGlyph {
                            row: row_index,
                            column,
                            glyph,
                        })
                    }
                };
                tiles.push(tile);
            }
        }

        if !tiles.contains(&Tile::Floor) {
            return Err(MapError::NoFloor);
        }

        Ok(Self {
            columns: expected as u32,
            rows: rows.len() as u32,
            tile_size,
            tiles,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of one tile in world units.
    #[must_use]
    pub const fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Extent of the map along world x.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// Extent of the map along world z.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Grid cell containing the provided world position. The y component is ignored.
    #[must_use]
    pub fn cell_at(&self, position: Vec3) -> GridCell {
        let column = ((position.x + self.width() / 2.0) / self.tile_size).floor();
        let row = ((position.z + self.depth() / 2.0) / self.tile_size).floor();
        GridCell::new(column as i32, row as i32)
    }

    /// World-space centre of a cell at ground level.
    #[must_use]
    pub fn cell_center(&self, cell: GridCell) -> Vec3 {
        let half = self.tile_size / 2.0;
        Vec3::new(
            cell.column() as f32 * self.tile_size - self.width() / 2.0 + half,
            0.0,
            cell.row() as f32 * self.tile_size - self.depth() / 2.0 + half,
        )
    }

    /// Tile stored at the cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(&self, cell: GridCell) -> Option<Tile> {
        self.index(cell).and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the cell blocks movement. Cells outside the grid are walls.
    #[must_use]
    pub fn is_wall(&self, cell: GridCell) -> bool {
        self.tile(cell) != Some(Tile::Floor)
    }

    /// Reports whether the world position lies inside a wall cell.
    #[must_use]
    pub fn is_wall_at(&self, position: Vec3) -> bool {
        self.is_wall(self.cell_at(position))
    }

    /// Iterator over every floor cell in row-major order.
    pub fn floor_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let columns = self.columns;
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Floor)
            .map(move |(index, _)| {
                let index = index as u32;
                GridCell::new((index % columns) as i32, (index / columns) as i32)
            })
    }

    /// First floor cell in row-major order, used as the player spawn.
    #[must_use]
    pub fn first_floor_cell(&self) -> Option<GridCell> {
        self.floor_cells().next()
    }

    fn index(&self, cell: GridCell) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column < self.columns && row < self.rows {
            let width = usize::try_from(self.columns).ok()?;
            Some(usize::try_from(row).ok()? * width + usize::try_from(column).ok()?)
        } else {
            None
        }
    }
}

impl Default for StaticMap {
    fn default() -> Self {
        Self::arena()
    }
}
