//! Tile map loading and wall queries.
use std::fs;
use std::path::Path;

use thiserror::Error;

pub const WALL: char = '1';
pub const OPEN: char = '.';

/// Built-in arena: fully walled border, with column 18 walled as well.
const DEFAULT_LEVEL: [&str; 8] = [
    "11111111111111111111",
    "1.................11",
    "1.................11",
    "1.................11",
    "1.................11",
    "1.................11",
    "1.................11",
    "11111111111111111111",
];

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, ch: char },
    #[error("map has no open cell")]
    NoOpenCell,
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable grid of wall/open cells, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    cells: Vec<Vec<bool>>,
    width: usize,
    height: usize,
}

impl TileMap {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let first = rows.first().ok_or(MapError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(MapError::Ragged { row, expected: width, found });
            }
            let mut walls = Vec::with_capacity(width);
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    WALL => walls.push(true),
                    OPEN => walls.push(false),
                    _ => return Err(MapError::UnknownCell { row, col, ch }),
                }
            }
            cells.push(walls);
        }
        if cells.iter().flatten().all(|&wall| wall) {
            return Err(MapError::NoOpenCell);
        }

        Ok(Self { height: cells.len(), cells, width })
    }

    /// Parses newline-separated rows; blank lines and trailing whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }

    pub fn default_level() -> Self {
        Self {
            cells: DEFAULT_LEVEL
                .iter()
                .map(|row| row.chars().map(|c| c == WALL).collect())
                .collect(),
            width: DEFAULT_LEVEL[0].len(),
            height: DEFAULT_LEVEL.len(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// World-space query. Anything outside `[0, width) x [0, height)` is solid.
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        if !(x >= 0.0 && y >= 0.0) {
            return true;
        }
        let (col, row) = (x as usize, y as usize);
        !self.is_open_cell(col, row)
    }

    #[inline]
    pub fn is_open_cell(&self, col: usize, row: usize) -> bool {
        row < self.height && col < self.width && !self.cells[row][col]
    }

    /// First open cell in row-major order, as `(col, row)`.
    pub fn first_open_cell(&self) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, line)| {
            line.iter().position(|&wall| !wall).map(|col| (col, row))
        })
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::default_level()
    }
}

pub fn load_map(path: impl AsRef<Path>) -> Result<TileMap, MapError> {
    let text = fs::read_to_string(path)?;
    TileMap::parse(&text)
}
