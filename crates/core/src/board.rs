//! Board module - manages the tile grid
//!
//! The board is an N x N grid where each cell is empty (`0`) or holds a tile kind.
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (x, y) where x is the column and y the row, both in `0..N`.
//!
//! Accessors treat out-of-range coordinates as a caller error and report it
//! through `Option`/`bool` rather than panicking. The off-board ring used by
//! path resolution is handled in [`crate::path`], not here.

use tile_link_types::{Kind, Point, EMPTY, MAX_BOARD_SIZE};

/// A non-empty cell: position plus kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub point: Point,
    pub kind: Kind,
}

/// The game board - N columns x N rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Flat cells, row-major order (y * size + x)
    cells: Vec<Kind>,
}

impl Board {
    /// Create a new empty board of side `size`
    ///
    /// `size` is clamped to `1..=MAX_BOARD_SIZE`.
    pub fn new(size: u8) -> Self {
        let size = size.clamp(1, MAX_BOARD_SIZE);
        let n = size as usize;
        Self {
            size,
            cells: vec![EMPTY; n * n],
        }
    }

    /// Build a board from rows of kinds (row `y` is `rows[y]`)
    ///
    /// Returns `None` unless the rows form a square of a supported size.
    pub fn from_rows<R: AsRef<[Kind]>>(rows: &[R]) -> Option<Self> {
        let n = rows.len();
        if n == 0 || n > MAX_BOARD_SIZE as usize {
            return None;
        }
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self {
            size: n as u8,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.size as usize) + (x as usize))
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if position lies on the board
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u8) < self.size && (y as u8) < self.size
    }

    /// Get the kind at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Kind> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Get the kind at a point
    pub fn get_at(&self, p: Point) -> Option<Kind> {
        self.get(p.x, p.y)
    }

    /// Set the kind at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, kind: Kind) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = kind;
                true
            }
            None => false,
        }
    }

    /// Empty the cell at a point
    /// Returns false if out of bounds
    pub fn clear_at(&mut self, p: Point) -> bool {
        self.set(p.x, p.y, EMPTY)
    }

    /// Check if position is on the board and empty
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(EMPTY))
    }

    /// Check if position is on the board and holds a tile
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(k) if k != EMPTY)
    }

    /// Iterate over occupied cells in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let n = self.size as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, kind)| **kind != EMPTY)
            .map(move |(idx, &kind)| Tile {
                point: Point::new((idx % n) as i8, (idx / n) as i8),
                kind,
            })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&k| k != EMPTY).count()
    }

    /// True if no cell holds a tile
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|&k| k == EMPTY)
    }

    /// Number of cells holding `kind`
    pub fn count_kind(&self, kind: Kind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> Option<&[Kind]> {
        if y >= self.size as usize {
            return None;
        }
        let n = self.size as usize;
        Some(&self.cells[y * n..(y + 1) * n])
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Kind] {
        &self.cells
    }

    /// Copy the grid into row vectors
    pub fn to_rows(&self) -> Vec<Vec<Kind>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(tile_link_types::DEFAULT_BOARD_SIZE)
    }
}
