//! Tile grid
//!
//! Flat row-major tile storage with a uniform world-space cell size.
//! The grid is total over all coordinates: anything outside the level
//! bounds reads as `TILE_EMPTY`. The only mutation after a level load is
//! pickup consumption (and `set_tile`, used by tests and the editor
//! bridge), so sentry cell centers are precomputed at load.

use crate::domain::level::LevelDef;
use crate::domain::tiles::{TileId, TILE_EMPTY, TILE_PICKUP, TILE_SENTRY};
use crate::fast;

pub struct TileGrid {
    rows: u32,
    cols: u32,
    cell_size: f64,
    tiles: Vec<TileId>,
    /// World-space centers of every sentry cell.
    sentries: Vec<(f64, f64)>,
}

impl TileGrid {
    /// All-empty grid, mostly for tests and the pre-load placeholder.
    pub fn empty(rows: u32, cols: u32, cell_size: f64) -> Self {
        Self {
            rows,
            cols,
            cell_size,
            tiles: vec![TILE_EMPTY; (rows * cols) as usize],
            sentries: Vec::new(),
        }
    }

    pub fn from_level(level: &LevelDef, cell_size: f64) -> Self {
        let rows = level.rows() as u32;
        let cols = level.cols() as u32;
        let mut tiles = Vec::with_capacity((rows * cols) as usize);
        for row in &level.tiles {
            tiles.extend_from_slice(row);
        }
        let mut grid = Self { rows, cols, cell_size, tiles, sentries: Vec::new() };
        grid.rebuild_sentries();
        grid
    }

    // === Dimensions ===
    #[inline]
    pub fn rows(&self) -> u32 { self.rows }

    #[inline]
    pub fn cols(&self) -> u32 { self.cols }

    #[inline]
    pub fn cell_size(&self) -> f64 { self.cell_size }

    #[inline]
    pub fn world_width(&self) -> f64 {
        self.cols as f64 * self.cell_size
    }

    #[inline]
    pub fn world_height(&self) -> f64 {
        self.rows as f64 * self.cell_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    // === Index conversion ===
    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        (row * self.cols + col) as usize
    }

    /// Flat index of the cell containing a world point, if inside the grid.
    fn index_at(&self, x: f64, y: f64) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = (x / self.cell_size).floor();
        let row = (y / self.cell_size).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some(self.index(row as u32, col as u32))
    }

    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && row < self.rows as i64 && col >= 0 && col < self.cols as i64
    }

    // === Tile access ===
    /// Tile kind at a world point; Empty outside the grid.
    #[inline]
    pub fn tile_at(&self, x: f64, y: f64) -> TileId {
        match self.index_at(x, y) {
            Some(idx) => *fast!(self.tiles, [idx]),
            None => TILE_EMPTY,
        }
    }

    /// Tile kind by cell; Empty outside the grid.
    #[inline]
    pub fn tile_at_cell(&self, row: i64, col: i64) -> TileId {
        if !self.in_bounds(row, col) {
            return TILE_EMPTY;
        }
        *fast!(self.tiles, [self.index(row as u32, col as u32)])
    }

    pub fn set_tile(&mut self, row: u32, col: u32, tile: TileId) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let idx = self.index(row, col);
        let old = self.tiles[idx];
        self.tiles[idx] = tile;
        if old == TILE_SENTRY || tile == TILE_SENTRY {
            self.rebuild_sentries();
        }
    }

    /// Consume the pickup under a world point. True exactly once per cell.
    pub fn consume_pickup_at(&mut self, x: f64, y: f64) -> bool {
        let Some(idx) = self.index_at(x, y) else {
            return false;
        };
        if *fast!(self.tiles, [idx]) != TILE_PICKUP {
            return false;
        }
        fast!(self.tiles, [idx] = TILE_EMPTY);
        true
    }

    pub fn sentries(&self) -> &[(f64, f64)] {
        &self.sentries
    }

    fn rebuild_sentries(&mut self) {
        self.sentries.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.tiles[self.index(row, col)] == TILE_SENTRY {
                    self.sentries.push((
                        (col as f64 + 0.5) * self.cell_size,
                        (row as f64 + 0.5) * self.cell_size,
                    ));
                }
            }
        }
    }

    // === Raw access for JS rendering ===
    pub fn tiles_ptr(&self) -> *const TileId {
        self.tiles.as_ptr()
    }
}
