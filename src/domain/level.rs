//! Level data
//!
//! Levels are authored as JSON bundles: a `tiles` matrix of tile ids plus
//! a `spawn` cell. The registry validates every level up front so the
//! simulation never has to re-check grid shape at runtime. Two maps ship
//! builtin; the frontend may replace them with its own bundle.

use serde::Deserialize;

use crate::domain::tiles::{self, TileId};

#[derive(Clone, Debug, Deserialize)]
pub struct LevelDef {
    #[serde(default)]
    pub name: Option<String>,
    /// Row-major tile ids; all rows must have the same length.
    pub tiles: Vec<Vec<TileId>>,
    /// Spawn cell as (row, col).
    pub spawn: [u32; 2],
}

impl LevelDef {
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles.first().map_or(0, |row| row.len())
    }
}

#[derive(Deserialize)]
struct BundleRoot {
    levels: Vec<LevelDef>,
}

#[derive(Clone, Debug)]
pub struct LevelRegistry {
    levels: Vec<LevelDef>,
}

impl LevelRegistry {
    pub fn from_bundle_json(json: &str) -> Result<Self, String> {
        let bundle: BundleRoot = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Self::from_levels(bundle.levels)
    }

    /// The two maps the game ships with.
    pub fn builtin() -> Self {
        let levels = vec![
            LevelDef {
                name: Some("The Lobby".to_string()),
                tiles: map_rows(&BUILTIN_LOBBY),
                spawn: [2, 2],
            },
            LevelDef {
                name: Some("The Tower".to_string()),
                tiles: map_rows(&BUILTIN_TOWER),
                spawn: [2, 2],
            },
        ];
        // Builtin maps are validated by the bundle tests; construction
        // cannot fail here without a test catching it first.
        Self { levels }
    }

    fn from_levels(levels: Vec<LevelDef>) -> Result<Self, String> {
        if levels.is_empty() {
            return Err("level bundle contains no levels".to_string());
        }
        for (i, level) in levels.iter().enumerate() {
            validate_level(level).map_err(|e| format!("level {}: {}", i, e))?;
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }
}

fn validate_level(level: &LevelDef) -> Result<(), String> {
    let rows = level.rows();
    let cols = level.cols();
    if rows == 0 || cols == 0 {
        return Err("grid is empty".to_string());
    }
    for (r, row) in level.tiles.iter().enumerate() {
        if row.len() != cols {
            return Err(format!("row {} has {} tiles, expected {}", r, row.len(), cols));
        }
        for &tile in row {
            if !tiles::is_valid(tile) {
                return Err(format!("unknown tile id {} in row {}", tile, r));
            }
        }
    }
    let [spawn_row, spawn_col] = level.spawn;
    if spawn_row as usize >= rows || spawn_col as usize >= cols {
        return Err(format!("spawn cell ({}, {}) is outside the grid", spawn_row, spawn_col));
    }
    Ok(())
}

fn map_rows<const C: usize>(map: &[[TileId; C]]) -> Vec<Vec<TileId>> {
    map.iter().map(|row| row.to_vec()).collect()
}

const BUILTIN_LOBBY: [[TileId; 15]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 1],
    [1, 3, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 3, 1],
    [1, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 4, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const BUILTIN_TOWER: [[TileId; 9]; 15] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 4, 0, 0, 0, 0, 0, 3, 1],
    [1, 1, 1, 0, 1, 1, 1, 1, 1],
    [1, 3, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 5, 0, 5, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 0, 2, 1, 2, 0, 0, 1],
    [1, 1, 0, 0, 0, 0, 0, 1, 1],
    [1, 0, 0, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 5, 0, 0, 0, 5, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 1],
    [1, 0, 2, 2, 2, 2, 2, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
];
