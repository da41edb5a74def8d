//! Tile kinds
//!
//! Levels arrive as matrices of small integers. The ids below are the
//! wire format shared with the frontend's tile atlas and level editor;
//! they are re-exported to JS from the crate root.

pub type TileId = u8;

pub const TILE_EMPTY: TileId = 0;
pub const TILE_WALL: TileId = 1;
pub const TILE_HAZARD: TileId = 2;
pub const TILE_PICKUP: TileId = 3;
pub const TILE_EXIT: TileId = 4;
pub const TILE_SENTRY: TileId = 5;

pub const TILE_ID_MAX: TileId = TILE_SENTRY;

/// Solid tiles stop grapple rays and sentry sightlines.
#[inline]
pub fn is_solid(tile: TileId) -> bool {
    tile == TILE_WALL || tile == TILE_SENTRY
}

#[inline]
pub fn is_valid(tile: TileId) -> bool {
    tile <= TILE_ID_MAX
}
