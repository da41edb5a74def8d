//! Tether Engine - ragdoll and grapple physics in WASM
//!
//! The engine simulates a Verlet stickman in a tile world; the JS
//! frontend renders, plays audio and forwards input. Layout:
//! - core/        - math and indexing primitives
//! - domain/      - tile kinds and level data
//! - spatial/     - the tile grid
//! - systems/     - points, constraints, raycast, ragdoll, grapple, sentries
//! - simulation/  - orchestration and the wasm facade

#[macro_use]
pub mod core;
pub mod domain;
pub mod simulation;
pub mod spatial;
pub mod systems;

// Short paths for the types the frontend and tests reach for.
pub use domain::tiles;
pub use simulation::{World, WorldCore, WorldEvent};
pub use spatial::grid::TileGrid;
pub use systems::raycast;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Tether WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Export tile ids for JS
#[wasm_bindgen]
pub fn tile_empty() -> u8 { tiles::TILE_EMPTY }
#[wasm_bindgen]
pub fn tile_wall() -> u8 { tiles::TILE_WALL }
#[wasm_bindgen]
pub fn tile_hazard() -> u8 { tiles::TILE_HAZARD }
#[wasm_bindgen]
pub fn tile_pickup() -> u8 { tiles::TILE_PICKUP }
#[wasm_bindgen]
pub fn tile_exit() -> u8 { tiles::TILE_EXIT }
#[wasm_bindgen]
pub fn tile_sentry() -> u8 { tiles::TILE_SENTRY }
