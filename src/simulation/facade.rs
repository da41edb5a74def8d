use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::WorldCore;

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a world with the builtin levels, level 0 loaded and the
    /// player spawned.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { core: WorldCore::new() }
    }

    // === LEVELS ===

    /// Replace the level registry with a JSON bundle and load level 0.
    pub fn load_level_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_level_bundle_json(&json)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    /// Load a level at the given cell size (the frontend picks the cell
    /// size from its viewport) and spawn the player.
    pub fn load_level(&mut self, index: usize, cell_size: f64) -> Result<(), JsValue> {
        self.core
            .load_level(index, cell_size)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn level_count(&self) -> usize {
        self.core.level_count()
    }

    pub fn level_index(&self) -> usize {
        self.core.level_index()
    }

    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.core.rows()
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.core.cols()
    }

    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> f64 {
        self.core.cell_size()
    }

    #[wasm_bindgen(getter)]
    pub fn world_width(&self) -> f64 {
        self.core.world_width()
    }

    #[wasm_bindgen(getter)]
    pub fn world_height(&self) -> f64 {
        self.core.world_height()
    }

    /// Get pointer to the tile id array (for JS tile rendering)
    pub fn tiles_ptr(&self) -> *const u8 {
        self.core.tiles_ptr()
    }

    pub fn tiles_len(&self) -> usize {
        self.core.tiles_len()
    }

    // === CONTROL ===

    /// Rebuild the body at the level's spawn cell.
    pub fn respawn(&mut self) {
        self.core.respawn();
    }

    /// Aim-and-fire the grapple at a world point. Returns whether the
    /// rope attached.
    pub fn fire_grapple(&mut self, world_x: f64, world_y: f64) -> bool {
        self.core.fire_grapple(world_x, world_y)
    }

    pub fn release_grapple(&mut self) {
        self.core.release_grapple();
    }

    pub fn kill_player(&mut self) {
        self.core.kill_player();
    }

    // === LOOP ===

    /// Feed one render frame's wall-clock milliseconds to the simulation.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.core.advance(elapsed_ms);
    }

    /// Fraction of a step held by the accumulator, for render-side
    /// interpolation.
    pub fn interpolation_alpha(&self) -> f64 {
        self.core.interpolation_alpha()
    }

    #[wasm_bindgen(getter)]
    pub fn timescale(&self) -> f64 {
        self.core.timescale()
    }

    pub fn sim_time_ms(&self) -> f64 {
        self.core.sim_time_ms()
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 {
        self.core.tick_count()
    }

    // === STATE ===

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.core.score()
    }

    pub fn player_alive(&self) -> bool {
        self.core.player_alive()
    }

    pub fn level_complete(&self) -> bool {
        self.core.level_complete()
    }

    pub fn point_count(&self) -> usize {
        self.core.point_count()
    }

    pub fn constraint_count(&self) -> usize {
        self.core.constraint_count()
    }

    // === RENDER DATA ===

    /// Get pointer to interleaved (x, y) point positions
    pub fn positions_ptr(&self) -> *const f64 {
        self.core.positions_ptr()
    }

    pub fn positions_len(&self) -> usize {
        self.core.positions_len()
    }

    /// Get pointer to (a, b, kind) link triples
    pub fn links_ptr(&self) -> *const u32 {
        self.core.links_ptr()
    }

    pub fn links_len(&self) -> usize {
        self.core.links_len()
    }

    // === SIGNALS ===

    /// Drain buffered signals as a JSON array (empty array when quiet).
    pub fn drain_events_json(&mut self) -> String {
        self.core.drain_events_json()
    }

    // === TUNING ===

    pub fn set_gravity(&mut self, gravity: f64) {
        self.core.set_gravity(gravity);
    }

    pub fn set_damping(&mut self, damping: f64) {
        self.core.set_damping(damping);
    }

    pub fn set_bounce(&mut self, bounce: f64) {
        self.core.set_bounce(bounce);
    }

    pub fn set_relax_iterations(&mut self, iterations: u32) {
        self.core.set_relax_iterations(iterations);
    }

    /// Enable or disable per-advance perf metrics (adds timing overhead)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last advance's perf snapshot (zeros when disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
