//! World simulation
//!
//! `WorldCore` owns the active point/constraint sets, the tile grid and
//! the clocks, and orchestrates the fixed-timestep loop. All state
//! mutation happens through explicit commands or the tick; nothing in
//! here is global. The wasm-facing wrapper lives in `facade`.

use crate::domain::level::LevelRegistry;
use crate::spatial::grid::TileGrid;
use crate::systems::constraint::Constraint;
use crate::systems::point::PointMass;
use crate::systems::ragdoll::RagdollBody;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "step/tick.rs"]
mod tick;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod events;
mod facade;

pub use events::WorldEvent;
pub use facade::World;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Fixed simulation step (60 Hz).
pub const STEP_MS: f64 = 1000.0 / 60.0;
/// Longest raw frame the accumulator will swallow.
pub const MAX_FRAME_MS: f64 = 100.0;

/// Defaults the game was tuned with, all per 60 Hz tick.
pub const GRAVITY: f64 = 0.5;
pub const DAMPING: f64 = 0.99;
pub const BOUNCE: f64 = 0.5;
pub const RELAX_ITERATIONS: u32 = 5;
pub const DEFAULT_CELL_SIZE: f64 = 60.0;

pub(crate) struct Tunables {
    pub gravity: f64,
    pub damping: f64,
    pub bounce: f64,
    pub relax_iterations: u32,
}

/// Flat buffers handed to JS by pointer after each `advance`.
pub(crate) struct RenderBuffers {
    /// Interleaved x, y per active point.
    pub positions: Vec<f64>,
    /// (a, b, kind tag) per active constraint.
    pub links: Vec<u32>,
}

/// The simulation world
pub struct WorldCore {
    pub(crate) levels: LevelRegistry,
    pub(crate) grid: TileGrid,
    pub(crate) points: Vec<PointMass>,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) player: Option<RagdollBody>,
    pub(crate) level_index: usize,
    pub(crate) spawn_origin: (f64, f64),

    // Clocks
    pub(crate) accumulator_ms: f64,
    pub(crate) sim_time_ms: f64,
    pub(crate) timescale: f64,
    pub(crate) tick_count: u64,

    pub(crate) tunables: Tunables,
    pub(crate) score: u32,
    pub(crate) level_complete: bool,

    pub(crate) events: Vec<WorldEvent>,
    /// Per-point latch so an edge impact signals at most once per tick.
    pub(crate) bounds_hit_this_tick: Vec<bool>,

    pub(crate) render: RenderBuffers,

    // Perf metrics
    pub(crate) perf_enabled: bool,
    pub(crate) perf_stats: PerfStats,
}

impl WorldCore {
    /// Create a world with the builtin level registry, level 0 loaded.
    pub fn new() -> Self {
        init::create_world_core()
    }

    // === Levels ===
    pub fn load_level_bundle_json(&mut self, json: &str) -> Result<(), String> {
        let registry = LevelRegistry::from_bundle_json(json)?;
        self.levels = registry;
        self.load_level(0, self.grid.cell_size())
    }

    pub fn load_level(&mut self, index: usize, cell_size: f64) -> Result<(), String> {
        commands::load_level(self, index, cell_size)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    // === Control ===
    /// Rebuild the body at the level's spawn cell.
    pub fn respawn(&mut self) {
        commands::spawn_player(self);
    }

    /// Raycast from the right hand toward the aim point and attach a
    /// rope on a solid hit. Returns whether it attached.
    pub fn fire_grapple(&mut self, aim_x: f64, aim_y: f64) -> bool {
        commands::fire_grapple(self, aim_x, aim_y)
    }

    /// Safe to call with no rope out.
    pub fn release_grapple(&mut self) {
        commands::release_grapple(self);
    }

    /// Idempotent; detaches the body and emits the death signal once.
    pub fn kill_player(&mut self) {
        commands::kill_player(self);
    }

    // === Loop ===
    /// Feed one render frame's wall-clock time to the accumulator and
    /// run however many fixed steps it covers.
    pub fn advance(&mut self, elapsed_ms: f64) {
        step::advance(self, elapsed_ms);
    }

    /// Run exactly one fixed step, bypassing the accumulator.
    pub fn tick(&mut self) {
        tick::tick(self);
    }

    /// Fraction of a step the accumulator is holding, for render-side
    /// interpolation. Never affects simulation state.
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator_ms / STEP_MS
    }

    pub fn timescale(&self) -> f64 {
        self.timescale
    }

    pub fn sim_time_ms(&self) -> f64 {
        self.sim_time_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // === State ===
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player_alive(&self) -> bool {
        self.player.as_ref().is_some_and(|p| !p.dead)
    }

    pub fn level_complete(&self) -> bool {
        self.level_complete
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    // === Grid passthrough ===
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    pub fn cols(&self) -> u32 {
        self.grid.cols()
    }

    pub fn cell_size(&self) -> f64 {
        self.grid.cell_size()
    }

    pub fn world_width(&self) -> f64 {
        self.grid.world_width()
    }

    pub fn world_height(&self) -> f64 {
        self.grid.world_height()
    }

    /// Raw tile ids for JS tile rendering.
    pub fn tiles_ptr(&self) -> *const u8 {
        self.grid.tiles_ptr()
    }

    pub fn tiles_len(&self) -> usize {
        self.grid.len()
    }

    // === Settings ===
    pub fn set_gravity(&mut self, gravity: f64) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_damping(&mut self, damping: f64) {
        settings::set_damping(self, damping);
    }

    pub fn set_bounce(&mut self, bounce: f64) {
        settings::set_bounce(self, bounce);
    }

    pub fn set_relax_iterations(&mut self, iterations: u32) {
        settings::set_relax_iterations(self, iterations);
    }

    /// Enable or disable per-advance perf metrics (adds timing overhead)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last advance's perf snapshot (zeros when disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Signals ===
    pub fn take_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drain the buffered signals as a JSON array.
    pub fn drain_events_json(&mut self) -> String {
        let drained = self.take_events();
        serde_json::to_string(&drained).unwrap_or_else(|_| "[]".to_string())
    }

    // === Render buffers ===
    pub(crate) fn sync_render_buffers(&mut self) {
        self.render.positions.clear();
        for p in &self.points {
            self.render.positions.push(p.pos.x);
            self.render.positions.push(p.pos.y);
        }
        self.render.links.clear();
        for c in &self.constraints {
            self.render.links.push(c.a as u32);
            self.render.links.push(c.b as u32);
            self.render.links.push(c.kind.tag());
        }
    }

    pub fn positions_ptr(&self) -> *const f64 {
        self.render.positions.as_ptr()
    }

    pub fn positions_len(&self) -> usize {
        self.render.positions.len()
    }

    pub fn links_ptr(&self) -> *const u32 {
        self.render.links.as_ptr()
    }

    pub fn links_len(&self) -> usize {
        self.render.links.len()
    }
}

impl Default for WorldCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
