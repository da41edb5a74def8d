use crate::domain::level::LevelRegistry;
use crate::spatial::grid::TileGrid;

use super::perf_stats::PerfStats;
use super::{
    RenderBuffers, Tunables, WorldCore, BOUNCE, DAMPING, DEFAULT_CELL_SIZE, GRAVITY,
    RELAX_ITERATIONS,
};

pub(super) fn create_world_core() -> WorldCore {
    let mut world = WorldCore {
        levels: LevelRegistry::builtin(),
        grid: TileGrid::empty(1, 1, DEFAULT_CELL_SIZE),
        points: Vec::with_capacity(16),
        constraints: Vec::with_capacity(24),
        player: None,
        level_index: 0,
        spawn_origin: (0.0, 0.0),

        accumulator_ms: 0.0,
        sim_time_ms: 0.0,
        timescale: 1.0,
        tick_count: 0,

        tunables: Tunables {
            gravity: GRAVITY,
            damping: DAMPING,
            bounce: BOUNCE,
            relax_iterations: RELAX_ITERATIONS,
        },
        score: 0,
        level_complete: false,

        events: Vec::with_capacity(8),
        bounds_hit_this_tick: Vec::with_capacity(16),

        render: RenderBuffers {
            positions: Vec::with_capacity(32),
            links: Vec::with_capacity(64),
        },

        perf_enabled: false,
        perf_stats: PerfStats::default(),
    };

    // The builtin registry always has a level 0.
    let _ = world.load_level(0, DEFAULT_CELL_SIZE);
    world
}
