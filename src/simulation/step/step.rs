use crate::systems::grapple::SLOWMO_RAMP_PER_MS;

use super::{tick, PerfTimer, WorldCore, MAX_FRAME_MS, STEP_MS};

/// Convert one render frame's wall-clock time into zero or more fixed
/// simulation steps. Raw time is clamped so a stalled tab cannot demand
/// an unbounded tick burst; the timescale only dilates what enters the
/// accumulator, never the step size.
pub(super) fn advance(world: &mut WorldCore, elapsed_ms: f64) {
    if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
        return;
    }
    let raw = elapsed_ms.min(MAX_FRAME_MS);

    // Slow-motion recovery runs on the raw clock, not the dilated one:
    // monotonic, capped at exactly 1.0, restarted by the next grapple.
    if world.timescale < 1.0 {
        world.timescale = (world.timescale + SLOWMO_RAMP_PER_MS * raw).min(1.0);
    }

    let perf_on = world.perf_enabled;
    let frame_start = if perf_on { Some(PerfTimer::start()) } else { None };
    if perf_on {
        world.perf_stats.reset();
    }

    world.accumulator_ms += raw * world.timescale;
    let mut ticks: u32 = 0;
    while world.accumulator_ms >= STEP_MS {
        tick::tick(world);
        world.accumulator_ms -= STEP_MS;
        ticks += 1;
    }

    world.sync_render_buffers();

    if perf_on {
        world.perf_stats.ticks = ticks;
        world.perf_stats.relax_passes = ticks * world.tunables.relax_iterations;
        world.perf_stats.point_count = world.points.len() as u32;
        world.perf_stats.constraint_count = world.constraints.len() as u32;
        world.perf_stats.events_pending = world.events.len() as u32;
        if let Some(start) = frame_start {
            world.perf_stats.advance_ms = start.elapsed_ms();
        }
    }
}
