use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn set_gravity(world: &mut WorldCore, gravity: f64) {
    world.tunables.gravity = gravity;
}

pub(super) fn set_damping(world: &mut WorldCore, damping: f64) {
    world.tunables.damping = damping.clamp(0.0, 1.0);
}

pub(super) fn set_bounce(world: &mut WorldCore, bounce: f64) {
    world.tunables.bounce = bounce.clamp(0.0, 1.0);
}

pub(super) fn set_relax_iterations(world: &mut WorldCore, iterations: u32) {
    world.tunables.relax_iterations = iterations.max(1);
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}
