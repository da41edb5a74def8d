//! Sentry vision cones
//!
//! Every Sentry tile sweeps one shared cone back and forth, driven by
//! the simulation clock. A living body point inside the cone with a
//! clear sightline is a detection; walls occlude.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::spatial::grid::TileGrid;
use crate::systems::raycast::cast_ray;

/// Cone reach, in cells.
const CONE_REACH_CELLS: f64 = 3.0;
/// Half-angle of the cone (45 degrees to either side of facing).
const CONE_HALF_ANGLE: f64 = FRAC_PI_4;
/// Points this close to the lens sit under the housing and are ignored.
const DEAD_ZONE: f64 = 10.0;

/// Facing angle shared by every sentry at simulation time `sim_time_ms`.
/// Oscillates around straight down (+y).
#[inline]
pub fn facing_at(sim_time_ms: f64) -> f64 {
    (sim_time_ms / 1000.0).sin() * 0.5 + FRAC_PI_2
}

/// True when the point (px, py) is inside the cone of the sentry at
/// (sx, sy) and nothing solid blocks the sightline.
pub fn detects(grid: &TileGrid, sx: f64, sy: f64, facing: f64, px: f64, py: f64) -> bool {
    let dx = px - sx;
    let dy = py - sy;
    let dist = (dx * dx + dy * dy).sqrt();
    let reach = grid.cell_size() * CONE_REACH_CELLS;
    if dist <= DEAD_ZONE || dist >= reach {
        return false;
    }

    let mut diff = dy.atan2(dx) - facing;
    while diff <= -PI {
        diff += TAU;
    }
    while diff > PI {
        diff -= TAU;
    }
    if diff.abs() >= CONE_HALF_ANGLE {
        return false;
    }

    !cast_ray(grid, sx, sy, px, py).hit
}
