//! Grid ray trace
//!
//! Marches a world-space segment cell-by-cell (DDA) until it crosses a
//! solid tile or reaches the target. The grapple uses this to decide
//! where a rope may attach; sentries use it for line of sight.

use crate::domain::tiles;
use crate::spatial::grid::TileGrid;

/// Where a ray ended up. On a hit, (x, y) is the world-space point where
/// the segment enters the solid cell; on a miss it is the target.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub x: f64,
    pub y: f64,
    pub hit: bool,
}

impl RayHit {
    #[inline]
    fn miss(x: f64, y: f64) -> Self {
        Self { x, y, hit: false }
    }
}

/// Trace from (x0, y0) toward (x1, y1), stopping at the first Wall or
/// Sentry cell. The starting cell is not tested. Step count is bounded
/// by the grid's cell extent, so degenerate inputs (coincident points,
/// far-out targets) always terminate with a miss at the target.
pub fn cast_ray(grid: &TileGrid, x0: f64, y0: f64, x1: f64, y1: f64) -> RayHit {
    let dx = x1 - x0;
    let dy = y1 - y0;
    if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
        return RayHit::miss(x1, y1);
    }

    let cell = grid.cell_size();
    let mut cx = (x0 / cell).floor() as i64;
    let mut cy = (y0 / cell).floor() as i64;

    let step_x: i64 = if dx > 0.0 { 1 } else if dx < 0.0 { -1 } else { 0 };
    let step_y: i64 = if dy > 0.0 { 1 } else if dy < 0.0 { -1 } else { 0 };

    // t is the fraction of the segment travelled; crossing one cell
    // column costs cell / |dx|, one row cell / |dy|.
    let t_delta_x = if dx != 0.0 { cell / dx.abs() } else { f64::INFINITY };
    let t_delta_y = if dy != 0.0 { cell / dy.abs() } else { f64::INFINITY };

    let next_boundary_x = if step_x > 0 { (cx + 1) as f64 * cell } else { cx as f64 * cell };
    let next_boundary_y = if step_y > 0 { (cy + 1) as f64 * cell } else { cy as f64 * cell };
    let mut t_max_x =
        if step_x != 0 { (next_boundary_x - x0).abs() / dx.abs() } else { f64::INFINITY };
    let mut t_max_y =
        if step_y != 0 { (next_boundary_y - y0).abs() / dy.abs() } else { f64::INFINITY };

    let max_steps = (grid.rows() + grid.cols() + 2) as usize;

    for _ in 0..max_steps {
        let t = if t_max_x < t_max_y {
            let t = t_max_x;
            cx += step_x;
            t_max_x += t_delta_x;
            t
        } else {
            let t = t_max_y;
            cy += step_y;
            t_max_y += t_delta_y;
            t
        };

        if t > 1.0 {
            // Entered the target cell without crossing anything solid.
            break;
        }
        if tiles::is_solid(grid.tile_at_cell(cy, cx)) {
            return RayHit { x: x0 + dx * t, y: y0 + dy * t, hit: true };
        }
    }

    RayHit::miss(x1, y1)
}
