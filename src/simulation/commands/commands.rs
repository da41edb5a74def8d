use crate::spatial::grid::TileGrid;
use crate::systems::constraint::{Constraint, ConstraintKind};
use crate::systems::grapple::{Grapple, SLOWMO_TIMESCALE};
use crate::systems::point::PointMass;
use crate::systems::ragdoll::{RagdollBody, J_R_HAND};
use crate::systems::raycast::cast_ray;

use super::{WorldCore, WorldEvent};

pub(super) fn load_level(world: &mut WorldCore, index: usize, cell_size: f64) -> Result<(), String> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(format!("cell size must be positive, got {}", cell_size));
    }
    let level = world
        .levels
        .get(index)
        .ok_or_else(|| format!("no level {} (bundle has {})", index, world.levels.len()))?
        .clone();

    world.grid = TileGrid::from_level(&level, cell_size);
    world.level_index = index;
    let [spawn_row, spawn_col] = level.spawn;
    world.spawn_origin = (spawn_col as f64 * cell_size, spawn_row as f64 * cell_size);
    world.level_complete = false;
    world.accumulator_ms = 0.0;

    spawn_player(world);
    Ok(())
}

/// Clear the active arrays and rebuild the body at the spawn origin.
pub(super) fn spawn_player(world: &mut WorldCore) {
    world.points.clear();
    world.constraints.clear();
    let (x, y) = world.spawn_origin;
    world.player = Some(RagdollBody::spawn(&mut world.points, &mut world.constraints, x, y));
}

pub(super) fn fire_grapple(world: &mut WorldCore, aim_x: f64, aim_y: f64) -> bool {
    let hand = match world.player.as_ref() {
        Some(p) if !p.dead => p.joint(J_R_HAND),
        _ => return false,
    };
    // A live rope is replaced, never stacked.
    release_grapple(world);

    let hand_pos = world.points[hand].pos;
    let ray = cast_ray(&world.grid, hand_pos.x, hand_pos.y, aim_x, aim_y);
    if !ray.hit {
        world.events.push(WorldEvent::GrappleFailed);
        return false;
    }

    let anchor = world.points.len();
    world.points.push(PointMass::pinned_at(ray.x, ray.y));
    let rope = world.constraints.len();
    world
        .constraints
        .push(Constraint::new(&world.points, hand, anchor, ConstraintKind::Rope));
    if let Some(player) = world.player.as_mut() {
        player.grapple = Some(Grapple { anchor, rope });
    }

    world.events.push(WorldEvent::GrappleAttached { x: ray.x, y: ray.y });
    // Attaching drops the world into slow motion; the ramp back up runs
    // in `advance` on the raw clock.
    world.timescale = SLOWMO_TIMESCALE;
    true
}

pub(super) fn release_grapple(world: &mut WorldCore) {
    if let Some(player) = world.player.as_mut() {
        if let Some(grapple) = player.grapple.take() {
            // Rope and anchor are always the tail of the active arrays.
            world.constraints.truncate(grapple.rope);
            world.points.truncate(grapple.anchor);
        }
    }
}

pub(super) fn kill_player(world: &mut WorldCore) {
    let Some(player) = world.player.as_mut() else {
        return;
    };
    if player.dead {
        return;
    }
    player.dead = true;
    player.grapple = None;
    let range = player.point_range();

    let last_positions: Vec<[f64; 2]> = world.points[range]
        .iter()
        .map(|p| [p.pos.x, p.pos.y])
        .collect();

    // Detach everything this body owns (the rope and anchor die with it).
    world.points.clear();
    world.constraints.clear();
    world.events.push(WorldEvent::Death { points: last_positions });
}
