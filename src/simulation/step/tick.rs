use crate::domain::tiles::{TILE_EXIT, TILE_HAZARD, TILE_PICKUP};
use crate::systems::sentry;

use super::{commands, WorldCore, WorldEvent, STEP_MS};

/// Edge impacts slower than this stay silent (no spark, no shake).
const IMPACT_SPEED_MIN: f64 = 5.0;

/// One fixed simulation step:
/// posture bias, integrate, then K rounds of (relax every constraint,
/// clamp + classify every point), then the sentry sweep. Bounds and tile
/// effects run inside the K loop so points are tested at their
/// constraint-corrected positions. Deaths and level completion observed
/// while iterating are latched and applied at the end of the step, so
/// the active set is never mutated mid-iteration.
pub(super) fn tick(world: &mut WorldCore) {
    if let Some(player) = &world.player {
        player.apply_posture_bias(&mut world.points);
    }

    let gravity = world.tunables.gravity;
    let damping = world.tunables.damping;
    for point in world.points.iter_mut() {
        point.integrate(gravity, damping);
    }

    let width = world.grid.world_width();
    let height = world.grid.world_height();
    let bounce = world.tunables.bounce;

    let mut pending_death = false;
    let mut pending_complete = false;

    world.bounds_hit_this_tick.clear();
    world.bounds_hit_this_tick.resize(world.points.len(), false);

    for _ in 0..world.tunables.relax_iterations {
        for constraint in &world.constraints {
            constraint.relax(&mut world.points);
        }

        for i in 0..world.points.len() {
            if world.points[i].pinned {
                continue;
            }
            if let Some(impact) = world.points[i].resolve_world_bounds(width, height, damping, bounce)
            {
                if impact.speed > IMPACT_SPEED_MIN && !world.bounds_hit_this_tick[i] {
                    world.bounds_hit_this_tick[i] = true;
                    world.events.push(WorldEvent::BoundsImpact {
                        x: impact.x,
                        y: impact.y,
                        speed: impact.speed,
                    });
                }
            }

            let pos = world.points[i].pos;
            match world.grid.tile_at(pos.x, pos.y) {
                TILE_HAZARD => {
                    if living_player_owns(world, i) {
                        pending_death = true;
                    }
                }
                TILE_EXIT => {
                    if living_player_owns(world, i) {
                        pending_complete = true;
                    }
                }
                TILE_PICKUP => {
                    if world.grid.consume_pickup_at(pos.x, pos.y) {
                        world.score += 1;
                        world.events.push(WorldEvent::Pickup { x: pos.x, y: pos.y });
                    }
                }
                _ => {}
            }
        }
    }

    if !pending_death {
        pending_death = sentry_sees_player(world);
    }

    world.sim_time_ms += STEP_MS;
    world.tick_count += 1;

    if pending_death {
        commands::kill_player(world);
    } else if pending_complete && !world.level_complete {
        world.level_complete = true;
        world.events.push(WorldEvent::LevelComplete);
    }
}

fn living_player_owns(world: &WorldCore, point: usize) -> bool {
    world
        .player
        .as_ref()
        .is_some_and(|p| !p.dead && p.owns_point(point))
}

fn sentry_sees_player(world: &WorldCore) -> bool {
    let Some(player) = world.player.as_ref() else {
        return false;
    };
    if player.dead || world.grid.sentries().is_empty() {
        return false;
    }
    let facing = sentry::facing_at(world.sim_time_ms);
    for &(sx, sy) in world.grid.sentries() {
        for i in player.point_range() {
            let pos = world.points[i].pos;
            if sentry::detects(&world.grid, sx, sy, facing, pos.x, pos.y) {
                return true;
            }
        }
    }
    false
}
