use super::*;
use crate::domain::tiles::{
    TILE_EMPTY, TILE_EXIT, TILE_HAZARD, TILE_PICKUP, TILE_SENTRY, TILE_WALL,
};
use crate::spatial::grid::TileGrid;
use crate::systems::constraint::{Constraint, ConstraintKind};
use crate::systems::grapple::SLOWMO_TIMESCALE;
use crate::systems::point::PointMass;
use crate::systems::ragdoll::{JOINT_COUNT, J_R_HAND, LINK_COUNT};
use crate::systems::raycast::cast_ray;
use crate::systems::sentry;

/// Empty square world with no player, for hand-built scenarios.
fn test_world(rows: u32, cols: u32) -> WorldCore {
    let mut world = WorldCore::new();
    world.points.clear();
    world.constraints.clear();
    world.player = None;
    world.grid = TileGrid::empty(rows, cols, 60.0);
    world
}

fn spawn_at(world: &mut WorldCore, x: f64, y: f64) {
    world.spawn_origin = (x, y);
    world.respawn();
}

#[test]
fn new_world_spawns_the_player_on_the_builtin_level() {
    let world = WorldCore::new();
    assert_eq!(world.level_count(), 2);
    assert_eq!(world.rows(), 11);
    assert_eq!(world.cols(), 15);
    assert!(world.player_alive());
    assert_eq!(world.point_count(), JOINT_COUNT);
    assert_eq!(world.constraint_count(), LINK_COUNT);
    assert_eq!(world.timescale(), 1.0);
}

#[test]
fn integrate_and_bounds_skip_pinned_points() {
    let mut p = PointMass::pinned_at(10.0, 20.0);
    p.integrate(0.5, 0.99);
    assert_eq!(p.pos.x, 10.0);
    assert_eq!(p.pos.y, 20.0);
    // Even outside the world rectangle a pinned point stays put.
    assert!(p.resolve_world_bounds(5.0, 5.0, 0.99, 0.5).is_none());
    assert_eq!(p.pos.x, 10.0);
}

#[test]
fn pinned_anchor_survives_many_ticks_unmoved() {
    let mut world = test_world(10, 10);
    world.points.push(PointMass::pinned_at(300.0, 100.0));
    world.points.push(PointMass::new(300.0, 160.0));
    world
        .constraints
        .push(Constraint::with_rest_length(0, 1, 40.0, ConstraintKind::Rope));
    for _ in 0..120 {
        world.tick();
    }
    assert_eq!(world.points[0].pos.x, 300.0);
    assert_eq!(world.points[0].pos.y, 100.0);
    // The free end settles hanging near the rope's rest length.
    let dist = world.points[0].pos.distance(world.points[1].pos);
    assert!((dist - 40.0).abs() < 5.0, "hanging distance {} should be near 40", dist);
}

#[test]
fn relax_projects_both_free_endpoints_to_rest() {
    let mut points = vec![PointMass::new(0.0, 0.0), PointMass::new(10.0, 0.0)];
    let c = Constraint::with_rest_length(0, 1, 6.0, ConstraintKind::Structural);
    c.relax(&mut points);
    assert!((points[0].pos.x - 2.0).abs() < 1e-12);
    assert!((points[1].pos.x - 8.0).abs() < 1e-12);
}

#[test]
fn relax_gives_the_full_correction_to_the_free_endpoint() {
    let mut points = vec![PointMass::pinned_at(0.0, 0.0), PointMass::new(10.0, 0.0)];
    let c = Constraint::with_rest_length(0, 1, 6.0, ConstraintKind::Rope);
    c.relax(&mut points);
    assert_eq!(points[0].pos.x, 0.0);
    assert!((points[1].pos.x - 6.0).abs() < 1e-12);
}

#[test]
fn relax_skips_coincident_endpoints() {
    let mut points = vec![PointMass::new(5.0, 5.0), PointMass::new(5.0, 5.0)];
    let c = Constraint::with_rest_length(0, 1, 4.0, ConstraintKind::Structural);
    c.relax(&mut points);
    assert_eq!(points[0].pos, points[1].pos);
    assert!(points[0].pos.x.is_finite());
}

#[test]
fn chain_relaxation_converges_with_iterations() {
    let mut points = vec![
        PointMass::pinned_at(0.0, 0.0),
        PointMass::new(30.0, 0.0),
        PointMass::new(60.0, 0.0),
    ];
    let constraints = vec![
        Constraint::with_rest_length(0, 1, 10.0, ConstraintKind::Structural),
        Constraint::with_rest_length(1, 2, 10.0, ConstraintKind::Structural),
    ];
    let mut last_err = f64::MAX;
    for _ in 0..50 {
        for c in &constraints {
            c.relax(&mut points);
        }
        let err = (points[0].pos.distance(points[1].pos) - 10.0).abs()
            + (points[1].pos.distance(points[2].pos) - 10.0).abs();
        assert!(err <= last_err + 1e-9, "relaxation error must not grow");
        last_err = err;
    }
    assert!(last_err < 1e-3, "chain should be within epsilon of rest, err {}", last_err);
}

#[test]
fn raycast_coincident_endpoints_is_an_immediate_miss() {
    let grid = TileGrid::empty(4, 4, 10.0);
    let hit = cast_ray(&grid, 7.0, 7.0, 7.0, 7.0);
    assert!(!hit.hit);
    assert_eq!(hit.x, 7.0);
    assert_eq!(hit.y, 7.0);
}

#[test]
fn raycast_stops_at_the_first_wall() {
    let mut grid = TileGrid::empty(1, 3, 10.0);
    grid.set_tile(0, 1, TILE_WALL);
    let hit = cast_ray(&grid, 5.0, 5.0, 25.0, 5.0);
    assert!(hit.hit);
    assert!((hit.x - 10.0).abs() < 1e-9, "entry point {} should be the wall boundary", hit.x);
    assert!((hit.y - 5.0).abs() < 1e-9);
}

#[test]
fn raycast_reaches_the_target_through_empty_cells() {
    let grid = TileGrid::empty(1, 3, 10.0);
    let hit = cast_ray(&grid, 5.0, 5.0, 25.0, 5.0);
    assert!(!hit.hit);
    assert_eq!(hit.x, 25.0);
    assert_eq!(hit.y, 5.0);
}

#[test]
fn raycast_terminates_for_far_out_targets() {
    let grid = TileGrid::empty(4, 4, 10.0);
    let hit = cast_ray(&grid, 5.0, 5.0, 1e6, 5.0);
    assert!(!hit.hit);
    assert_eq!(hit.x, 1e6);
}

#[test]
fn pickup_consumption_is_exactly_once() {
    let mut grid = TileGrid::empty(2, 2, 10.0);
    grid.set_tile(1, 1, TILE_PICKUP);
    assert!(grid.consume_pickup_at(15.0, 15.0));
    assert!(!grid.consume_pickup_at(15.0, 15.0));
    assert_eq!(grid.tile_at(15.0, 15.0), TILE_EMPTY);
}

#[test]
fn hazard_row_kills_the_body_once() {
    let mut world = test_world(10, 10);
    for col in 0..10 {
        world.grid.set_tile(6, col, TILE_HAZARD);
    }
    spawn_at(&mut world, 120.0, 120.0);

    for _ in 0..600 {
        world.tick();
        if !world.player_alive() {
            break;
        }
    }
    assert!(!world.player_alive(), "gravity should carry the body into the hazard row");
    assert_eq!(world.point_count(), 0);
    assert_eq!(world.constraint_count(), 0);

    let events = world.take_events();
    let deaths = events.iter().filter(|e| matches!(e, WorldEvent::Death { .. })).count();
    assert_eq!(deaths, 1);

    // A dead body produces nothing further.
    for _ in 0..10 {
        world.tick();
    }
    assert!(world.take_events().is_empty());
}

#[test]
fn grapple_attaches_at_the_wall_not_the_aim_point() {
    let mut world = test_world(10, 10);
    for row in 0..10 {
        world.grid.set_tile(row, 8, TILE_WALL);
    }
    spawn_at(&mut world, 120.0, 120.0);

    let hand = world.player.as_ref().expect("player").joint(J_R_HAND);
    let hand_pos = world.points[hand].pos;
    assert!(world.fire_grapple(1000.0, hand_pos.y));

    assert_eq!(world.constraint_count(), LINK_COUNT + 1);
    let rope = world.constraints.last().expect("rope");
    assert_eq!(rope.kind, ConstraintKind::Rope);
    // The wall column starts at x = 480; rest length is hand to entry
    // point, not hand to aim point.
    let expected = 480.0 - hand_pos.x;
    assert!(
        (rope.rest_length - expected).abs() < 1e-9,
        "rest length {} should be {}",
        rope.rest_length,
        expected
    );

    let events = world.take_events();
    assert!(events.iter().any(|e| matches!(e, WorldEvent::GrappleAttached { .. })));
    assert_eq!(world.timescale(), SLOWMO_TIMESCALE);
}

#[test]
fn grapple_into_open_space_fails() {
    let mut world = test_world(10, 10);
    spawn_at(&mut world, 120.0, 120.0);
    assert!(!world.fire_grapple(400.0, 120.0));
    assert_eq!(world.point_count(), JOINT_COUNT);
    let events = world.take_events();
    assert!(events.iter().any(|e| matches!(e, WorldEvent::GrappleFailed)));
    assert_eq!(world.timescale(), 1.0);
}

#[test]
fn refiring_the_grapple_replaces_the_rope() {
    let mut world = test_world(10, 10);
    for row in 0..10 {
        world.grid.set_tile(row, 8, TILE_WALL);
    }
    spawn_at(&mut world, 120.0, 120.0);

    assert!(world.fire_grapple(1000.0, 160.0));
    assert_eq!(world.point_count(), JOINT_COUNT + 1);
    assert_eq!(world.constraint_count(), LINK_COUNT + 1);

    assert!(world.fire_grapple(1000.0, 200.0));
    assert_eq!(world.point_count(), JOINT_COUNT + 1);
    assert_eq!(world.constraint_count(), LINK_COUNT + 1);

    world.release_grapple();
    assert_eq!(world.point_count(), JOINT_COUNT);
    assert_eq!(world.constraint_count(), LINK_COUNT);

    // Releasing with no rope out is a no-op.
    world.release_grapple();
    assert_eq!(world.point_count(), JOINT_COUNT);
}

#[test]
fn timescale_ramps_back_to_exactly_one() {
    let mut world = test_world(10, 10);
    for row in 0..10 {
        world.grid.set_tile(row, 9, TILE_WALL);
    }
    spawn_at(&mut world, 120.0, 120.0);
    assert!(world.fire_grapple(1000.0, 160.0));
    assert_eq!(world.timescale(), SLOWMO_TIMESCALE);

    let mut last = world.timescale();
    let mut recovered = false;
    for _ in 0..200 {
        world.advance(16.0);
        let ts = world.timescale();
        assert!(ts >= last, "ramp must be monotonic");
        assert!(ts <= 1.0, "ramp must never overshoot");
        last = ts;
        if ts == 1.0 {
            recovered = true;
            break;
        }
    }
    assert!(recovered, "timescale should recover within a bounded number of frames");
}

#[test]
fn world_edge_bounce_scales_velocity() {
    let mut p = PointMass::new(95.0, 50.0);
    p.pos.x = 105.0; // incoming velocity: 10 along +x
    let impact = p
        .resolve_world_bounds(100.0, 100.0, 1.0, 0.5)
        .expect("moving past the edge must collide");
    assert!((impact.speed - 10.0).abs() < 1e-12);
    assert!((p.pos.x - 100.0).abs() < 1e-12);
    let v = p.velocity();
    assert!((v.x + 5.0).abs() < 1e-12, "outgoing velocity {} should be -5", v.x);
    assert_eq!(v.y, 0.0);
}

#[test]
fn advance_converts_wall_clock_to_fixed_ticks() {
    let mut world = test_world(10, 10);
    spawn_at(&mut world, 120.0, 120.0);

    world.advance(8.0);
    assert_eq!(world.tick_count(), 0); // under one step
    assert!(world.interpolation_alpha() < 1.0);

    world.advance(9.0);
    assert_eq!(world.tick_count(), 1); // 17 ms accumulated

    world.advance(1000.0); // clamped to 100 ms = six steps
    assert_eq!(world.tick_count(), 7);
}

#[test]
fn exit_signals_level_complete_once() {
    let mut world = test_world(10, 10);
    world.grid.set_tile(2, 2, TILE_EXIT);
    spawn_at(&mut world, 120.0, 120.0); // head starts inside the exit cell

    world.tick();
    assert!(world.level_complete());
    let events = world.take_events();
    let completes = events.iter().filter(|e| matches!(e, WorldEvent::LevelComplete)).count();
    assert_eq!(completes, 1);

    for _ in 0..5 {
        world.tick();
    }
    assert!(world
        .take_events()
        .iter()
        .all(|e| !matches!(e, WorldEvent::LevelComplete)));
}

#[test]
fn pickups_bump_score_and_fire_once() {
    let mut world = test_world(10, 10);
    world.grid.set_tile(3, 2, TILE_PICKUP); // directly under the spawn cell
    spawn_at(&mut world, 120.0, 120.0);

    for _ in 0..120 {
        world.tick();
    }
    assert_eq!(world.score(), 1);
    let events = world.take_events();
    let pickups = events.iter().filter(|e| matches!(e, WorldEvent::Pickup { .. })).count();
    assert_eq!(pickups, 1);
}

#[test]
fn sentry_cone_detects_below_but_not_through_walls() {
    let mut grid = TileGrid::empty(6, 6, 60.0);
    grid.set_tile(1, 2, TILE_SENTRY);
    let (sx, sy) = grid.sentries()[0];
    let facing = std::f64::consts::FRAC_PI_2; // straight down

    assert!(sentry::detects(&grid, sx, sy, facing, sx, sy + 100.0));
    // Directly above: outside the cone.
    assert!(!sentry::detects(&grid, sx, sy, facing, sx, sy - 100.0));
    // Below but past the reach.
    assert!(!sentry::detects(&grid, sx, sy, facing, sx, sy + 500.0));

    // A wall between sentry and point blocks the sightline.
    grid.set_tile(3, 2, TILE_WALL);
    assert!(!sentry::detects(&grid, sx, sy, facing, sx, sy + 140.0));
}

#[test]
fn sentry_detection_kills_the_body() {
    let mut world = test_world(10, 10);
    world.grid.set_tile(1, 2, TILE_SENTRY); // center (150, 90), cone sweeping down
    spawn_at(&mut world, 120.0, 120.0);

    for _ in 0..60 {
        world.tick();
        if !world.player_alive() {
            break;
        }
    }
    assert!(!world.player_alive());
    let events = world.take_events();
    assert!(events.iter().any(|e| matches!(e, WorldEvent::Death { .. })));
}

#[test]
fn events_serialize_with_type_tags() {
    let mut world = test_world(10, 10);
    spawn_at(&mut world, 120.0, 120.0);
    world.kill_player();
    let json = world.drain_events_json();
    assert!(json.starts_with('['));
    assert!(json.contains("\"type\":\"death\""));
    // Draining empties the queue.
    assert_eq!(world.drain_events_json(), "[]");
}

#[test]
fn render_buffers_mirror_the_active_set() {
    let mut world = test_world(10, 10);
    spawn_at(&mut world, 120.0, 120.0);
    world.advance(17.0);
    assert_eq!(world.positions_len(), JOINT_COUNT * 2);
    assert_eq!(world.links_len(), LINK_COUNT * 3);
}
