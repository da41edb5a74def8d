use tether_engine::{World, WorldCore};

#[test]
fn smoke_advance_and_drain() {
    let mut world = World::new();
    world.enable_perf_metrics(true);

    for _ in 0..10 {
        world.advance(16.7);
    }

    let stats = world.get_perf_stats();
    assert!(stats.advance_ms() >= 0.0);
    assert_eq!(stats.point_count(), 11);
    assert_eq!(stats.constraint_count(), 15);

    // Render buffers track the active set.
    assert_eq!(world.positions_len(), 22);
    assert_eq!(world.links_len(), 45);
    assert!(!world.positions_ptr().is_null());
    assert!(!world.tiles_ptr().is_null());

    // Signals drain as a JSON array.
    let json = world.drain_events_json();
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert!(parsed.is_array());
}

#[test]
fn smoke_level_reload_and_respawn() {
    let mut world = World::new();
    assert_eq!(world.level_count(), 2);

    world.load_level(1, 48.0).expect("tower level loads");
    assert_eq!(world.rows(), 15);
    assert_eq!(world.cols(), 9);
    assert_eq!(world.cell_size(), 48.0);
    assert!(world.player_alive());

    world.kill_player();
    assert!(!world.player_alive());
    assert_eq!(world.point_count(), 0);

    world.respawn();
    assert!(world.player_alive());
    assert_eq!(world.point_count(), 11);
}

#[test]
fn smoke_out_of_range_level_errors() {
    let mut world = WorldCore::new();
    assert!(world.load_level(99, 60.0).is_err());
    assert!(world.load_level(0, -1.0).is_err());
}
