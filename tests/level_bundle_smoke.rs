use tether_engine::domain::level::LevelRegistry;
use tether_engine::tiles::{TILE_EMPTY, TILE_WALL};

#[test]
fn builtin_registry_has_both_shipped_maps() {
    let registry = LevelRegistry::builtin();
    assert_eq!(registry.len(), 2);

    let lobby = registry.get(0).expect("lobby");
    assert_eq!(lobby.rows(), 11);
    assert_eq!(lobby.cols(), 15);
    // Outer ring is walled in.
    assert!(lobby.tiles[0].iter().all(|&t| t == TILE_WALL));

    let tower = registry.get(1).expect("tower");
    assert_eq!(tower.rows(), 15);
    assert_eq!(tower.cols(), 9);
}

#[test]
fn bundle_json_parses_and_validates() {
    let json = r#"{
        "levels": [
            {
                "name": "test room",
                "tiles": [
                    [1, 1, 1, 1],
                    [1, 0, 3, 1],
                    [1, 0, 4, 1],
                    [1, 1, 1, 1]
                ],
                "spawn": [1, 1]
            }
        ]
    }"#;
    let registry = LevelRegistry::from_bundle_json(json).expect("bundle should parse");
    assert_eq!(registry.len(), 1);
    let level = registry.get(0).expect("level 0");
    assert_eq!(level.tiles[1][1], TILE_EMPTY);
    assert_eq!(level.spawn, [1, 1]);
}

#[test]
fn ragged_rows_are_rejected() {
    let json = r#"{"levels": [{"tiles": [[0, 0], [0]], "spawn": [0, 0]}]}"#;
    let err = LevelRegistry::from_bundle_json(json).expect_err("ragged grid must fail");
    assert!(err.contains("row 1"));
}

#[test]
fn unknown_tile_ids_are_rejected() {
    let json = r#"{"levels": [{"tiles": [[0, 9]], "spawn": [0, 0]}]}"#;
    assert!(LevelRegistry::from_bundle_json(json).is_err());
}

#[test]
fn out_of_grid_spawn_is_rejected() {
    let json = r#"{"levels": [{"tiles": [[0, 0]], "spawn": [5, 0]}]}"#;
    assert!(LevelRegistry::from_bundle_json(json).is_err());
}

#[test]
fn empty_bundle_is_rejected() {
    assert!(LevelRegistry::from_bundle_json(r#"{"levels": []}"#).is_err());
}
