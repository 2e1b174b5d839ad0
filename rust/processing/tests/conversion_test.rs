// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON in, JSON out conversion of captured rooms.

use floorplan_lite_processing::{
    CapturedRoom, ConversionConfig, Error, FloorPlanConverter, GeometryDocument,
};
use rustc_hash::FxHashSet;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Column-major transform: rotation about +Y by `quarter_turns` * 90°, then
/// translation to world (x, z).
fn transform(quarter_turns: u8, x: f64, z: f64) -> String {
    let (c, s) = match quarter_turns % 4 {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    };
    format!("[{c},0,{},0, 0,1,0,0, {s},0,{c},0, {x},0,{z},1]", -s)
}

fn wall(id: &str, quarter_turns: u8, x: f64, z: f64, width: f64) -> String {
    format!(
        r#"{{"identifier":"{id}","transform":{},"dimensions":[{width},2.4,0.2]}}"#,
        transform(quarter_turns, x, z)
    )
}

fn feature(id: &str, parent: &str, x: f64, z: f64, width: f64, open: bool) -> String {
    format!(
        r#"{{"identifier":"{id}","parentIdentifier":"{parent}","transform":{},"dimensions":[{width},2.0,0.1],"isOpen":{open}}}"#,
        transform(0, x, z)
    )
}

/// 4m x 3m room whose north wall was captured in two pieces.
fn split_room() -> String {
    let walls = [
        wall("N1", 0, -1.0, 0.0, 2.0),
        wall("N2", 0, 1.0, 0.0, 2.0),
        wall("E", 1, 2.0, 1.5, 3.0),
        wall("S", 0, 0.0, 3.0, 4.0),
        wall("W", 1, -2.0, 1.5, 3.0),
    ];
    let doors = [
        feature("D1", "N2", 0.75, 0.0, 0.5, true),
        feature("D2", "X", 0.0, 3.0, 0.8, false),
    ];
    let windows = [feature("G1", "S", 0.0, 3.0, 1.2, false)];
    format!(
        r#"{{"walls":[{}],"doors":[{}],"windows":[{}]}}"#,
        walls.join(","),
        doors.join(","),
        windows.join(",")
    )
}

fn assert_sound(doc: &GeometryDocument) {
    let ids: FxHashSet<&str> = doc.geometry.points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), doc.geometry.points.len(), "duplicate point ids");
    for wall in &doc.geometry.walls {
        assert!(ids.contains(wall.start.as_str()), "dangling start on {}", wall.id);
        assert!(ids.contains(wall.end.as_str()), "dangling end on {}", wall.id);
    }

    let positions: FxHashSet<(i64, i64)> =
        doc.geometry.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(positions.len(), doc.geometry.points.len(), "duplicate positions");
}

#[test]
fn split_wall_room_converts_to_four_walls() {
    init_tracing();
    let room = CapturedRoom::from_json(&split_room()).unwrap();
    let conversion = FloorPlanConverter::default().convert(&room).unwrap();
    let doc = &conversion.document;

    assert_eq!(doc.geometry.walls.len(), 4);
    assert!(doc.wall("N1 N2").is_some());
    assert!(doc.wall("N1").is_none());
    assert_eq!(conversion.stats.wall_merges, 1);
    assert_sound(doc);
}

#[test]
fn door_in_split_wall_lands_on_merged_wall() {
    let room = CapturedRoom::from_json(&split_room()).unwrap();
    let doc = FloorPlanConverter::default().convert(&room).unwrap().document;

    let north = doc.wall("N1 N2").unwrap();
    let start = doc.point(&north.start).unwrap();
    assert_eq!(north.doors.len(), 1);
    let door = &north.doors[0];
    // Door edge at world x = 0.5m, plan x = -500
    let dx = start.x + 500;
    let dy = start.y;
    assert_eq!(door.offset, (dx * dx + dy * dy) / 10_000);
    assert_eq!(door.width, 500);
    assert_eq!(door.door_type.as_deref(), Some("doorOpening"));
}

#[test]
fn unhosted_door_is_dropped_and_counted() {
    let room = CapturedRoom::from_json(&split_room()).unwrap();
    let conversion = FloorPlanConverter::default().convert(&room).unwrap();

    assert_eq!(conversion.stats.unattached_doors, 1);
    assert_eq!(conversion.stats.unattached_windows, 0);

    let hosted: usize = conversion
        .document
        .geometry
        .walls
        .iter()
        .map(|w| w.doors.len())
        .sum();
    assert_eq!(hosted, 1);
    assert_eq!(conversion.document.wall("S").unwrap().windows.len(), 1);
}

#[test]
fn convert_json_emits_geometry_document() {
    let json = FloorPlanConverter::default()
        .convert_json(&split_room())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let walls = value["geometry"]["walls"].as_array().unwrap();
    assert_eq!(walls.len(), 4);
    for wall in walls {
        assert_eq!(wall["thickness"], 200);
        assert!(wall["start"].is_string());
    }
    let east = walls.iter().find(|w| w["id"] == "E").unwrap();
    assert!(east.get("doors").is_none());
    assert!(east.get("windows").is_none());
    assert!(east.get("openings").is_none());
}

#[test]
fn noisy_endpoints_collapse_onto_one_point() {
    // Second wall starts 8mm away from where the first one ends
    let json = format!(
        r#"{{"walls":[{},{}]}}"#,
        wall("A", 0, -1.0, 0.0, 2.0),
        wall("B", 1, 0.008, 1.5, 3.0)
    );
    let output = FloorPlanConverter::default().convert_json(&json).unwrap();
    let doc: GeometryDocument = serde_json::from_str(&output).unwrap();

    assert_eq!(doc.geometry.points.len(), 3);
    let a = doc.wall("A").unwrap();
    let b = doc.wall("B").unwrap();
    assert!(a.end == b.start || a.end == b.end || a.start == b.start || a.start == b.end);
    assert_sound(&doc);
}

#[test]
fn pruning_drops_interior_points() {
    let room = CapturedRoom::from_json(&split_room()).unwrap();
    let plain = FloorPlanConverter::default().convert(&room).unwrap();
    let config = ConversionConfig::default().with_prune_unreferenced_points(true);
    let pruned = FloorPlanConverter::new(config).convert(&room).unwrap();

    assert_eq!(pruned.stats.points_pruned, 1);
    assert_eq!(
        pruned.document.geometry.points.len(),
        plain.document.geometry.points.len() - 1
    );
    assert_eq!(pruned.document.geometry.points.len(), 4);
    assert_sound(&pruned.document);
}

#[test]
fn malformed_capture_is_an_error() {
    let converter = FloorPlanConverter::default();

    let err = converter.convert_json(r#"{"walls": 3}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidCapture(_)));

    let zero = format!(r#"{{"walls":[{}]}}"#, wall("Z", 0, 0.0, 0.0, 0.0));
    let err = converter.convert_json(&zero).unwrap_err();
    assert!(err.is_malformed_input());
    assert!(err.to_string().contains("wall Z"));
}

#[test]
fn rooms_convert_in_parallel_in_order() {
    let rooms: Vec<CapturedRoom> = (0..8)
        .map(|i| {
            let id = format!("R{i}");
            let json = format!(r#"{{"walls":[{}]}}"#, wall(&id, 0, i as f64, 0.0, 1.0));
            CapturedRoom::from_json(&json).unwrap()
        })
        .collect();

    let results = FloorPlanConverter::default().convert_rooms(&rooms);

    for (i, result) in results.iter().enumerate() {
        let doc = &result.as_ref().unwrap().document;
        assert_eq!(doc.geometry.walls[0].id, format!("R{i}"));
    }
}
